//! Name forms: which attributes may name entries of a structural class.

use crate::config::SchemaOptions;
use crate::error::{DecodeError, DecodeResult};
use crate::schema::attribute_type::AttributeType;
use crate::schema::object_class::ObjectClass;
use crate::schema::parser::DefinitionReader;
use crate::schema::types::{ElementInfo, ElementKind, write_oids};
use std::fmt;
use std::sync::Arc;

/// A name form as declared.
#[derive(Debug, Clone)]
pub struct RawNameForm {
    pub(crate) info: ElementInfo,
    pub(crate) structural_class: String,
    pub(crate) required: Vec<String>,
    pub(crate) optional: Vec<String>,
}

impl RawNameForm {
    /// Parse a `nameForms` definition. `OC` and a non-empty `MUST` are mandatory.
    pub fn parse(definition: &str, options: &SchemaOptions) -> DecodeResult<Self> {
        let lenient = options.allow_malformed_names_and_options;
        let mut reader = DefinitionReader::open(ElementKind::NameForm, definition)?;
        let mut info = ElementInfo::new(reader.read_oid(lenient)?);
        let mut structural_class = None;
        let mut required = Vec::new();
        let mut optional = Vec::new();

        while let Some(token) = reader.next_keyword()? {
            if reader.read_common(&token, &mut info, options)? {
                continue;
            }
            match token.to_ascii_lowercase().as_str() {
                "oc" => structural_class = Some(reader.read_oid(lenient)?),
                "must" => required = reader.read_oids(lenient)?,
                "may" => optional = reader.read_oids(lenient)?,
                _ => return Err(reader.illegal_token(&token)),
            }
        }

        let missing = |keyword: &str| DecodeError::MissingKeyword {
            kind: ElementKind::NameForm,
            oid: info.oid().to_string(),
            keyword: keyword.to_string(),
        };
        let structural_class = structural_class.ok_or_else(|| missing("OC"))?;
        if required.is_empty() {
            return Err(missing("MUST"));
        }

        info.set_definition(definition.trim());
        Ok(Self {
            info,
            structural_class,
            required,
            optional,
        })
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn oid(&self) -> &str {
        self.info.oid()
    }
}

impl fmt::Display for RawNameForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.info.write_header(f, self.info.oid())?;
        write!(f, " OC {}", self.structural_class)?;
        write_oids(f, "MUST", &self.required)?;
        write_oids(f, "MAY", &self.optional)?;
        self.info.write_trailer(f)
    }
}

/// A resolved name form.
#[derive(Debug, Clone)]
pub struct NameForm {
    pub(crate) raw: RawNameForm,
    pub(crate) structural_class: Arc<ObjectClass>,
    pub(crate) required: Vec<Arc<AttributeType>>,
    pub(crate) optional: Vec<Arc<AttributeType>>,
}

impl NameForm {
    pub fn info(&self) -> &ElementInfo {
        &self.raw.info
    }

    pub fn oid(&self) -> &str {
        self.raw.info.oid()
    }

    pub fn names(&self) -> &[String] {
        self.raw.info.names()
    }

    pub fn name_or_oid(&self) -> &str {
        self.raw.info.name_or_oid()
    }

    pub fn structural_class(&self) -> &Arc<ObjectClass> {
        &self.structural_class
    }

    pub fn required_attributes(&self) -> &[Arc<AttributeType>] {
        &self.required
    }

    pub fn optional_attributes(&self) -> &[Arc<AttributeType>] {
        &self.optional
    }

    pub fn is_required(&self, attribute: &AttributeType) -> bool {
        self.required.iter().any(|at| at.oid() == attribute.oid())
    }

    pub fn is_optional(&self, attribute: &AttributeType) -> bool {
        self.optional.iter().any(|at| at.oid() == attribute.oid())
    }

    pub fn raw(&self) -> &RawNameForm {
        &self.raw
    }

    pub fn definition(&self) -> &str {
        self.raw.info.definition_or_else(|| self.raw.to_string())
    }
}

impl fmt::Display for NameForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_form_requirements() {
        let options = SchemaOptions::default();
        let form = RawNameForm::parse(
            "( 1.2.3 NAME 'personForm' OC person MUST cn MAY uid )",
            &options,
        )
        .expect("valid definition");
        assert_eq!(form.structural_class, "person");
        assert_eq!(form.required, vec!["cn"]);

        let no_oc = RawNameForm::parse("( 1.2.3 MUST cn )", &options).unwrap_err();
        assert!(matches!(no_oc, DecodeError::MissingKeyword { ref keyword, .. } if keyword == "OC"));

        let no_must = RawNameForm::parse("( 1.2.3 OC person )", &options).unwrap_err();
        assert!(matches!(no_must, DecodeError::MissingKeyword { ref keyword, .. } if keyword == "MUST"));
    }
}
