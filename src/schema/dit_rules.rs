//! DIT content rules and DIT structure rules.
//!
//! A content rule is identified by the OID of the structural class it governs.
//! A structure rule is identified by an integer rule ID rather than an OID.

use crate::config::SchemaOptions;
use crate::error::{DecodeError, DecodeResult};
use crate::schema::attribute_type::AttributeType;
use crate::schema::name_form::NameForm;
use crate::schema::object_class::ObjectClass;
use crate::schema::parser::DefinitionReader;
use crate::schema::types::{ElementInfo, ElementKind, write_oids};
use std::fmt;
use std::sync::Arc;

/// A DIT content rule as declared.
#[derive(Debug, Clone)]
pub struct RawDitContentRule {
    pub(crate) info: ElementInfo,
    pub(crate) auxiliary: Vec<String>,
    pub(crate) required: Vec<String>,
    pub(crate) optional: Vec<String>,
    pub(crate) prohibited: Vec<String>,
}

impl RawDitContentRule {
    /// Parse a `dITContentRules` definition.
    pub fn parse(definition: &str, options: &SchemaOptions) -> DecodeResult<Self> {
        let lenient = options.allow_malformed_names_and_options;
        let mut reader = DefinitionReader::open(ElementKind::DitContentRule, definition)?;
        let mut rule = Self {
            info: ElementInfo::new(reader.read_oid(lenient)?),
            auxiliary: Vec::new(),
            required: Vec::new(),
            optional: Vec::new(),
            prohibited: Vec::new(),
        };

        while let Some(token) = reader.next_keyword()? {
            if reader.read_common(&token, &mut rule.info, options)? {
                continue;
            }
            match token.to_ascii_lowercase().as_str() {
                "aux" => rule.auxiliary = reader.read_oids(lenient)?,
                "must" => rule.required = reader.read_oids(lenient)?,
                "may" => rule.optional = reader.read_oids(lenient)?,
                "not" => rule.prohibited = reader.read_oids(lenient)?,
                _ => return Err(reader.illegal_token(&token)),
            }
        }

        rule.info.set_definition(definition.trim());
        Ok(rule)
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    /// The OID of the governed structural class.
    pub fn oid(&self) -> &str {
        self.info.oid()
    }
}

impl fmt::Display for RawDitContentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.info.write_header(f, self.info.oid())?;
        write_oids(f, "AUX", &self.auxiliary)?;
        write_oids(f, "MUST", &self.required)?;
        write_oids(f, "MAY", &self.optional)?;
        write_oids(f, "NOT", &self.prohibited)?;
        self.info.write_trailer(f)
    }
}

/// A resolved DIT content rule.
#[derive(Debug, Clone)]
pub struct DitContentRule {
    pub(crate) raw: RawDitContentRule,
    pub(crate) structural_class: Arc<ObjectClass>,
    pub(crate) auxiliary: Vec<Arc<ObjectClass>>,
    pub(crate) required: Vec<Arc<AttributeType>>,
    pub(crate) optional: Vec<Arc<AttributeType>>,
    pub(crate) prohibited: Vec<Arc<AttributeType>>,
}

impl DitContentRule {
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

    pub fn auxiliary_classes(&self) -> &[Arc<ObjectClass>] {
        &self.auxiliary
    }

    pub fn required_attributes(&self) -> &[Arc<AttributeType>] {
        &self.required
    }

    pub fn optional_attributes(&self) -> &[Arc<AttributeType>] {
        &self.optional
    }

    pub fn prohibited_attributes(&self) -> &[Arc<AttributeType>] {
        &self.prohibited
    }

    pub fn is_prohibited(&self, attribute: &AttributeType) -> bool {
        self.prohibited.iter().any(|at| at.oid() == attribute.oid())
    }

    pub fn raw(&self) -> &RawDitContentRule {
        &self.raw
    }

    pub fn definition(&self) -> &str {
        self.raw.info.definition_or_else(|| self.raw.to_string())
    }
}

impl fmt::Display for DitContentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

/// A DIT structure rule as declared.
#[derive(Debug, Clone)]
pub struct RawDitStructureRule {
    pub(crate) info: ElementInfo,
    pub(crate) rule_id: u32,
    pub(crate) name_form: String,
    pub(crate) superiors: Vec<u32>,
}

impl RawDitStructureRule {
    /// Parse a `dITStructureRules` definition. `FORM` is mandatory.
    pub fn parse(definition: &str, options: &SchemaOptions) -> DecodeResult<Self> {
        let lenient = options.allow_malformed_names_and_options;
        let mut reader = DefinitionReader::open(ElementKind::DitStructureRule, definition)?;
        let rule_id = reader.read_rule_id()?;
        let mut info = ElementInfo::new(rule_id.to_string());
        let mut name_form = None;
        let mut superiors = Vec::new();

        while let Some(token) = reader.next_keyword()? {
            if reader.read_common(&token, &mut info, options)? {
                continue;
            }
            match token.to_ascii_lowercase().as_str() {
                "form" => name_form = Some(reader.read_oid(lenient)?),
                "sup" => superiors = reader.read_rule_ids()?,
                _ => return Err(reader.illegal_token(&token)),
            }
        }

        let name_form = name_form.ok_or_else(|| DecodeError::MissingKeyword {
            kind: ElementKind::DitStructureRule,
            oid: rule_id.to_string(),
            keyword: "FORM".to_string(),
        })?;
        info.set_definition(definition.trim());
        Ok(Self {
            info,
            rule_id,
            name_form,
            superiors,
        })
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn rule_id(&self) -> u32 {
        self.rule_id
    }
}

impl fmt::Display for RawDitStructureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.info.write_header(f, &self.rule_id.to_string())?;
        write!(f, " FORM {}", self.name_form)?;
        match self.superiors.as_slice() {
            [] => {}
            [single] => write!(f, " SUP {}", single)?,
            ids => {
                let ids: Vec<String> = ids.iter().map(u32::to_string).collect();
                write!(f, " SUP ( {} )", ids.join(" "))?;
            }
        }
        self.info.write_trailer(f)
    }
}

/// A resolved DIT structure rule.
#[derive(Debug, Clone)]
pub struct DitStructureRule {
    pub(crate) raw: RawDitStructureRule,
    pub(crate) name_form: Arc<NameForm>,
    pub(crate) superiors: Vec<Arc<DitStructureRule>>,
}

impl DitStructureRule {
    pub fn info(&self) -> &ElementInfo {
        &self.raw.info
    }

    pub fn rule_id(&self) -> u32 {
        self.raw.rule_id
    }

    pub fn names(&self) -> &[String] {
        self.raw.info.names()
    }

    /// The first name, falling back to the rule ID.
    pub fn name_or_rule_id(&self) -> &str {
        self.raw.info.name_or_oid()
    }

    pub fn name_form(&self) -> &Arc<NameForm> {
        &self.name_form
    }

    pub fn superior_rules(&self) -> &[Arc<DitStructureRule>] {
        &self.superiors
    }

    pub fn raw(&self) -> &RawDitStructureRule {
        &self.raw
    }

    pub fn definition(&self) -> &str {
        self.raw.info.definition_or_else(|| self.raw.to_string())
    }
}

impl fmt::Display for DitStructureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_rule_lists() {
        let rule = RawDitContentRule::parse(
            "( 2.5.6.6 NAME 'personRule' AUX ( posixAccount $ shadowAccount ) NOT description )",
            &SchemaOptions::default(),
        )
        .expect("valid definition");
        assert_eq!(rule.auxiliary.len(), 2);
        assert_eq!(rule.prohibited, vec!["description"]);
        assert_eq!(
            rule.to_string(),
            "( 2.5.6.6 NAME 'personRule' AUX ( posixAccount $ shadowAccount ) NOT description )"
        );
    }

    #[test]
    fn test_structure_rule() {
        let options = SchemaOptions::default();
        let rule = RawDitStructureRule::parse("( 2 NAME 'child' FORM childForm SUP ( 1 3 ) )", &options)
            .expect("valid definition");
        assert_eq!(rule.rule_id, 2);
        assert_eq!(rule.superiors, vec![1, 3]);
        assert_eq!(rule.to_string(), "( 2 NAME 'child' FORM childForm SUP ( 1 3 ) )");

        let error = RawDitStructureRule::parse("( 2 NAME 'child' )", &options).unwrap_err();
        assert!(matches!(error, DecodeError::MissingKeyword { .. }));
    }
}
