//! Object classes.
//!
//! After resolution an [`ObjectClass`] holds its superiors, the attribute types it
//! declares itself, and the merged sets including everything inherited. The
//! special `extensibleObject` class additionally allows every user attribute.

use crate::config::SchemaOptions;
use crate::error::DecodeResult;
use crate::schema::attribute_type::AttributeType;
use crate::schema::constants::{EXTENSIBLE_OBJECT_OBJECTCLASS_OID, TOP_OBJECTCLASS_OID};
use crate::schema::parser::DefinitionReader;
use crate::schema::types::{ElementInfo, ElementKind, write_oids};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// RFC 4512 object class kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectClassKind {
    Abstract,
    #[default]
    Structural,
    Auxiliary,
}

impl ObjectClassKind {
    /// Whether a class of this kind may derive from a class of kind `superior`.
    pub fn may_derive_from(&self, superior: ObjectClassKind) -> bool {
        match self {
            ObjectClassKind::Abstract => superior == ObjectClassKind::Abstract,
            ObjectClassKind::Auxiliary => superior != ObjectClassKind::Structural,
            ObjectClassKind::Structural => superior != ObjectClassKind::Auxiliary,
        }
    }
}

impl fmt::Display for ObjectClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectClassKind::Abstract => "ABSTRACT",
            ObjectClassKind::Structural => "STRUCTURAL",
            ObjectClassKind::Auxiliary => "AUXILIARY",
        })
    }
}

/// An object class as declared.
#[derive(Debug, Clone)]
pub struct RawObjectClass {
    pub(crate) info: ElementInfo,
    pub(crate) superiors: Vec<String>,
    pub(crate) kind: ObjectClassKind,
    /// Whether the kind keyword was present; absent means STRUCTURAL.
    pub(crate) kind_declared: bool,
    pub(crate) required: Vec<String>,
    pub(crate) optional: Vec<String>,
}

impl RawObjectClass {
    pub(crate) fn new(oid: impl Into<String>) -> Self {
        Self {
            info: ElementInfo::new(oid),
            superiors: Vec::new(),
            kind: ObjectClassKind::Structural,
            kind_declared: false,
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// Parse an `objectClasses` definition.
    pub fn parse(definition: &str, options: &SchemaOptions) -> DecodeResult<Self> {
        let lenient = options.allow_malformed_names_and_options;
        let mut reader = DefinitionReader::open(ElementKind::ObjectClass, definition)?;
        let mut oc = Self::new(reader.read_oid(lenient)?);

        while let Some(token) = reader.next_keyword()? {
            if reader.read_common(&token, &mut oc.info, options)? {
                continue;
            }
            match token.to_ascii_lowercase().as_str() {
                "sup" => oc.superiors = reader.read_oids(lenient)?,
                "abstract" => oc.set_kind(ObjectClassKind::Abstract),
                "structural" => oc.set_kind(ObjectClassKind::Structural),
                "auxiliary" => oc.set_kind(ObjectClassKind::Auxiliary),
                "must" => oc.required = reader.read_oids(lenient)?,
                "may" => oc.optional = reader.read_oids(lenient)?,
                _ => return Err(reader.illegal_token(&token)),
            }
        }

        oc.info.set_definition(definition.trim());
        Ok(oc)
    }

    fn set_kind(&mut self, kind: ObjectClassKind) {
        self.kind = kind;
        self.kind_declared = true;
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn oid(&self) -> &str {
        self.info.oid()
    }
}

impl fmt::Display for RawObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.info.write_header(f, self.info.oid())?;
        write_oids(f, "SUP", &self.superiors)?;
        if self.kind_declared {
            write!(f, " {}", self.kind)?;
        }
        write_oids(f, "MUST", &self.required)?;
        write_oids(f, "MAY", &self.optional)?;
        self.info.write_trailer(f)
    }
}

/// A resolved object class.
#[derive(Debug, Clone)]
pub struct ObjectClass {
    pub(crate) raw: RawObjectClass,
    pub(crate) superiors: Vec<Arc<ObjectClass>>,
    pub(crate) declared_required: Vec<Arc<AttributeType>>,
    pub(crate) declared_optional: Vec<Arc<AttributeType>>,
    pub(crate) required: Vec<Arc<AttributeType>>,
    pub(crate) optional: Vec<Arc<AttributeType>>,
    pub(crate) descends_from_top: bool,
}

impl ObjectClass {
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

    pub fn has_name_or_oid(&self, value: &str) -> bool {
        self.raw.info.has_name_or_oid(value)
    }

    pub fn description(&self) -> &str {
        self.raw.info.description()
    }

    pub fn is_obsolete(&self) -> bool {
        self.raw.info.is_obsolete()
    }

    pub fn kind(&self) -> ObjectClassKind {
        self.raw.kind
    }

    pub fn superior_classes(&self) -> &[Arc<ObjectClass>] {
        &self.superiors
    }

    /// Required attribute types declared by this class itself.
    pub fn declared_required_attributes(&self) -> &[Arc<AttributeType>] {
        &self.declared_required
    }

    /// Optional attribute types declared by this class itself.
    pub fn declared_optional_attributes(&self) -> &[Arc<AttributeType>] {
        &self.declared_optional
    }

    /// Required attribute types including those inherited from superiors.
    pub fn required_attributes(&self) -> &[Arc<AttributeType>] {
        &self.required
    }

    /// Optional attribute types including those inherited from superiors.
    ///
    /// For `extensibleObject` this does not list the implicitly allowed user
    /// attributes; use [`is_optional`](Self::is_optional) to test membership.
    pub fn optional_attributes(&self) -> &[Arc<AttributeType>] {
        &self.optional
    }

    pub fn is_top(&self) -> bool {
        self.oid() == TOP_OBJECTCLASS_OID
    }

    pub fn is_extensible(&self) -> bool {
        self.oid() == EXTENSIBLE_OBJECT_OBJECTCLASS_OID
    }

    /// True if this class is `top` or derives from it.
    pub fn descends_from_top(&self) -> bool {
        self.descends_from_top
    }

    pub fn is_required(&self, attribute: &AttributeType) -> bool {
        self.required.iter().any(|at| at.oid() == attribute.oid())
    }

    pub fn is_optional(&self, attribute: &AttributeType) -> bool {
        if self.optional.iter().any(|at| at.oid() == attribute.oid()) {
            return true;
        }
        self.is_extensible() && !attribute.is_operational() && !self.is_required(attribute)
    }

    pub fn is_required_or_optional(&self, attribute: &AttributeType) -> bool {
        self.is_required(attribute) || self.is_optional(attribute)
    }

    /// True if `other` is a direct or indirect superior of this class.
    pub fn is_descendant_of(&self, other: &ObjectClass) -> bool {
        self.superiors
            .iter()
            .any(|sup| sup.oid() == other.oid() || sup.is_descendant_of(other))
    }

    pub fn raw(&self) -> &RawObjectClass {
        &self.raw
    }

    pub fn definition(&self) -> &str {
        self.raw.info.definition_or_else(|| self.raw.to_string())
    }
}

impl PartialEq for ObjectClass {
    fn eq(&self, other: &Self) -> bool {
        self.oid() == other.oid()
    }
}

impl Eq for ObjectClass {}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}
