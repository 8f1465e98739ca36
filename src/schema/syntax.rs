//! LDAP syntaxes.
//!
//! Syntax descriptions only carry a description and extensions. Three
//! extensions give a syntax its implementation without code: `X-ENUM` lists the
//! permitted values, `X-PATTERN` holds a regular expression the whole value must
//! match, and `X-SUBST` names another syntax whose implementation is borrowed.

use crate::byte_string::ByteString;
use crate::config::SchemaOptions;
use crate::error::DecodeResult;
use crate::schema::constants::{X_ENUM, X_PATTERN, X_SUBST};
use crate::schema::parser::{DefinitionReader, is_extension_keyword};
use crate::schema::registry::Schema;
use crate::schema::types::{ElementInfo, ElementKind};
use crate::syntaxes::SyntaxImpl;
use crate::syntaxes::enumeration::EnumerationSyntax;
use std::fmt;
use std::sync::Arc;

/// A syntax as declared.
#[derive(Debug, Clone)]
pub struct RawSyntax {
    pub(crate) info: ElementInfo,
}

impl RawSyntax {
    pub(crate) fn new(oid: impl Into<String>) -> Self {
        Self {
            info: ElementInfo::new(oid),
        }
    }

    /// Parse an `ldapSyntaxes` definition.
    pub fn parse(definition: &str, options: &SchemaOptions) -> DecodeResult<Self> {
        let mut reader = DefinitionReader::open(ElementKind::Syntax, definition)?;
        let mut info = ElementInfo::new(reader.read_oid(options.allow_malformed_names_and_options)?);

        while let Some(token) = reader.next_keyword()? {
            if token.eq_ignore_ascii_case("desc") || is_extension_keyword(&token) {
                reader.read_common(&token, &mut info, options)?;
            } else {
                return Err(reader.illegal_token(&token));
            }
        }

        info.set_definition(definition.trim());
        Ok(Self { info })
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn oid(&self) -> &str {
        self.info.oid()
    }

    pub fn enumeration_values(&self) -> Option<&[String]> {
        self.info.extension(X_ENUM)
    }

    pub fn pattern(&self) -> Option<&str> {
        self.first_extension_value(X_PATTERN)
    }

    pub fn substitute(&self) -> Option<&str> {
        self.first_extension_value(X_SUBST)
    }

    fn first_extension_value(&self, key: &str) -> Option<&str> {
        self.info
            .extension(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

impl fmt::Display for RawSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.info.write_header(f, self.info.oid())?;
        self.info.write_trailer(f)
    }
}

/// A resolved syntax.
#[derive(Debug, Clone)]
pub struct Syntax {
    pub(crate) raw: RawSyntax,
    pub(crate) implementation: Arc<dyn SyntaxImpl>,
    pub(crate) enumeration: Option<Arc<EnumerationSyntax>>,
    pub(crate) place_holder: bool,
}

impl Syntax {
    pub(crate) fn new(raw: RawSyntax, implementation: Arc<dyn SyntaxImpl>) -> Self {
        Self {
            raw,
            implementation,
            enumeration: None,
            place_holder: false,
        }
    }

    /// A stand-in for a syntax a non-strict catalog does not know.
    pub(crate) fn place_holder(oid: &str, implementation: Arc<dyn SyntaxImpl>) -> Self {
        let mut raw = RawSyntax::new(oid);
        raw.info.set_description(format!("Unknown syntax {}", oid));
        Self {
            raw,
            implementation,
            enumeration: None,
            place_holder: true,
        }
    }

    pub fn info(&self) -> &ElementInfo {
        &self.raw.info
    }

    pub fn oid(&self) -> &str {
        self.raw.info.oid()
    }

    pub fn description(&self) -> &str {
        self.raw.info.description()
    }

    /// The implementation's name, e.g. `Integer`.
    pub fn implementation_name(&self) -> &str {
        self.implementation.name()
    }

    pub fn is_human_readable(&self) -> bool {
        self.implementation.is_human_readable()
    }

    /// Check a value, returning the reason it is rejected.
    pub fn value_is_acceptable(&self, schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        self.implementation.value_is_acceptable(schema, value)
    }

    pub fn is_value_acceptable(&self, schema: &Schema, value: &ByteString) -> bool {
        self.value_is_acceptable(schema, value).is_ok()
    }

    pub fn equality_matching_rule(&self) -> Option<&str> {
        self.implementation.equality_matching_rule()
    }

    pub fn ordering_matching_rule(&self) -> Option<&str> {
        self.implementation.ordering_matching_rule()
    }

    pub fn substring_matching_rule(&self) -> Option<&str> {
        self.implementation.substring_matching_rule()
    }

    pub fn approximate_matching_rule(&self) -> Option<&str> {
        self.implementation.approximate_matching_rule()
    }

    /// The enumeration behind an `X-ENUM` syntax.
    pub fn enumeration(&self) -> Option<&Arc<EnumerationSyntax>> {
        self.enumeration.as_ref()
    }

    pub fn is_place_holder(&self) -> bool {
        self.place_holder
    }

    pub fn raw(&self) -> &RawSyntax {
        &self.raw
    }

    pub fn definition(&self) -> &str {
        self.raw.info.definition_or_else(|| self.raw.to_string())
    }
}

impl PartialEq for Syntax {
    fn eq(&self, other: &Self) -> bool {
        self.oid() == other.oid()
    }
}

impl Eq for Syntax {}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}
