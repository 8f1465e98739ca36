//! Attribute types.
//!
//! A [`RawAttributeType`] is what the parser produces: every cross-reference is
//! still a string. The resolver turns it into an [`AttributeType`] holding shared
//! references to its superior, its syntax and its matching rules. Each of the
//! rules and the syntax is taken from the first of: the type's own declaration,
//! its superior, the syntax defaults.

use crate::config::SchemaOptions;
use crate::error::{DecodeError, DecodeResult};
use crate::schema::constants::X_APPROX;
use crate::schema::matching_rule::MatchingRule;
use crate::schema::parser::DefinitionReader;
use crate::schema::syntax::Syntax;
use crate::schema::types::{ElementInfo, ElementKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// RFC 4512 attribute usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeUsage {
    #[default]
    UserApplications,
    DirectoryOperation,
    DistributedOperation,
    DsaOperation,
}

impl AttributeUsage {
    pub fn is_operational(&self) -> bool {
        *self != AttributeUsage::UserApplications
    }

    fn parse(value: &str) -> Option<Self> {
        [
            AttributeUsage::UserApplications,
            AttributeUsage::DirectoryOperation,
            AttributeUsage::DistributedOperation,
            AttributeUsage::DsaOperation,
        ]
        .into_iter()
        .find(|usage| usage.as_str().eq_ignore_ascii_case(value))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeUsage::UserApplications => "userApplications",
            AttributeUsage::DirectoryOperation => "directoryOperation",
            AttributeUsage::DistributedOperation => "distributedOperation",
            AttributeUsage::DsaOperation => "dSAOperation",
        }
    }
}

impl fmt::Display for AttributeUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute type as declared, before any reference is resolved.
#[derive(Debug, Clone)]
pub struct RawAttributeType {
    pub(crate) info: ElementInfo,
    pub(crate) superior: Option<String>,
    pub(crate) equality: Option<String>,
    pub(crate) ordering: Option<String>,
    pub(crate) substring: Option<String>,
    pub(crate) syntax: Option<String>,
    pub(crate) syntax_length: Option<u32>,
    pub(crate) single_value: bool,
    pub(crate) collective: bool,
    pub(crate) no_user_modification: bool,
    pub(crate) usage: AttributeUsage,
}

impl RawAttributeType {
    pub(crate) fn new(oid: impl Into<String>) -> Self {
        Self {
            info: ElementInfo::new(oid),
            superior: None,
            equality: None,
            ordering: None,
            substring: None,
            syntax: None,
            syntax_length: None,
            single_value: false,
            collective: false,
            no_user_modification: false,
            usage: AttributeUsage::UserApplications,
        }
    }

    /// Parse an `attributeTypes` definition.
    pub fn parse(definition: &str, options: &SchemaOptions) -> DecodeResult<Self> {
        let lenient = options.allow_malformed_names_and_options;
        let mut reader = DefinitionReader::open(ElementKind::AttributeType, definition)?;
        let mut at = Self::new(reader.read_oid(lenient)?);

        while let Some(token) = reader.next_keyword()? {
            if reader.read_common(&token, &mut at.info, options)? {
                continue;
            }
            match token.to_ascii_lowercase().as_str() {
                "sup" => at.superior = Some(reader.read_oid(lenient)?),
                "equality" => at.equality = Some(reader.read_oid(lenient)?),
                "ordering" => at.ordering = Some(reader.read_oid(lenient)?),
                "substr" => at.substring = Some(reader.read_oid(lenient)?),
                "syntax" => {
                    let (oid, length) = reader.read_syntax_oid(lenient)?;
                    at.syntax = Some(oid);
                    at.syntax_length = length;
                }
                "single-value" => at.single_value = true,
                "collective" => at.collective = true,
                "no-user-modification" => at.no_user_modification = true,
                "usage" => {
                    let position = reader.position();
                    let word = reader.read_word()?;
                    at.usage = AttributeUsage::parse(&word).ok_or(DecodeError::InvalidUsage {
                        usage: word,
                        position,
                    })?;
                }
                _ => return Err(reader.illegal_token(&token)),
            }
        }

        if at.superior.is_none() && at.syntax.is_none() {
            return Err(DecodeError::MissingKeyword {
                kind: ElementKind::AttributeType,
                oid: at.info.oid().to_string(),
                keyword: "SUP or SYNTAX".to_string(),
            });
        }

        at.info.set_definition(definition.trim());
        Ok(at)
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn oid(&self) -> &str {
        self.info.oid()
    }

    /// The approximate matching rule named by `X-APPROX`.
    pub fn approximate(&self) -> Option<&str> {
        self.info
            .extension(X_APPROX)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

impl fmt::Display for RawAttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.info.write_header(f, self.info.oid())?;
        if let Some(sup) = &self.superior {
            write!(f, " SUP {}", sup)?;
        }
        if let Some(rule) = &self.equality {
            write!(f, " EQUALITY {}", rule)?;
        }
        if let Some(rule) = &self.ordering {
            write!(f, " ORDERING {}", rule)?;
        }
        if let Some(rule) = &self.substring {
            write!(f, " SUBSTR {}", rule)?;
        }
        if let Some(syntax) = &self.syntax {
            write!(f, " SYNTAX {}", syntax)?;
            if let Some(length) = self.syntax_length {
                write!(f, "{{{}}}", length)?;
            }
        }
        if self.single_value {
            f.write_str(" SINGLE-VALUE")?;
        }
        if self.collective {
            f.write_str(" COLLECTIVE")?;
        }
        if self.no_user_modification {
            f.write_str(" NO-USER-MODIFICATION")?;
        }
        if self.usage != AttributeUsage::UserApplications {
            write!(f, " USAGE {}", self.usage)?;
        }
        self.info.write_trailer(f)
    }
}

/// A resolved attribute type.
#[derive(Debug, Clone)]
pub struct AttributeType {
    pub(crate) raw: RawAttributeType,
    pub(crate) superior: Option<Arc<AttributeType>>,
    pub(crate) syntax: Arc<Syntax>,
    pub(crate) equality: Option<Arc<MatchingRule>>,
    pub(crate) ordering: Option<Arc<MatchingRule>>,
    pub(crate) substring: Option<Arc<MatchingRule>>,
    pub(crate) approximate: Option<Arc<MatchingRule>>,
    pub(crate) place_holder: bool,
}

impl AttributeType {
    /// A stand-in for an attribute type a non-strict catalog does not know.
    pub(crate) fn place_holder(
        name: &str,
        syntax: Arc<Syntax>,
        equality: Option<Arc<MatchingRule>>,
    ) -> Self {
        let mut raw = RawAttributeType::new(name);
        raw.info.add_name(name);
        raw.syntax = Some(syntax.oid().to_string());
        raw.equality = equality.as_ref().map(|rule| rule.oid().to_string());
        Self {
            raw,
            superior: None,
            syntax,
            equality,
            ordering: None,
            substring: None,
            approximate: None,
            place_holder: true,
        }
    }

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

    pub fn superior(&self) -> Option<&Arc<AttributeType>> {
        self.superior.as_ref()
    }

    pub fn syntax(&self) -> &Arc<Syntax> {
        &self.syntax
    }

    /// The declared `{length}` bound of the syntax, if any.
    pub fn syntax_length(&self) -> Option<u32> {
        self.raw.syntax_length
    }

    pub fn equality_matching_rule(&self) -> Option<&Arc<MatchingRule>> {
        self.equality.as_ref()
    }

    pub fn ordering_matching_rule(&self) -> Option<&Arc<MatchingRule>> {
        self.ordering.as_ref()
    }

    pub fn substring_matching_rule(&self) -> Option<&Arc<MatchingRule>> {
        self.substring.as_ref()
    }

    pub fn approximate_matching_rule(&self) -> Option<&Arc<MatchingRule>> {
        self.approximate.as_ref()
    }

    pub fn is_single_value(&self) -> bool {
        self.raw.single_value
    }

    pub fn is_collective(&self) -> bool {
        self.raw.collective
    }

    pub fn is_no_user_modification(&self) -> bool {
        self.raw.no_user_modification
    }

    pub fn usage(&self) -> AttributeUsage {
        self.raw.usage
    }

    pub fn is_operational(&self) -> bool {
        self.raw.usage.is_operational()
    }

    /// True for types synthesized by a non-strict catalog.
    pub fn is_place_holder(&self) -> bool {
        self.place_holder
    }

    /// True if `other` is this type or one of its superiors.
    pub fn is_sub_type_of(&self, other: &AttributeType) -> bool {
        let mut current = Some(self);
        while let Some(at) = current {
            if at.oid() == other.oid() {
                return true;
            }
            current = at.superior.as_deref();
        }
        false
    }

    /// The declaration before resolution.
    pub fn raw(&self) -> &RawAttributeType {
        &self.raw
    }

    /// The definition string, verbatim if the type was parsed from one.
    pub fn definition(&self) -> &str {
        self.raw.info.definition_or_else(|| self.raw.to_string())
    }
}

impl PartialEq for AttributeType {
    fn eq(&self, other: &Self) -> bool {
        self.oid() == other.oid()
    }
}

impl Eq for AttributeType {}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(definition: &str) -> DecodeResult<RawAttributeType> {
        RawAttributeType::parse(definition, &SchemaOptions::default())
    }

    #[test]
    fn test_parse_full_definition() {
        let at = parse(
            "( 2.5.18.1 NAME 'createTimestamp' EQUALITY generalizedTimeMatch \
             ORDERING generalizedTimeOrderingMatch SYNTAX 1.3.6.1.4.1.1466.115.121.1.24 \
             SINGLE-VALUE NO-USER-MODIFICATION USAGE directoryOperation X-ORIGIN 'RFC 4512' )",
        )
        .expect("valid definition");
        assert_eq!(at.oid(), "2.5.18.1");
        assert_eq!(at.info.names(), ["createTimestamp"]);
        assert_eq!(at.equality.as_deref(), Some("generalizedTimeMatch"));
        assert!(at.single_value && at.no_user_modification);
        assert_eq!(at.usage, AttributeUsage::DirectoryOperation);
        assert_eq!(at.info.extension("x-origin"), Some(&["RFC 4512".to_string()][..]));
    }

    #[test]
    fn test_sup_or_syntax_required() {
        let error = parse("( 1.2.3 NAME 'orphan' )").unwrap_err();
        assert!(matches!(error, DecodeError::MissingKeyword { .. }));
    }

    #[test]
    fn test_unknown_keyword_is_rejected() {
        let error = parse("( 1.2.3 NAME 'x' SUP name BOGUS )").unwrap_err();
        match error {
            DecodeError::IllegalToken { token, .. } => assert_eq!(token, "BOGUS"),
            other => panic!("Expected IllegalToken, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_usage() {
        let error = parse("( 1.2.3 SUP name USAGE sometimes )").unwrap_err();
        assert!(matches!(error, DecodeError::InvalidUsage { .. }));
    }

    #[test]
    fn test_canonical_rendering_round_trips() {
        let at = parse(
            "(1.2.3 NAME('a' 'b')DESC 'x' SUP name SYNTAX 1.3.6.1.4.1.1466.115.121.1.15{32} X-APPROX 'approxMatch')",
        )
        .expect("valid definition");
        let rendered = at.to_string();
        assert_eq!(
            rendered,
            "( 1.2.3 NAME ( 'a' 'b' ) DESC 'x' SUP name SYNTAX 1.3.6.1.4.1.1466.115.121.1.15{32} X-APPROX 'approxMatch' )"
        );
        let reparsed = parse(&rendered).expect("rendered definition parses");
        assert_eq!(reparsed.to_string(), rendered);
        assert_eq!(reparsed.approximate(), Some("approxMatch"));
    }
}
