//! Matching rules and matching rule uses.
//!
//! A [`MatchingRule`] pairs its declaration with an implementation of
//! [`MatchingRuleImpl`]. The implementation is chosen by OID from the built-in
//! registry when the catalog is built; rules without a known implementation fall
//! back to octet-string comparison and produce a warning.

use crate::byte_string::ByteString;
use crate::config::SchemaOptions;
use crate::error::{DecodeError, DecodeResult, SchemaError, SchemaResult};
use crate::matching::{Assertion, ConditionResult, MatchingRuleImpl, SubstringAssertion};
use crate::schema::attribute_type::AttributeType;
use crate::schema::parser::DefinitionReader;
use crate::schema::registry::Schema;
use crate::schema::syntax::Syntax;
use crate::schema::types::{ElementInfo, ElementKind, write_oids};
use std::fmt;
use std::sync::Arc;

/// A matching rule as declared.
#[derive(Debug, Clone)]
pub struct RawMatchingRule {
    pub(crate) info: ElementInfo,
    pub(crate) syntax: String,
}

impl RawMatchingRule {
    pub(crate) fn new(oid: impl Into<String>, syntax: impl Into<String>) -> Self {
        Self {
            info: ElementInfo::new(oid),
            syntax: syntax.into(),
        }
    }

    /// Parse a `matchingRules` definition.
    pub fn parse(definition: &str, options: &SchemaOptions) -> DecodeResult<Self> {
        let lenient = options.allow_malformed_names_and_options;
        let mut reader = DefinitionReader::open(ElementKind::MatchingRule, definition)?;
        let oid = reader.read_oid(lenient)?;
        let mut info = ElementInfo::new(oid);
        let mut syntax = None;

        while let Some(token) = reader.next_keyword()? {
            if reader.read_common(&token, &mut info, options)? {
                continue;
            }
            if token.eq_ignore_ascii_case("syntax") {
                syntax = Some(reader.read_oid(lenient)?);
            } else {
                return Err(reader.illegal_token(&token));
            }
        }

        let syntax = syntax.ok_or_else(|| DecodeError::MissingKeyword {
            kind: ElementKind::MatchingRule,
            oid: info.oid().to_string(),
            keyword: "SYNTAX".to_string(),
        })?;
        info.set_definition(definition.trim());
        Ok(Self { info, syntax })
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn oid(&self) -> &str {
        self.info.oid()
    }
}

impl fmt::Display for RawMatchingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.info.write_header(f, self.info.oid())?;
        write!(f, " SYNTAX {}", self.syntax)?;
        self.info.write_trailer(f)
    }
}

/// A resolved matching rule.
#[derive(Debug, Clone)]
pub struct MatchingRule {
    pub(crate) raw: RawMatchingRule,
    pub(crate) syntax: Arc<Syntax>,
    pub(crate) implementation: Arc<dyn MatchingRuleImpl>,
}

impl MatchingRule {
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

    /// The syntax of assertion values for this rule.
    pub fn syntax(&self) -> &Arc<Syntax> {
        &self.syntax
    }

    /// Normalize an attribute value. Fails if the value is malformed.
    pub fn normalize_attribute_value(
        &self,
        schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        self.implementation.normalize_attribute_value(schema, value)
    }

    /// Build an equality (or rule-specific) assertion from an assertion value.
    pub fn get_assertion(&self, schema: &Schema, value: &ByteString) -> SchemaResult<Assertion> {
        Ok(self.implementation.assertion(schema, value)?)
    }

    pub fn get_greater_or_equal_assertion(
        &self,
        schema: &Schema,
        value: &ByteString,
    ) -> SchemaResult<Assertion> {
        self.ordering_normalized(schema, value, "greater-or-equal")
            .map(Assertion::GreaterOrEqual)
    }

    pub fn get_less_or_equal_assertion(
        &self,
        schema: &Schema,
        value: &ByteString,
    ) -> SchemaResult<Assertion> {
        self.ordering_normalized(schema, value, "less-or-equal")
            .map(Assertion::LessOrEqual)
    }

    fn ordering_normalized(
        &self,
        schema: &Schema,
        value: &ByteString,
        assertion: &str,
    ) -> SchemaResult<ByteString> {
        if !self.implementation.is_ordering() {
            return Err(SchemaError::unsupported_assertion(self.name_or_oid(), assertion));
        }
        Ok(self.implementation.normalize_attribute_value(schema, value)?)
    }

    /// Build a substring assertion; every fragment is normalized independently.
    pub fn get_substring_assertion(
        &self,
        schema: &Schema,
        initial: Option<&ByteString>,
        any: &[ByteString],
        final_: Option<&ByteString>,
    ) -> SchemaResult<Assertion> {
        if !self.implementation.is_substring() {
            return Err(SchemaError::unsupported_assertion(self.name_or_oid(), "substrings"));
        }
        let normalize = |fragment: &ByteString| {
            self.implementation
                .normalize_substring_fragment(schema, fragment)
        };
        let initial = initial.map(normalize).transpose()?;
        let any = any.iter().map(normalize).collect::<DecodeResult<Vec<_>>>()?;
        let final_ = final_.map(normalize).transpose()?;
        Ok(Assertion::Substrings(SubstringAssertion::new(initial, any, final_)))
    }

    /// Evaluate an assertion against a raw attribute value.
    ///
    /// An attribute value that cannot be normalized yields `Undefined`.
    pub fn matches(
        &self,
        schema: &Schema,
        attribute_value: &ByteString,
        assertion: &Assertion,
    ) -> ConditionResult {
        match self.normalize_attribute_value(schema, attribute_value) {
            Ok(normalized) => assertion.matches(&normalized),
            Err(_) => ConditionResult::Undefined,
        }
    }

    pub fn raw(&self) -> &RawMatchingRule {
        &self.raw
    }

    pub fn definition(&self) -> &str {
        self.raw.info.definition_or_else(|| self.raw.to_string())
    }
}

impl PartialEq for MatchingRule {
    fn eq(&self, other: &Self) -> bool {
        self.oid() == other.oid()
    }
}

impl Eq for MatchingRule {}

impl fmt::Display for MatchingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

/// A matching rule use as declared. Its OID is the OID of the matching rule.
#[derive(Debug, Clone)]
pub struct RawMatchingRuleUse {
    pub(crate) info: ElementInfo,
    pub(crate) applies: Vec<String>,
}

impl RawMatchingRuleUse {
    /// Parse a `matchingRuleUse` definition.
    pub fn parse(definition: &str, options: &SchemaOptions) -> DecodeResult<Self> {
        let lenient = options.allow_malformed_names_and_options;
        let mut reader = DefinitionReader::open(ElementKind::MatchingRuleUse, definition)?;
        let mut info = ElementInfo::new(reader.read_oid(lenient)?);
        let mut applies = Vec::new();

        while let Some(token) = reader.next_keyword()? {
            if reader.read_common(&token, &mut info, options)? {
                continue;
            }
            if token.eq_ignore_ascii_case("applies") {
                applies = reader.read_oids(lenient)?;
            } else {
                return Err(reader.illegal_token(&token));
            }
        }

        if applies.is_empty() {
            return Err(DecodeError::MissingKeyword {
                kind: ElementKind::MatchingRuleUse,
                oid: info.oid().to_string(),
                keyword: "APPLIES".to_string(),
            });
        }
        info.set_definition(definition.trim());
        Ok(Self { info, applies })
    }

    pub fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub fn oid(&self) -> &str {
        self.info.oid()
    }
}

impl fmt::Display for RawMatchingRuleUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.info.write_header(f, self.info.oid())?;
        write_oids(f, "APPLIES", &self.applies)?;
        self.info.write_trailer(f)
    }
}

/// A resolved matching rule use.
#[derive(Debug, Clone)]
pub struct MatchingRuleUse {
    pub(crate) raw: RawMatchingRuleUse,
    pub(crate) matching_rule: Arc<MatchingRule>,
    pub(crate) attributes: Vec<Arc<AttributeType>>,
}

impl MatchingRuleUse {
    pub fn info(&self) -> &ElementInfo {
        &self.raw.info
    }

    /// The OID of the matching rule this use applies to.
    pub fn oid(&self) -> &str {
        self.raw.info.oid()
    }

    pub fn name_or_oid(&self) -> &str {
        self.raw.info.name_or_oid()
    }

    pub fn matching_rule(&self) -> &Arc<MatchingRule> {
        &self.matching_rule
    }

    pub fn attributes(&self) -> &[Arc<AttributeType>] {
        &self.attributes
    }

    pub fn has_attribute(&self, attribute: &AttributeType) -> bool {
        self.attributes.iter().any(|at| at.oid() == attribute.oid())
    }

    pub fn raw(&self) -> &RawMatchingRuleUse {
        &self.raw
    }

    pub fn definition(&self) -> &str {
        self.raw.info.definition_or_else(|| self.raw.to_string())
    }
}

impl fmt::Display for MatchingRuleUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_rule_requires_syntax() {
        let options = SchemaOptions::default();
        let rule = RawMatchingRule::parse(
            "( 2.5.13.2 NAME 'caseIgnoreMatch' SYNTAX 1.3.6.1.4.1.1466.115.121.1.15 )",
            &options,
        )
        .expect("valid definition");
        assert_eq!(rule.syntax, "1.3.6.1.4.1.1466.115.121.1.15");

        let error = RawMatchingRule::parse("( 2.5.13.2 NAME 'caseIgnoreMatch' )", &options)
            .unwrap_err();
        assert!(matches!(error, DecodeError::MissingKeyword { .. }));
    }

    #[test]
    fn test_matching_rule_use_requires_applies() {
        let options = SchemaOptions::default();
        let mru = RawMatchingRuleUse::parse("( 2.5.13.2 APPLIES ( cn $ sn ) )", &options)
            .expect("valid definition");
        assert_eq!(mru.applies, vec!["cn", "sn"]);
        assert_eq!(mru.to_string(), "( 2.5.13.2 APPLIES ( cn $ sn ) )");

        assert!(RawMatchingRuleUse::parse("( 2.5.13.2 NAME 'x' )", &options).is_err());
    }
}
