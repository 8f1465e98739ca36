//! Enumeration syntaxes defined with `X-ENUM`.
//!
//! Each enumeration syntax gets its own ordering rule, with OID
//! `1.3.6.1.4.1.26027.1.4.8.<syntax OID>`, that sorts values by their position
//! in the declared list rather than alphabetically.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::MatchingRuleImpl;
use crate::matching::string::{normalize_string, utf8};
use crate::schema::constants::{
    EMR_CASE_IGNORE_OID, OMR_GENERIC_ENUM_NAME, OMR_GENERIC_ENUM_OID, SMR_CASE_IGNORE_OID,
};
use crate::schema::registry::Schema;
use crate::syntaxes::SyntaxImpl;
use std::sync::Arc;

/// OID of the ordering rule belonging to an enumeration syntax.
pub fn ordering_rule_oid(syntax_oid: &str) -> String {
    format!("{}.{}", OMR_GENERIC_ENUM_OID, syntax_oid)
}

/// Name of the ordering rule belonging to an enumeration syntax.
pub fn ordering_rule_name(syntax_oid: &str) -> String {
    format!("{}{}", OMR_GENERIC_ENUM_NAME, syntax_oid)
}

fn normalize(value: &str) -> String {
    normalize_string(value, true, true)
}

#[derive(Debug, Clone)]
pub struct EnumerationSyntax {
    oid: String,
    ordering_rule_oid: String,
    values: Vec<String>,
}

impl EnumerationSyntax {
    /// Values are normalized and deduplicated, keeping the first occurrence.
    pub fn new(oid: impl Into<String>, values: &[String]) -> Self {
        let oid = oid.into();
        let mut normalized: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            let value = normalize(value);
            if !normalized.contains(&value) {
                normalized.push(value);
            }
        }
        Self {
            ordering_rule_oid: ordering_rule_oid(&oid),
            oid,
            values: normalized,
        }
    }

    pub fn oid(&self) -> &str {
        &self.oid
    }

    /// The normalized values in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Position of a value in the list, compared after normalization.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        let value = normalize(value);
        self.values.iter().position(|v| *v == value)
    }
}

impl SyntaxImpl for EnumerationSyntax {
    fn name(&self) -> &str {
        "Enumeration"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        match self.index_of(text) {
            Some(_) => Ok(()),
            None => Err(DecodeError::invalid_value(
                self.name(),
                text,
                format!("not one of the values permitted by syntax {}", self.oid),
            )),
        }
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_OID)
    }

    fn ordering_matching_rule(&self) -> Option<&str> {
        Some(&self.ordering_rule_oid)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_CASE_IGNORE_OID)
    }
}

/// Orders values of one enumeration syntax by their declared position.
#[derive(Debug, Clone)]
pub struct EnumOrderingMatchingRule {
    syntax: Arc<EnumerationSyntax>,
}

impl EnumOrderingMatchingRule {
    pub fn new(syntax: Arc<EnumerationSyntax>) -> Self {
        Self { syntax }
    }
}

impl MatchingRuleImpl for EnumOrderingMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        let text = utf8(value, "Enumeration")?;
        let index = self.syntax.index_of(text).ok_or_else(|| {
            DecodeError::invalid_value(
                "Enumeration",
                text,
                format!("not one of the values permitted by syntax {}", self.syntax.oid),
            )
        })?;
        Ok((index as u32).to_be_bytes().to_vec().into())
    }

    fn is_ordering(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::empty_schema;

    fn days() -> EnumerationSyntax {
        let values = ["Monday", "tuesday", "MONDAY", "Wednesday"].map(String::from);
        EnumerationSyntax::new("1.2.3.4", &values)
    }

    #[test]
    fn test_values_are_normalized_and_deduplicated() {
        let syntax = days();
        assert_eq!(syntax.values(), ["monday", "tuesday", "wednesday"]);
        assert_eq!(syntax.index_of(" Tuesday "), Some(1));
        assert_eq!(syntax.ordering_matching_rule(), Some("1.3.6.1.4.1.26027.1.4.8.1.2.3.4"));
        assert_eq!(ordering_rule_name("1.2.3.4"), "enumOrderingMatch1.2.3.4");
    }

    #[test]
    fn test_membership() {
        let schema = empty_schema();
        let syntax = days();
        assert!(syntax.value_is_acceptable(&schema, &"WEDNESDAY".into()).is_ok());
        assert!(syntax.value_is_acceptable(&schema, &"friday".into()).is_err());
    }

    #[test]
    fn test_ordering_follows_declaration() {
        let schema = empty_schema();
        let rule = EnumOrderingMatchingRule::new(Arc::new(days()));
        let wednesday = rule
            .normalize_attribute_value(&schema, &"wednesday".into())
            .expect("valid");
        let monday = rule
            .normalize_attribute_value(&schema, &"Monday".into())
            .expect("valid");
        assert!(monday < wednesday);
        assert!(rule.normalize_attribute_value(&schema, &"sunday".into()).is_err());
    }
}
