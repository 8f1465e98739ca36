//! Syntaxes defined with `X-PATTERN`: the whole value must match a regular
//! expression.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult, ValidationError, ValidationResult};
use crate::matching::string::utf8;
use crate::schema::constants::{EMR_CASE_IGNORE_OID, OMR_CASE_IGNORE_OID, SMR_CASE_IGNORE_OID};
use crate::schema::registry::Schema;
use crate::syntaxes::SyntaxImpl;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct PatternSyntax {
    oid: String,
    pattern: String,
    regex: Regex,
}

impl PatternSyntax {
    pub fn new(oid: impl Into<String>, pattern: impl Into<String>) -> ValidationResult<Self> {
        let oid = oid.into();
        let pattern = pattern.into();
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            ValidationError::InvalidPattern {
                oid: oid.clone(),
                pattern: pattern.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            oid,
            pattern,
            regex,
        })
    }

    pub fn oid(&self) -> &str {
        &self.oid
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl SyntaxImpl for PatternSyntax {
    fn name(&self) -> &str {
        "Pattern"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        if self.regex.is_match(text) {
            Ok(())
        } else {
            Err(DecodeError::invalid_value(
                self.name(),
                text,
                format!("does not match the pattern '{}'", self.pattern),
            ))
        }
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_OID)
    }

    fn ordering_matching_rule(&self) -> Option<&str> {
        Some(OMR_CASE_IGNORE_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_CASE_IGNORE_OID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::empty_schema;

    #[test]
    fn test_whole_value_must_match() {
        let schema = empty_schema();
        let syntax = PatternSyntax::new("1.2.3.5", "[a-z]+-[0-9]{2}").expect("valid pattern");
        assert!(syntax.value_is_acceptable(&schema, &"abc-12".into()).is_ok());
        assert!(syntax.value_is_acceptable(&schema, &"xabc-123".into()).is_err());
        assert!(syntax.value_is_acceptable(&schema, &"abc-12 ".into()).is_err());
    }

    #[test]
    fn test_invalid_pattern() {
        let error = PatternSyntax::new("1.2.3.5", "[unclosed").unwrap_err();
        assert_eq!(error.message_key(), "validation.invalid-pattern");
    }
}
