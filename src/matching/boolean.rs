//! `booleanMatch`.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::MatchingRuleImpl;
use crate::schema::registry::Schema;

/// Canonical form of a boolean value: `TRUE` or `FALSE`.
pub fn canonical_boolean(value: &ByteString) -> DecodeResult<&'static str> {
    let text = value.as_str().unwrap_or_default();
    let upper = text.to_ascii_uppercase();
    match upper.as_str() {
        "TRUE" | "YES" | "ON" | "1" => Ok("TRUE"),
        "FALSE" | "NO" | "OFF" | "0" => Ok("FALSE"),
        _ => Err(DecodeError::invalid_value(
            "Boolean",
            value.to_string_lossy(),
            "expected TRUE or FALSE",
        )),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanMatchingRule;

impl MatchingRuleImpl for BooleanMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        canonical_boolean(value).map(ByteString::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_forms() {
        for value in ["true", "Yes", "ON", "1"] {
            assert_eq!(canonical_boolean(&value.into()), Ok("TRUE"));
        }
        for value in ["FALSE", "no", "off", "0"] {
            assert_eq!(canonical_boolean(&value.into()), Ok("FALSE"));
        }
        assert!(canonical_boolean(&"maybe".into()).is_err());
        assert!(canonical_boolean(&" true".into()).is_err());
    }
}
