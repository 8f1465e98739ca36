//! The Bit String syntax: `'0101'B`. The trailing `B` may also be written in
//! lowercase.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::string::utf8;
use crate::schema::constants::EMR_BIT_STRING_OID;
use crate::schema::registry::Schema;
use crate::syntaxes::SyntaxImpl;

const NAME: &str = "Bit String";

pub fn validate(value: &str) -> DecodeResult<()> {
    bits(value).map(|_| ())
}

/// The bits between the quotes.
pub fn bits(value: &str) -> DecodeResult<&str> {
    let invalid = |reason: String| DecodeError::invalid_value(NAME, value, reason);
    if value.len() < 3 {
        return Err(invalid("the value is too short".to_string()));
    }
    let bits = value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix("'B").or_else(|| rest.strip_suffix("'b")))
        .ok_or_else(|| invalid("the value must be of the form '<bits>'B".to_string()))?;
    match bits.chars().find(|c| *c != '0' && *c != '1') {
        Some(c) => Err(invalid(format!("illegal bit '{}'", c))),
        None => Ok(bits),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BitStringSyntax;

impl SyntaxImpl for BitStringSyntax {
    fn name(&self) -> &str {
        NAME
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        validate(utf8(value, NAME)?)
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_BIT_STRING_OID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_strings() {
        assert!(validate("'0101'B").is_ok());
        assert!(validate("''B").is_ok());
        assert!(validate("'B").is_err());
        assert!(validate("'0102'B").is_err());
        assert!(validate("'0101'b").is_ok());
        assert_eq!(bits("'0101'b").ok(), Some("0101"));
        assert!(validate("'0101'x").is_err());
        assert!(validate("0101").is_err());
    }
}
