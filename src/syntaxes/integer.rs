//! The Integer syntax and its order-preserving encoding.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::string::utf8;
use crate::schema::constants::{EMR_INTEGER_OID, OMR_INTEGER_OID};
use crate::schema::registry::Schema;
use crate::syntaxes::SyntaxImpl;

const NAME: &str = "Integer";

/// Check the textual form: no leading zeros, `-` only before a non-zero digit.
pub fn validate(value: &str) -> DecodeResult<()> {
    let invalid = |reason: &str| -> DecodeResult<()> {
        Err(DecodeError::invalid_value(NAME, value, reason))
    };
    let digits = value.strip_prefix('-').unwrap_or(value);
    let negative = digits.len() != value.len();

    match digits.as_bytes() {
        [] if negative => invalid("a dash must be followed by a digit"),
        [] => invalid("the value is empty"),
        [b'0'] if negative => invalid("negative zero is not allowed"),
        [b'0', _, ..] => invalid("leading zeros are not allowed"),
        bytes => match bytes.iter().position(|b| !b.is_ascii_digit()) {
            Some(index) => {
                let c = digits[index..].chars().next().unwrap_or_default();
                invalid(&format!("illegal character '{}'", c))
            }
            None => Ok(()),
        },
    }
}

/// Encode a valid integer so that byte order equals numeric order.
///
/// Zero is `01`; positive values are `02`, the digit count as a big-endian
/// `u32` and the digits; negative values are `00` followed by the complement
/// of the same layout.
pub fn encode(value: &str) -> DecodeResult<ByteString> {
    validate(value)?;
    if value == "0" {
        return Ok(ByteString::from(vec![0x01]));
    }
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value),
    };
    let length = u32::try_from(digits.len())
        .map_err(|_| DecodeError::invalid_value(NAME, value, "the value is too long"))?;

    let mut encoded = Vec::with_capacity(digits.len() + 5);
    if negative {
        encoded.push(0x00);
        encoded.extend((!length).to_be_bytes());
        encoded.extend(digits.bytes().map(|b| !b));
    } else {
        encoded.push(0x02);
        encoded.extend(length.to_be_bytes());
        encoded.extend(digits.bytes());
    }
    Ok(ByteString::from(encoded))
}

#[derive(Debug, Clone, Copy)]
pub struct IntegerSyntax;

impl SyntaxImpl for IntegerSyntax {
    fn name(&self) -> &str {
        NAME
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        validate(utf8(value, NAME)?)
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_INTEGER_OID)
    }

    fn ordering_matching_rule(&self) -> Option<&str> {
        Some(OMR_INTEGER_OID)
    }
}
