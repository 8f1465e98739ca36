//! Rules whose normalized form sorts in value order: octet string, integer and
//! generalized time. Also the bit string and octet string substring rules, which
//! compare raw bytes.

use crate::byte_string::ByteString;
use crate::error::DecodeResult;
use crate::matching::MatchingRuleImpl;
use crate::matching::string::utf8;
use crate::schema::registry::Schema;
use crate::syntaxes::{bit_string, generalized_time, integer};

/// The value space of an [`OrderedMatchingRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedValue {
    OctetString,
    Integer,
    GeneralizedTime,
}

impl OrderedValue {
    fn normalize(&self, value: &ByteString) -> DecodeResult<ByteString> {
        match self {
            OrderedValue::OctetString => Ok(value.clone()),
            OrderedValue::Integer => integer::encode(utf8(value, "Integer")?),
            OrderedValue::GeneralizedTime => generalized_time::normalize(value),
        }
    }
}

/// Equality or ordering rule over an order-preserving encoding.
#[derive(Debug, Clone)]
pub struct OrderedMatchingRule {
    kind: OrderedValue,
    ordering: bool,
}

impl OrderedMatchingRule {
    pub fn equality(kind: OrderedValue) -> Self {
        Self {
            kind,
            ordering: false,
        }
    }

    pub fn ordering(kind: OrderedValue) -> Self {
        Self {
            kind,
            ordering: true,
        }
    }
}

impl MatchingRuleImpl for OrderedMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        self.kind.normalize(value)
    }

    fn is_ordering(&self) -> bool {
        self.ordering
    }
}

/// `octetStringSubstringsMatch`.
#[derive(Debug, Clone, Copy)]
pub struct OctetStringSubstringMatchingRule;

impl MatchingRuleImpl for OctetStringSubstringMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        Ok(value.clone())
    }

    fn is_substring(&self) -> bool {
        true
    }
}

/// `bitStringMatch`: values must be well formed and are compared in their
/// `'bits'B` form.
#[derive(Debug, Clone, Copy)]
pub struct BitStringMatchingRule;

impl MatchingRuleImpl for BitStringMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        let bits = bit_string::bits(utf8(value, "Bit String")?)?;
        Ok(format!("'{}'B", bits).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ConditionResult;
    use crate::schema::registry::empty_schema;

    #[test]
    fn test_integer_ordering() {
        let schema = empty_schema();
        let rule = OrderedMatchingRule::ordering(OrderedValue::Integer);
        let small = rule
            .normalize_attribute_value(&schema, &"-20".into())
            .expect("valid");
        let large = rule
            .normalize_attribute_value(&schema, &"7".into())
            .expect("valid");
        assert!(small < large);
        assert!(rule.normalize_attribute_value(&schema, &"07".into()).is_err());
    }

    #[test]
    fn test_time_equality_across_offsets() {
        let schema = empty_schema();
        let rule = OrderedMatchingRule::equality(OrderedValue::GeneralizedTime);
        let assertion = rule
            .assertion(&schema, &"20090101140000+02".into())
            .expect("valid");
        let value = rule
            .normalize_attribute_value(&schema, &"20090101120000Z".into())
            .expect("valid");
        assert_eq!(assertion.matches(&value), ConditionResult::True);
    }

    #[test]
    fn test_bit_string_rejects_malformed() {
        let schema = empty_schema();
        assert!(BitStringMatchingRule
            .normalize_attribute_value(&schema, &"'0101'B".into())
            .is_ok());
        assert!(BitStringMatchingRule
            .normalize_attribute_value(&schema, &"0101".into())
            .is_err());
    }

    #[test]
    fn test_bit_string_suffix_case_is_normalized() {
        let schema = empty_schema();
        let upper = BitStringMatchingRule
            .normalize_attribute_value(&schema, &"'0101'B".into())
            .expect("valid");
        let lower = BitStringMatchingRule
            .normalize_attribute_value(&schema, &"'0101'b".into())
            .expect("valid");
        assert_eq!(upper, lower);
    }
}
