//! `distinguishedNameMatch` and `uniqueMemberMatch`.
//!
//! Both normalize to the canonical form of the DN: attribute type OIDs, with
//! every value passed through its own type's equality rule. Two equal DNs
//! therefore normalize to the same bytes, and assertions are plain equality.

use crate::byte_string::ByteString;
use crate::dn::Dn;
use crate::error::DecodeResult;
use crate::matching::string::utf8;
use crate::matching::{Assertion, MatchingRuleImpl};
use crate::schema::registry::Schema;
use crate::syntaxes::distinguished_name::split_name_and_uid;

fn normalize_dn(schema: &Schema, value: &str) -> DecodeResult<String> {
    Ok(Dn::parse(value, schema)?.to_normalized_string())
}

#[derive(Debug, Clone, Copy)]
pub struct DistinguishedNameMatchingRule;

impl MatchingRuleImpl for DistinguishedNameMatchingRule {
    fn normalize_attribute_value(
        &self,
        schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        normalize_dn(schema, utf8(value, "DN")?).map(ByteString::from)
    }

    fn assertion(&self, schema: &Schema, value: &ByteString) -> DecodeResult<Assertion> {
        self.normalize_attribute_value(schema, value)
            .map(Assertion::Equals)
    }
}

/// Like [`DistinguishedNameMatchingRule`], but an optional `#'bits'B` UID
/// suffix must also be equal.
#[derive(Debug, Clone, Copy)]
pub struct UniqueMemberMatchingRule;

impl MatchingRuleImpl for UniqueMemberMatchingRule {
    fn normalize_attribute_value(
        &self,
        schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        let (dn, uid) = split_name_and_uid(utf8(value, "Name And Optional UID")?);
        let mut normalized = normalize_dn(schema, dn)?;
        if let Some(uid) = uid {
            normalized.push_str("#'");
            normalized.push_str(uid);
            normalized.push_str("'B");
        }
        Ok(normalized.into())
    }

    fn assertion(&self, schema: &Schema, value: &ByteString) -> DecodeResult<Assertion> {
        self.normalize_attribute_value(schema, value)
            .map(Assertion::Equals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ConditionResult::{self, *};
    use crate::schema::registry::core_schema;

    fn evaluate(rule: &dyn MatchingRuleImpl, assertion: &str, value: &str) -> ConditionResult {
        let schema = core_schema();
        let assertion = rule.assertion(&schema, &assertion.into()).expect("valid assertion");
        let normalized = rule
            .normalize_attribute_value(&schema, &value.into())
            .expect("valid value");
        assertion.matches(&normalized)
    }

    #[test]
    fn test_dn_match() {
        let rule = DistinguishedNameMatchingRule;
        assert_eq!(evaluate(&rule, "cn=Bob,dc=Example", "CN=bob, DC=example"), True);
        assert_eq!(evaluate(&rule, "cn=Bob,dc=Example", "cn=Alice,dc=example"), False);
        assert_eq!(evaluate(&rule, "2.5.4.3=bob", "cn=BOB"), True);
    }

    #[test]
    fn test_dn_normalization() {
        let schema = core_schema();
        let normalized = DistinguishedNameMatchingRule
            .normalize_attribute_value(&schema, &"CN=Bob".into())
            .expect("valid");
        assert_eq!(normalized.as_str(), Some("2.5.4.3=bob"));
        let other = DistinguishedNameMatchingRule
            .normalize_attribute_value(&schema, &"cn=BOB".into())
            .expect("valid");
        assert_eq!(normalized, other);
        assert!(DistinguishedNameMatchingRule
            .normalize_attribute_value(&schema, &"not a dn".into())
            .is_err());
    }

    #[test]
    fn test_unique_member_match() {
        let rule = UniqueMemberMatchingRule;
        assert_eq!(evaluate(&rule, "cn=bob#'01'B", "CN=Bob#'01'B"), True);
        assert_eq!(evaluate(&rule, "cn=bob#'01'B", "cn=bob#'10'B"), False);
        assert_eq!(evaluate(&rule, "cn=bob", "cn=bob#'01'B"), False);
        assert_eq!(evaluate(&rule, "cn=bob", "cn=Bob"), True);
    }
}
