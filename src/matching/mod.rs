//! Matching rule algorithms.
//!
//! Every matching rule in a catalog delegates to an implementation of
//! [`MatchingRuleImpl`]. Implementations normalize attribute values into
//! [`ByteString`]s whose byte order is meaningful for ordering rules, and turn
//! assertion values into [`Assertion`]s that are evaluated against normalized
//! attribute values with three-valued logic.
//!
//! # Key Types
//!
//! - [`ConditionResult`] - `True`, `False` or `Undefined`
//! - [`Assertion`] - a prepared assertion value
//! - [`SubstringAssertion`] - initial, any and final fragments
//!
//! Built-in implementations are looked up by OID with [`builtin`].

pub mod boolean;
pub mod dn;
pub mod first_component;
pub mod ordering;
pub mod string;
pub mod substring;

use crate::byte_string::ByteString;
use crate::error::DecodeResult;
use crate::schema::constants::*;
use crate::schema::registry::Schema;
use std::fmt;
use std::sync::Arc;

pub use substring::SubstringAssertion;

/// Three-valued result of evaluating an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionResult {
    True,
    False,
    Undefined,
}

impl ConditionResult {
    pub fn from_bool(value: bool) -> Self {
        if value {
            ConditionResult::True
        } else {
            ConditionResult::False
        }
    }

    /// Logical AND: `False` dominates, then `Undefined`.
    pub fn and(self, other: ConditionResult) -> ConditionResult {
        match (self, other) {
            (ConditionResult::False, _) | (_, ConditionResult::False) => ConditionResult::False,
            (ConditionResult::Undefined, _) | (_, ConditionResult::Undefined) => {
                ConditionResult::Undefined
            }
            _ => ConditionResult::True,
        }
    }

    /// Logical OR: `True` dominates, then `Undefined`.
    pub fn or(self, other: ConditionResult) -> ConditionResult {
        match (self, other) {
            (ConditionResult::True, _) | (_, ConditionResult::True) => ConditionResult::True,
            (ConditionResult::Undefined, _) | (_, ConditionResult::Undefined) => {
                ConditionResult::Undefined
            }
            _ => ConditionResult::False,
        }
    }

    pub fn not(self) -> ConditionResult {
        match self {
            ConditionResult::True => ConditionResult::False,
            ConditionResult::False => ConditionResult::True,
            ConditionResult::Undefined => ConditionResult::Undefined,
        }
    }

    pub fn is_true(&self) -> bool {
        *self == ConditionResult::True
    }
}

impl fmt::Display for ConditionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConditionResult::True => "TRUE",
            ConditionResult::False => "FALSE",
            ConditionResult::Undefined => "UNDEFINED",
        })
    }
}

type CustomMatcher = Arc<dyn Fn(&ByteString) -> ConditionResult + Send + Sync>;

/// A prepared assertion, evaluated against normalized attribute values.
#[derive(Clone)]
pub enum Assertion {
    Equals(ByteString),
    LessOrEqual(ByteString),
    GreaterOrEqual(ByteString),
    Substrings(SubstringAssertion),
    /// Rule-specific evaluation, e.g. word matching.
    Custom(CustomMatcher),
}

impl Assertion {
    pub fn custom<F>(matcher: F) -> Self
    where
        F: Fn(&ByteString) -> ConditionResult + Send + Sync + 'static,
    {
        Assertion::Custom(Arc::new(matcher))
    }

    /// Evaluate against an already normalized attribute value.
    pub fn matches(&self, normalized: &ByteString) -> ConditionResult {
        match self {
            Assertion::Equals(expected) => ConditionResult::from_bool(normalized == expected),
            Assertion::LessOrEqual(bound) => ConditionResult::from_bool(normalized <= bound),
            Assertion::GreaterOrEqual(bound) => ConditionResult::from_bool(normalized >= bound),
            Assertion::Substrings(substrings) => substrings.matches(normalized),
            Assertion::Custom(matcher) => matcher(normalized),
        }
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assertion::Equals(value) => f.debug_tuple("Equals").field(value).finish(),
            Assertion::LessOrEqual(value) => f.debug_tuple("LessOrEqual").field(value).finish(),
            Assertion::GreaterOrEqual(value) => {
                f.debug_tuple("GreaterOrEqual").field(value).finish()
            }
            Assertion::Substrings(substrings) => {
                f.debug_tuple("Substrings").field(substrings).finish()
            }
            Assertion::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Normalization and assertion behavior of a matching rule.
///
/// Implementations are stateless or hold only immutable data, and are shared
/// between every catalog that uses them.
pub trait MatchingRuleImpl: fmt::Debug + Send + Sync {
    /// Normalize an attribute value, failing if it is malformed.
    fn normalize_attribute_value(
        &self,
        schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString>;

    /// Prepare an assertion value. The default is byte equality of the
    /// normalized forms.
    fn assertion(&self, schema: &Schema, value: &ByteString) -> DecodeResult<Assertion> {
        Ok(Assertion::Equals(self.normalize_attribute_value(schema, value)?))
    }

    /// True if normalized values sort in the rule's order.
    fn is_ordering(&self) -> bool {
        false
    }

    fn is_substring(&self) -> bool {
        false
    }

    /// Normalize one fragment of a substring assertion.
    fn normalize_substring_fragment(
        &self,
        schema: &Schema,
        fragment: &ByteString,
    ) -> DecodeResult<ByteString> {
        self.normalize_attribute_value(schema, fragment)
    }
}

/// Built-in implementation for a matching rule OID.
pub(crate) fn builtin(oid: &str) -> Option<Arc<dyn MatchingRuleImpl>> {
    use ordering::{OrderedMatchingRule, OrderedValue};
    use string::{Normalizer, StringMatchingRule, WordMatchingRule};

    let implementation: Arc<dyn MatchingRuleImpl> = match oid {
        EMR_CASE_IGNORE_OID | EMR_CASE_IGNORE_IA5_OID => {
            Arc::new(StringMatchingRule::equality(Normalizer::CaseIgnore))
        }
        OMR_CASE_IGNORE_OID => Arc::new(StringMatchingRule::ordering(Normalizer::CaseIgnore)),
        SMR_CASE_IGNORE_OID | SMR_CASE_IGNORE_IA5_OID => {
            Arc::new(StringMatchingRule::substrings(Normalizer::CaseIgnore))
        }
        EMR_CASE_EXACT_OID | EMR_CASE_EXACT_IA5_OID => {
            Arc::new(StringMatchingRule::equality(Normalizer::CaseExact))
        }
        OMR_CASE_EXACT_OID => Arc::new(StringMatchingRule::ordering(Normalizer::CaseExact)),
        SMR_CASE_EXACT_OID | SMR_CASE_EXACT_IA5_OID => {
            Arc::new(StringMatchingRule::substrings(Normalizer::CaseExact))
        }
        EMR_NUMERIC_STRING_OID => Arc::new(StringMatchingRule::equality(Normalizer::NumericString)),
        OMR_NUMERIC_STRING_OID => Arc::new(StringMatchingRule::ordering(Normalizer::NumericString)),
        SMR_NUMERIC_STRING_OID => {
            Arc::new(StringMatchingRule::substrings(Normalizer::NumericString))
        }
        EMR_TELEPHONE_OID => Arc::new(StringMatchingRule::equality(Normalizer::Telephone)),
        SMR_TELEPHONE_OID => Arc::new(StringMatchingRule::substrings(Normalizer::Telephone)),
        EMR_CASE_IGNORE_LIST_OID => {
            Arc::new(StringMatchingRule::equality(Normalizer::CaseIgnoreList))
        }
        SMR_CASE_IGNORE_LIST_OID => {
            Arc::new(StringMatchingRule::substrings(Normalizer::CaseIgnoreList))
        }
        EMR_WORD_OID => Arc::new(WordMatchingRule::word()),
        EMR_KEYWORD_OID => Arc::new(WordMatchingRule::keyword()),
        EMR_OCTET_STRING_OID => Arc::new(OrderedMatchingRule::equality(OrderedValue::OctetString)),
        OMR_OCTET_STRING_OID => Arc::new(OrderedMatchingRule::ordering(OrderedValue::OctetString)),
        SMR_OCTET_STRING_OID => Arc::new(ordering::OctetStringSubstringMatchingRule),
        EMR_INTEGER_OID => Arc::new(OrderedMatchingRule::equality(OrderedValue::Integer)),
        OMR_INTEGER_OID => Arc::new(OrderedMatchingRule::ordering(OrderedValue::Integer)),
        EMR_GENERALIZED_TIME_OID => {
            Arc::new(OrderedMatchingRule::equality(OrderedValue::GeneralizedTime))
        }
        OMR_GENERALIZED_TIME_OID => {
            Arc::new(OrderedMatchingRule::ordering(OrderedValue::GeneralizedTime))
        }
        EMR_BIT_STRING_OID => Arc::new(ordering::BitStringMatchingRule),
        EMR_BOOLEAN_OID => Arc::new(boolean::BooleanMatchingRule),
        EMR_OID_OID => Arc::new(first_component::ObjectIdentifierMatchingRule),
        EMR_DN_OID => Arc::new(dn::DistinguishedNameMatchingRule),
        EMR_UNIQUE_MEMBER_OID => Arc::new(dn::UniqueMemberMatchingRule),
        EMR_OID_FIRST_COMPONENT_OID => Arc::new(first_component::OidFirstComponentMatchingRule),
        EMR_INTEGER_FIRST_COMPONENT_OID => {
            Arc::new(first_component::IntegerFirstComponentMatchingRule)
        }
        EMR_DIRECTORY_STRING_FIRST_COMPONENT_OID => {
            Arc::new(first_component::DirectoryStringFirstComponentMatchingRule)
        }
        _ => return None,
    };
    Some(implementation)
}

/// Implementation used for rules without a built-in counterpart.
pub(crate) fn default_impl() -> Arc<dyn MatchingRuleImpl> {
    Arc::new(ordering::OrderedMatchingRule::equality(
        ordering::OrderedValue::OctetString,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConditionResult::*;

    #[test]
    fn test_three_valued_logic() {
        assert_eq!(True.and(Undefined), Undefined);
        assert_eq!(False.and(Undefined), False);
        assert_eq!(True.or(Undefined), True);
        assert_eq!(False.or(Undefined), Undefined);
        assert_eq!(Undefined.not(), Undefined);
        assert_eq!(ConditionResult::from_bool(true), True);
    }

    #[test]
    fn test_plain_assertions() {
        let value = ByteString::from("m");
        assert_eq!(Assertion::Equals("m".into()).matches(&value), True);
        assert_eq!(Assertion::LessOrEqual("z".into()).matches(&value), True);
        assert_eq!(Assertion::GreaterOrEqual("z".into()).matches(&value), False);
        assert_eq!(Assertion::custom(|_| Undefined).matches(&value), Undefined);
    }

    #[test]
    fn test_builtin_registry() {
        assert!(builtin(EMR_CASE_IGNORE_OID).is_some());
        assert!(builtin(OMR_INTEGER_OID).is_some_and(|rule| rule.is_ordering()));
        assert!(builtin(SMR_CASE_IGNORE_OID).is_some_and(|rule| rule.is_substring()));
        assert!(builtin("1.2.3.4.5").is_none());
    }
}
