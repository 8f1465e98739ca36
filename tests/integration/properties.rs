//! Property-based tests of the order-preserving encodings and the substring
//! matcher.

use ldap_schema::ByteString;
use ldap_schema::matching::ConditionResult;
use ldap_schema::matching::SubstringAssertion;
use ldap_schema::matching::string::normalize_string;
use ldap_schema::syntaxes::{generalized_time, integer};
use proptest::prelude::*;

fn fragment(value: &str) -> ByteString {
    ByteString::from(value)
}

proptest! {
    /// Byte order of encoded integers equals numeric order.
    #[test]
    fn prop_integer_encoding_preserves_order(a in any::<i64>(), b in any::<i64>()) {
        let ea = integer::encode(&a.to_string()).expect("canonical integer");
        let eb = integer::encode(&b.to_string()).expect("canonical integer");
        prop_assert_eq!(ea.cmp(&eb), a.cmp(&b));
    }

    /// Integers longer than any machine word still order correctly.
    #[test]
    fn prop_long_integers_order_by_length(digits in "[1-9][0-9]{20,40}") {
        let longer = format!("{}0", digits);
        let e_short = integer::encode(&digits).expect("valid");
        let e_long = integer::encode(&longer).expect("valid");
        prop_assert!(e_short < e_long);

        let n_short = integer::encode(&format!("-{}", digits)).expect("valid");
        let n_long = integer::encode(&format!("-{}", longer)).expect("valid");
        prop_assert!(n_long < n_short);
    }

    #[test]
    fn prop_leading_zeros_are_rejected(digits in "0[0-9]{1,10}") {
        prop_assert!(integer::validate(&digits).is_err());
    }

    #[test]
    fn prop_time_encoding_preserves_order(a in any::<i64>(), b in any::<i64>()) {
        let ea = generalized_time::encode_millis(a);
        let eb = generalized_time::encode_millis(b);
        prop_assert_eq!(ea.cmp(&eb), a.cmp(&b));
    }

    /// Cutting a value into initial, any and final pieces always yields an
    /// assertion the value matches.
    #[test]
    fn prop_substrings_of_value_match(
        value in "[a-z ]{0,30}",
        cuts in (0usize..=30, 0usize..=30),
    ) {
        let (a, b) = (cuts.0.min(cuts.1).min(value.len()), cuts.0.max(cuts.1).min(value.len()));
        let middle = (a + b) / 2;
        let assertion = SubstringAssertion::new(
            Some(fragment(&value[..a])),
            vec![fragment(&value[a..middle])],
            Some(fragment(&value[b..])),
        );
        prop_assert_eq!(assertion.matches(&fragment(&value)), ConditionResult::True);
    }

    /// A final fragment longer than the value never matches.
    #[test]
    fn prop_oversized_final_never_matches(value in "[a-z]{0,10}", extra in "[a-z]{1,5}") {
        let final_ = format!("{}{}", extra, value);
        let assertion = SubstringAssertion::new(None, Vec::new(), Some(fragment(&final_)));
        prop_assert_eq!(assertion.matches(&fragment(&value)), ConditionResult::False);
    }

    #[test]
    fn prop_string_normalization_is_idempotent(value in "[a-zA-Z \t]{0,40}") {
        let once = normalize_string(&value, true, true);
        let twice = normalize_string(&once, true, true);
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.contains("  "));
    }
}
