//! The three-part substring matcher shared by every substring rule.

use crate::byte_string::ByteString;
use crate::matching::ConditionResult;

/// Normalized fragments of a substring assertion.
///
/// A value matches when it starts with `initial`, contains every `any` fragment
/// in order without overlap after that, and ends with `final_` after the last
/// `any` match. Empty `any` fragments are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringAssertion {
    initial: Option<ByteString>,
    any: Vec<ByteString>,
    final_: Option<ByteString>,
}

impl SubstringAssertion {
    pub fn new(
        initial: Option<ByteString>,
        any: Vec<ByteString>,
        final_: Option<ByteString>,
    ) -> Self {
        Self {
            initial,
            any,
            final_,
        }
    }

    pub fn initial(&self) -> Option<&ByteString> {
        self.initial.as_ref()
    }

    pub fn any(&self) -> &[ByteString] {
        &self.any
    }

    pub fn final_fragment(&self) -> Option<&ByteString> {
        self.final_.as_ref()
    }

    pub fn matches(&self, value: &ByteString) -> ConditionResult {
        ConditionResult::from_bool(self.scan(value.as_bytes()))
    }

    fn scan(&self, value: &[u8]) -> bool {
        let mut pos = 0;

        if let Some(initial) = &self.initial {
            if !value.starts_with(initial.as_bytes()) {
                return false;
            }
            pos = initial.len();
        }

        for fragment in self.any.iter().filter(|fragment| !fragment.is_empty()) {
            match find(&value[pos..], fragment.as_bytes()) {
                Some(offset) => pos += offset + fragment.len(),
                None => return false,
            }
        }

        if let Some(final_) = &self.final_ {
            if value.len() - pos < final_.len() || !value.ends_with(final_.as_bytes()) {
                return false;
            }
        }
        true
    }
}

/// Offset of the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let first = *needle.first()?;
    (0..haystack.len().checked_sub(needle.len())? + 1)
        .filter(|&i| haystack[i] == first)
        .find(|&i| haystack[i..].starts_with(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConditionResult::*;

    fn assertion(initial: Option<&str>, any: &[&str], final_: Option<&str>) -> SubstringAssertion {
        SubstringAssertion::new(
            initial.map(ByteString::from),
            any.iter().map(|s| ByteString::from(*s)).collect(),
            final_.map(ByteString::from),
        )
    }

    #[test]
    fn test_initial_any_final() {
        let value = ByteString::from("abcdefgh");
        assert_eq!(assertion(Some("ab"), &["d", "f"], Some("gh")).matches(&value), True);
        assert_eq!(assertion(Some("ab"), &["f", "d"], None).matches(&value), False);
        assert_eq!(assertion(None, &["xyz"], None).matches(&value), False);
        assert_eq!(assertion(Some("b"), &[], None).matches(&value), False);
    }

    #[test]
    fn test_final_may_not_overlap_consumed_input() {
        let value = ByteString::from("abcab");
        assert_eq!(assertion(Some("abc"), &[], Some("cab")).matches(&value), False);
        assert_eq!(assertion(Some("abc"), &[], Some("ab")).matches(&value), True);
        assert_eq!(assertion(None, &["cab"], Some("b")).matches(&value), False);
    }

    #[test]
    fn test_empty_any_fragment_is_ignored() {
        let value = ByteString::from("abc");
        assert_eq!(assertion(Some("a"), &["", "b", ""], Some("c")).matches(&value), True);
    }

    #[test]
    fn test_short_value() {
        let value = ByteString::from("ab");
        assert_eq!(assertion(Some("ab"), &[], Some("b")).matches(&value), False);
        assert_eq!(assertion(None, &["abc"], None).matches(&value), False);
    }
}
