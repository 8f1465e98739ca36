//! String matching rules: case-ignore, case-exact, numeric string, telephone
//! number, case-ignore list, word and keyword.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::{Assertion, ConditionResult, MatchingRuleImpl};
use crate::schema::registry::Schema;

/// View a value as UTF-8 or report it as malformed for `syntax`.
pub(crate) fn utf8<'a>(value: &'a ByteString, syntax: &str) -> DecodeResult<&'a str> {
    value.as_str().ok_or_else(|| {
        DecodeError::invalid_value(syntax, value.to_string_lossy(), "the value is not valid UTF-8")
    })
}

/// Collapse runs of whitespace to one space, optionally trim and case fold.
///
/// An input made only of spaces normalizes to a single space rather than the
/// empty string.
pub fn normalize_string(value: &str, case_fold: bool, trim: bool) -> String {
    let mut normalized = String::with_capacity(value.len());
    let mut pending_space = false;
    for c in value.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && (!trim || !normalized.is_empty()) {
            normalized.push(' ');
        }
        pending_space = false;
        if case_fold {
            normalized.extend(c.to_lowercase());
        } else {
            normalized.push(c);
        }
    }
    if pending_space && !trim {
        normalized.push(' ');
    }
    if normalized.is_empty() && !value.is_empty() {
        normalized.push(' ');
    }
    normalized
}

/// How a [`StringMatchingRule`] normalizes values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    CaseIgnore,
    CaseExact,
    /// Spaces are insignificant.
    NumericString,
    /// Spaces and hyphens are insignificant.
    Telephone,
    /// `$`-separated lines, each compared ignoring case.
    CaseIgnoreList,
}

impl Normalizer {
    fn apply(&self, value: &str, trim: bool) -> String {
        match self {
            Normalizer::CaseIgnore => normalize_string(value, true, trim),
            Normalizer::CaseExact => normalize_string(value, false, trim),
            Normalizer::NumericString => value.chars().filter(|c| *c != ' ').collect(),
            Normalizer::Telephone => value.chars().filter(|c| *c != ' ' && *c != '-').collect(),
            Normalizer::CaseIgnoreList => value
                .split('$')
                .map(|line| normalize_string(line, true, true))
                .collect::<Vec<_>>()
                .join("$"),
        }
    }

    fn syntax_name(&self) -> &'static str {
        match self {
            Normalizer::NumericString => "Numeric String",
            Normalizer::Telephone => "Telephone Number",
            Normalizer::CaseIgnoreList => "Postal Address",
            Normalizer::CaseIgnore | Normalizer::CaseExact => "Directory String",
        }
    }
}

/// Equality, ordering or substring rule over normalized strings.
#[derive(Debug, Clone)]
pub struct StringMatchingRule {
    normalizer: Normalizer,
    ordering: bool,
    substrings: bool,
}

impl StringMatchingRule {
    pub fn equality(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            ordering: false,
            substrings: false,
        }
    }

    pub fn ordering(normalizer: Normalizer) -> Self {
        Self {
            ordering: true,
            ..Self::equality(normalizer)
        }
    }

    pub fn substrings(normalizer: Normalizer) -> Self {
        Self {
            substrings: true,
            ..Self::equality(normalizer)
        }
    }
}

impl MatchingRuleImpl for StringMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        let value = utf8(value, self.normalizer.syntax_name())?;
        Ok(self.normalizer.apply(value, true).into())
    }

    fn is_ordering(&self) -> bool {
        self.ordering
    }

    fn is_substring(&self) -> bool {
        self.substrings
    }

    fn normalize_substring_fragment(
        &self,
        _schema: &Schema,
        fragment: &ByteString,
    ) -> DecodeResult<ByteString> {
        let fragment = utf8(fragment, self.normalizer.syntax_name())?;
        Ok(self.normalizer.apply(fragment, false).into())
    }
}

/// `wordMatch` and `keywordMatch`: the assertion equals one word of the value.
#[derive(Debug, Clone)]
pub struct WordMatchingRule {
    keyword: bool,
}

impl WordMatchingRule {
    pub fn word() -> Self {
        Self { keyword: false }
    }

    pub fn keyword() -> Self {
        Self { keyword: true }
    }

    fn is_separator(keyword: bool, c: char) -> bool {
        c == ' ' || (keyword && matches!(c, ',' | '.' | ';' | ':' | '!' | '?' | '/' | '$' | '"'))
    }
}

impl MatchingRuleImpl for WordMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        Ok(normalize_string(utf8(value, "Directory String")?, true, true).into())
    }

    fn assertion(&self, schema: &Schema, value: &ByteString) -> DecodeResult<Assertion> {
        let word = self.normalize_attribute_value(schema, value)?;
        let keyword = self.keyword;
        Ok(Assertion::custom(move |normalized: &ByteString| {
            let (Some(value), Some(word)) = (normalized.as_str(), word.as_str()) else {
                return ConditionResult::Undefined;
            };
            ConditionResult::from_bool(
                value
                    .split(|c| Self::is_separator(keyword, c))
                    .any(|candidate| candidate == word),
            )
        }))
    }
}
