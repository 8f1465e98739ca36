//! Reader for RFC 4512 definition strings.
//!
//! All element parsers and the definition-valued syntaxes go through the same
//! [`DefinitionReader`], so the grammar accepted when building a schema and the
//! grammar accepted when validating an `attributeTypes` value never diverge.
//!
//! The general shape of a definition is:
//!
//! ```text
//! ( numericoid-or-ruleid *( SP keyword [SP argument] ) SP )
//! ```
//!
//! where arguments are a quoted string, a parenthesized list of quoted strings,
//! an OID, a `$`-separated parenthesized list of OIDs, or a bare word.

use crate::config::SchemaOptions;
use crate::error::{DecodeError, DecodeResult};
use crate::schema::types::{ElementInfo, ElementKind};

pub(crate) struct DefinitionReader<'a> {
    input: &'a str,
    pos: usize,
    kind: ElementKind,
}

impl<'a> DefinitionReader<'a> {
    /// Start reading a definition, consuming the opening parenthesis.
    pub(crate) fn open(kind: ElementKind, input: &'a str) -> DecodeResult<Self> {
        let mut reader = Self {
            input,
            pos: 0,
            kind,
        };
        reader.skip_whitespace();
        match reader.peek() {
            None => Err(DecodeError::EmptyDefinition { kind }),
            Some(b'(') => {
                reader.pos += 1;
                Ok(reader)
            }
            Some(_) => Err(DecodeError::ExpectedOpenParenthesis {
                position: reader.pos,
                found: reader.current_char(),
            }),
        }
    }

    /// A reader over a bare value, for syntaxes that only need the primitives.
    pub(crate) fn value(kind: ElementKind, input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            kind,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or(' ')
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn illegal(&self, context: &str) -> DecodeError {
        if self.is_at_end() {
            DecodeError::unexpected_end(self.pos, context)
        } else {
            DecodeError::illegal_character(self.pos, self.current_char(), context)
        }
    }

    fn expect(&mut self, byte: u8, context: &str) -> DecodeResult<()> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.illegal(context))
        }
    }

    fn is_delimiter(byte: Option<u8>) -> bool {
        matches!(
            byte,
            None | Some(b' ' | b'\t' | b'\n' | b'\r' | b'(' | b')' | b'$' | b'{' | b'\'')
        )
    }

    /// Read the next keyword, or `None` once the closing parenthesis is consumed.
    pub(crate) fn next_keyword(&mut self) -> DecodeResult<Option<String>> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(DecodeError::unexpected_end(self.pos, "')'")),
            Some(b')') => {
                self.pos += 1;
                Ok(None)
            }
            Some(_) => {
                let start = self.pos;
                while !Self::is_delimiter(self.peek()) {
                    self.pos += 1;
                }
                if start == self.pos {
                    return Err(self.illegal("keyword"));
                }
                Ok(Some(self.input[start..self.pos].to_string()))
            }
        }
    }

    /// Error for a keyword this kind of element does not accept.
    pub(crate) fn illegal_token(&self, token: &str) -> DecodeError {
        DecodeError::IllegalToken {
            kind: self.kind,
            token: token.to_string(),
            position: self.pos - token.len(),
        }
    }

    /// Read a numeric OID or a descriptor.
    ///
    /// In lenient mode descriptors may contain `_` and `.`, and tokens starting
    /// with a digit may continue as descriptors (`3gppUser`).
    pub(crate) fn read_oid(&mut self, allow_malformed: bool) -> DecodeResult<String> {
        self.skip_whitespace();
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_digit() => {
                loop {
                    let arc_start = self.pos;
                    while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                        self.pos += 1;
                    }
                    if arc_start == self.pos {
                        return Err(self.illegal("numeric OID"));
                    }
                    if self.peek() == Some(b'.') {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                if allow_malformed {
                    while matches!(self.peek(), Some(b) if is_lenient_descr_char(b)) {
                        self.pos += 1;
                    }
                }
            }
            Some(b) if b.is_ascii_alphabetic() => {
                while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'-'
                    || (allow_malformed && (b == b'_' || b == b'.')))
                {
                    self.pos += 1;
                }
            }
            _ => return Err(self.illegal("OID")),
        }
        if !Self::is_delimiter(self.peek()) {
            return Err(self.illegal("OID"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Read `oid` or `( oid $ oid ... )`.
    pub(crate) fn read_oids(&mut self, allow_malformed: bool) -> DecodeResult<Vec<String>> {
        self.skip_whitespace();
        if self.peek() != Some(b'(') {
            return Ok(vec![self.read_oid(allow_malformed)?]);
        }
        self.pos += 1;
        let mut oids = Vec::new();
        loop {
            oids.push(self.read_oid(allow_malformed)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b'$') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(oids);
                }
                _ => return Err(self.illegal("OID list")),
            }
        }
    }

    /// Read a syntax OID with an optional `{length}` bound.
    pub(crate) fn read_syntax_oid(
        &mut self,
        allow_malformed: bool,
    ) -> DecodeResult<(String, Option<u32>)> {
        let oid = self.read_oid(allow_malformed)?;
        if self.peek() != Some(b'{') {
            return Ok((oid, None));
        }
        self.pos += 1;
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = &self.input[start..self.pos];
        if digits.is_empty() || self.peek() != Some(b'}') {
            return Err(self.illegal("syntax length"));
        }
        self.pos += 1;
        let length = digits
            .parse::<u32>()
            .map_err(|_| DecodeError::illegal_character(start, '9', "syntax length"))?;
        Ok((oid, Some(length)))
    }

    /// Read a DIT structure rule ID.
    pub(crate) fn read_rule_id(&mut self) -> DecodeResult<u32> {
        self.skip_whitespace();
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos || !Self::is_delimiter(self.peek()) {
            return Err(self.illegal("rule ID"));
        }
        self.input[start..self.pos]
            .parse::<u32>()
            .map_err(|_| DecodeError::illegal_character(start, '9', "rule ID"))
    }

    /// Read `ruleid` or `( ruleid ruleid ... )`.
    pub(crate) fn read_rule_ids(&mut self) -> DecodeResult<Vec<u32>> {
        self.skip_whitespace();
        if self.peek() != Some(b'(') {
            return Ok(vec![self.read_rule_id()?]);
        }
        self.pos += 1;
        let mut ids = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b')') {
                self.pos += 1;
                return Ok(ids);
            }
            ids.push(self.read_rule_id()?);
        }
    }

    /// Read a quoted string, decoding `\XX` hex escapes.
    pub(crate) fn read_quoted_string(&mut self) -> DecodeResult<String> {
        self.expect(b'\'', "quoted string")?;
        let mut bytes = Vec::new();
        loop {
            match self.peek() {
                None => return Err(DecodeError::unexpected_end(self.pos, "closing quote")),
                Some(b'\'') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    let hex = self.input.get(self.pos + 1..self.pos + 3);
                    match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                        Some(byte) => {
                            bytes.push(byte);
                            self.pos += 3;
                        }
                        None => return Err(self.illegal("escaped character")),
                    }
                }
                Some(b) => {
                    bytes.push(b);
                    self.pos += 1;
                }
            }
        }
        String::from_utf8(bytes)
            .map_err(|_| DecodeError::illegal_character(self.pos, '\\', "quoted string"))
    }

    /// Read `'value'` or `( 'value' 'value' ... )`.
    pub(crate) fn read_quoted_strings(&mut self) -> DecodeResult<Vec<String>> {
        self.skip_whitespace();
        if self.peek() != Some(b'(') {
            return Ok(vec![self.read_quoted_string()?]);
        }
        self.pos += 1;
        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b')') {
                self.pos += 1;
                return Ok(values);
            }
            values.push(self.read_quoted_string()?);
        }
    }

    /// Read the names of a `NAME` clause, checking the descriptor grammar.
    pub(crate) fn read_names(&mut self, allow_malformed: bool) -> DecodeResult<Vec<String>> {
        let start = self.pos;
        let names = self.read_quoted_strings()?;
        for name in &names {
            if !is_descriptor(name, allow_malformed) {
                let bad = name
                    .chars()
                    .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
                    .unwrap_or('\'');
                return Err(DecodeError::illegal_character(start, bad, "name"));
            }
        }
        Ok(names)
    }

    /// Read an unquoted word such as an attribute usage.
    pub(crate) fn read_word(&mut self) -> DecodeResult<String> {
        self.skip_whitespace();
        let start = self.pos;
        while !Self::is_delimiter(self.peek()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.illegal("word"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Handle the keywords every element kind accepts: `NAME`, `DESC`,
    /// `OBSOLETE` and `X-` extensions. Returns false for any other keyword.
    pub(crate) fn read_common(
        &mut self,
        token: &str,
        info: &mut ElementInfo,
        options: &SchemaOptions,
    ) -> DecodeResult<bool> {
        if token.eq_ignore_ascii_case("name") {
            info.set_names(self.read_names(options.allow_malformed_names_and_options)?);
        } else if token.eq_ignore_ascii_case("desc") {
            info.set_description(self.read_quoted_string()?);
        } else if token.eq_ignore_ascii_case("obsolete") {
            info.set_obsolete(true);
        } else if is_extension_keyword(token) {
            let values = self.read_quoted_strings()?;
            info.add_extension(token, values);
        } else {
            return Ok(false);
        }
        Ok(true)
    }
}

fn is_lenient_descr_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.')
}

/// `X-` followed by letters, `-` and `_`.
pub(crate) fn is_extension_keyword(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() > 2
        && bytes[..2].eq_ignore_ascii_case(b"x-")
        && bytes[2..]
            .iter()
            .all(|b| b.is_ascii_alphabetic() || *b == b'-' || *b == b'_')
}

/// RFC 4512 `descr`, optionally relaxed for legacy servers.
pub(crate) fn is_descriptor(value: &str, allow_malformed: bool) -> bool {
    let bytes = value.as_bytes();
    match bytes.first() {
        None => false,
        Some(b) if b.is_ascii_alphabetic() => bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || (allow_malformed && *b == b'_')),
        Some(_) if allow_malformed => bytes.iter().all(|b| is_lenient_descr_char(*b)),
        Some(_) => false,
    }
}

/// RFC 4512 `numericoid`.
pub(crate) fn is_numeric_oid(value: &str) -> bool {
    !value.is_empty()
        && value
            .split('.')
            .all(|arc| !arc.is_empty() && arc.bytes().all(|b| b.is_ascii_digit()))
}

/// Extract the first component of a definition, e.g. the OID in `( 2.5.4.3 NAME 'cn' )`.
pub(crate) fn first_component_oid(value: &str, allow_malformed: bool) -> DecodeResult<String> {
    let mut reader = DefinitionReader::open(ElementKind::AttributeType, value)?;
    reader.read_oid(allow_malformed)
}

/// Extract the leading rule ID of a DIT structure rule definition.
pub(crate) fn first_component_rule_id(value: &str) -> DecodeResult<u32> {
    let mut reader = DefinitionReader::open(ElementKind::DitStructureRule, value)?;
    reader.read_rule_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_requires_parenthesis() {
        assert!(matches!(
            DefinitionReader::open(ElementKind::AttributeType, "   "),
            Err(DecodeError::EmptyDefinition { .. })
        ));
        assert!(matches!(
            DefinitionReader::open(ElementKind::AttributeType, " 1.2.3 )"),
            Err(DecodeError::ExpectedOpenParenthesis { position: 1, found: '1' })
        ));
    }

    #[test]
    fn test_read_oid_forms() {
        let mut reader = DefinitionReader::value(ElementKind::AttributeType, "2.5.4.3 cn my_attr 1..2");
        assert_eq!(reader.read_oid(false).unwrap(), "2.5.4.3");
        assert_eq!(reader.read_oid(false).unwrap(), "cn");
        assert!(reader.read_oid(false).is_err());

        let mut lenient = DefinitionReader::value(ElementKind::AttributeType, "my_attr");
        assert_eq!(lenient.read_oid(true).unwrap(), "my_attr");

        let mut empty_arc = DefinitionReader::value(ElementKind::AttributeType, "1..2");
        assert!(empty_arc.read_oid(false).is_err());
    }

    #[test]
    fn test_read_oid_list() {
        let mut reader = DefinitionReader::value(ElementKind::ObjectClass, "( cn $ sn$description )");
        assert_eq!(reader.read_oids(false).unwrap(), vec!["cn", "sn", "description"]);
    }

    #[test]
    fn test_quoted_string_escapes() {
        let mut reader = DefinitionReader::value(ElementKind::AttributeType, r"'it\27s \5C here'");
        assert_eq!(reader.read_quoted_string().unwrap(), "it's \\ here");

        let mut unterminated = DefinitionReader::value(ElementKind::AttributeType, "'open");
        assert!(matches!(
            unterminated.read_quoted_string(),
            Err(DecodeError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn test_syntax_length() {
        let mut reader =
            DefinitionReader::value(ElementKind::AttributeType, "1.3.6.1.4.1.1466.115.121.1.15{256}");
        let (oid, length) = reader.read_syntax_oid(false).unwrap();
        assert_eq!(oid, "1.3.6.1.4.1.1466.115.121.1.15");
        assert_eq!(length, Some(256));
    }

    #[test]
    fn test_rule_ids() {
        let mut reader = DefinitionReader::value(ElementKind::DitStructureRule, "( 1 2 30 )");
        assert_eq!(reader.read_rule_ids().unwrap(), vec![1, 2, 30]);
    }

    #[test]
    fn test_first_component() {
        assert_eq!(
            first_component_oid("( 2.5.4.3 NAME 'cn' SUP name )", false).unwrap(),
            "2.5.4.3"
        );
        assert_eq!(first_component_rule_id("( 42 FORM someForm )").unwrap(), 42);
    }

    #[test]
    fn test_descriptor_checks() {
        assert!(is_descriptor("cn", false));
        assert!(is_descriptor("x-Attr-1", false));
        assert!(!is_descriptor("bad_name", false));
        assert!(is_descriptor("bad_name", true));
        assert!(!is_descriptor("3gpp", false));
        assert!(is_descriptor("3gpp", true));
        assert!(is_numeric_oid("1.2.840"));
        assert!(!is_numeric_oid("1.2."));
        assert!(is_extension_keyword("X-ORIGIN"));
        assert!(!is_extension_keyword("X-"));
    }
}
