//! Distinguished names.
//!
//! A [`Dn`] is parsed from its RFC 4514 string form against a schema, which
//! resolves every attribute type so that values can later be compared with the
//! type's own equality rule. RDNs are stored least significant first, as they
//! appear in the string.
//!
//! ```rust
//! use ldap_schema::dn::Dn;
//! use ldap_schema::matching::ConditionResult;
//! use ldap_schema::schema::core_schema;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = core_schema();
//! let a = Dn::parse("CN=John  Smith, dc=Example,dc=com", &schema)?;
//! let b = Dn::parse("cn=john smith,DC=example,DC=COM", &schema)?;
//! assert_eq!(a.matches(&b, &schema), ConditionResult::True);
//! # Ok(())
//! # }
//! ```

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::ConditionResult;
use crate::schema::attribute_type::AttributeType;
use crate::schema::parser::{is_descriptor, is_numeric_oid};
use crate::schema::registry::Schema;
use std::fmt;
use std::sync::Arc;

/// One attribute value assertion of an RDN.
#[derive(Debug, Clone)]
pub struct Ava {
    attribute_type: Arc<AttributeType>,
    attribute_name: String,
    value: ByteString,
    normalized: ByteString,
}

impl Ava {
    pub fn attribute_type(&self) -> &Arc<AttributeType> {
        &self.attribute_type
    }

    /// The attribute name as it was written.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn value(&self) -> &ByteString {
        &self.value
    }

    /// The value as normalized by the attribute type's equality rule, or the
    /// value itself when there is no rule or the rule rejects it.
    pub fn normalized_value(&self) -> &ByteString {
        &self.normalized
    }

    /// Compare with the attribute type's equality rule.
    ///
    /// A value the rule cannot normalize makes the comparison `Undefined`.
    pub fn matches(&self, other: &Ava, schema: &Schema) -> ConditionResult {
        if self.attribute_type.oid() != other.attribute_type.oid() {
            return ConditionResult::False;
        }
        let Some(rule) = self.attribute_type.equality_matching_rule() else {
            return ConditionResult::from_bool(self.value == other.value);
        };
        match rule.get_assertion(schema, &self.value) {
            Ok(assertion) => rule.matches(schema, &other.value, &assertion),
            Err(_) => ConditionResult::Undefined,
        }
    }
}

/// A relative distinguished name: one or more AVAs.
///
/// Multi-valued RDNs keep their AVAs sorted by attribute type OID and then by
/// normalized value, since the order they were written in carries no meaning.
#[derive(Debug, Clone)]
pub struct Rdn {
    avas: Vec<Ava>,
}

impl Rdn {
    fn new(mut avas: Vec<Ava>) -> Self {
        avas.sort_by(|a, b| {
            a.attribute_type
                .oid()
                .cmp(b.attribute_type.oid())
                .then_with(|| a.normalized.cmp(&b.normalized))
        });
        Self { avas }
    }

    pub fn avas(&self) -> &[Ava] {
        &self.avas
    }

    pub fn is_multi_valued(&self) -> bool {
        self.avas.len() > 1
    }

    pub fn matches(&self, other: &Rdn, schema: &Schema) -> ConditionResult {
        if self.avas.len() != other.avas.len() {
            return ConditionResult::False;
        }
        self.avas
            .iter()
            .zip(&other.avas)
            .fold(ConditionResult::True, |result, (a, b)| {
                result.and(a.matches(b, schema))
            })
    }
}

/// A distinguished name.
#[derive(Debug, Clone, Default)]
pub struct Dn {
    rdns: Vec<Rdn>,
}

impl Dn {
    /// The empty DN.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse the RFC 4514 string form, resolving attribute types in `schema`.
    pub fn parse(dn: &str, schema: &Schema) -> DecodeResult<Self> {
        DnReader::new(dn, schema).read_dn()
    }

    pub fn rdns(&self) -> &[Rdn] {
        &self.rdns
    }

    /// The most specific RDN.
    pub fn rdn(&self) -> Option<&Rdn> {
        self.rdns.first()
    }

    pub fn parent(&self) -> Option<Dn> {
        if self.rdns.is_empty() {
            return None;
        }
        Some(Dn {
            rdns: self.rdns[1..].to_vec(),
        })
    }

    pub fn size(&self) -> usize {
        self.rdns.len()
    }

    pub fn is_root(&self) -> bool {
        self.rdns.is_empty()
    }

    /// Structural equality, component by component from the most significant.
    ///
    /// DNs of different length never match. `False` from any component wins
    /// over `Undefined`.
    pub fn matches(&self, other: &Dn, schema: &Schema) -> ConditionResult {
        if self.rdns.len() != other.rdns.len() {
            return ConditionResult::False;
        }
        let mut result = ConditionResult::True;
        for (a, b) in self.rdns.iter().rev().zip(other.rdns.iter().rev()) {
            match a.matches(b, schema) {
                ConditionResult::False => return ConditionResult::False,
                ConditionResult::Undefined => result = ConditionResult::Undefined,
                ConditionResult::True => {}
            }
        }
        result
    }

    /// Canonical string form: attribute type OIDs and values normalized by
    /// each type's equality rule. Equal DNs render to the same bytes.
    pub fn to_normalized_string(&self) -> String {
        self.render(|ava| (ava.attribute_type.oid(), &ava.normalized))
    }

    fn render<'a>(&'a self, part: impl Fn(&'a Ava) -> (&'a str, &'a ByteString)) -> String {
        let mut out = String::new();
        for (i, rdn) in self.rdns.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            for (j, ava) in rdn.avas.iter().enumerate() {
                if j > 0 {
                    out.push('+');
                }
                let (name, value) = part(ava);
                out.push_str(name);
                out.push('=');
                escape_value(value, &mut out);
            }
        }
        out
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|ava| (ava.attribute_name.as_str(), &ava.value)))
    }
}

fn escape_value(value: &ByteString, out: &mut String) {
    let Some(text) = value.as_str() else {
        for b in value.as_bytes() {
            out.push_str(&format!("\\{:02X}", b));
        }
        return;
    };
    let last = text.chars().count().saturating_sub(1);
    for (i, c) in text.chars().enumerate() {
        match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=' => {
                out.push('\\');
                out.push(c);
            }
            ' ' | '#' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            ' ' if i == last => out.push_str("\\ "),
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("\\{:02X}", b));
                }
            }
            c => out.push(c),
        }
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

struct DnReader<'a> {
    dn: &'a str,
    bytes: &'a [u8],
    pos: usize,
    schema: &'a Schema,
}

impl<'a> DnReader<'a> {
    fn new(dn: &'a str, schema: &'a Schema) -> Self {
        Self {
            dn,
            bytes: dn.as_bytes(),
            pos: 0,
            schema,
        }
    }

    fn error(&self, reason: impl Into<String>) -> DecodeError {
        DecodeError::invalid_dn(self.dn, reason)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn read_dn(&mut self) -> DecodeResult<Dn> {
        self.skip_whitespace();
        let mut rdns = Vec::new();
        if self.peek().is_none() {
            return Ok(Dn { rdns });
        }
        loop {
            rdns.push(self.read_rdn()?);
            self.skip_whitespace();
            match self.peek() {
                None => return Ok(Dn { rdns }),
                Some(b',' | b';') => self.pos += 1,
                Some(c) => {
                    return Err(self.error(format!(
                        "unexpected character '{}' at position {}",
                        c as char, self.pos
                    )));
                }
            }
        }
    }

    fn read_rdn(&mut self) -> DecodeResult<Rdn> {
        let mut avas = vec![self.read_ava()?];
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'+') {
                return Ok(Rdn::new(avas));
            }
            self.pos += 1;
            avas.push(self.read_ava()?);
        }
    }

    fn read_ava(&mut self) -> DecodeResult<Ava> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'=' || b == b' ' {
                break;
            }
            self.pos += 1;
        }
        let dn = self.dn;
        let attribute_name = &dn[start..self.pos];
        let lenient = self.schema.options().allow_malformed_names_and_options;
        if !is_numeric_oid(attribute_name) && !is_descriptor(attribute_name, lenient) {
            return Err(self.error(format!("invalid attribute type '{}'", attribute_name)));
        }
        let attribute_type = self
            .schema
            .get_attribute_type(attribute_name)
            .map_err(|e| self.error(e.to_string()))?;

        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Err(self.error(format!(
                "expected '=' after attribute type '{}'",
                attribute_name
            )));
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.peek() {
            Some(b'#') => self.read_hex_value()?,
            Some(b'"') => self.read_quoted_value()?,
            _ => self.read_string_value()?,
        };
        let normalized = attribute_type
            .equality_matching_rule()
            .and_then(|rule| rule.normalize_attribute_value(self.schema, &value).ok())
            .unwrap_or_else(|| value.clone());
        Ok(Ava {
            attribute_type,
            attribute_name: attribute_name.to_string(),
            value,
            normalized,
        })
    }

    fn read_escape(&mut self, value: &mut Vec<u8>) -> DecodeResult<()> {
        self.pos += 1;
        let Some(first) = self.peek() else {
            return Err(self.error("the DN ends with an escape character"));
        };
        match (hex_value(first), self.bytes.get(self.pos + 1).copied().and_then(hex_value)) {
            (Some(high), Some(low)) => {
                value.push(high << 4 | low);
                self.pos += 2;
            }
            _ => {
                let c = self.dn[self.pos..].chars().next().unwrap_or_default();
                let mut buf = [0u8; 4];
                value.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                self.pos += c.len_utf8();
            }
        }
        Ok(())
    }

    fn read_string_value(&mut self) -> DecodeResult<ByteString> {
        let mut value = Vec::new();
        let mut trailing_spaces = 0;
        while let Some(b) = self.peek() {
            match b {
                b',' | b';' | b'+' => break,
                b'\\' => {
                    self.read_escape(&mut value)?;
                    trailing_spaces = 0;
                }
                b' ' => {
                    value.push(b);
                    trailing_spaces += 1;
                    self.pos += 1;
                }
                _ => {
                    value.push(b);
                    trailing_spaces = 0;
                    self.pos += 1;
                }
            }
        }
        value.truncate(value.len() - trailing_spaces);
        Ok(ByteString::from(value))
    }

    fn read_quoted_value(&mut self) -> DecodeResult<ByteString> {
        self.pos += 1;
        let mut value = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated quoted value")),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(ByteString::from(value));
                }
                Some(b'\\') => self.read_escape(&mut value)?,
                Some(b) => {
                    value.push(b);
                    self.pos += 1;
                }
            }
        }
    }

    fn read_hex_value(&mut self) -> DecodeResult<ByteString> {
        self.pos += 1;
        let mut value = Vec::new();
        while let Some(high) = self.peek().and_then(hex_value) {
            let low = self
                .bytes
                .get(self.pos + 1)
                .copied()
                .and_then(hex_value)
                .ok_or_else(|| self.error("odd number of hex digits"))?;
            value.push(high << 4 | low);
            self.pos += 2;
        }
        if value.is_empty() {
            return Err(self.error("empty hex value"));
        }
        Ok(ByteString::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::core_schema;
    use ConditionResult::*;

    fn dn(value: &str) -> Dn {
        Dn::parse(value, &core_schema()).expect("valid DN")
    }

    #[test]
    fn test_parse_components() {
        let parsed = dn("cn=John Smith+uid=jsmith, ou=People,dc=example,dc=com");
        assert_eq!(parsed.size(), 4);
        let first = parsed.rdn().expect("not root");
        assert!(first.is_multi_valued());
        assert_eq!(first.avas()[0].attribute_name(), "cn");
        assert_eq!(first.avas()[0].value().as_str(), Some("John Smith"));
        assert_eq!(parsed.parent().map(|p| p.size()), Some(3));
        assert!(dn("").is_root());
    }

    #[test]
    fn test_escapes() {
        let parsed = dn(r"cn=Smith\, John\20,o=#4142");
        let avas = parsed.rdns()[0].avas();
        assert_eq!(avas[0].value().as_str(), Some("Smith, John "));
        assert_eq!(parsed.rdns()[1].avas()[0].value().as_bytes(), b"AB");
        assert_eq!(parsed.to_string(), r"cn=Smith\, John\ ,o=AB");
    }

    #[test]
    fn test_normalized_string_uses_oids() {
        assert_eq!(dn("CN=x,DC=com").to_normalized_string(), "2.5.4.3=x,0.9.2342.19200300.100.1.25=com");
        assert_eq!(
            dn("uid=a+cn=b").to_normalized_string(),
            "0.9.2342.19200300.100.1.1=a+2.5.4.3=b"
        );
    }

    #[test]
    fn test_normalized_string_applies_equality_rules() {
        assert_eq!(
            dn("CN=Bob  Smith,O=Example").to_normalized_string(),
            dn("cn=bob smith,o=example").to_normalized_string()
        );
        assert_eq!(
            dn("CN=Bob  Smith,O=Example").to_normalized_string(),
            "2.5.4.3=bob smith,2.5.4.10=example"
        );
        assert_eq!(dn("CN=Bob  Smith").to_string(), "CN=Bob  Smith");
    }

    #[test]
    fn test_repeated_types_in_rdn_are_unordered() {
        let schema = core_schema();
        assert_eq!(dn("cn=a+cn=b").matches(&dn("cn=B+cn=A"), &schema), True);
        assert_eq!(
            dn("cn=b+cn=a").to_normalized_string(),
            dn("CN=A+CN=B").to_normalized_string()
        );
        assert_eq!(dn("cn=a+cn=b").matches(&dn("cn=a+cn=c"), &schema), False);
    }

    #[test]
    fn test_structural_matching() {
        let schema = core_schema();
        assert_eq!(dn("cn=A  B,dc=com").matches(&dn("CN=a b, DC=COM"), &schema), True);
        assert_eq!(dn("cn=a,dc=com").matches(&dn("cn=a,dc=org"), &schema), False);
        assert_eq!(dn("cn=a").matches(&dn("cn=a,dc=com"), &schema), False);
        assert_eq!(dn("cn=a+sn=b").matches(&dn("sn=B+cn=A"), &schema), True);
    }

    #[test]
    fn test_invalid_dns() {
        let schema = core_schema();
        assert!(Dn::parse("cn", &schema).is_err());
        assert!(Dn::parse("cn=a,", &schema).is_err());
        assert!(Dn::parse("c n=a", &schema).is_err());
        assert!(Dn::parse("o=#41G", &schema).is_err());
        assert!(Dn::parse("cn=\"open", &schema).is_err());
    }
}
