//! String-valued syntaxes and the other simple character-class validators.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::boolean::canonical_boolean;
use crate::matching::string::utf8;
use crate::schema::constants::*;
use crate::schema::parser::{is_descriptor, is_numeric_oid};
use crate::schema::registry::Schema;
use crate::syntaxes::SyntaxImpl;

fn invalid(syntax: &str, value: &str, reason: impl Into<String>) -> DecodeError {
    DecodeError::invalid_value(syntax, value, reason)
}

/// Directory String: any non-empty UTF-8 string.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryStringSyntax;

impl SyntaxImpl for DirectoryStringSyntax {
    fn name(&self) -> &str {
        "Directory String"
    }

    fn value_is_acceptable(&self, schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        if text.is_empty() && !schema.options().allow_zero_length_values_directory_strings {
            return Err(invalid(self.name(), text, "zero-length values are not allowed"));
        }
        Ok(())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_OID)
    }

    fn ordering_matching_rule(&self) -> Option<&str> {
        Some(OMR_CASE_IGNORE_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_CASE_IGNORE_OID)
    }
}

/// IA5 String: seven-bit ASCII.
#[derive(Debug, Clone, Copy)]
pub struct Ia5StringSyntax;

impl SyntaxImpl for Ia5StringSyntax {
    fn name(&self) -> &str {
        "IA5 String"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        match value.as_bytes().iter().find(|b| !b.is_ascii()) {
            Some(b) => Err(invalid(
                self.name(),
                &value.to_string_lossy(),
                format!("illegal byte 0x{:02x}", b),
            )),
            None => Ok(()),
        }
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_IA5_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_CASE_IGNORE_IA5_OID)
    }
}

fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || " '()+,-./:=?".contains(c)
}

fn check_printable(syntax: &str, text: &str) -> DecodeResult<()> {
    match text.chars().find(|c| !is_printable(*c)) {
        Some(c) => Err(invalid(syntax, text, format!("illegal character '{}'", c))),
        None => Ok(()),
    }
}

/// Printable String: letters, digits and `'()+,-./:=?` and space.
#[derive(Debug, Clone, Copy)]
pub struct PrintableStringSyntax;

impl SyntaxImpl for PrintableStringSyntax {
    fn name(&self) -> &str {
        "Printable String"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        if text.is_empty() {
            return Err(invalid(self.name(), text, "the value is empty"));
        }
        check_printable(self.name(), text)
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_CASE_IGNORE_OID)
    }
}

/// Country String: a two-character printable string.
#[derive(Debug, Clone, Copy)]
pub struct CountryStringSyntax;

impl SyntaxImpl for CountryStringSyntax {
    fn name(&self) -> &str {
        "Country String"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        if text.chars().count() != 2 {
            return Err(invalid(self.name(), text, "the value must be two characters"));
        }
        check_printable(self.name(), text)
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_CASE_IGNORE_OID)
    }
}

/// Numeric String: digits and spaces.
#[derive(Debug, Clone, Copy)]
pub struct NumericStringSyntax;

impl SyntaxImpl for NumericStringSyntax {
    fn name(&self) -> &str {
        "Numeric String"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        if text.is_empty() {
            return Err(invalid(self.name(), text, "the value is empty"));
        }
        match text.chars().find(|c| !c.is_ascii_digit() && *c != ' ') {
            Some(c) => Err(invalid(self.name(), text, format!("illegal character '{}'", c))),
            None => Ok(()),
        }
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_NUMERIC_STRING_OID)
    }

    fn ordering_matching_rule(&self) -> Option<&str> {
        Some(OMR_NUMERIC_STRING_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_NUMERIC_STRING_OID)
    }
}

/// Telephone Number.
///
/// Catalogs that disallow non-standard numbers require the E.123 international
/// form: `+` then digits, spaces and hyphens. Otherwise any value containing a
/// digit is accepted.
#[derive(Debug, Clone, Copy)]
pub struct TelephoneNumberSyntax;

impl SyntaxImpl for TelephoneNumberSyntax {
    fn name(&self) -> &str {
        "Telephone Number"
    }

    fn value_is_acceptable(&self, schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        if schema.options().allow_non_standard_telephone_numbers {
            if !text.chars().any(|c| c.is_ascii_digit()) {
                return Err(invalid(self.name(), text, "the value contains no digits"));
            }
            return Ok(());
        }

        let Some(rest) = text.strip_prefix('+') else {
            return Err(invalid(self.name(), text, "the value must start with '+'"));
        };
        if let Some(c) = rest
            .chars()
            .find(|c| !c.is_ascii_digit() && *c != ' ' && *c != '-')
        {
            return Err(invalid(self.name(), text, format!("illegal character '{}'", c)));
        }
        if !rest.chars().any(|c| c.is_ascii_digit()) {
            return Err(invalid(self.name(), text, "the value contains no digits"));
        }
        Ok(())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_TELEPHONE_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_TELEPHONE_OID)
    }
}

const DELIVERY_METHODS: [&str; 10] = [
    "any", "mhs", "physical", "telex", "teletex", "g3fax", "g4fax", "ia5", "videotex", "telephone",
];

/// Delivery Method: `$`-separated list of known methods.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryMethodSyntax;

impl SyntaxImpl for DeliveryMethodSyntax {
    fn name(&self) -> &str {
        "Delivery Method"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        for method in text.split('$').map(str::trim) {
            if !DELIVERY_METHODS.iter().any(|m| m.eq_ignore_ascii_case(method)) {
                return Err(invalid(
                    self.name(),
                    text,
                    format!("unknown delivery method '{}'", method),
                ));
            }
        }
        Ok(())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_OID)
    }
}

/// Postal Address: `$`-separated lines.
#[derive(Debug, Clone, Copy)]
pub struct PostalAddressSyntax;

impl SyntaxImpl for PostalAddressSyntax {
    fn name(&self) -> &str {
        "Postal Address"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        if text.is_empty() {
            return Err(invalid(self.name(), text, "the value is empty"));
        }
        Ok(())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_LIST_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_CASE_IGNORE_LIST_OID)
    }
}

/// Octet String and the opaque syntaxes sharing its behavior.
#[derive(Debug, Clone, Copy)]
pub struct OctetStringSyntax {
    name: &'static str,
    human_readable: bool,
}

impl OctetStringSyntax {
    pub fn octet_string() -> Self {
        Self {
            name: "Octet String",
            human_readable: true,
        }
    }

    pub fn binary() -> Self {
        Self {
            name: "Binary",
            human_readable: false,
        }
    }

    pub fn fax() -> Self {
        Self {
            name: "Fax",
            human_readable: false,
        }
    }
}

impl SyntaxImpl for OctetStringSyntax {
    fn name(&self) -> &str {
        self.name
    }

    fn is_human_readable(&self) -> bool {
        self.human_readable
    }

    fn value_is_acceptable(&self, _schema: &Schema, _value: &ByteString) -> DecodeResult<()> {
        Ok(())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_OCTET_STRING_OID)
    }

    fn ordering_matching_rule(&self) -> Option<&str> {
        Some(OMR_OCTET_STRING_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_OCTET_STRING_OID)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanSyntax;

impl SyntaxImpl for BooleanSyntax {
    fn name(&self) -> &str {
        "Boolean"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        canonical_boolean(value).map(|_| ())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_BOOLEAN_OID)
    }
}

/// OID: a numeric OID or a descriptor.
#[derive(Debug, Clone, Copy)]
pub struct OidSyntax;

impl SyntaxImpl for OidSyntax {
    fn name(&self) -> &str {
        "OID"
    }

    fn value_is_acceptable(&self, schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        let lenient = schema.options().allow_malformed_names_and_options;
        if is_numeric_oid(text) || is_descriptor(text, lenient) {
            Ok(())
        } else {
            Err(invalid(self.name(), text, "not a numeric OID or descriptor"))
        }
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_OID_OID)
    }
}

/// Substring Assertion: `initial*any*final` with at least one fragment.
#[derive(Debug, Clone, Copy)]
pub struct SubstringAssertionSyntax;

impl SyntaxImpl for SubstringAssertionSyntax {
    fn name(&self) -> &str {
        "Substring Assertion"
    }

    fn value_is_acceptable(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        if text.is_empty() || text == "*" {
            return Err(invalid(self.name(), text, "the assertion has no fragments"));
        }
        if text.contains("**") {
            return Err(invalid(self.name(), text, "consecutive wildcards are not allowed"));
        }
        Ok(())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_CASE_IGNORE_OID)
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        Some(SMR_CASE_IGNORE_OID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaOptions;
    use crate::schema::builder::SchemaBuilder;
    use crate::schema::registry::empty_schema;

    fn accepts(syntax: &dyn SyntaxImpl, value: &str) -> bool {
        syntax.value_is_acceptable(&empty_schema(), &value.into()).is_ok()
    }

    #[test]
    fn test_printable_and_country() {
        assert!(accepts(&PrintableStringSyntax, "Hello (world)?"));
        assert!(!accepts(&PrintableStringSyntax, "a@b"));
        assert!(accepts(&CountryStringSyntax, "NZ"));
        assert!(!accepts(&CountryStringSyntax, "NZL"));
    }

    #[test]
    fn test_numeric_and_ia5() {
        assert!(accepts(&NumericStringSyntax, "123 456"));
        assert!(!accepts(&NumericStringSyntax, "12a"));
        assert!(accepts(&Ia5StringSyntax, "plain ascii"));
        assert!(!accepts(&Ia5StringSyntax, "caf\u{e9}"));
    }

    #[test]
    fn test_telephone_number_modes() {
        assert!(accepts(&TelephoneNumberSyntax, "ext. 42"));
        assert!(!accepts(&TelephoneNumberSyntax, "none"));

        let options = SchemaOptions {
            allow_non_standard_telephone_numbers: false,
            ..SchemaOptions::default()
        };
        let strict = SchemaBuilder::new("strict phones")
            .set_options(options)
            .build();
        let check = |value: &str| TelephoneNumberSyntax.value_is_acceptable(&strict, &value.into());
        assert!(check("+1 555-0100").is_ok());
        assert!(check("555-0100").is_err());
        assert!(check("+1 (555) 0100").is_err());
        assert!(check("+").is_err());
    }

    #[test]
    fn test_misc_validators() {
        assert!(accepts(&DeliveryMethodSyntax, "telephone $ g3fax"));
        assert!(!accepts(&DeliveryMethodSyntax, "pigeon"));
        assert!(accepts(&OidSyntax, "2.5.4.3"));
        assert!(accepts(&OidSyntax, "cn"));
        assert!(!accepts(&OidSyntax, "not an oid"));
        assert!(accepts(&BooleanSyntax, "TRUE"));
        assert!(accepts(&SubstringAssertionSyntax, "ab*cd"));
        assert!(!accepts(&SubstringAssertionSyntax, "a**b"));
        assert!(!accepts(&DirectoryStringSyntax, ""));
    }
}
