//! DN and Name And Optional UID syntaxes.

use crate::byte_string::ByteString;
use crate::dn::Dn;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::string::utf8;
use crate::schema::constants::{EMR_DN_OID, EMR_UNIQUE_MEMBER_OID};
use crate::schema::registry::Schema;
use crate::syntaxes::SyntaxImpl;

/// Split `dn#'0101'B` into the DN and the bits of the optional UID.
///
/// The suffix is found by scanning backward for `'B` (or `'b`) and then `#'`,
/// the same forms [`validate`](crate::syntaxes::bit_string::validate) accepts.
pub fn split_name_and_uid(value: &str) -> (&str, Option<&str>) {
    let Some(body) = value
        .strip_suffix("'B")
        .or_else(|| value.strip_suffix("'b"))
    else {
        return (value, None);
    };
    match body.rfind("#'") {
        Some(pos) => (&value[..pos], Some(&body[pos + 2..])),
        None => (value, None),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DistinguishedNameSyntax;

impl SyntaxImpl for DistinguishedNameSyntax {
    fn name(&self) -> &str {
        "DN"
    }

    fn value_is_acceptable(&self, schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        Dn::parse(utf8(value, self.name())?, schema).map(|_| ())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_DN_OID)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NameAndOptionalUidSyntax;

impl SyntaxImpl for NameAndOptionalUidSyntax {
    fn name(&self) -> &str {
        "Name And Optional UID"
    }

    fn value_is_acceptable(&self, schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let text = utf8(value, self.name())?;
        let (dn, uid) = split_name_and_uid(text);
        Dn::parse(dn, schema)?;
        if let Some(c) = uid.and_then(|bits| bits.chars().find(|c| *c != '0' && *c != '1')) {
            return Err(DecodeError::invalid_value(
                self.name(),
                text,
                format!("illegal bit '{}' in the UID", c),
            ));
        }
        Ok(())
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        Some(EMR_UNIQUE_MEMBER_OID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::core_schema;
    use crate::syntaxes::bit_string;

    #[test]
    fn test_split_name_and_uid() {
        assert_eq!(split_name_and_uid("cn=a#'0101'B"), ("cn=a", Some("0101")));
        assert_eq!(split_name_and_uid("cn=a#'0101'b"), ("cn=a", Some("0101")));
        assert_eq!(split_name_and_uid("cn=a"), ("cn=a", None));
        assert_eq!(split_name_and_uid("cn=x'B"), ("cn=x'B", None));
    }

    #[test]
    fn test_name_and_optional_uid() {
        let schema = core_schema();
        let syntax = NameAndOptionalUidSyntax;
        assert!(syntax.value_is_acceptable(&schema, &"cn=a,dc=com#'01'B".into()).is_ok());
        assert!(syntax.value_is_acceptable(&schema, &"cn=a,dc=com#'012'B".into()).is_err());
        assert!(syntax.value_is_acceptable(&schema, &"not a dn#'01'B".into()).is_err());

        // The UID suffix and a standalone bit string accept the same forms.
        for uid in ["'01'B", "'01'b"] {
            assert!(bit_string::validate(uid).is_ok());
            let value = format!("cn=a,dc=com#{}", uid);
            assert_eq!(split_name_and_uid(&value), ("cn=a,dc=com", Some("01")));
            assert!(syntax.value_is_acceptable(&schema, &value.as_str().into()).is_ok());
        }
    }
}
