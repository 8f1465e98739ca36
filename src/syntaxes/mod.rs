//! Value codecs for LDAP syntaxes.
//!
//! Each built-in syntax implements [`SyntaxImpl`]: it decides whether a value is
//! acceptable and names the matching rules attribute types of that syntax use
//! when they declare none. Syntaxes defined at build time through `X-ENUM`,
//! `X-PATTERN` and `X-SUBST` extensions are implemented by [`enumeration`],
//! [`pattern`] and by sharing the substitute's implementation respectively.

pub mod bit_string;
pub mod definitions;
pub mod distinguished_name;
pub mod enumeration;
pub mod generalized_time;
pub mod integer;
pub mod pattern;
pub mod strings;

use crate::byte_string::ByteString;
use crate::error::DecodeResult;
use crate::schema::constants::*;
use crate::schema::registry::Schema;
use crate::schema::types::ElementKind;
use std::fmt;
use std::sync::Arc;

/// Behavior of an LDAP syntax.
pub trait SyntaxImpl: fmt::Debug + Send + Sync {
    /// Short implementation name, e.g. `Integer`.
    fn name(&self) -> &str;

    fn is_human_readable(&self) -> bool {
        true
    }

    /// Accept the value or explain why it is malformed.
    fn value_is_acceptable(&self, schema: &Schema, value: &ByteString) -> DecodeResult<()>;

    fn equality_matching_rule(&self) -> Option<&str> {
        None
    }

    fn ordering_matching_rule(&self) -> Option<&str> {
        None
    }

    fn substring_matching_rule(&self) -> Option<&str> {
        None
    }

    fn approximate_matching_rule(&self) -> Option<&str> {
        None
    }
}

/// Built-in implementation for a syntax OID.
pub(crate) fn builtin(oid: &str) -> Option<Arc<dyn SyntaxImpl>> {
    use definitions::DefinitionSyntax;
    use strings::*;

    let implementation: Arc<dyn SyntaxImpl> = match oid {
        SYNTAX_ATTRIBUTE_TYPE_OID => Arc::new(DefinitionSyntax::new(ElementKind::AttributeType)),
        SYNTAX_BINARY_OID => Arc::new(OctetStringSyntax::binary()),
        SYNTAX_BIT_STRING_OID => Arc::new(bit_string::BitStringSyntax),
        SYNTAX_BOOLEAN_OID => Arc::new(BooleanSyntax),
        SYNTAX_COUNTRY_STRING_OID => Arc::new(CountryStringSyntax),
        SYNTAX_DN_OID => Arc::new(distinguished_name::DistinguishedNameSyntax),
        SYNTAX_DELIVERY_METHOD_OID => Arc::new(DeliveryMethodSyntax),
        SYNTAX_DIRECTORY_STRING_OID => Arc::new(DirectoryStringSyntax),
        SYNTAX_DIT_CONTENT_RULE_OID => Arc::new(DefinitionSyntax::new(ElementKind::DitContentRule)),
        SYNTAX_DIT_STRUCTURE_RULE_OID => {
            Arc::new(DefinitionSyntax::new(ElementKind::DitStructureRule))
        }
        SYNTAX_FAX_OID => Arc::new(OctetStringSyntax::fax()),
        SYNTAX_GENERALIZED_TIME_OID => Arc::new(generalized_time::GeneralizedTimeSyntax),
        SYNTAX_IA5_STRING_OID => Arc::new(Ia5StringSyntax),
        SYNTAX_INTEGER_OID => Arc::new(integer::IntegerSyntax),
        SYNTAX_MATCHING_RULE_OID => Arc::new(DefinitionSyntax::new(ElementKind::MatchingRule)),
        SYNTAX_MATCHING_RULE_USE_OID => {
            Arc::new(DefinitionSyntax::new(ElementKind::MatchingRuleUse))
        }
        SYNTAX_NAME_AND_OPTIONAL_UID_OID => {
            Arc::new(distinguished_name::NameAndOptionalUidSyntax)
        }
        SYNTAX_NAME_FORM_OID => Arc::new(DefinitionSyntax::new(ElementKind::NameForm)),
        SYNTAX_NUMERIC_STRING_OID => Arc::new(NumericStringSyntax),
        SYNTAX_OBJECT_CLASS_OID => Arc::new(DefinitionSyntax::new(ElementKind::ObjectClass)),
        SYNTAX_OID_OID => Arc::new(OidSyntax),
        SYNTAX_OCTET_STRING_OID => Arc::new(OctetStringSyntax::octet_string()),
        SYNTAX_POSTAL_ADDRESS_OID => Arc::new(PostalAddressSyntax),
        SYNTAX_PRINTABLE_STRING_OID => Arc::new(PrintableStringSyntax),
        SYNTAX_TELEPHONE_OID => Arc::new(TelephoneNumberSyntax),
        SYNTAX_LDAP_SYNTAX_OID => Arc::new(DefinitionSyntax::new(ElementKind::Syntax)),
        SYNTAX_SUBSTRING_ASSERTION_OID => Arc::new(SubstringAssertionSyntax),
        _ => return None,
    };
    Some(implementation)
}

/// Implementation used for syntaxes without a built-in counterpart.
pub(crate) fn default_impl() -> Arc<dyn SyntaxImpl> {
    Arc::new(strings::OctetStringSyntax::octet_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let integer = builtin(SYNTAX_INTEGER_OID).expect("integer syntax");
        assert_eq!(integer.name(), "Integer");
        assert_eq!(integer.equality_matching_rule(), Some(EMR_INTEGER_OID));
        assert!(!builtin(SYNTAX_BINARY_OID).expect("binary syntax").is_human_readable());
        assert!(builtin("1.2.3.4").is_none());
        assert_eq!(default_impl().name(), "Octet String");
    }
}
