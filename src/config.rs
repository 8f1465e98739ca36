//! Per-catalog options.
//!
//! Options are set on a [`SchemaBuilder`](crate::schema::SchemaBuilder) and frozen
//! into the [`Schema`](crate::schema::Schema) it produces. They can be deserialized
//! from JSON so deployments can tune leniency without code changes:
//!
//! ```rust
//! use ldap_schema::config::SchemaOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = SchemaOptions::from_json_str(r#"{ "allow_non_standard_telephone_numbers": false }"#)?;
//! assert!(!options.allow_non_standard_telephone_numbers);
//! assert!(options.allow_malformed_names_and_options);
//! # Ok(())
//! # }
//! ```

use crate::error::SchemaResult;
use crate::schema::constants::{EMR_OCTET_STRING_OID, SYNTAX_OCTET_STRING_OID};
use serde::{Deserialize, Serialize};

/// Leniency switches and fallbacks applied by a single schema catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Accept descriptors containing `_` or starting with a digit, as produced by
    /// some older directory servers.
    pub allow_malformed_names_and_options: bool,

    /// When false, telephone numbers must follow the E.123 international form
    /// (`+` followed by digits, spaces and hyphens).
    pub allow_non_standard_telephone_numbers: bool,

    /// Accept the empty string as a directory string value.
    pub allow_zero_length_values_directory_strings: bool,

    /// Syntax used for placeholder attribute types in non-strict catalogs.
    pub default_syntax_oid: String,

    /// Equality matching rule used for placeholder attribute types.
    pub default_matching_rule_oid: String,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            allow_malformed_names_and_options: true,
            allow_non_standard_telephone_numbers: true,
            allow_zero_length_values_directory_strings: false,
            default_syntax_oid: SYNTAX_OCTET_STRING_OID.to_string(),
            default_matching_rule_oid: EMR_OCTET_STRING_OID.to_string(),
        }
    }
}

impl SchemaOptions {
    /// Load options from a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options with every leniency switch turned off.
    pub fn strict() -> Self {
        Self {
            allow_malformed_names_and_options: false,
            allow_non_standard_telephone_numbers: false,
            allow_zero_length_values_directory_strings: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        let options = SchemaOptions::default();
        assert!(options.allow_malformed_names_and_options);
        assert!(options.allow_non_standard_telephone_numbers);
        assert!(!options.allow_zero_length_values_directory_strings);
        assert_eq!(options.default_syntax_oid, SYNTAX_OCTET_STRING_OID);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options =
            SchemaOptions::from_json_str(r#"{ "allow_zero_length_values_directory_strings": true }"#)
                .expect("valid options");
        assert!(options.allow_zero_length_values_directory_strings);
        assert_eq!(options.default_matching_rule_oid, EMR_OCTET_STRING_OID);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let error = SchemaOptions::from_json_str("{ not json").unwrap_err();
        assert_eq!(error.message_key(), "schema.config");
    }
}
