//! Common test utilities for schema engine testing.
//!
//! Provides an in-memory directory, subschema fixtures and assertion macros
//! shared by the integration tests.

pub mod fixtures;

use ldap_schema::{ByteString, Schema};
use ldap_schema::matching::ConditionResult;
use ldap_schema::schema::replace_default_schema;

/// Route library logging to the test output. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Installs a default schema for the duration of a test and puts the
/// previous one back when dropped, even if the test panics.
pub struct DefaultSchemaGuard {
    previous: Option<Schema>,
}

impl DefaultSchemaGuard {
    pub fn install(schema: Schema) -> Self {
        Self {
            previous: Some(replace_default_schema(schema)),
        }
    }
}

impl Drop for DefaultSchemaGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            replace_default_schema(previous);
        }
    }
}

/// Assert that a strict build fails with the given message key.
#[macro_export]
macro_rules! assert_build_rejected {
    ($builder:expr, $key:expr) => {
        match $builder.build_strict() {
            Ok(_) => panic!("Expected schema to be rejected with '{}'", $key),
            Err(e) => assert_eq!(e.message_key(), $key, "unexpected error: {}", e),
        }
    };
}

/// Evaluate the equality rule of `attribute` between two raw values.
pub fn equality_matches(schema: &Schema, attribute: &str, value: &str, assertion: &str) -> ConditionResult {
    let attribute_type = schema
        .get_attribute_type(attribute)
        .unwrap_or_else(|e| panic!("attribute {} should exist: {}", attribute, e));
    let rule = attribute_type
        .equality_matching_rule()
        .unwrap_or_else(|| panic!("attribute {} has no equality rule", attribute));
    let assertion = rule
        .get_assertion(schema, &ByteString::from(assertion))
        .unwrap_or_else(|e| panic!("assertion value should be valid: {}", e));
    rule.matches(schema, &ByteString::from(value), &assertion)
}
