//! LDAP directory schema engine for Rust.
//!
//! Parses RFC 4512 schema definitions, resolves them into an immutable catalog
//! with typed cross-references, and provides the value syntaxes and matching
//! rules needed to validate and compare attribute values.
//!
//! # Core Components
//!
//! - [`Schema`] - Resolved catalog of attribute types, object classes and rules
//! - [`SchemaBuilder`] - Registers definitions and builds catalogs
//! - [`Dn`] - Distinguished names compared with schema-aware matching
//!
//! # Quick Start
//!
//! ```rust
//! use ldap_schema::{ByteString, SchemaBuilder};
//! use ldap_schema::matching::ConditionResult;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaBuilder::with_core_schema()
//!     .add_attribute_type(
//!         "( 1.3.6.1.4.1.99999.1.1 NAME 'nickname' SUP name )",
//!         false,
//!     )?
//!     .build_strict()?;
//!
//! let nickname = schema.get_attribute_type("nickname")?;
//! let equality = nickname.equality_matching_rule().ok_or("no equality rule")?;
//! let assertion = equality.get_assertion(&schema, &ByteString::from("Bobby  Tables"))?;
//! assert_eq!(
//!     equality.matches(&schema, &ByteString::from("bobby tables"), &assertion),
//!     ConditionResult::True
//! );
//! # Ok(())
//! # }
//! ```

pub mod byte_string;
pub mod config;
pub mod dn;
pub mod entry;
pub mod error;
pub mod matching;
pub mod schema;
pub mod syntaxes;

// Re-export commonly used types for convenience
pub use byte_string::ByteString;
pub use config::SchemaOptions;
pub use dn::Dn;
pub use entry::{Entry, EntryReader};
pub use error::{DecodeError, SchemaError, SchemaResult, ValidationError};
pub use schema::{Schema, SchemaBuilder, core_schema, default_schema, set_default_schema};
