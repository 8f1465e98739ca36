//! Schema elements, the catalog and its builder.
//!
//! This module turns RFC 4512 definition strings into a resolved, immutable
//! [`Schema`] catalog in which every element holds direct references to the
//! elements it depends on.
//!
//! # Key Types
//!
//! - [`Schema`] - the catalog, with strict and non-strict lookups
//! - [`SchemaBuilder`] - registers definitions and builds catalogs
//! - [`AttributeType`], [`ObjectClass`], [`MatchingRule`], [`Syntax`] and the
//!   remaining element types
//!
//! # Examples
//!
//! ```rust
//! use ldap_schema::schema::core_schema;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = core_schema();
//! let cn = schema.get_attribute_type("commonName")?;
//! assert_eq!(cn.oid(), "2.5.4.3");
//! assert_eq!(cn.superior().map(|sup| sup.name_or_oid()), Some("name"));
//! # Ok(())
//! # }
//! ```

pub mod attribute_type;
pub mod builder;
pub mod constants;
pub mod dit_rules;
pub mod embedded;
pub mod matching_rule;
pub mod name_form;
pub mod object_class;
pub(crate) mod parser;
pub mod registry;
pub mod syntax;
pub mod types;
mod validation;


// Re-export the main types for convenience
pub use attribute_type::{AttributeType, AttributeUsage, RawAttributeType};
pub use builder::SchemaBuilder;
pub use dit_rules::{DitContentRule, DitStructureRule, RawDitContentRule, RawDitStructureRule};
pub use matching_rule::{MatchingRule, MatchingRuleUse, RawMatchingRule, RawMatchingRuleUse};
pub use name_form::{NameForm, RawNameForm};
pub use object_class::{ObjectClass, ObjectClassKind, RawObjectClass};
pub use registry::{
    Schema, core_schema, default_schema, empty_schema, replace_default_schema, set_default_schema,
};
pub use syntax::{RawSyntax, Syntax};
pub use types::{ElementInfo, ElementKind, SchemaElement};
