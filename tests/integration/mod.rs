//! End-to-end tests against the public API.

pub mod properties;
pub mod schema_loading;
pub mod value_matching;
