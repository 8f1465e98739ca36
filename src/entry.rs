//! Directory entries, as far as schema ingestion needs them.
//!
//! The catalog never talks to a server itself. Callers that want to load a
//! server's schema implement [`EntryReader`] on top of their own connection and
//! hand it to [`SchemaBuilder::add_schema_for_entry`](crate::schema::SchemaBuilder::add_schema_for_entry).

use crate::byte_string::ByteString;
use indexmap::IndexMap;
use std::error::Error;

/// One attribute of an entry: the name as first given plus its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    values: Vec<ByteString>,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[ByteString] {
        &self.values
    }
}

/// A directory entry. Attribute names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    dn: String,
    attributes: IndexMap<String, Attribute>,
}

impl Entry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn dn(&self) -> &str {
        &self.dn
    }

    pub fn add_value(&mut self, attribute: &str, value: impl Into<ByteString>) -> &mut Self {
        self.attributes
            .entry(attribute.to_lowercase())
            .or_insert_with(|| Attribute {
                name: attribute.to_string(),
                values: Vec::new(),
            })
            .values
            .push(value.into());
        self
    }

    /// Builder-style variant of [`add_value`](Self::add_value) for several values.
    pub fn with_attribute<I, V>(mut self, attribute: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ByteString>,
    {
        for value in values {
            self.add_value(attribute, value);
        }
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(&name.to_lowercase())
    }

    /// Values of an attribute; empty if the entry does not have it.
    pub fn values(&self, name: &str) -> &[ByteString] {
        self.get_attribute(name)
            .map(Attribute::values)
            .unwrap_or_default()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }
}

/// Reads single entries from a directory.
pub trait EntryReader {
    /// Read the entry named `dn`, returning at least the requested attributes.
    fn read_entry(
        &self,
        dn: &str,
        attributes: &[&str],
    ) -> Result<Entry, Box<dyn Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let entry = Entry::new("cn=schema")
            .with_attribute("attributeTypes", ["( 1.1.1 NAME 'a' )", "( 1.1.2 NAME 'b' )"])
            .with_attribute("ATTRIBUTETYPES", ["( 1.1.3 NAME 'c' )"]);
        assert_eq!(entry.values("attributetypes").len(), 3);
        assert_eq!(
            entry.get_attribute("AttributeTypes").map(Attribute::name),
            Some("attributeTypes")
        );
        assert!(entry.values("objectClasses").is_empty());
        assert_eq!(entry.attributes().count(), 1);
    }
}
