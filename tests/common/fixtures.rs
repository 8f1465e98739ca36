//! Subschema fixtures and an in-memory directory.

use ldap_schema::{Entry, EntryReader};
use std::collections::HashMap;
use std::error::Error;

pub const SUBSCHEMA_DN: &str = "cn=schema";
pub const BASE_DN: &str = "dc=example,dc=com";

/// Attribute types of a small application schema.
pub const APPLICATION_ATTRIBUTE_TYPES: &[&str] = &[
    "( 1.3.6.1.4.1.99999.1.1 NAME 'employeeNumber' EQUALITY integerMatch ORDERING integerOrderingMatch SYNTAX 1.3.6.1.4.1.1466.115.121.1.27 SINGLE-VALUE )",
    "( 1.3.6.1.4.1.99999.1.2 NAME ( 'nickname' 'alias-name' ) SUP name )",
    "( 1.3.6.1.4.1.99999.1.3 NAME 'hireDate' EQUALITY generalizedTimeMatch ORDERING generalizedTimeOrderingMatch SYNTAX 1.3.6.1.4.1.1466.115.121.1.24 SINGLE-VALUE )",
    "( 1.3.6.1.4.1.99999.1.4 NAME 'accountStatus' SYNTAX 1.3.6.1.4.1.99999.4.1 SINGLE-VALUE )",
];

pub const APPLICATION_OBJECT_CLASSES: &[&str] = &[
    "( 1.3.6.1.4.1.99999.2.1 NAME 'employee' SUP organizationalPerson STRUCTURAL MUST employeeNumber MAY ( nickname $ hireDate $ accountStatus ) )",
    "( 1.3.6.1.4.1.99999.2.2 NAME 'mailRecipient' AUXILIARY MAY mail )",
];

pub const APPLICATION_SYNTAXES: &[&str] = &[
    "( 1.3.6.1.4.1.99999.4.1 DESC 'Account status' X-ENUM ( 'active' 'suspended' 'closed' ) )",
];

/// The subschema subentry holding the application schema.
pub fn subschema_entry() -> Entry {
    Entry::new(SUBSCHEMA_DN)
        .with_attribute("objectClass", ["top", "subschema"])
        .with_attribute("ldapSyntaxes", APPLICATION_SYNTAXES.iter().copied())
        .with_attribute("attributeTypes", APPLICATION_ATTRIBUTE_TYPES.iter().copied())
        .with_attribute("objectClasses", APPLICATION_OBJECT_CLASSES.iter().copied())
}

/// Directory entries keyed by lower-cased DN.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    entries: HashMap<String, Entry>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.insert(entry.dn().to_lowercase(), entry);
        self
    }

    /// A directory whose base entry points at [`subschema_entry`].
    pub fn with_application_schema() -> Self {
        Self::new()
            .with_entry(Entry::new(BASE_DN).with_attribute("subschemaSubentry", [SUBSCHEMA_DN]))
            .with_entry(subschema_entry())
    }
}

impl EntryReader for InMemoryDirectory {
    fn read_entry(
        &self,
        dn: &str,
        _attributes: &[&str],
    ) -> Result<Entry, Box<dyn Error + Send + Sync>> {
        self.entries
            .get(&dn.to_lowercase())
            .cloned()
            .ok_or_else(|| format!("No such object: {}", dn).into())
    }
}
