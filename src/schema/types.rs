//! Shared element model.
//!
//! Every kind of schema element carries the same core information: an OID (or
//! rule ID), user-facing names, an optional description, an obsolete flag and any
//! `X-` extension properties. [`ElementInfo`] holds that information together with
//! the cached definition string, and the per-kind modules build on it.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of element a schema catalog contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    AttributeType,
    ObjectClass,
    MatchingRule,
    MatchingRuleUse,
    Syntax,
    NameForm,
    DitContentRule,
    DitStructureRule,
}

impl ElementKind {
    /// Name of the subschema attribute holding definitions of this kind.
    pub fn subschema_attribute(&self) -> &'static str {
        use super::constants::*;
        match self {
            ElementKind::AttributeType => ATTR_ATTRIBUTE_TYPES,
            ElementKind::ObjectClass => ATTR_OBJECT_CLASSES,
            ElementKind::MatchingRule => ATTR_MATCHING_RULES,
            ElementKind::MatchingRuleUse => ATTR_MATCHING_RULE_USE,
            ElementKind::Syntax => ATTR_LDAP_SYNTAXES,
            ElementKind::NameForm => ATTR_NAME_FORMS,
            ElementKind::DitContentRule => ATTR_DIT_CONTENT_RULES,
            ElementKind::DitStructureRule => ATTR_DIT_STRUCTURE_RULES,
        }
    }

    /// Kind for a subschema attribute name, compared case-insensitively.
    pub fn from_subschema_attribute(name: &str) -> Option<Self> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.subschema_attribute().eq_ignore_ascii_case(name))
    }
}

const ALL_KINDS: [ElementKind; 8] = [
    ElementKind::Syntax,
    ElementKind::AttributeType,
    ElementKind::ObjectClass,
    ElementKind::MatchingRuleUse,
    ElementKind::MatchingRule,
    ElementKind::DitContentRule,
    ElementKind::DitStructureRule,
    ElementKind::NameForm,
];

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::AttributeType => "attribute type",
            ElementKind::ObjectClass => "object class",
            ElementKind::MatchingRule => "matching rule",
            ElementKind::MatchingRuleUse => "matching rule use",
            ElementKind::Syntax => "syntax",
            ElementKind::NameForm => "name form",
            ElementKind::DitContentRule => "DIT content rule",
            ElementKind::DitStructureRule => "DIT structure rule",
        };
        f.write_str(name)
    }
}

/// Information common to all schema elements.
///
/// The OID is fixed at construction. The definition string is either the
/// verbatim text an element was parsed from or, for elements created in code,
/// rendered once from the structured fields on first request.
#[derive(Debug, Clone)]
pub struct ElementInfo {
    oid: String,
    names: Vec<String>,
    description: String,
    obsolete: bool,
    extensions: IndexMap<String, Vec<String>>,
    definition: OnceCell<String>,
}

impl ElementInfo {
    pub(crate) fn new(oid: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            names: Vec::new(),
            description: String::new(),
            obsolete: false,
            extensions: IndexMap::new(),
            definition: OnceCell::new(),
        }
    }

    /// The numeric OID, or the rule ID for DIT structure rules.
    pub fn oid(&self) -> &str {
        &self.oid
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first name, if any.
    pub fn name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// The first name, falling back to the OID.
    pub fn name_or_oid(&self) -> &str {
        self.name().unwrap_or(&self.oid)
    }

    /// Case-insensitive name check.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn has_name_or_oid(&self, value: &str) -> bool {
        self.oid == value || self.has_name(value)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    pub fn extensions(&self) -> &IndexMap<String, Vec<String>> {
        &self.extensions
    }

    /// Values of an extension property. Keys are compared case-insensitively.
    pub fn extension(&self, key: &str) -> Option<&[String]> {
        self.extensions
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_slice())
    }

    pub(crate) fn set_names(&mut self, names: Vec<String>) {
        self.names = names;
    }

    pub(crate) fn add_name(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn set_obsolete(&mut self, obsolete: bool) {
        self.obsolete = obsolete;
    }

    pub(crate) fn add_extension(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.extensions.entry(key.into()).or_default().extend(values);
    }

    /// Keep the definition text an element was read from.
    pub(crate) fn set_definition(&mut self, definition: impl Into<String>) {
        self.definition = OnceCell::with_value(definition.into());
    }

    pub(crate) fn definition_or_else(&self, render: impl FnOnce() -> String) -> &str {
        self.definition.get_or_init(render)
    }

    /// Writes `( id NAME .. DESC .. OBSOLETE`.
    pub(crate) fn write_header(&self, f: &mut fmt::Formatter<'_>, id: &str) -> fmt::Result {
        write!(f, "( {}", id)?;
        match self.names.as_slice() {
            [] => {}
            [single] => {
                f.write_str(" NAME ")?;
                write_quoted(f, single)?;
            }
            names => {
                f.write_str(" NAME (")?;
                for name in names {
                    f.write_str(" ")?;
                    write_quoted(f, name)?;
                }
                f.write_str(" )")?;
            }
        }
        if !self.description.is_empty() {
            f.write_str(" DESC ")?;
            write_quoted(f, &self.description)?;
        }
        if self.obsolete {
            f.write_str(" OBSOLETE")?;
        }
        Ok(())
    }

    /// Writes the extension properties and the closing parenthesis.
    pub(crate) fn write_trailer(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, values) in &self.extensions {
            write!(f, " {}", key)?;
            match values.as_slice() {
                [single] => {
                    f.write_str(" ")?;
                    write_quoted(f, single)?;
                }
                values => {
                    f.write_str(" (")?;
                    for value in values {
                        f.write_str(" ")?;
                        write_quoted(f, value)?;
                    }
                    f.write_str(" )")?;
                }
            }
        }
        f.write_str(" )")
    }
}

/// Access to the shared information of raw and resolved elements alike.
pub trait SchemaElement {
    const KIND: ElementKind;

    fn element_info(&self) -> &ElementInfo;
}

/// Quote a string, escaping `'` and `\` as `\27` and `\5C`.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in value.chars() {
        match c {
            '\'' => f.write_str("\\27")?,
            '\\' => f.write_str("\\5C")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

/// Writes ` KEYWORD oid` or ` KEYWORD ( oid $ oid )`; nothing for an empty list.
pub(crate) fn write_oids(f: &mut fmt::Formatter<'_>, keyword: &str, oids: &[String]) -> fmt::Result {
    match oids {
        [] => Ok(()),
        [single] => write!(f, " {} {}", keyword, single),
        oids => write!(f, " {} ( {} )", keyword, oids.join(" $ ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rendered(ElementInfo);

    impl fmt::Display for Rendered {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.write_header(f, self.0.oid())?;
            self.0.write_trailer(f)
        }
    }

    #[test]
    fn test_header_and_trailer_rendering() {
        let mut info = ElementInfo::new("1.2.3");
        info.add_name("first");
        info.add_name("second");
        info.set_description("it's a \\ test");
        info.set_obsolete(true);
        info.add_extension("X-ORIGIN", vec!["RFC 4512".to_string()]);
        assert_eq!(
            Rendered(info).to_string(),
            "( 1.2.3 NAME ( 'first' 'second' ) DESC 'it\\27s a \\5C test' OBSOLETE X-ORIGIN 'RFC 4512' )"
        );
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let mut info = ElementInfo::new("2.5.4.3");
        info.add_name("cn");
        assert!(info.has_name("CN"));
        assert!(info.has_name_or_oid("2.5.4.3"));
        assert_eq!(info.name_or_oid(), "cn");
        assert_eq!(ElementInfo::new("1.1").name_or_oid(), "1.1");
    }

    #[test]
    fn test_kind_from_subschema_attribute() {
        assert_eq!(
            ElementKind::from_subschema_attribute("attributetypes"),
            Some(ElementKind::AttributeType)
        );
        assert_eq!(ElementKind::from_subschema_attribute("cn"), None);
    }
}
