//! Builder for schema catalogs.
//!
//! Building is split into two passes. Adding definitions to a [`SchemaBuilder`]
//! only parses and registers them (pass 1), so elements may be added in any
//! order and may refer to elements that are added later. [`SchemaBuilder::build`]
//! then resolves every reference (pass 2) and freezes the result into a
//! [`Schema`].
//!
//! ```rust
//! use ldap_schema::schema::SchemaBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaBuilder::with_core_schema()
//!     .add_attribute_type("( 1.3.6.1.4.1.99.1 NAME 'shoeSize' SUP name )", false)?
//!     .add_object_class(
//!         "( 1.3.6.1.4.1.99.2 NAME 'shopper' SUP person STRUCTURAL MAY shoeSize )",
//!         false,
//!     )?
//!     .build_strict()?;
//!
//! assert!(schema.get_object_class("shopper")?.is_optional(&*schema.get_attribute_type("shoeSize")?));
//! # Ok(())
//! # }
//! ```

use super::attribute_type::RawAttributeType;
use super::constants::{
    ATTR_SUBSCHEMA_SUBENTRY, SUBSCHEMA_ATTRIBUTES, X_ENUM, X_PATTERN, X_SUBST,
};
use super::dit_rules::{RawDitContentRule, RawDitStructureRule};
use super::matching_rule::{RawMatchingRule, RawMatchingRuleUse};
use super::name_form::RawNameForm;
use super::object_class::RawObjectClass;
use super::parser::{is_descriptor, is_numeric_oid};
use super::registry::{Schema, core_schema};
use super::syntax::RawSyntax;
use super::types::{ElementKind, SchemaElement};
use super::validation;
use crate::config::SchemaOptions;
use crate::dn::Dn;
use crate::entry::{Entry, EntryReader};
use crate::error::{DecodeError, SchemaError, SchemaResult};
use crate::syntaxes::enumeration::{ordering_rule_name, ordering_rule_oid};
use crate::syntaxes::pattern::PatternSyntax;
use indexmap::IndexMap;
use log::{debug, trace, warn};
use std::sync::Arc;

/// Registered but unresolved elements, keyed by OID (rule ID for structure
/// rules).
#[derive(Debug, Clone, Default)]
pub(crate) struct RawElements {
    pub(crate) syntaxes: IndexMap<String, RawSyntax>,
    pub(crate) matching_rules: IndexMap<String, RawMatchingRule>,
    pub(crate) attribute_types: IndexMap<String, RawAttributeType>,
    pub(crate) object_classes: IndexMap<String, RawObjectClass>,
    pub(crate) matching_rule_uses: IndexMap<String, RawMatchingRuleUse>,
    pub(crate) name_forms: IndexMap<String, RawNameForm>,
    pub(crate) dit_content_rules: IndexMap<String, RawDitContentRule>,
    pub(crate) dit_structure_rules: IndexMap<String, RawDitStructureRule>,
}

impl RawElements {
    /// The declared form of every element of a catalog.
    fn from_schema(schema: &Schema) -> Self {
        Self {
            syntaxes: collect(schema.syntaxes(), |e| e.raw()),
            matching_rules: collect(schema.matching_rules(), |e| e.raw()),
            attribute_types: collect(schema.attribute_types(), |e| e.raw()),
            object_classes: collect(schema.object_classes(), |e| e.raw()),
            matching_rule_uses: collect(schema.matching_rule_uses(), |e| e.raw()),
            name_forms: collect(schema.name_forms(), |e| e.raw()),
            dit_content_rules: collect(schema.dit_content_rules(), |e| e.raw()),
            dit_structure_rules: collect(schema.dit_structure_rules(), |e| e.raw()),
        }
    }
}

fn collect<'s, R, T>(
    elements: impl Iterator<Item = &'s Arc<T>>,
    declared: impl Fn(&T) -> &R,
) -> IndexMap<String, R>
where
    R: SchemaElement + Clone,
    T: 's,
{
    elements
        .map(|element| {
            let raw = declared(&**element).clone();
            (raw.element_info().oid().to_string(), raw)
        })
        .collect()
}

/// Register `element` under `key`, refusing to replace an existing element
/// unless `overwrite` is set.
fn register<R: SchemaElement>(
    elements: &mut IndexMap<String, R>,
    key: String,
    element: R,
    overwrite: bool,
) -> SchemaResult<()> {
    if !overwrite {
        if let Some(existing) = elements.get(&key) {
            return Err(SchemaError::ConflictingElement {
                kind: R::KIND,
                oid: key,
                existing: existing.element_info().name_or_oid().to_string(),
            });
        }
    }
    trace!("Registered {} {}", R::KIND, key);
    elements.insert(key, element);
    Ok(())
}

/// Collects definitions and builds [`Schema`] catalogs from them.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    options: SchemaOptions,
    raw: RawElements,
    warnings: Vec<String>,
}

impl SchemaBuilder {
    /// An empty builder with default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: SchemaOptions::default(),
            raw: RawElements::default(),
            warnings: Vec::new(),
        }
    }

    /// A builder holding every element and the options of `schema`.
    pub fn with_schema(schema: &Schema) -> Self {
        Self {
            name: schema.name().to_string(),
            options: schema.options().clone(),
            raw: RawElements::from_schema(schema),
            warnings: Vec::new(),
        }
    }

    /// A builder holding the core schema, to be extended with custom elements.
    pub fn with_core_schema() -> Self {
        Self::with_schema(&core_schema())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Replace the options. They also govern how later definitions are parsed.
    pub fn set_options(&mut self, options: SchemaOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Problems recorded while ingesting subschema entries.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn add_attribute_type(&mut self, definition: &str, overwrite: bool) -> SchemaResult<&mut Self> {
        let raw = RawAttributeType::parse(definition, &self.options)?;
        register(&mut self.raw.attribute_types, raw.oid().to_string(), raw, overwrite)?;
        Ok(self)
    }

    pub fn add_object_class(&mut self, definition: &str, overwrite: bool) -> SchemaResult<&mut Self> {
        let raw = RawObjectClass::parse(definition, &self.options)?;
        register(&mut self.raw.object_classes, raw.oid().to_string(), raw, overwrite)?;
        Ok(self)
    }

    pub fn add_matching_rule(&mut self, definition: &str, overwrite: bool) -> SchemaResult<&mut Self> {
        let raw = RawMatchingRule::parse(definition, &self.options)?;
        register(&mut self.raw.matching_rules, raw.oid().to_string(), raw, overwrite)?;
        Ok(self)
    }

    /// Add a matching rule use. Its OID is the OID of the rule it applies to.
    pub fn add_matching_rule_use(&mut self, definition: &str, overwrite: bool) -> SchemaResult<&mut Self> {
        let raw = RawMatchingRuleUse::parse(definition, &self.options)?;
        register(&mut self.raw.matching_rule_uses, raw.oid().to_string(), raw, overwrite)?;
        Ok(self)
    }

    /// Add a syntax. An `X-ENUM` syntax also registers its ordering rule.
    pub fn add_syntax(&mut self, definition: &str, overwrite: bool) -> SchemaResult<&mut Self> {
        let raw = RawSyntax::parse(definition, &self.options)?;
        self.register_syntax(raw, overwrite)
    }

    pub fn add_name_form(&mut self, definition: &str, overwrite: bool) -> SchemaResult<&mut Self> {
        let raw = RawNameForm::parse(definition, &self.options)?;
        register(&mut self.raw.name_forms, raw.oid().to_string(), raw, overwrite)?;
        Ok(self)
    }

    /// Add a DIT content rule. Its OID is the OID of the structural class it
    /// governs.
    pub fn add_dit_content_rule(&mut self, definition: &str, overwrite: bool) -> SchemaResult<&mut Self> {
        let raw = RawDitContentRule::parse(definition, &self.options)?;
        register(&mut self.raw.dit_content_rules, raw.oid().to_string(), raw, overwrite)?;
        Ok(self)
    }

    pub fn add_dit_structure_rule(&mut self, definition: &str, overwrite: bool) -> SchemaResult<&mut Self> {
        let raw = RawDitStructureRule::parse(definition, &self.options)?;
        register(
            &mut self.raw.dit_structure_rules,
            raw.rule_id().to_string(),
            raw,
            overwrite,
        )?;
        Ok(self)
    }

    /// Add a definition of the given kind.
    pub fn add_definition(
        &mut self,
        kind: ElementKind,
        definition: &str,
        overwrite: bool,
    ) -> SchemaResult<&mut Self> {
        match kind {
            ElementKind::AttributeType => self.add_attribute_type(definition, overwrite),
            ElementKind::ObjectClass => self.add_object_class(definition, overwrite),
            ElementKind::MatchingRule => self.add_matching_rule(definition, overwrite),
            ElementKind::MatchingRuleUse => self.add_matching_rule_use(definition, overwrite),
            ElementKind::Syntax => self.add_syntax(definition, overwrite),
            ElementKind::NameForm => self.add_name_form(definition, overwrite),
            ElementKind::DitContentRule => self.add_dit_content_rule(definition, overwrite),
            ElementKind::DitStructureRule => self.add_dit_structure_rule(definition, overwrite),
        }
    }

    /// Add a syntax whose values must be one of `values`, compared ignoring
    /// case. Values order as listed.
    pub fn add_enumeration_syntax(
        &mut self,
        oid: &str,
        description: &str,
        values: &[&str],
        overwrite: bool,
    ) -> SchemaResult<&mut Self> {
        let mut raw = self.programmatic_syntax(oid, description)?;
        raw.info
            .add_extension(X_ENUM, values.iter().map(|v| v.to_string()).collect());
        self.register_syntax(raw, overwrite)
    }

    /// Add a syntax whose values must match `pattern` in full.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPattern`](crate::error::ValidationError::InvalidPattern)
    /// immediately if the pattern does not compile.
    pub fn add_pattern_syntax(
        &mut self,
        oid: &str,
        description: &str,
        pattern: &str,
        overwrite: bool,
    ) -> SchemaResult<&mut Self> {
        PatternSyntax::new(oid, pattern)?;
        let mut raw = self.programmatic_syntax(oid, description)?;
        raw.info.add_extension(X_PATTERN, vec![pattern.to_string()]);
        self.register_syntax(raw, overwrite)
    }

    /// Add a syntax that behaves like `substitute`. The substitute is resolved
    /// when the schema is built.
    pub fn add_substitution_syntax(
        &mut self,
        oid: &str,
        description: &str,
        substitute: &str,
        overwrite: bool,
    ) -> SchemaResult<&mut Self> {
        let mut raw = self.programmatic_syntax(oid, description)?;
        raw.info.add_extension(X_SUBST, vec![substitute.to_string()]);
        self.register_syntax(raw, overwrite)
    }

    fn programmatic_syntax(&self, oid: &str, description: &str) -> SchemaResult<RawSyntax> {
        if !is_numeric_oid(oid) && !is_descriptor(oid, self.options.allow_malformed_names_and_options) {
            return Err(DecodeError::invalid_value("OID", oid, "not a numeric OID").into());
        }
        let mut raw = RawSyntax::new(oid);
        raw.info.set_description(description);
        Ok(raw)
    }

    fn register_syntax(&mut self, raw: RawSyntax, overwrite: bool) -> SchemaResult<&mut Self> {
        let oid = raw.oid().to_string();
        let enumerated = raw.enumeration_values().is_some();
        register(&mut self.raw.syntaxes, oid.clone(), raw, overwrite)?;
        if enumerated {
            let mut rule = RawMatchingRule::new(ordering_rule_oid(&oid), oid.as_str());
            rule.info.add_name(ordering_rule_name(&oid));
            // The rule belongs to the syntax and is replaced along with it.
            register(&mut self.raw.matching_rules, rule.oid().to_string(), rule, true)?;
        }
        Ok(self)
    }

    /// Copy every element of `schema` into this builder.
    pub fn add_schema(&mut self, schema: &Schema, overwrite: bool) -> SchemaResult<&mut Self> {
        let copy = RawElements::from_schema(schema);
        for (key, raw) in copy.syntaxes {
            register(&mut self.raw.syntaxes, key, raw, overwrite)?;
        }
        for (key, raw) in copy.matching_rules {
            register(&mut self.raw.matching_rules, key, raw, overwrite)?;
        }
        for (key, raw) in copy.attribute_types {
            register(&mut self.raw.attribute_types, key, raw, overwrite)?;
        }
        for (key, raw) in copy.object_classes {
            register(&mut self.raw.object_classes, key, raw, overwrite)?;
        }
        for (key, raw) in copy.matching_rule_uses {
            register(&mut self.raw.matching_rule_uses, key, raw, overwrite)?;
        }
        for (key, raw) in copy.name_forms {
            register(&mut self.raw.name_forms, key, raw, overwrite)?;
        }
        for (key, raw) in copy.dit_content_rules {
            register(&mut self.raw.dit_content_rules, key, raw, overwrite)?;
        }
        for (key, raw) in copy.dit_structure_rules {
            register(&mut self.raw.dit_structure_rules, key, raw, overwrite)?;
        }
        Ok(self)
    }

    /// Add the definitions held by a subschema subentry.
    ///
    /// Definitions that cannot be parsed or registered are recorded as warnings
    /// and skipped, so a slightly non-conformant server still yields a usable
    /// schema.
    pub fn add_schema_from_entry(&mut self, entry: &Entry, overwrite: bool) -> &mut Self {
        for attribute in SUBSCHEMA_ATTRIBUTES {
            let Some(kind) = ElementKind::from_subschema_attribute(attribute) else {
                continue;
            };
            for value in entry.values(attribute) {
                let outcome = match value.as_str() {
                    Some(definition) => self.add_definition(kind, definition, overwrite).map(|_| ()),
                    None => Err(DecodeError::invalid_value(
                        kind.to_string(),
                        value.to_hex(),
                        "not valid UTF-8",
                    )
                    .into()),
                };
                if let Err(error) = outcome {
                    let message = format!(
                        "Unable to read a {} definition from the subschema subentry '{}': {}",
                        kind,
                        entry.dn(),
                        error
                    );
                    warn!("{}", message);
                    self.warnings.push(message);
                }
            }
        }
        self
    }

    /// Read the subschema subentry governing `dn` and add its definitions.
    ///
    /// # Errors
    ///
    /// * [`SchemaError::NoSubschemaSubentry`] if the entry has no `subschemaSubentry`
    /// * [`SchemaError::InvalidSubschemaSubentry`] if it has several or an invalid DN
    /// * [`SchemaError::EntryReader`] if either read fails
    pub fn add_schema_for_entry(
        &mut self,
        reader: &dyn EntryReader,
        dn: &str,
        overwrite: bool,
    ) -> SchemaResult<&mut Self> {
        let entry = reader
            .read_entry(dn, &[ATTR_SUBSCHEMA_SUBENTRY])
            .map_err(SchemaError::EntryReader)?;

        let subentry_dn = match entry.values(ATTR_SUBSCHEMA_SUBENTRY) {
            [] => {
                return Err(SchemaError::NoSubschemaSubentry { dn: dn.to_string() });
            }
            [value] => value.as_str().ok_or_else(|| SchemaError::InvalidSubschemaSubentry {
                dn: dn.to_string(),
                reason: "the value is not valid UTF-8".to_string(),
            })?,
            values => {
                return Err(SchemaError::InvalidSubschemaSubentry {
                    dn: dn.to_string(),
                    reason: format!("expected one value but found {}", values.len()),
                });
            }
        };
        Dn::parse(subentry_dn, &core_schema().as_non_strict_schema()).map_err(|e| {
            SchemaError::InvalidSubschemaSubentry {
                dn: dn.to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!("Reading schema for '{}' from '{}'", dn, subentry_dn);
        let subentry = reader
            .read_entry(subentry_dn, &SUBSCHEMA_ATTRIBUTES)
            .map_err(SchemaError::EntryReader)?;
        Ok(self.add_schema_from_entry(&subentry, overwrite))
    }

    /// Resolve all elements, dropping and reporting those that fail.
    ///
    /// The returned catalog is strict; its warnings list every dropped element.
    pub fn build(&self) -> Schema {
        let resolution = validation::resolve(&self.raw, &self.options);
        let mut warnings = self.warnings.clone();
        warnings.extend(resolution.warnings);
        debug!(
            "Built schema '{}' with {} warnings",
            self.name,
            warnings.len()
        );
        Schema::new(
            self.name.clone(),
            self.options.clone(),
            warnings,
            resolution.elements,
        )
    }

    /// Resolve all elements, failing on the first element that does not
    /// resolve.
    pub fn build_strict(&self) -> SchemaResult<Schema> {
        let resolution = validation::resolve(&self.raw, &self.options);
        if let Some(error) = resolution.first_error {
            return Err(error);
        }
        let mut warnings = self.warnings.clone();
        warnings.extend(resolution.warnings);
        Ok(Schema::new(
            self.name.clone(),
            self.options.clone(),
            warnings,
            resolution.elements,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::constants::*;
    use std::error::Error;

    #[test]
    fn test_conflicting_oid_requires_overwrite() {
        let mut builder = SchemaBuilder::new("test");
        builder
            .add_attribute_type("( 1.1.1 NAME 'first' )", false)
            .expect("registered");
        let error = builder
            .add_attribute_type("( 1.1.1 NAME 'second' )", false)
            .unwrap_err();
        assert_eq!(error.message_key(), "schema.conflicting-element");

        builder
            .add_attribute_type("( 1.1.1 NAME 'second' )", true)
            .expect("overwritten");
        let schema = builder.build();
        assert!(schema.has_attribute_type("second"));
        assert!(!schema.has_attribute_type("first"));
    }

    #[test]
    fn test_enumeration_syntax_registers_ordering_rule() {
        let schema = SchemaBuilder::with_core_schema()
            .add_enumeration_syntax("1.2.3.4", "Days", &["monday", "tuesday"], false)
            .expect("registered")
            .build_strict()
            .expect("valid schema");
        let rule = schema
            .get_matching_rule("enumOrderingMatch1.2.3.4")
            .expect("ordering rule");
        assert_eq!(rule.oid(), format!("{}.1.2.3.4", OMR_GENERIC_ENUM_OID));
        let syntax = schema.get_syntax("1.2.3.4").expect("syntax");
        assert_eq!(syntax.ordering_matching_rule(), Some(rule.oid()));
    }

    #[test]
    fn test_pattern_syntax_is_checked_eagerly() {
        let error = SchemaBuilder::new("test")
            .add_pattern_syntax("1.2.3.5", "Broken", "(", false)
            .unwrap_err();
        assert_eq!(error.message_key(), "validation.invalid-pattern");
    }

    #[test]
    fn test_unknown_substitute_is_dropped() {
        let mut builder = SchemaBuilder::new("test");
        builder
            .add_substitution_syntax("1.2.3.6", "Alias", "9.9.9", false)
            .expect("registered");
        let schema = builder.build();
        assert!(!schema.has_syntax("1.2.3.6"));
        assert_eq!(schema.warnings().len(), 1);
        assert_eq!(
            builder.build_strict().unwrap_err().message_key(),
            "validation.unknown-syntax"
        );
    }

    #[test]
    fn test_entry_ingestion_collects_warnings() {
        let entry = Entry::new("cn=schema")
            .with_attribute(
                "attributeTypes",
                ["( 1.1.1 NAME 'good' SUP name )", "( 1.1.2 NAME 'bad' FOO )"],
            )
            .with_attribute("objectclasses", ["( 1.1.3 NAME 'goodClass' SUP top MUST good )"]);
        let mut builder = SchemaBuilder::with_core_schema();
        builder.add_schema_from_entry(&entry, true);
        assert_eq!(builder.warnings().len(), 1);
        let schema = builder.build();
        assert!(schema.has_attribute_type("good"));
        assert!(schema.has_object_class("goodClass"));
        assert!(!schema.has_attribute_type("bad"));
    }

    struct MissingSubentry;

    impl EntryReader for MissingSubentry {
        fn read_entry(
            &self,
            dn: &str,
            _attributes: &[&str],
        ) -> Result<Entry, Box<dyn Error + Send + Sync>> {
            Ok(Entry::new(dn))
        }
    }

    #[test]
    fn test_entry_without_subschema_subentry() {
        let error = SchemaBuilder::new("test")
            .add_schema_for_entry(&MissingSubentry, "dc=example,dc=com", false)
            .unwrap_err();
        assert_eq!(error.message_key(), "schema.no-subschema-subentry");
    }

    #[test]
    fn test_copy_keeps_options_and_elements() {
        let core = core_schema();
        let copy = SchemaBuilder::with_schema(&core).build();
        assert_eq!(copy.options(), core.options());
        assert_eq!(
            copy.attribute_types().count(),
            core.attribute_types().count()
        );
        assert!(copy.warnings().is_empty());
    }
}
