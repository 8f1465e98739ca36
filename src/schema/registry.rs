//! The schema catalog.
//!
//! A [`Schema`] is an immutable, fully resolved snapshot produced by a
//! [`SchemaBuilder`](super::SchemaBuilder). Clones are cheap and share the same
//! catalog, so a schema can be handed to any number of threads.
//!
//! Lookups accept a numeric OID or a case-insensitive name. A name shared by
//! several elements of one kind is only an error when it is looked up. What
//! happens for unknown names depends on the catalog:
//!
//! - a *strict* catalog fails with [`SchemaError::UnknownElement`];
//! - a *non-strict* catalog synthesizes placeholder attribute types and syntaxes
//!   backed by the default octet-string syntax and matching rule.
//!
//! One catalog is the process-wide default. It starts as [`core_schema`] and can
//! be replaced with [`set_default_schema`].

use super::attribute_type::{AttributeType, RawAttributeType};
use super::builder::SchemaBuilder;
use super::dit_rules::{DitContentRule, DitStructureRule, RawDitContentRule, RawDitStructureRule};
use super::embedded;
use super::matching_rule::{MatchingRule, MatchingRuleUse, RawMatchingRule, RawMatchingRuleUse};
use super::name_form::{NameForm, RawNameForm};
use super::object_class::{ObjectClass, RawObjectClass};
use super::syntax::{RawSyntax, Syntax};
use super::types::{ElementInfo, ElementKind, SchemaElement};
use crate::config::SchemaOptions;
use crate::error::{SchemaError, SchemaResult};
use crate::{matching, syntaxes};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

macro_rules! schema_element {
    ($kind:ident: $raw:ty, $resolved:ty) => {
        impl SchemaElement for $raw {
            const KIND: ElementKind = ElementKind::$kind;

            fn element_info(&self) -> &ElementInfo {
                &self.info
            }
        }

        impl SchemaElement for $resolved {
            const KIND: ElementKind = ElementKind::$kind;

            fn element_info(&self) -> &ElementInfo {
                &self.raw.info
            }
        }
    };
}

schema_element!(AttributeType: RawAttributeType, AttributeType);
schema_element!(ObjectClass: RawObjectClass, ObjectClass);
schema_element!(Syntax: RawSyntax, Syntax);
schema_element!(MatchingRule: RawMatchingRule, MatchingRule);
schema_element!(MatchingRuleUse: RawMatchingRuleUse, MatchingRuleUse);
schema_element!(NameForm: RawNameForm, NameForm);
schema_element!(DitContentRule: RawDitContentRule, DitContentRule);
schema_element!(DitStructureRule: RawDitStructureRule, DitStructureRule);

/// Elements of one kind indexed by OID and by lowercased name.
#[derive(Debug)]
struct ElementMap<T> {
    by_oid: IndexMap<String, Arc<T>>,
    by_name: HashMap<String, Vec<Arc<T>>>,
}

impl<T: SchemaElement> ElementMap<T> {
    fn new(elements: Vec<Arc<T>>) -> Self {
        let mut by_oid = IndexMap::with_capacity(elements.len());
        let mut by_name: HashMap<String, Vec<Arc<T>>> = HashMap::new();
        for element in elements {
            for name in element.element_info().names() {
                let entries = by_name.entry(name.to_lowercase()).or_default();
                if !entries.iter().any(|e| Arc::ptr_eq(e, &element)) {
                    entries.push(element.clone());
                }
            }
            by_oid.insert(element.element_info().oid().to_string(), element);
        }
        Self { by_oid, by_name }
    }

    /// OID first, then name. A name shared by several elements is ambiguous.
    fn find(&self, name_or_oid: &str) -> SchemaResult<Option<&Arc<T>>> {
        if let Some(element) = self.by_oid.get(name_or_oid) {
            return Ok(Some(element));
        }
        match self.by_name.get(&name_or_oid.to_lowercase()).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([element]) => Ok(Some(element)),
            Some(_) => Err(SchemaError::ambiguous(T::KIND, name_or_oid)),
        }
    }

    fn contains(&self, name_or_oid: &str) -> bool {
        matches!(self.find(name_or_oid), Ok(Some(_)))
    }

    fn get(&self, name_or_oid: &str) -> SchemaResult<Arc<T>> {
        self.find(name_or_oid)?
            .cloned()
            .ok_or_else(|| SchemaError::unknown(T::KIND, name_or_oid))
    }

    fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.by_oid.values()
    }

    fn len(&self) -> usize {
        self.by_oid.len()
    }
}

/// The resolved elements a catalog is assembled from.
#[derive(Debug, Default)]
pub(crate) struct ResolvedElements {
    pub(crate) syntaxes: Vec<Arc<Syntax>>,
    pub(crate) matching_rules: Vec<Arc<MatchingRule>>,
    pub(crate) attribute_types: Vec<Arc<AttributeType>>,
    pub(crate) object_classes: Vec<Arc<ObjectClass>>,
    pub(crate) matching_rule_uses: Vec<Arc<MatchingRuleUse>>,
    pub(crate) name_forms: Vec<Arc<NameForm>>,
    pub(crate) dit_content_rules: Vec<Arc<DitContentRule>>,
    pub(crate) dit_structure_rules: Vec<Arc<DitStructureRule>>,
}

#[derive(Debug)]
struct SchemaImpl {
    name: String,
    options: SchemaOptions,
    warnings: Vec<String>,
    syntaxes: ElementMap<Syntax>,
    matching_rules: ElementMap<MatchingRule>,
    attribute_types: ElementMap<AttributeType>,
    object_classes: ElementMap<ObjectClass>,
    matching_rule_uses: ElementMap<MatchingRuleUse>,
    name_forms: ElementMap<NameForm>,
    dit_content_rules: ElementMap<DitContentRule>,
    dit_structure_rules: ElementMap<DitStructureRule>,
    name_forms_by_class: HashMap<String, Vec<Arc<NameForm>>>,
    structure_rules_by_name_form: HashMap<String, Vec<Arc<DitStructureRule>>>,
    default_syntax: Arc<Syntax>,
    default_matching_rule: Arc<MatchingRule>,
}

/// An immutable schema catalog.
#[derive(Clone)]
pub struct Schema {
    inner: Arc<SchemaImpl>,
    strict: bool,
}

impl Schema {
    pub(crate) fn new(
        name: String,
        options: SchemaOptions,
        warnings: Vec<String>,
        elements: ResolvedElements,
    ) -> Self {
        let mut name_forms_by_class: HashMap<String, Vec<Arc<NameForm>>> = HashMap::new();
        for name_form in &elements.name_forms {
            name_forms_by_class
                .entry(name_form.structural_class().oid().to_string())
                .or_default()
                .push(name_form.clone());
        }
        let mut structure_rules_by_name_form: HashMap<String, Vec<Arc<DitStructureRule>>> =
            HashMap::new();
        for rule in &elements.dit_structure_rules {
            structure_rules_by_name_form
                .entry(rule.name_form().oid().to_string())
                .or_default()
                .push(rule.clone());
        }

        let syntaxes = ElementMap::new(elements.syntaxes);
        let matching_rules = ElementMap::new(elements.matching_rules);
        let default_syntax = default_syntax(&syntaxes, &options.default_syntax_oid);
        let default_matching_rule = default_matching_rule(
            &matching_rules,
            &options.default_matching_rule_oid,
            &default_syntax,
        );

        Self {
            inner: Arc::new(SchemaImpl {
                name,
                options,
                warnings,
                syntaxes,
                matching_rules,
                attribute_types: ElementMap::new(elements.attribute_types),
                object_classes: ElementMap::new(elements.object_classes),
                matching_rule_uses: ElementMap::new(elements.matching_rule_uses),
                name_forms: ElementMap::new(elements.name_forms),
                dit_content_rules: ElementMap::new(elements.dit_content_rules),
                dit_structure_rules: ElementMap::new(elements.dit_structure_rules),
                name_forms_by_class,
                structure_rules_by_name_form,
                default_syntax,
                default_matching_rule,
            }),
            strict: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.inner.options
    }

    /// Problems found while building the catalog, including dropped elements.
    pub fn warnings(&self) -> &[String] {
        &self.inner.warnings
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The same catalog with strict lookups.
    pub fn as_strict_schema(&self) -> Schema {
        Schema {
            inner: self.inner.clone(),
            strict: true,
        }
    }

    /// The same catalog, synthesizing placeholders for unknown attribute types
    /// and syntaxes.
    pub fn as_non_strict_schema(&self) -> Schema {
        Schema {
            inner: self.inner.clone(),
            strict: false,
        }
    }

    // Attribute types

    pub fn get_attribute_type(&self, name_or_oid: &str) -> SchemaResult<Arc<AttributeType>> {
        match self.inner.attribute_types.find(name_or_oid)? {
            Some(at) => Ok(at.clone()),
            None if !self.strict => Ok(Arc::new(AttributeType::place_holder(
                name_or_oid,
                self.inner.default_syntax.clone(),
                Some(self.inner.default_matching_rule.clone()),
            ))),
            None => Err(SchemaError::unknown(ElementKind::AttributeType, name_or_oid)),
        }
    }

    pub fn has_attribute_type(&self, name_or_oid: &str) -> bool {
        self.inner.attribute_types.contains(name_or_oid)
    }

    pub fn attribute_types(&self) -> impl Iterator<Item = &Arc<AttributeType>> {
        self.inner.attribute_types.iter()
    }

    // Object classes

    pub fn get_object_class(&self, name_or_oid: &str) -> SchemaResult<Arc<ObjectClass>> {
        self.inner.object_classes.get(name_or_oid)
    }

    pub fn has_object_class(&self, name_or_oid: &str) -> bool {
        self.inner.object_classes.contains(name_or_oid)
    }

    pub fn object_classes(&self) -> impl Iterator<Item = &Arc<ObjectClass>> {
        self.inner.object_classes.iter()
    }

    // Syntaxes

    pub fn get_syntax(&self, oid: &str) -> SchemaResult<Arc<Syntax>> {
        match self.inner.syntaxes.find(oid)? {
            Some(syntax) => Ok(syntax.clone()),
            None if !self.strict => Ok(Arc::new(Syntax::place_holder(
                oid,
                self.inner.default_syntax.implementation.clone(),
            ))),
            None => Err(SchemaError::unknown(ElementKind::Syntax, oid)),
        }
    }

    pub fn has_syntax(&self, oid: &str) -> bool {
        self.inner.syntaxes.contains(oid)
    }

    pub fn syntaxes(&self) -> impl Iterator<Item = &Arc<Syntax>> {
        self.inner.syntaxes.iter()
    }

    // Matching rules

    pub fn get_matching_rule(&self, name_or_oid: &str) -> SchemaResult<Arc<MatchingRule>> {
        self.inner.matching_rules.get(name_or_oid)
    }

    pub fn has_matching_rule(&self, name_or_oid: &str) -> bool {
        self.inner.matching_rules.contains(name_or_oid)
    }

    pub fn matching_rules(&self) -> impl Iterator<Item = &Arc<MatchingRule>> {
        self.inner.matching_rules.iter()
    }

    // Matching rule uses

    pub fn get_matching_rule_use(&self, name_or_oid: &str) -> SchemaResult<Arc<MatchingRuleUse>> {
        self.inner.matching_rule_uses.get(name_or_oid)
    }

    pub fn has_matching_rule_use(&self, name_or_oid: &str) -> bool {
        self.inner.matching_rule_uses.contains(name_or_oid)
    }

    pub fn matching_rule_uses(&self) -> impl Iterator<Item = &Arc<MatchingRuleUse>> {
        self.inner.matching_rule_uses.iter()
    }

    /// The matching rule use whose OID is the rule's OID.
    pub fn matching_rule_use_for_rule(&self, rule: &MatchingRule) -> Option<&Arc<MatchingRuleUse>> {
        self.inner.matching_rule_uses.by_oid.get(rule.oid())
    }

    // Name forms

    pub fn get_name_form(&self, name_or_oid: &str) -> SchemaResult<Arc<NameForm>> {
        self.inner.name_forms.get(name_or_oid)
    }

    pub fn has_name_form(&self, name_or_oid: &str) -> bool {
        self.inner.name_forms.contains(name_or_oid)
    }

    pub fn name_forms(&self) -> impl Iterator<Item = &Arc<NameForm>> {
        self.inner.name_forms.iter()
    }

    /// Name forms whose structural class is `object_class`.
    pub fn name_forms_for_object_class(&self, object_class: &ObjectClass) -> &[Arc<NameForm>] {
        self.inner
            .name_forms_by_class
            .get(object_class.oid())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // DIT content rules

    /// Look up a content rule by its structural class OID or its own name.
    pub fn get_dit_content_rule(&self, name_or_oid: &str) -> SchemaResult<Arc<DitContentRule>> {
        self.inner.dit_content_rules.get(name_or_oid)
    }

    pub fn has_dit_content_rule(&self, name_or_oid: &str) -> bool {
        self.inner.dit_content_rules.contains(name_or_oid)
    }

    pub fn dit_content_rules(&self) -> impl Iterator<Item = &Arc<DitContentRule>> {
        self.inner.dit_content_rules.iter()
    }

    pub fn dit_content_rule_for_object_class(
        &self,
        object_class: &ObjectClass,
    ) -> Option<&Arc<DitContentRule>> {
        self.inner.dit_content_rules.by_oid.get(object_class.oid())
    }

    // DIT structure rules

    pub fn get_dit_structure_rule(&self, rule_id: u32) -> SchemaResult<Arc<DitStructureRule>> {
        self.inner
            .dit_structure_rules
            .by_oid
            .get(&rule_id.to_string())
            .cloned()
            .ok_or_else(|| SchemaError::unknown(ElementKind::DitStructureRule, rule_id.to_string()))
    }

    pub fn get_dit_structure_rule_by_name(
        &self,
        name: &str,
    ) -> SchemaResult<Arc<DitStructureRule>> {
        self.inner.dit_structure_rules.get(name)
    }

    pub fn has_dit_structure_rule(&self, rule_id: u32) -> bool {
        self.inner
            .dit_structure_rules
            .by_oid
            .contains_key(&rule_id.to_string())
    }

    pub fn dit_structure_rules(&self) -> impl Iterator<Item = &Arc<DitStructureRule>> {
        self.inner.dit_structure_rules.iter()
    }

    /// Structure rules governing entries named by `name_form`.
    pub fn structure_rules_for_name_form(&self, name_form: &NameForm) -> &[Arc<DitStructureRule>] {
        self.inner
            .structure_rules_by_name_form
            .get(name_form.oid())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve a name to an OID, trying attribute types, object classes,
    /// matching rules and name forms in turn. Ambiguous names resolve to nothing.
    pub fn oid_for_name(&self, name: &str) -> Option<&str> {
        fn lookup<'a, T: SchemaElement>(map: &'a ElementMap<T>, name: &str) -> Option<&'a str> {
            match map.find(name) {
                Ok(Some(element)) => Some(element.element_info().oid()),
                _ => None,
            }
        }
        let inner = &*self.inner;
        lookup(&inner.attribute_types, name)
            .or_else(|| lookup(&inner.object_classes, name))
            .or_else(|| lookup(&inner.matching_rules, name))
            .or_else(|| lookup(&inner.name_forms, name))
    }

    /// Number of elements of each kind, in subschema attribute order.
    pub fn element_counts(&self) -> Vec<(ElementKind, usize)> {
        let inner = &*self.inner;
        vec![
            (ElementKind::Syntax, inner.syntaxes.len()),
            (ElementKind::AttributeType, inner.attribute_types.len()),
            (ElementKind::ObjectClass, inner.object_classes.len()),
            (ElementKind::MatchingRuleUse, inner.matching_rule_uses.len()),
            (ElementKind::MatchingRule, inner.matching_rules.len()),
            (ElementKind::DitContentRule, inner.dit_content_rules.len()),
            (ElementKind::DitStructureRule, inner.dit_structure_rules.len()),
            (ElementKind::NameForm, inner.name_forms.len()),
        ]
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.inner.name)
            .field("strict", &self.strict)
            .field("attribute_types", &self.inner.attribute_types.len())
            .field("object_classes", &self.inner.object_classes.len())
            .field("warnings", &self.inner.warnings.len())
            .finish()
    }
}

fn default_syntax(syntaxes: &ElementMap<Syntax>, oid: &str) -> Arc<Syntax> {
    if let Some(syntax) = syntaxes.by_oid.get(oid) {
        return syntax.clone();
    }
    let implementation = syntaxes::builtin(oid).unwrap_or_else(syntaxes::default_impl);
    Arc::new(Syntax::place_holder(oid, implementation))
}

fn default_matching_rule(
    rules: &ElementMap<MatchingRule>,
    oid: &str,
    syntax: &Arc<Syntax>,
) -> Arc<MatchingRule> {
    if let Some(rule) = rules.by_oid.get(oid) {
        return rule.clone();
    }
    Arc::new(MatchingRule {
        raw: RawMatchingRule::new(oid, syntax.oid()),
        syntax: syntax.clone(),
        implementation: matching::builtin(oid).unwrap_or_else(matching::default_impl),
    })
}

static CORE_SCHEMA: Lazy<Schema> = Lazy::new(embedded::build_core_schema);

static EMPTY_SCHEMA: Lazy<Schema> =
    Lazy::new(|| SchemaBuilder::new("Empty Schema").build().as_non_strict_schema());

static DEFAULT_SCHEMA: Lazy<RwLock<Schema>> = Lazy::new(|| RwLock::new(core_schema()));

/// The built-in core schema: RFC 4512, 4517 and 4519 elements.
pub fn core_schema() -> Schema {
    CORE_SCHEMA.clone()
}

/// A non-strict catalog with no elements.
pub fn empty_schema() -> Schema {
    EMPTY_SCHEMA.clone()
}

/// The current process-wide default schema.
pub fn default_schema() -> Schema {
    DEFAULT_SCHEMA.read().clone()
}

/// Replace the process-wide default schema.
pub fn set_default_schema(schema: Schema) {
    replace_default_schema(schema);
}

/// Replace the process-wide default schema, returning the one it replaced.
pub fn replace_default_schema(schema: Schema) -> Schema {
    log::debug!("Replacing the default schema with '{}'", schema.name());
    std::mem::replace(&mut *DEFAULT_SCHEMA.write(), schema)
}
