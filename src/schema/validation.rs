//! Second build pass: resolve the references between raw elements.
//!
//! Every element is resolved at most once. A marker per element records whether
//! it is being resolved, has been resolved or has failed, so re-entering an
//! element that is still being resolved is a reference cycle rather than
//! unbounded recursion. Kinds are visited in dependency order: syntaxes,
//! matching rules, attribute types, object classes, matching rule uses, name
//! forms, DIT content rules and finally DIT structure rules.
//!
//! An element that fails is dropped and reported; anything depending on it fails
//! in turn.

use super::attribute_type::{AttributeType, AttributeUsage, RawAttributeType};
use super::builder::RawElements;
use super::constants::TOP_OBJECTCLASS_OID;
use super::dit_rules::{DitContentRule, DitStructureRule, RawDitContentRule, RawDitStructureRule};
use super::matching_rule::{MatchingRule, MatchingRuleUse, RawMatchingRule, RawMatchingRuleUse};
use super::name_form::{NameForm, RawNameForm};
use super::object_class::{ObjectClass, ObjectClassKind, RawObjectClass};
use super::registry::ResolvedElements;
use super::syntax::{RawSyntax, Syntax};
use super::types::{ElementKind, SchemaElement};
use crate::config::SchemaOptions;
use crate::error::{SchemaError, SchemaResult, ValidationError};
use crate::syntaxes::enumeration::{EnumOrderingMatchingRule, EnumerationSyntax};
use crate::syntaxes::pattern::PatternSyntax;
use crate::{matching, syntaxes};
use indexmap::IndexMap;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of resolving every raw element.
pub(crate) struct Resolution {
    pub(crate) elements: ResolvedElements,
    pub(crate) warnings: Vec<String>,
    /// The first element failure, which aborts a strict build.
    pub(crate) first_error: Option<SchemaError>,
}

/// Resolve all elements, dropping those that fail.
pub(crate) fn resolve(raw: &RawElements, options: &SchemaOptions) -> Resolution {
    let mut resolver = Resolver::new(raw, options);

    for key in raw.syntaxes.keys() {
        let _ = resolver.syntax(key);
    }
    for key in raw.matching_rules.keys() {
        let _ = resolver.matching_rule(key);
    }
    for key in raw.attribute_types.keys() {
        let _ = resolver.attribute_type(key);
    }
    for key in raw.object_classes.keys() {
        let _ = resolver.object_class(key);
    }
    for key in raw.matching_rule_uses.keys() {
        let _ = resolver.matching_rule_use(key);
    }
    for key in raw.name_forms.keys() {
        let _ = resolver.name_form(key);
    }
    for key in raw.dit_content_rules.keys() {
        let _ = resolver.dit_content_rule(key);
    }
    for key in raw.dit_structure_rules.keys() {
        let _ = resolver.dit_structure_rule(key);
    }

    resolver.finish()
}

/// Why a reference could not be followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unresolved {
    Missing,
    Failed,
    Cycle,
    Ambiguous,
}

enum Marker<T> {
    Resolving,
    Resolved(Arc<T>),
    Failed,
}

#[derive(Default)]
struct Report {
    warnings: Vec<String>,
    first_error: Option<SchemaError>,
}

impl Report {
    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    fn reject(&mut self, kind: ElementKind, oid: &str, error: SchemaError) {
        self.warn(format!(
            "The {} {} was removed from the schema: {}",
            kind, oid, error
        ));
        if self.first_error.is_none() {
            self.first_error = Some(error);
        }
    }
}

/// Raw elements of one kind with their resolution markers.
struct Table<'a, R, T> {
    raw: &'a IndexMap<String, R>,
    names: HashMap<String, Vec<&'a str>>,
    markers: HashMap<&'a str, Marker<T>>,
}

impl<'a, R: SchemaElement, T> Table<'a, R, T> {
    fn new(raw: &'a IndexMap<String, R>) -> Self {
        let mut names: HashMap<String, Vec<&'a str>> = HashMap::new();
        for (key, element) in raw {
            for name in element.element_info().names() {
                let keys = names.entry(name.to_lowercase()).or_default();
                if !keys.contains(&key.as_str()) {
                    keys.push(key.as_str());
                }
            }
        }
        Self {
            raw,
            names,
            markers: HashMap::new(),
        }
    }

    fn locate(&self, reference: &str) -> Result<(&'a str, &'a R), Unresolved> {
        let raw = self.raw;
        if let Some((key, element)) = raw.get_key_value(reference) {
            return Ok((key.as_str(), element));
        }
        match self.names.get(&reference.to_lowercase()).map(Vec::as_slice) {
            Some([key]) => Ok((*key, &raw[*key])),
            Some([_, _, ..]) => Err(Unresolved::Ambiguous),
            _ => Err(Unresolved::Missing),
        }
    }

    /// The finished element, or `None` after marking it as in progress.
    fn begin(&mut self, key: &'a str) -> Result<Option<Arc<T>>, Unresolved> {
        match self.markers.get(key) {
            Some(Marker::Resolved(element)) => Ok(Some(element.clone())),
            Some(Marker::Resolving) => Err(Unresolved::Cycle),
            Some(Marker::Failed) => Err(Unresolved::Failed),
            None => {
                self.markers.insert(key, Marker::Resolving);
                Ok(None)
            }
        }
    }

    fn complete(
        &mut self,
        key: &'a str,
        outcome: SchemaResult<T>,
        report: &mut Report,
    ) -> Result<Arc<T>, Unresolved> {
        match outcome {
            Ok(element) => {
                let element = Arc::new(element);
                self.markers.insert(key, Marker::Resolved(element.clone()));
                Ok(element)
            }
            Err(error) => {
                self.markers.insert(key, Marker::Failed);
                report.reject(R::KIND, key, error);
                Err(Unresolved::Failed)
            }
        }
    }

    /// Resolved elements in registration order.
    fn resolved(&self) -> Vec<Arc<T>> {
        self.raw
            .keys()
            .filter_map(|key| match self.markers.get(key.as_str()) {
                Some(Marker::Resolved(element)) => Some(element.clone()),
                _ => None,
            })
            .collect()
    }
}

/// The element whose references are being followed, for error reporting.
#[derive(Clone, Copy)]
struct Referrer<'r> {
    kind: ElementKind,
    oid: &'r str,
}

impl Referrer<'_> {
    fn dependency(
        self,
        unresolved: Unresolved,
        target: ElementKind,
        reference: &str,
        missing: impl FnOnce() -> ValidationError,
    ) -> SchemaError {
        match unresolved {
            Unresolved::Missing => missing().into(),
            Unresolved::Failed => ValidationError::InvalidDependency {
                kind: self.kind,
                oid: self.oid.to_string(),
                dependency: reference.to_string(),
            }
            .into(),
            Unresolved::Cycle => self.cycle(),
            Unresolved::Ambiguous => SchemaError::ambiguous(target, reference),
        }
    }

    fn superior(self, unresolved: Unresolved, reference: &str) -> SchemaError {
        match unresolved {
            Unresolved::Missing => ValidationError::UnknownSuperior {
                kind: self.kind,
                oid: self.oid.to_string(),
                superior: reference.to_string(),
            }
            .into(),
            Unresolved::Failed => ValidationError::InvalidSuperior {
                kind: self.kind,
                oid: self.oid.to_string(),
                superior: reference.to_string(),
            }
            .into(),
            Unresolved::Cycle => self.cycle(),
            Unresolved::Ambiguous => SchemaError::ambiguous(self.kind, reference),
        }
    }

    fn cycle(self) -> SchemaError {
        SchemaError::CyclicReference {
            kind: self.kind,
            oid: self.oid.to_string(),
        }
    }

    fn unknown_attribute(self, unresolved: Unresolved, reference: &str) -> SchemaError {
        self.dependency(unresolved, ElementKind::AttributeType, reference, || {
            ValidationError::UnknownAttributeType {
                kind: self.kind,
                oid: self.oid.to_string(),
                attribute: reference.to_string(),
            }
        })
    }

    fn unknown_object_class(self, unresolved: Unresolved, reference: &str) -> SchemaError {
        self.dependency(unresolved, ElementKind::ObjectClass, reference, || {
            ValidationError::UnknownObjectClass {
                kind: self.kind,
                oid: self.oid.to_string(),
                object_class: reference.to_string(),
            }
        })
    }

    fn unknown_syntax(self, unresolved: Unresolved, reference: &str) -> SchemaError {
        self.dependency(unresolved, ElementKind::Syntax, reference, || {
            ValidationError::UnknownSyntax {
                kind: self.kind,
                oid: self.oid.to_string(),
                syntax: reference.to_string(),
            }
        })
    }

    fn unknown_matching_rule(self, unresolved: Unresolved, reference: &str) -> SchemaError {
        self.dependency(unresolved, ElementKind::MatchingRule, reference, || {
            ValidationError::UnknownMatchingRule {
                kind: self.kind,
                oid: self.oid.to_string(),
                rule: reference.to_string(),
            }
        })
    }
}

fn referrer<R: SchemaElement>(raw: &R) -> Referrer<'_> {
    Referrer {
        kind: R::KIND,
        oid: raw.element_info().oid(),
    }
}

/// Append the attribute types of `from` that `into` does not already hold.
fn merge(into: &mut Vec<Arc<AttributeType>>, from: &[Arc<AttributeType>]) {
    for attribute in from {
        if !into.iter().any(|at| at.oid() == attribute.oid()) {
            into.push(attribute.clone());
        }
    }
}

struct Resolver<'a> {
    options: &'a SchemaOptions,
    syntaxes: Table<'a, RawSyntax, Syntax>,
    matching_rules: Table<'a, RawMatchingRule, MatchingRule>,
    attribute_types: Table<'a, RawAttributeType, AttributeType>,
    object_classes: Table<'a, RawObjectClass, ObjectClass>,
    matching_rule_uses: Table<'a, RawMatchingRuleUse, MatchingRuleUse>,
    name_forms: Table<'a, RawNameForm, NameForm>,
    dit_content_rules: Table<'a, RawDitContentRule, DitContentRule>,
    dit_structure_rules: Table<'a, RawDitStructureRule, DitStructureRule>,
    report: Report,
}

/// Generates the memoized entry point for one kind of element.
macro_rules! resolve_entry {
    ($name:ident, $table:ident, $build:ident, $resolved:ty) => {
        fn $name(&mut self, reference: &str) -> Result<Arc<$resolved>, Unresolved> {
            let (key, raw) = self.$table.locate(reference)?;
            if let Some(element) = self.$table.begin(key)? {
                return Ok(element);
            }
            let outcome = self.$build(raw);
            self.$table.complete(key, outcome, &mut self.report)
        }
    };
}

impl<'a> Resolver<'a> {
    fn new(raw: &'a RawElements, options: &'a SchemaOptions) -> Self {
        Self {
            options,
            syntaxes: Table::new(&raw.syntaxes),
            matching_rules: Table::new(&raw.matching_rules),
            attribute_types: Table::new(&raw.attribute_types),
            object_classes: Table::new(&raw.object_classes),
            matching_rule_uses: Table::new(&raw.matching_rule_uses),
            name_forms: Table::new(&raw.name_forms),
            dit_content_rules: Table::new(&raw.dit_content_rules),
            dit_structure_rules: Table::new(&raw.dit_structure_rules),
            report: Report::default(),
        }
    }

    fn finish(self) -> Resolution {
        Resolution {
            elements: ResolvedElements {
                syntaxes: self.syntaxes.resolved(),
                matching_rules: self.matching_rules.resolved(),
                attribute_types: self.attribute_types.resolved(),
                object_classes: self.object_classes.resolved(),
                matching_rule_uses: self.matching_rule_uses.resolved(),
                name_forms: self.name_forms.resolved(),
                dit_content_rules: self.dit_content_rules.resolved(),
                dit_structure_rules: self.dit_structure_rules.resolved(),
            },
            warnings: self.report.warnings,
            first_error: self.report.first_error,
        }
    }

    resolve_entry!(syntax, syntaxes, build_syntax, Syntax);
    resolve_entry!(matching_rule, matching_rules, build_matching_rule, MatchingRule);
    resolve_entry!(attribute_type, attribute_types, build_attribute_type, AttributeType);
    resolve_entry!(object_class, object_classes, build_object_class, ObjectClass);
    resolve_entry!(matching_rule_use, matching_rule_uses, build_matching_rule_use, MatchingRuleUse);
    resolve_entry!(name_form, name_forms, build_name_form, NameForm);
    resolve_entry!(dit_content_rule, dit_content_rules, build_dit_content_rule, DitContentRule);
    resolve_entry!(dit_structure_rule, dit_structure_rules, build_dit_structure_rule, DitStructureRule);

    fn attribute_types_for(
        &mut self,
        referrer: Referrer<'_>,
        references: &[String],
    ) -> SchemaResult<Vec<Arc<AttributeType>>> {
        references
            .iter()
            .map(|reference| {
                self.attribute_type(reference)
                    .map_err(|u| referrer.unknown_attribute(u, reference))
            })
            .collect()
    }

    fn build_syntax(&mut self, raw: &RawSyntax) -> SchemaResult<Syntax> {
        let oid = raw.oid();

        if let Some(values) = raw.enumeration_values() {
            let enumeration = Arc::new(EnumerationSyntax::new(oid, values));
            let mut syntax = Syntax::new(raw.clone(), enumeration.clone());
            syntax.enumeration = Some(enumeration);
            return Ok(syntax);
        }

        if let Some(pattern) = raw.pattern() {
            let implementation = PatternSyntax::new(oid, pattern)?;
            return Ok(Syntax::new(raw.clone(), Arc::new(implementation)));
        }

        if let Some(reference) = raw.substitute() {
            let substitute = self
                .syntax(reference)
                .map_err(|u| referrer(raw).unknown_syntax(u, reference))?;
            let mut syntax = Syntax::new(raw.clone(), substitute.implementation.clone());
            syntax.enumeration = substitute.enumeration.clone();
            return Ok(syntax);
        }

        let implementation = syntaxes::builtin(oid).unwrap_or_else(|| {
            self.report.warn(format!(
                "The syntax {} has no implementation, its values will be handled as octet strings",
                oid
            ));
            syntaxes::default_impl()
        });
        Ok(Syntax::new(raw.clone(), implementation))
    }

    fn build_matching_rule(&mut self, raw: &RawMatchingRule) -> SchemaResult<MatchingRule> {
        let oid = raw.oid();
        let syntax = self
            .syntax(&raw.syntax)
            .map_err(|u| referrer(raw).unknown_syntax(u, &raw.syntax))?;

        let implementation = match matching::builtin(oid) {
            Some(implementation) => implementation,
            None => match syntax.enumeration() {
                Some(enumeration)
                    if syntaxes::enumeration::ordering_rule_oid(enumeration.oid()) == oid =>
                {
                    Arc::new(EnumOrderingMatchingRule::new(enumeration.clone()))
                }
                _ => {
                    self.report.warn(format!(
                        "The matching rule {} has no implementation, values will be compared as octet strings",
                        oid
                    ));
                    matching::default_impl()
                }
            },
        };

        Ok(MatchingRule {
            raw: raw.clone(),
            syntax,
            implementation,
        })
    }

    /// Declared rule, else the superior's, else the syntax default.
    fn matching_rule_for(
        &mut self,
        referrer: Referrer<'_>,
        declared: Option<&str>,
        inherited: Option<&Arc<MatchingRule>>,
        syntax_default: Option<&str>,
    ) -> SchemaResult<Option<Arc<MatchingRule>>> {
        if let Some(reference) = declared {
            return self
                .matching_rule(reference)
                .map(Some)
                .map_err(|u| referrer.unknown_matching_rule(u, reference));
        }
        if let Some(rule) = inherited {
            return Ok(Some(rule.clone()));
        }
        Ok(syntax_default.and_then(|reference| self.matching_rule(reference).ok()))
    }

    fn default_syntax(&mut self) -> Arc<Syntax> {
        let oid = self.options.default_syntax_oid.as_str();
        match self.syntax(oid) {
            Ok(syntax) => syntax,
            Err(_) => Arc::new(Syntax::place_holder(
                oid,
                syntaxes::builtin(oid).unwrap_or_else(syntaxes::default_impl),
            )),
        }
    }

    fn build_attribute_type(&mut self, raw: &RawAttributeType) -> SchemaResult<AttributeType> {
        let referrer = referrer(raw);
        let oid = raw.oid();

        let superior = match &raw.superior {
            Some(reference) => {
                let superior = self
                    .attribute_type(reference)
                    .map_err(|u| referrer.superior(u, reference))?;
                if superior.usage() != raw.usage {
                    return Err(ValidationError::SuperiorUsageMismatch {
                        oid: oid.to_string(),
                        superior: reference.clone(),
                    }
                    .into());
                }
                if superior.is_collective() != raw.collective {
                    return Err(ValidationError::CollectiveMismatch {
                        oid: oid.to_string(),
                        superior: reference.clone(),
                    }
                    .into());
                }
                Some(superior)
            }
            None => None,
        };

        let syntax = match (&raw.syntax, &superior) {
            (Some(reference), _) => self
                .syntax(reference)
                .map_err(|u| referrer.unknown_syntax(u, reference))?,
            (None, Some(superior)) => superior.syntax().clone(),
            (None, None) => self.default_syntax(),
        };

        let inherited = superior.as_deref();
        let equality = self.matching_rule_for(
            referrer,
            raw.equality.as_deref(),
            inherited.and_then(AttributeType::equality_matching_rule),
            syntax.equality_matching_rule(),
        )?;
        let ordering = self.matching_rule_for(
            referrer,
            raw.ordering.as_deref(),
            inherited.and_then(AttributeType::ordering_matching_rule),
            syntax.ordering_matching_rule(),
        )?;
        let substring = self.matching_rule_for(
            referrer,
            raw.substring.as_deref(),
            inherited.and_then(AttributeType::substring_matching_rule),
            syntax.substring_matching_rule(),
        )?;

        let approximate = match raw.approximate() {
            Some(reference) => match self.matching_rule(reference) {
                Ok(rule) => Some(rule),
                Err(_) => {
                    self.report.warn(format!(
                        "The attribute type {} refers to an unknown approximate matching rule '{}'",
                        oid, reference
                    ));
                    None
                }
            },
            None => match inherited.and_then(AttributeType::approximate_matching_rule) {
                Some(rule) => Some(rule.clone()),
                None => syntax
                    .approximate_matching_rule()
                    .and_then(|reference| self.matching_rule(reference).ok()),
            },
        };

        if raw.collective && raw.usage.is_operational() {
            self.report.warn(format!(
                "The collective attribute type {} has the operational usage {}",
                oid, raw.usage
            ));
        }
        if raw.no_user_modification && raw.usage == AttributeUsage::UserApplications {
            self.report.warn(format!(
                "The attribute type {} is NO-USER-MODIFICATION but has usage {}",
                oid, raw.usage
            ));
        }

        Ok(AttributeType {
            raw: raw.clone(),
            superior,
            syntax,
            equality,
            ordering,
            substring,
            approximate,
            place_holder: false,
        })
    }

    fn build_object_class(&mut self, raw: &RawObjectClass) -> SchemaResult<ObjectClass> {
        let referrer = referrer(raw);
        let oid = raw.oid();
        let is_top = oid == TOP_OBJECTCLASS_OID;
        let mut superiors = Vec::with_capacity(raw.superiors.len().max(1));

        if raw.superiors.is_empty() {
            if !is_top {
                match self.object_class(TOP_OBJECTCLASS_OID) {
                    Ok(top) => superiors.push(top),
                    // Without top only structural classes are incomplete.
                    Err(Unresolved::Missing) => {}
                    Err(u) => return Err(referrer.superior(u, TOP_OBJECTCLASS_OID)),
                }
            }
        } else {
            for reference in &raw.superiors {
                let superior = self
                    .object_class(reference)
                    .map_err(|u| referrer.superior(u, reference))?;
                if !raw.kind.may_derive_from(superior.kind()) {
                    return Err(ValidationError::IncompatibleSuperiorKind {
                        oid: oid.to_string(),
                        kind: raw.kind,
                        superior: reference.clone(),
                        superior_kind: superior.kind(),
                    }
                    .into());
                }
                superiors.push(superior);
            }
        }

        let descends_from_top = is_top || superiors.iter().any(|sup| sup.descends_from_top());
        if raw.kind == ObjectClassKind::Structural && !descends_from_top {
            return Err(ValidationError::StructuralWithoutTop {
                oid: oid.to_string(),
            }
            .into());
        }

        let declared_required = self.attribute_types_for(referrer, &raw.required)?;
        let declared_optional = self.attribute_types_for(referrer, &raw.optional)?;

        let mut required = Vec::new();
        let mut optional = Vec::new();
        merge(&mut required, &declared_required);
        merge(&mut optional, &declared_optional);
        for superior in &superiors {
            merge(&mut required, superior.required_attributes());
            merge(&mut optional, superior.optional_attributes());
        }

        Ok(ObjectClass {
            raw: raw.clone(),
            superiors,
            declared_required,
            declared_optional,
            required,
            optional,
            descends_from_top,
        })
    }

    fn build_matching_rule_use(&mut self, raw: &RawMatchingRuleUse) -> SchemaResult<MatchingRuleUse> {
        let referrer = referrer(raw);
        let matching_rule = self
            .matching_rule(raw.oid())
            .map_err(|u| referrer.unknown_matching_rule(u, raw.oid()))?;
        let attributes = self.attribute_types_for(referrer, &raw.applies)?;
        Ok(MatchingRuleUse {
            raw: raw.clone(),
            matching_rule,
            attributes,
        })
    }

    fn build_name_form(&mut self, raw: &RawNameForm) -> SchemaResult<NameForm> {
        let referrer = referrer(raw);
        let reference = &raw.structural_class;
        let structural_class = self
            .object_class(reference)
            .map_err(|u| referrer.unknown_object_class(u, reference))?;
        if structural_class.kind() != ObjectClassKind::Structural {
            return Err(ValidationError::NotStructural {
                kind: ElementKind::NameForm,
                oid: raw.oid().to_string(),
                object_class: reference.clone(),
            }
            .into());
        }
        let required = self.attribute_types_for(referrer, &raw.required)?;
        let optional = self.attribute_types_for(referrer, &raw.optional)?;
        Ok(NameForm {
            raw: raw.clone(),
            structural_class,
            required,
            optional,
        })
    }

    fn build_dit_content_rule(&mut self, raw: &RawDitContentRule) -> SchemaResult<DitContentRule> {
        let referrer = referrer(raw);
        let oid = raw.oid();
        let structural_class = self
            .object_class(oid)
            .map_err(|u| referrer.unknown_object_class(u, oid))?;
        if structural_class.kind() != ObjectClassKind::Structural {
            return Err(ValidationError::NotStructural {
                kind: ElementKind::DitContentRule,
                oid: oid.to_string(),
                object_class: structural_class.name_or_oid().to_string(),
            }
            .into());
        }

        let mut auxiliary = Vec::with_capacity(raw.auxiliary.len());
        for reference in &raw.auxiliary {
            let class = self
                .object_class(reference)
                .map_err(|u| referrer.unknown_object_class(u, reference))?;
            if class.kind() != ObjectClassKind::Auxiliary {
                return Err(ValidationError::NotAuxiliary {
                    oid: oid.to_string(),
                    object_class: reference.clone(),
                }
                .into());
            }
            auxiliary.push(class);
        }

        let required = self.attribute_types_for(referrer, &raw.required)?;
        let optional = self.attribute_types_for(referrer, &raw.optional)?;
        let prohibited = self.attribute_types_for(referrer, &raw.prohibited)?;

        for attribute in &prohibited {
            let requiring = std::iter::once(&structural_class)
                .chain(auxiliary.iter())
                .find(|class| class.is_required(attribute));
            if let Some(class) = requiring {
                return Err(ValidationError::ProhibitedAttributeRequired {
                    oid: oid.to_string(),
                    attribute: attribute.name_or_oid().to_string(),
                    object_class: class.name_or_oid().to_string(),
                }
                .into());
            }
        }

        Ok(DitContentRule {
            raw: raw.clone(),
            structural_class,
            auxiliary,
            required,
            optional,
            prohibited,
        })
    }

    fn build_dit_structure_rule(
        &mut self,
        raw: &RawDitStructureRule,
    ) -> SchemaResult<DitStructureRule> {
        let referrer = referrer(raw);
        let rule_id = raw.rule_id();
        let name_form = self.name_form(&raw.name_form).map_err(|u| {
            referrer.dependency(u, ElementKind::NameForm, &raw.name_form, || {
                ValidationError::UnknownNameForm {
                    rule_id,
                    name_form: raw.name_form.clone(),
                }
            })
        })?;

        let mut superiors = Vec::with_capacity(raw.superiors.len());
        for &superior in &raw.superiors {
            // A rule may name itself to allow entries of one form to nest.
            if superior == rule_id {
                continue;
            }
            let reference = superior.to_string();
            let rule = self.dit_structure_rule(&reference).map_err(|u| match u {
                Unresolved::Missing => {
                    SchemaError::from(ValidationError::UnknownStructureRule { rule_id, superior })
                }
                u => referrer.superior(u, &reference),
            })?;
            superiors.push(rule);
        }

        Ok(DitStructureRule {
            raw: raw.clone(),
            name_form,
            superiors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_elements(attribute_types: &[&str], object_classes: &[&str]) -> RawElements {
        let options = SchemaOptions::default();
        let mut raw = RawElements::default();
        for definition in attribute_types {
            let at = RawAttributeType::parse(definition, &options).expect("valid definition");
            raw.attribute_types.insert(at.oid().to_string(), at);
        }
        for definition in object_classes {
            let oc = RawObjectClass::parse(definition, &options).expect("valid definition");
            raw.object_classes.insert(oc.oid().to_string(), oc);
        }
        raw
    }

    #[test]
    fn test_superior_cycle_is_detected() {
        let raw = raw_elements(
            &["( 1.1.1 NAME 'a' SUP b )", "( 1.1.2 NAME 'b' SUP a )"],
            &[],
        );
        let resolution = resolve(&raw, &SchemaOptions::default());
        assert!(resolution.elements.attribute_types.is_empty());
        let error = resolution.first_error.expect("cycle reported");
        assert_eq!(error.message_key(), "schema.cyclic-reference");
        assert_eq!(resolution.warnings.len(), 2);
    }

    #[test]
    fn test_failure_cascades_to_dependents() {
        let raw = raw_elements(
            &["( 1.1.1 NAME 'a' SUP missing )", "( 1.1.2 NAME 'b' SUP a )"],
            &[],
        );
        let resolution = resolve(&raw, &SchemaOptions::default());
        assert!(resolution.elements.attribute_types.is_empty());
        assert_eq!(
            resolution.first_error.map(|e| e.message_key()),
            Some("validation.unknown-superior")
        );
        assert!(resolution.warnings[1].contains("invalid superior"));
    }

    #[test]
    fn test_ambiguous_reference() {
        let raw = raw_elements(
            &[
                "( 1.1.1 NAME 'dup' )",
                "( 1.1.2 NAME 'dup' )",
                "( 1.1.3 NAME 'child' SUP dup )",
            ],
            &[],
        );
        let resolution = resolve(&raw, &SchemaOptions::default());
        assert_eq!(resolution.elements.attribute_types.len(), 2);
        assert_eq!(
            resolution.first_error.map(|e| e.message_key()),
            Some("schema.ambiguous-name")
        );
    }

    #[test]
    fn test_structural_class_needs_top() {
        let raw = raw_elements(&[], &["( 1.2.1 NAME 'lonely' STRUCTURAL )"]);
        let resolution = resolve(&raw, &SchemaOptions::default());
        assert!(resolution.elements.object_classes.is_empty());
        assert_eq!(
            resolution.first_error.map(|e| e.message_key()),
            Some("validation.structural-without-top")
        );
    }

    #[test]
    fn test_auxiliary_class_without_top_is_accepted() {
        let raw = raw_elements(&["( 1.1.1 NAME 'a' )"], &["( 1.2.1 NAME 'extra' AUXILIARY MAY a )"]);
        let resolution = resolve(&raw, &SchemaOptions::default());
        assert!(resolution.first_error.is_none());
        let class = &resolution.elements.object_classes[0];
        assert!(!class.descends_from_top());
        assert_eq!(class.optional_attributes().len(), 1);
    }

    #[test]
    fn test_attribute_type_without_syntax_uses_default() {
        let raw = raw_elements(&["( 1.1.1 NAME 'bare' )"], &[]);
        let resolution = resolve(&raw, &SchemaOptions::default());
        let at = &resolution.elements.attribute_types[0];
        assert_eq!(at.syntax().oid(), SchemaOptions::default().default_syntax_oid);
        assert!(at.equality_matching_rule().is_none());
    }
}
