//! Schema ingestion and catalog validation tests.
//!
//! These tests load definitions the way an application would: from a
//! directory's subschema subentry, on top of the built-in core schema.

use crate::assert_build_rejected;
use crate::common::{DefaultSchemaGuard, init_logging};
use crate::common::fixtures::{BASE_DN, InMemoryDirectory, subschema_entry};
use ldap_schema::schema::{
    ElementKind, ObjectClassKind, core_schema, default_schema, empty_schema, set_default_schema,
};
use ldap_schema::{Entry, SchemaBuilder, SchemaOptions};

fn application_schema() -> ldap_schema::Schema {
    init_logging();
    let directory = InMemoryDirectory::with_application_schema();
    let mut builder = SchemaBuilder::with_core_schema();
    builder
        .add_schema_for_entry(&directory, BASE_DN, false)
        .expect("subschema should be readable");
    builder.build_strict().expect("application schema should be valid")
}

#[test]
fn test_schema_loaded_from_directory() {
    let schema = application_schema();

    assert!(schema.warnings().is_empty(), "{:?}", schema.warnings());
    let employee = schema.get_object_class("employee").expect("employee class");
    assert_eq!(employee.kind(), ObjectClassKind::Structural);

    let person = schema.get_object_class("person").expect("person class");
    assert!(employee.is_descendant_of(&person));

    let employee_number = schema
        .get_attribute_type("employeeNumber")
        .expect("employeeNumber");
    assert!(employee.is_required(&employee_number));
    let sn = schema.get_attribute_type("sn").expect("sn");
    assert!(employee.is_required(&sn));
    let mail = schema.get_attribute_type("mail").expect("mail");
    assert!(!employee.is_required_or_optional(&mail));
}

#[test]
fn test_alias_names_resolve_to_same_element() {
    let schema = application_schema();
    let by_name = schema.get_attribute_type("NICKNAME").expect("nickname");
    let by_alias = schema.get_attribute_type("alias-name").expect("alias");
    assert_eq!(by_name.oid(), by_alias.oid());
    assert_eq!(schema.oid_for_name("alias-name"), Some("1.3.6.1.4.1.99999.1.2"));
    assert_eq!(
        by_name.equality_matching_rule().map(|mr| mr.name_or_oid()),
        Some("caseIgnoreMatch")
    );
}

#[test]
fn test_enumeration_syntax_from_subentry_gets_ordering_rule() {
    let schema = application_schema();
    let status = schema.get_attribute_type("accountStatus").expect("status");
    let syntax = status.syntax();
    assert_eq!(syntax.implementation_name(), "Enumeration");
    let values = syntax.enumeration().map(|e| e.values().to_vec());
    assert_eq!(values, Some(vec!["active".into(), "suspended".into(), "closed".into()]));
    assert!(status.ordering_matching_rule().is_some());
}

#[test]
fn test_unparseable_definitions_become_warnings() {
    let entry = subschema_entry()
        .with_attribute("attributeTypes", ["( 1.3.6.1.4.1.99999.1.9 NAME 'broken' SYNTAX"])
        .with_attribute(
            "objectClasses",
            ["( 1.3.6.1.4.1.99999.2.9 NAME 'orphan' SUP noSuchClass STRUCTURAL )"],
        );
    init_logging();
    let mut builder = SchemaBuilder::with_core_schema();
    builder.add_schema_from_entry(&entry, false);
    assert_eq!(builder.warnings().len(), 1);

    let schema = builder.build();
    assert_eq!(schema.warnings().len(), 2);
    assert!(schema.has_object_class("employee"));
    assert!(!schema.has_object_class("orphan"));
    assert_build_rejected!(builder, "validation.unknown-superior");
}

#[test]
fn test_missing_subschema_subentry() {
    let directory = InMemoryDirectory::new().with_entry(Entry::new(BASE_DN));
    let error = SchemaBuilder::with_core_schema()
        .add_schema_for_entry(&directory, BASE_DN, false)
        .map(|_| ())
        .unwrap_err();
    assert_eq!(error.message_key(), "schema.no-subschema-subentry");
}

#[test]
fn test_strict_options_reject_malformed_names() {
    let definition = "( 1.3.6.1.4.1.99999.1.8 NAME 'legacy_name' SUP name )";

    let mut lenient = SchemaBuilder::with_core_schema();
    lenient
        .add_attribute_type(definition, false)
        .expect("accepted by default");

    let options = SchemaOptions::from_json_str(r#"{ "allow_malformed_names_and_options": false }"#)
        .expect("valid options");
    assert!(!options.allow_malformed_names_and_options);
    assert!(options.allow_non_standard_telephone_numbers);
    let mut strict = SchemaBuilder::with_core_schema();
    strict.set_options(options);
    let error = strict.add_attribute_type(definition, false).unwrap_err();
    assert!(error.message_key().starts_with("decode."), "{}", error);
}

#[test]
fn test_copying_a_schema_preserves_elements() {
    let original = application_schema();
    let mut builder = SchemaBuilder::with_schema(&original);
    builder.set_name("copy");
    let copy = builder.build_strict().expect("copy should be valid");

    assert_eq!(copy.name(), "copy");
    assert_eq!(copy.element_counts(), original.element_counts());
    let counts = copy.element_counts();
    let attribute_types = counts
        .iter()
        .find(|(kind, _)| *kind == ElementKind::AttributeType)
        .map(|(_, count)| *count)
        .unwrap_or_default();
    assert_eq!(attribute_types, core_schema().attribute_types().count() + 4);
}

#[test]
fn test_default_schema_can_be_replaced() {
    let original = default_schema();
    assert_eq!(original.name(), core_schema().name());

    {
        let _guard = DefaultSchemaGuard::install(application_schema());
        assert!(default_schema().has_object_class("employee"));

        set_default_schema(empty_schema());
        assert!(!default_schema().has_object_class("person"));
    }

    assert_eq!(default_schema().name(), original.name());
    assert!(default_schema().has_object_class("person"));
}
