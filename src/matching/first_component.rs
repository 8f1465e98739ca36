//! `objectIdentifierMatch` and the first-component rules used by the
//! subschema attributes.
//!
//! First-component rules compare the leading component of a definition value
//! (`( 2.5.4.3 NAME 'cn' ... )`) with a plain assertion value, which is how a
//! single element is located inside `attributeTypes` and its siblings.

use crate::byte_string::ByteString;
use crate::error::{DecodeError, DecodeResult};
use crate::matching::string::{normalize_string, utf8};
use crate::matching::{Assertion, MatchingRuleImpl};
use crate::schema::parser::{
    DefinitionReader, first_component_oid, first_component_rule_id, is_descriptor, is_numeric_oid,
};
use crate::schema::registry::Schema;
use crate::schema::types::ElementKind;
use crate::syntaxes::integer;

/// Resolve a descriptor to its OID; unknown names compare case-insensitively.
fn normalize_oid(schema: &Schema, value: &str) -> DecodeResult<ByteString> {
    let value = value.trim();
    if is_numeric_oid(value) {
        return Ok(value.into());
    }
    if !is_descriptor(value, schema.options().allow_malformed_names_and_options) {
        return Err(DecodeError::invalid_value(
            "OID",
            value,
            "not a numeric OID or descriptor",
        ));
    }
    Ok(match schema.oid_for_name(value) {
        Some(oid) => oid.into(),
        None => value.to_ascii_lowercase().into(),
    })
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectIdentifierMatchingRule;

impl MatchingRuleImpl for ObjectIdentifierMatchingRule {
    fn normalize_attribute_value(
        &self,
        schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        normalize_oid(schema, utf8(value, "OID")?)
    }
}

/// `objectIdentifierFirstComponentMatch`.
#[derive(Debug, Clone, Copy)]
pub struct OidFirstComponentMatchingRule;

impl MatchingRuleImpl for OidFirstComponentMatchingRule {
    fn normalize_attribute_value(
        &self,
        schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        let lenient = schema.options().allow_malformed_names_and_options;
        let oid = first_component_oid(utf8(value, "Definition")?, lenient)?;
        normalize_oid(schema, &oid)
    }

    fn assertion(&self, schema: &Schema, value: &ByteString) -> DecodeResult<Assertion> {
        Ok(Assertion::Equals(normalize_oid(schema, utf8(value, "OID")?)?))
    }
}

/// `integerFirstComponentMatch`, for DIT structure rule definitions.
#[derive(Debug, Clone, Copy)]
pub struct IntegerFirstComponentMatchingRule;

impl MatchingRuleImpl for IntegerFirstComponentMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        let rule_id = first_component_rule_id(utf8(value, "Definition")?)?;
        integer::encode(&rule_id.to_string())
    }

    fn assertion(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<Assertion> {
        Ok(Assertion::Equals(integer::encode(utf8(value, "Integer")?.trim())?))
    }
}

/// `directoryStringFirstComponentMatch`: the first quoted string of the value.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryStringFirstComponentMatchingRule;

impl MatchingRuleImpl for DirectoryStringFirstComponentMatchingRule {
    fn normalize_attribute_value(
        &self,
        _schema: &Schema,
        value: &ByteString,
    ) -> DecodeResult<ByteString> {
        let text = utf8(value, "Directory String")?;
        let mut reader = DefinitionReader::open(ElementKind::AttributeType, text)?;
        let first = reader.read_quoted_string()?;
        Ok(normalize_string(&first, true, true).into())
    }

    fn assertion(&self, _schema: &Schema, value: &ByteString) -> DecodeResult<Assertion> {
        let text = utf8(value, "Directory String")?;
        Ok(Assertion::Equals(normalize_string(text, true, true).into()))
    }
}
