//! Syntaxes whose values are schema element definitions, e.g. the values of
//! `attributeTypes` in a subschema subentry.

use crate::byte_string::ByteString;
use crate::error::DecodeResult;
use crate::matching::string::utf8;
use crate::schema::attribute_type::RawAttributeType;
use crate::schema::constants::{EMR_INTEGER_FIRST_COMPONENT_OID, EMR_OID_FIRST_COMPONENT_OID};
use crate::schema::dit_rules::{RawDitContentRule, RawDitStructureRule};
use crate::schema::matching_rule::{RawMatchingRule, RawMatchingRuleUse};
use crate::schema::name_form::RawNameForm;
use crate::schema::object_class::RawObjectClass;
use crate::schema::registry::Schema;
use crate::schema::syntax::RawSyntax;
use crate::schema::types::ElementKind;
use crate::syntaxes::SyntaxImpl;

#[derive(Debug, Clone)]
pub struct DefinitionSyntax {
    kind: ElementKind,
    name: String,
}

impl DefinitionSyntax {
    pub fn new(kind: ElementKind) -> Self {
        let name = match kind {
            ElementKind::AttributeType => "Attribute Type Description",
            ElementKind::ObjectClass => "Object Class Description",
            ElementKind::MatchingRule => "Matching Rule Description",
            ElementKind::MatchingRuleUse => "Matching Rule Use Description",
            ElementKind::Syntax => "LDAP Syntax Description",
            ElementKind::NameForm => "Name Form Description",
            ElementKind::DitContentRule => "DIT Content Rule Description",
            ElementKind::DitStructureRule => "DIT Structure Rule Description",
        };
        Self {
            kind,
            name: name.to_string(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

impl SyntaxImpl for DefinitionSyntax {
    fn name(&self) -> &str {
        &self.name
    }

    /// Only the grammar is checked; references are not resolved.
    fn value_is_acceptable(&self, schema: &Schema, value: &ByteString) -> DecodeResult<()> {
        let definition = utf8(value, &self.name)?;
        let options = schema.options();
        match self.kind {
            ElementKind::AttributeType => RawAttributeType::parse(definition, options).map(|_| ()),
            ElementKind::ObjectClass => RawObjectClass::parse(definition, options).map(|_| ()),
            ElementKind::MatchingRule => RawMatchingRule::parse(definition, options).map(|_| ()),
            ElementKind::MatchingRuleUse => {
                RawMatchingRuleUse::parse(definition, options).map(|_| ())
            }
            ElementKind::Syntax => RawSyntax::parse(definition, options).map(|_| ()),
            ElementKind::NameForm => RawNameForm::parse(definition, options).map(|_| ()),
            ElementKind::DitContentRule => {
                RawDitContentRule::parse(definition, options).map(|_| ())
            }
            ElementKind::DitStructureRule => {
                RawDitStructureRule::parse(definition, options).map(|_| ())
            }
        }
    }

    fn equality_matching_rule(&self) -> Option<&str> {
        match self.kind {
            ElementKind::DitStructureRule => Some(EMR_INTEGER_FIRST_COMPONENT_OID),
            _ => Some(EMR_OID_FIRST_COMPONENT_OID),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::empty_schema;

    #[test]
    fn test_definition_values() {
        let schema = empty_schema();
        let syntax = DefinitionSyntax::new(ElementKind::ObjectClass);
        assert!(syntax
            .value_is_acceptable(&schema, &"( 2.5.6.0 NAME 'top' ABSTRACT MUST objectClass )".into())
            .is_ok());
        assert!(syntax
            .value_is_acceptable(&schema, &"( 2.5.6.0 NAME 'top' SYNTAX x )".into())
            .is_err());
        assert_eq!(syntax.equality_matching_rule(), Some(EMR_OID_FIRST_COMPONENT_OID));
        assert_eq!(
            DefinitionSyntax::new(ElementKind::DitStructureRule).equality_matching_rule(),
            Some(EMR_INTEGER_FIRST_COMPONENT_OID)
        );
    }
}
