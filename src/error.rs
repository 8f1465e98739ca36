//! Error types for schema construction, value decoding and lookups.
//!
//! Three layers of failure are distinguished:
//!
//! - [`DecodeError`] - a malformed definition string or attribute value. Carries the
//!   offending position or token where one can be determined.
//! - [`ValidationError`] - a well-formed element whose cross-references or
//!   kind-compatibility rules do not hold.
//! - [`SchemaError`] - everything a caller of the catalog or builder can see,
//!   including unknown and ambiguous lookups.
//!
//! Every error exposes a stable [`message_key`](SchemaError::message_key) so that
//! callers with their own message catalogs can render failures without parsing
//! the English `Display` text.

use crate::schema::types::ElementKind;
use crate::schema::object_class::ObjectClassKind;

/// Main error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A definition string or attribute value could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A schema element failed validation while the catalog was being built
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Lookup of an element absent from a strict catalog
    #[error("Unknown {kind} '{name}'")]
    UnknownElement { kind: ElementKind, name: String },

    /// A name matched more than one element of the same kind
    #[error("The {kind} name '{name}' is ambiguous because it refers to more than one element")]
    AmbiguousName { kind: ElementKind, name: String },

    /// Two elements registered under the same OID or rule ID
    #[error("Unable to register {kind} {oid} because it conflicts with the existing element {existing}")]
    ConflictingElement {
        kind: ElementKind,
        oid: String,
        existing: String,
    },

    /// An element refers back to itself through its superiors or substitutes
    #[error("The {kind} {oid} is part of a reference cycle")]
    CyclicReference { kind: ElementKind, oid: String },

    /// The matching rule does not provide the requested assertion type
    #[error("Matching rule '{rule}' does not support {assertion} assertions")]
    UnsupportedAssertion { rule: String, assertion: String },

    /// The entry carries no subschemaSubentry attribute
    #[error("The entry '{dn}' does not include a subschemaSubentry attribute")]
    NoSubschemaSubentry { dn: String },

    /// The subschemaSubentry attribute is present but unusable
    #[error("The subschemaSubentry attribute of entry '{dn}' is invalid: {reason}")]
    InvalidSubschemaSubentry { dn: String, reason: String },

    /// Errors from the caller-provided directory reader
    #[error("Directory read failed: {0}")]
    EntryReader(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Schema options could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl SchemaError {
    /// Create an unknown element error
    pub fn unknown(kind: ElementKind, name: impl Into<String>) -> Self {
        Self::UnknownElement {
            kind,
            name: name.into(),
        }
    }

    /// Create an ambiguous name error
    pub fn ambiguous(kind: ElementKind, name: impl Into<String>) -> Self {
        Self::AmbiguousName {
            kind,
            name: name.into(),
        }
    }

    /// Create an unsupported assertion error
    pub fn unsupported_assertion(rule: impl Into<String>, assertion: impl Into<String>) -> Self {
        Self::UnsupportedAssertion {
            rule: rule.into(),
            assertion: assertion.into(),
        }
    }

    /// Wrap a directory reader error
    pub fn entry_reader<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::EntryReader(Box::new(error))
    }

    /// Stable identifier for this failure, independent of the rendered message.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::Decode(e) => e.message_key(),
            Self::Validation(e) => e.message_key(),
            Self::UnknownElement { .. } => "schema.unknown-element",
            Self::AmbiguousName { .. } => "schema.ambiguous-name",
            Self::ConflictingElement { .. } => "schema.conflicting-element",
            Self::CyclicReference { .. } => "schema.cyclic-reference",
            Self::UnsupportedAssertion { .. } => "schema.unsupported-assertion",
            Self::NoSubschemaSubentry { .. } => "schema.no-subschema-subentry",
            Self::InvalidSubschemaSubentry { .. } => "schema.invalid-subschema-subentry",
            Self::EntryReader(_) => "schema.entry-reader",
            Self::Config(_) => "schema.config",
        }
    }
}

/// Errors raised while decoding definition strings and attribute values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The definition was empty or contained only whitespace
    #[error("The {kind} definition is empty")]
    EmptyDefinition { kind: ElementKind },

    /// The definition did not start with an opening parenthesis
    #[error("Expected '(' at position {position} but found '{found}'")]
    ExpectedOpenParenthesis { position: usize, found: char },

    /// Input ended before the element was complete
    #[error("Unexpected end of input at position {position}, expected {expected}")]
    UnexpectedEnd { position: usize, expected: String },

    /// A character that is not allowed at this point of the grammar
    #[error("Illegal character '{character}' at position {position} while reading {context}")]
    IllegalCharacter {
        position: usize,
        character: char,
        context: String,
    },

    /// A keyword that is not valid for this kind of element
    #[error("Illegal token '{token}' at position {position} in {kind} definition")]
    IllegalToken {
        kind: ElementKind,
        token: String,
        position: usize,
    },

    /// A mandatory keyword was not present
    #[error("The {kind} definition '{oid}' does not declare {keyword}")]
    MissingKeyword {
        kind: ElementKind,
        oid: String,
        keyword: String,
    },

    /// An unrecognised attribute usage
    #[error("Invalid attribute usage '{usage}' at position {position}")]
    InvalidUsage { usage: String, position: usize },

    /// A value rejected by its syntax
    #[error("Invalid {syntax} value '{value}': {reason}")]
    InvalidValue {
        syntax: String,
        value: String,
        reason: String,
    },

    /// A distinguished name that could not be parsed
    #[error("Invalid DN '{dn}': {reason}")]
    InvalidDn { dn: String, reason: String },
}

impl DecodeError {
    /// Create an illegal character error
    pub fn illegal_character(position: usize, character: char, context: impl Into<String>) -> Self {
        Self::IllegalCharacter {
            position,
            character,
            context: context.into(),
        }
    }

    /// Create an unexpected end of input error
    pub fn unexpected_end(position: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEnd {
            position,
            expected: expected.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        syntax: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            syntax: syntax.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid DN error
    pub fn invalid_dn(dn: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDn {
            dn: dn.into(),
            reason: reason.into(),
        }
    }

    pub fn message_key(&self) -> &'static str {
        match self {
            Self::EmptyDefinition { .. } => "decode.empty-definition",
            Self::ExpectedOpenParenthesis { .. } => "decode.expected-open-parenthesis",
            Self::UnexpectedEnd { .. } => "decode.unexpected-end",
            Self::IllegalCharacter { .. } => "decode.illegal-character",
            Self::IllegalToken { .. } => "decode.illegal-token",
            Self::MissingKeyword { .. } => "decode.missing-keyword",
            Self::InvalidUsage { .. } => "decode.invalid-usage",
            Self::InvalidValue { .. } => "decode.invalid-value",
            Self::InvalidDn { .. } => "decode.invalid-dn",
        }
    }
}

/// Validation errors for well-formed elements whose references do not hold.
///
/// These are produced by the second build pass. Depending on how the catalog is
/// built they either abort the build or demote the element to a warning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A superior element does not exist
    #[error("The {kind} {oid} refers to an unknown superior '{superior}'")]
    UnknownSuperior {
        kind: ElementKind,
        oid: String,
        superior: String,
    },

    /// A superior element exists but failed validation itself
    #[error("The {kind} {oid} depends on the invalid superior '{superior}'")]
    InvalidSuperior {
        kind: ElementKind,
        oid: String,
        superior: String,
    },

    /// A referenced element exists but failed validation itself
    #[error("The {kind} {oid} depends on '{dependency}' which is invalid")]
    InvalidDependency {
        kind: ElementKind,
        oid: String,
        dependency: String,
    },

    /// A referenced syntax does not exist
    #[error("The {kind} {oid} refers to an unknown syntax '{syntax}'")]
    UnknownSyntax {
        kind: ElementKind,
        oid: String,
        syntax: String,
    },

    /// A referenced matching rule does not exist
    #[error("The {kind} {oid} refers to an unknown matching rule '{rule}'")]
    UnknownMatchingRule {
        kind: ElementKind,
        oid: String,
        rule: String,
    },

    /// A referenced attribute type does not exist
    #[error("The {kind} {oid} refers to an unknown attribute type '{attribute}'")]
    UnknownAttributeType {
        kind: ElementKind,
        oid: String,
        attribute: String,
    },

    /// A referenced object class does not exist
    #[error("The {kind} {oid} refers to an unknown object class '{object_class}'")]
    UnknownObjectClass {
        kind: ElementKind,
        oid: String,
        object_class: String,
    },

    /// A DIT structure rule names an unknown name form
    #[error("The DIT structure rule {rule_id} refers to an unknown name form '{name_form}'")]
    UnknownNameForm { rule_id: u32, name_form: String },

    /// A DIT structure rule names an unknown superior rule
    #[error("The DIT structure rule {rule_id} refers to an unknown superior rule {superior}")]
    UnknownStructureRule { rule_id: u32, superior: u32 },

    /// Subtype and supertype disagree on attribute usage
    #[error("The attribute type {oid} has a different usage than its superior '{superior}'")]
    SuperiorUsageMismatch { oid: String, superior: String },

    /// Subtype and supertype disagree on the COLLECTIVE flag
    #[error("The attribute type {oid} and its superior '{superior}' differ in collectiveness")]
    CollectiveMismatch { oid: String, superior: String },

    /// An object class derives from a class of an incompatible kind
    #[error("The {kind} object class {oid} cannot derive from the {superior_kind} object class '{superior}'")]
    IncompatibleSuperiorKind {
        oid: String,
        kind: ObjectClassKind,
        superior: String,
        superior_kind: ObjectClassKind,
    },

    /// A structural object class whose hierarchy does not reach top
    #[error("The structural object class {oid} does not derive from 'top'")]
    StructuralWithoutTop { oid: String },

    /// A name form or DIT content rule names a non-structural class
    #[error("The {kind} {oid} refers to '{object_class}' which is not a structural object class")]
    NotStructural {
        kind: ElementKind,
        oid: String,
        object_class: String,
    },

    /// A DIT content rule names a non-auxiliary class in AUX
    #[error("The DIT content rule {oid} refers to '{object_class}' which is not an auxiliary object class")]
    NotAuxiliary { oid: String, object_class: String },

    /// A DIT content rule prohibits an attribute required by one of its classes
    #[error("The DIT content rule {oid} prohibits '{attribute}' which is required by '{object_class}'")]
    ProhibitedAttributeRequired {
        oid: String,
        attribute: String,
        object_class: String,
    },

    /// An X-PATTERN syntax carries a pattern that does not compile
    #[error("The syntax {oid} has an invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        oid: String,
        pattern: String,
        reason: String,
    },
}

impl ValidationError {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::UnknownSuperior { .. } => "validation.unknown-superior",
            Self::InvalidSuperior { .. } => "validation.invalid-superior",
            Self::InvalidDependency { .. } => "validation.invalid-dependency",
            Self::UnknownSyntax { .. } => "validation.unknown-syntax",
            Self::UnknownMatchingRule { .. } => "validation.unknown-matching-rule",
            Self::UnknownAttributeType { .. } => "validation.unknown-attribute-type",
            Self::UnknownObjectClass { .. } => "validation.unknown-object-class",
            Self::UnknownNameForm { .. } => "validation.unknown-name-form",
            Self::UnknownStructureRule { .. } => "validation.unknown-structure-rule",
            Self::SuperiorUsageMismatch { .. } => "validation.superior-usage-mismatch",
            Self::CollectiveMismatch { .. } => "validation.collective-mismatch",
            Self::IncompatibleSuperiorKind { .. } => "validation.incompatible-superior-kind",
            Self::StructuralWithoutTop { .. } => "validation.structural-without-top",
            Self::NotStructural { .. } => "validation.not-structural",
            Self::NotAuxiliary { .. } => "validation.not-auxiliary",
            Self::ProhibitedAttributeRequired { .. } => "validation.prohibited-attribute-required",
            Self::InvalidPattern { .. } => "validation.invalid-pattern",
        }
    }
}

// Result type aliases for convenience
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type DecodeResult<T> = Result<T, DecodeError>;
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = SchemaError::unknown(ElementKind::AttributeType, "fooBar");
        assert!(error.to_string().contains("fooBar"));
        assert!(error.to_string().contains("attribute type"));
        assert_eq!(error.message_key(), "schema.unknown-element");
    }

    #[test]
    fn test_decode_error_chain() {
        let decode = DecodeError::invalid_value("Integer", "00", "leading zero");
        let error = SchemaError::from(decode);
        assert!(error.to_string().contains("Decode error"));
        assert_eq!(error.message_key(), "decode.invalid-value");
    }

    #[test]
    fn test_validation_error_chain() {
        let validation = ValidationError::StructuralWithoutTop {
            oid: "1.2.3".to_string(),
        };
        let error = SchemaError::from(validation);
        assert!(error.to_string().contains("1.2.3"));
        assert_eq!(error.message_key(), "validation.structural-without-top");
    }
}
