//! Well-known OIDs and names of the core schema.

// Syntaxes (RFC 4517 unless noted)
pub const SYNTAX_PREFIX: &str = "1.3.6.1.4.1.1466.115.121.1.";
pub const SYNTAX_ATTRIBUTE_TYPE_OID: &str = "1.3.6.1.4.1.1466.115.121.1.3";
pub const SYNTAX_BINARY_OID: &str = "1.3.6.1.4.1.1466.115.121.1.5";
pub const SYNTAX_BIT_STRING_OID: &str = "1.3.6.1.4.1.1466.115.121.1.6";
pub const SYNTAX_BOOLEAN_OID: &str = "1.3.6.1.4.1.1466.115.121.1.7";
pub const SYNTAX_COUNTRY_STRING_OID: &str = "1.3.6.1.4.1.1466.115.121.1.11";
pub const SYNTAX_DN_OID: &str = "1.3.6.1.4.1.1466.115.121.1.12";
pub const SYNTAX_DELIVERY_METHOD_OID: &str = "1.3.6.1.4.1.1466.115.121.1.14";
pub const SYNTAX_DIRECTORY_STRING_OID: &str = "1.3.6.1.4.1.1466.115.121.1.15";
pub const SYNTAX_DIT_CONTENT_RULE_OID: &str = "1.3.6.1.4.1.1466.115.121.1.16";
pub const SYNTAX_DIT_STRUCTURE_RULE_OID: &str = "1.3.6.1.4.1.1466.115.121.1.17";
pub const SYNTAX_FAX_OID: &str = "1.3.6.1.4.1.1466.115.121.1.22";
pub const SYNTAX_GENERALIZED_TIME_OID: &str = "1.3.6.1.4.1.1466.115.121.1.24";
pub const SYNTAX_IA5_STRING_OID: &str = "1.3.6.1.4.1.1466.115.121.1.26";
pub const SYNTAX_INTEGER_OID: &str = "1.3.6.1.4.1.1466.115.121.1.27";
pub const SYNTAX_MATCHING_RULE_OID: &str = "1.3.6.1.4.1.1466.115.121.1.30";
pub const SYNTAX_MATCHING_RULE_USE_OID: &str = "1.3.6.1.4.1.1466.115.121.1.31";
pub const SYNTAX_NAME_AND_OPTIONAL_UID_OID: &str = "1.3.6.1.4.1.1466.115.121.1.34";
pub const SYNTAX_NAME_FORM_OID: &str = "1.3.6.1.4.1.1466.115.121.1.35";
pub const SYNTAX_NUMERIC_STRING_OID: &str = "1.3.6.1.4.1.1466.115.121.1.36";
pub const SYNTAX_OBJECT_CLASS_OID: &str = "1.3.6.1.4.1.1466.115.121.1.37";
pub const SYNTAX_OID_OID: &str = "1.3.6.1.4.1.1466.115.121.1.38";
pub const SYNTAX_OCTET_STRING_OID: &str = "1.3.6.1.4.1.1466.115.121.1.40";
pub const SYNTAX_POSTAL_ADDRESS_OID: &str = "1.3.6.1.4.1.1466.115.121.1.41";
pub const SYNTAX_PRINTABLE_STRING_OID: &str = "1.3.6.1.4.1.1466.115.121.1.44";
pub const SYNTAX_TELEPHONE_OID: &str = "1.3.6.1.4.1.1466.115.121.1.50";
pub const SYNTAX_LDAP_SYNTAX_OID: &str = "1.3.6.1.4.1.1466.115.121.1.54";
pub const SYNTAX_SUBSTRING_ASSERTION_OID: &str = "1.3.6.1.4.1.1466.115.121.1.58";

// Equality matching rules
pub const EMR_OID_OID: &str = "2.5.13.0";
pub const EMR_OID_NAME: &str = "objectIdentifierMatch";
pub const EMR_DN_OID: &str = "2.5.13.1";
pub const EMR_DN_NAME: &str = "distinguishedNameMatch";
pub const EMR_CASE_IGNORE_OID: &str = "2.5.13.2";
pub const EMR_CASE_IGNORE_NAME: &str = "caseIgnoreMatch";
pub const EMR_CASE_EXACT_OID: &str = "2.5.13.5";
pub const EMR_NUMERIC_STRING_OID: &str = "2.5.13.8";
pub const EMR_CASE_IGNORE_LIST_OID: &str = "2.5.13.11";
pub const EMR_BOOLEAN_OID: &str = "2.5.13.13";
pub const EMR_INTEGER_OID: &str = "2.5.13.14";
pub const EMR_BIT_STRING_OID: &str = "2.5.13.16";
pub const EMR_OCTET_STRING_OID: &str = "2.5.13.17";
pub const EMR_OCTET_STRING_NAME: &str = "octetStringMatch";
pub const EMR_TELEPHONE_OID: &str = "2.5.13.20";
pub const EMR_UNIQUE_MEMBER_OID: &str = "2.5.13.23";
pub const EMR_GENERALIZED_TIME_OID: &str = "2.5.13.27";
pub const EMR_INTEGER_FIRST_COMPONENT_OID: &str = "2.5.13.29";
pub const EMR_OID_FIRST_COMPONENT_OID: &str = "2.5.13.30";
pub const EMR_DIRECTORY_STRING_FIRST_COMPONENT_OID: &str = "2.5.13.31";
pub const EMR_WORD_OID: &str = "2.5.13.32";
pub const EMR_KEYWORD_OID: &str = "2.5.13.33";
pub const EMR_CASE_EXACT_IA5_OID: &str = "1.3.6.1.4.1.1466.109.114.1";
pub const EMR_CASE_IGNORE_IA5_OID: &str = "1.3.6.1.4.1.1466.109.114.2";

// Ordering matching rules
pub const OMR_CASE_IGNORE_OID: &str = "2.5.13.3";
pub const OMR_CASE_EXACT_OID: &str = "2.5.13.6";
pub const OMR_NUMERIC_STRING_OID: &str = "2.5.13.9";
pub const OMR_INTEGER_OID: &str = "2.5.13.15";
pub const OMR_OCTET_STRING_OID: &str = "2.5.13.18";
pub const OMR_GENERALIZED_TIME_OID: &str = "2.5.13.28";

/// Each enumeration syntax gets its own ordering rule under this arc, suffixed
/// with the syntax OID.
pub const OMR_GENERIC_ENUM_OID: &str = "1.3.6.1.4.1.26027.1.4.8";
pub const OMR_GENERIC_ENUM_NAME: &str = "enumOrderingMatch";

// Substring matching rules
pub const SMR_CASE_IGNORE_OID: &str = "2.5.13.4";
pub const SMR_CASE_EXACT_OID: &str = "2.5.13.7";
pub const SMR_NUMERIC_STRING_OID: &str = "2.5.13.10";
pub const SMR_CASE_IGNORE_LIST_OID: &str = "2.5.13.12";
pub const SMR_OCTET_STRING_OID: &str = "2.5.13.19";
pub const SMR_TELEPHONE_OID: &str = "2.5.13.21";
pub const SMR_CASE_IGNORE_IA5_OID: &str = "1.3.6.1.4.1.1466.109.114.3";
pub const SMR_CASE_EXACT_IA5_OID: &str = "1.3.6.1.4.1.26027.1.4.902";

// Object classes
pub const TOP_OBJECTCLASS_OID: &str = "2.5.6.0";
pub const TOP_OBJECTCLASS_NAME: &str = "top";
pub const EXTENSIBLE_OBJECT_OBJECTCLASS_OID: &str = "1.3.6.1.4.1.1466.101.120.111";

// Attribute types read from subschema subentries
pub const ATTR_SUBSCHEMA_SUBENTRY: &str = "subschemaSubentry";
pub const ATTR_LDAP_SYNTAXES: &str = "ldapSyntaxes";
pub const ATTR_ATTRIBUTE_TYPES: &str = "attributeTypes";
pub const ATTR_OBJECT_CLASSES: &str = "objectClasses";
pub const ATTR_MATCHING_RULE_USE: &str = "matchingRuleUse";
pub const ATTR_MATCHING_RULES: &str = "matchingRules";
pub const ATTR_DIT_CONTENT_RULES: &str = "dITContentRules";
pub const ATTR_DIT_STRUCTURE_RULES: &str = "dITStructureRules";
pub const ATTR_NAME_FORMS: &str = "nameForms";

/// The subschema attributes in the order they are ingested.
pub const SUBSCHEMA_ATTRIBUTES: [&str; 8] = [
    ATTR_LDAP_SYNTAXES,
    ATTR_ATTRIBUTE_TYPES,
    ATTR_OBJECT_CLASSES,
    ATTR_MATCHING_RULE_USE,
    ATTR_MATCHING_RULES,
    ATTR_DIT_CONTENT_RULES,
    ATTR_DIT_STRUCTURE_RULES,
    ATTR_NAME_FORMS,
];

// Extension properties with built-in meaning
pub const X_APPROX: &str = "X-APPROX";
pub const X_ENUM: &str = "X-ENUM";
pub const X_PATTERN: &str = "X-PATTERN";
pub const X_SUBST: &str = "X-SUBST";
pub const X_ORIGIN: &str = "X-ORIGIN";
