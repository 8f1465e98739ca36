//! Value syntax and matching rule tests through resolved attribute types.

use crate::common::equality_matches;
use crate::common::fixtures::subschema_entry;
use ldap_schema::matching::ConditionResult::{False, True, Undefined};
use ldap_schema::{ByteString, Dn, Schema, SchemaBuilder, SchemaOptions, core_schema};

fn application_schema() -> Schema {
    SchemaBuilder::with_core_schema()
        .add_schema_from_entry(&subschema_entry(), false)
        .build_strict()
        .expect("application schema should be valid")
}

fn value(text: &str) -> ByteString {
    ByteString::from(text)
}

#[test]
fn test_directory_string_equality() {
    let schema = core_schema();
    assert_eq!(equality_matches(&schema, "cn", "  John   SMITH ", "john smith"), True);
    assert_eq!(equality_matches(&schema, "cn", "John Smith", "Jon Smith"), False);
    assert_eq!(equality_matches(&schema, "dc", "Example", "EXAMPLE"), True);
}

#[test]
fn test_telephone_number_equality_ignores_separators() {
    let schema = core_schema();
    assert_eq!(
        equality_matches(&schema, "telephoneNumber", "+1 555-0100", "+15550100"),
        True
    );
}

#[test]
fn test_distinguished_name_equality() {
    let schema = core_schema();
    assert_eq!(
        equality_matches(&schema, "member", "cn=Jane  Doe,dc=Example,dc=com", "CN=jane doe, DC=example, DC=COM"),
        True
    );
    assert_eq!(
        equality_matches(&schema, "member", "cn=Jane Doe,dc=example,dc=com", "cn=Jane Doe,dc=example,dc=org"),
        False
    );
}

#[test]
fn test_dn_components() {
    let schema = core_schema();
    let dn = Dn::parse("uid=jdoe+cn=Jane Doe,ou=People,dc=example,dc=com", &schema)
        .expect("valid DN");
    assert_eq!(dn.size(), 4);
    assert!(dn.rdn().map(|rdn| rdn.is_multi_valued()).unwrap_or(false));

    let parent = dn.parent().expect("has parent");
    let people = Dn::parse("OU=people,DC=EXAMPLE,DC=COM", &schema).expect("valid DN");
    assert_eq!(parent.matches(&people, &schema), True);
    assert_eq!(
        people.to_normalized_string(),
        "2.5.4.11=people,0.9.2342.19200300.100.1.25=example,0.9.2342.19200300.100.1.25=com"
    );
    assert_eq!(
        people.to_normalized_string(),
        parent.to_normalized_string()
    );

    assert!(Dn::parse("noSuchType=x", &schema).is_err());
    assert!(Dn::parse("noSuchType=x", &schema.as_non_strict_schema()).is_ok());
}

#[test]
fn test_equal_dns_normalize_to_same_bytes() {
    let schema = core_schema();
    let member = schema.get_attribute_type("member").expect("member");
    let rule = member.equality_matching_rule().expect("distinguishedNameMatch");
    let normalize = |dn: &str| {
        rule.normalize_attribute_value(&schema, &value(dn))
            .expect("valid DN")
    };
    assert_eq!(normalize("CN=Bob  Smith,O=Example"), normalize("cn=bob smith,o=example"));
    assert_ne!(normalize("cn=Bob Smith,o=Example"), normalize("cn=Bob Smith,o=Other"));
}

#[test]
fn test_integer_ordering() {
    let schema = application_schema();
    let employee_number = schema
        .get_attribute_type("employeeNumber")
        .expect("employeeNumber");
    let ordering = employee_number
        .ordering_matching_rule()
        .expect("ordering rule");

    let at_least = ordering
        .get_greater_or_equal_assertion(&schema, &value("-5"))
        .expect("valid integer");
    assert_eq!(ordering.matches(&schema, &value("10"), &at_least), True);
    assert_eq!(ordering.matches(&schema, &value("-5"), &at_least), True);
    assert_eq!(ordering.matches(&schema, &value("-12"), &at_least), False);
    assert_eq!(ordering.matches(&schema, &value("007"), &at_least), Undefined);

    let error = ordering
        .get_greater_or_equal_assertion(&schema, &value("12a"))
        .unwrap_err();
    assert_eq!(error.message_key(), "decode.invalid-value");
}

#[test]
fn test_generalized_time_across_time_zones() {
    let schema = application_schema();
    assert_eq!(
        equality_matches(&schema, "hireDate", "20240101120000Z", "20240101130000+0100"),
        True
    );
    assert_eq!(
        equality_matches(&schema, "hireDate", "20240101120000Z", "20240101120000+0100"),
        False
    );
}

#[test]
fn test_substring_assertion_on_inherited_rule() {
    let schema = core_schema();
    let cn = schema.get_attribute_type("cn").expect("cn");
    let substrings = cn.substring_matching_rule().expect("inherited from name");
    let assertion = substrings
        .get_substring_assertion(&schema, Some(&value("JO")), &[value("sm")], Some(&value("TH")))
        .expect("valid fragments");
    assert_eq!(substrings.matches(&schema, &value("John  Smith"), &assertion), True);
    assert_eq!(substrings.matches(&schema, &value("Smith John"), &assertion), False);
}

#[test]
fn test_unsupported_assertions() {
    let schema = core_schema();
    let equality = schema.get_matching_rule("caseIgnoreMatch").expect("rule");
    let error = equality
        .get_less_or_equal_assertion(&schema, &value("a"))
        .unwrap_err();
    assert_eq!(error.message_key(), "schema.unsupported-assertion");
    assert!(equality.get_substring_assertion(&schema, None, &[], None).is_err());
}

#[test]
fn test_syntax_checks_follow_catalog_options() {
    let lenient = core_schema();
    let mut builder = SchemaBuilder::with_core_schema();
    builder.set_options(SchemaOptions::strict());
    let strict = builder.build_strict().expect("valid schema");

    let telephone = lenient.get_attribute_type("telephoneNumber").expect("tel");
    assert!(telephone.syntax().is_value_acceptable(&lenient, &value("ext. 42")));
    assert!(!telephone.syntax().is_value_acceptable(&strict, &value("ext. 42")));
    assert!(telephone.syntax().is_value_acceptable(&strict, &value("+44 20 7946 0000")));

    let description = lenient.get_attribute_type("description").expect("description");
    assert!(!description.syntax().is_value_acceptable(&lenient, &value("")));
    assert!(description.syntax().is_value_acceptable(&lenient, &value("anything")));
}
