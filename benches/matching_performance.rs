//! Matching Performance Benchmarks
//!
//! This benchmark suite measures catalog construction, element lookup and
//! the normalization work done by the most common matching rules.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ldap_schema::matching::ConditionResult;
use ldap_schema::{ByteString, Dn, SchemaBuilder, core_schema};

/// Attribute type definitions for an application schema of `count` elements
fn create_attribute_definitions(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "( 1.3.6.1.4.1.99999.1.{} NAME 'benchAttribute{}' SUP name )",
                i + 1,
                i
            )
        })
        .collect()
}

/// Benchmark building catalogs on top of the core schema
fn bench_schema_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_build");

    for size in [10, 100, 1000].iter() {
        let definitions = create_attribute_definitions(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("build", size), size, |b, _| {
            b.iter(|| {
                let mut builder = SchemaBuilder::with_core_schema();
                for definition in &definitions {
                    builder
                        .add_attribute_type(definition, false)
                        .expect("valid definition");
                }
                black_box(builder.build())
            })
        });
    }

    group.finish();
}

/// Benchmark element lookup by OID and by name
fn bench_lookup(c: &mut Criterion) {
    let schema = core_schema();
    let mut group = c.benchmark_group("lookup");

    group.bench_function("attribute_type_by_oid", |b| {
        b.iter(|| black_box(schema.get_attribute_type(black_box("2.5.4.3"))))
    });

    group.bench_function("attribute_type_by_name", |b| {
        b.iter(|| black_box(schema.get_attribute_type(black_box("commonName"))))
    });

    group.bench_function("object_class_by_name", |b| {
        b.iter(|| black_box(schema.get_object_class(black_box("organizationalPerson"))))
    });

    let lenient = schema.as_non_strict_schema();
    group.bench_function("placeholder_attribute_type", |b| {
        b.iter(|| black_box(lenient.get_attribute_type(black_box("unknownAttribute"))))
    });

    group.finish();
}

/// Benchmark normalization and assertion evaluation
fn bench_matching(c: &mut Criterion) {
    let schema = core_schema();
    let mut group = c.benchmark_group("matching");

    let cn = schema.get_attribute_type("cn").expect("cn");
    let equality = cn.equality_matching_rule().expect("caseIgnoreMatch").clone();
    let value = ByteString::from("  Barbara   JENSEN ");
    let assertion = equality
        .get_assertion(&schema, &ByteString::from("barbara jensen"))
        .expect("valid assertion");

    group.bench_function("case_ignore_normalize", |b| {
        b.iter(|| black_box(equality.normalize_attribute_value(&schema, black_box(&value))))
    });

    group.bench_function("case_ignore_match", |b| {
        b.iter(|| {
            let result = equality.matches(&schema, black_box(&value), &assertion);
            assert_eq!(result, ConditionResult::True);
        })
    });

    let substrings = cn.substring_matching_rule().expect("caseIgnoreSubstringsMatch").clone();
    let substring_assertion = substrings
        .get_substring_assertion(
            &schema,
            Some(&ByteString::from("bar")),
            &[ByteString::from("a j")],
            Some(&ByteString::from("sen")),
        )
        .expect("valid fragments");
    group.bench_function("case_ignore_substrings", |b| {
        b.iter(|| black_box(substrings.matches(&schema, black_box(&value), &substring_assertion)))
    });

    group.finish();
}

/// Benchmark DN parsing and structural comparison
fn bench_dn(c: &mut Criterion) {
    let schema = core_schema();
    let mut group = c.benchmark_group("dn");

    let text = "uid=bjensen+cn=Barbara Jensen,ou=People,dc=example,dc=com";
    group.bench_function("parse", |b| {
        b.iter(|| black_box(Dn::parse(black_box(text), &schema)))
    });

    let a = Dn::parse(text, &schema).expect("valid DN");
    let b_dn = Dn::parse("CN=barbara jensen+UID=BJENSEN, OU=people, DC=Example, DC=COM", &schema)
        .expect("valid DN");
    group.bench_function("matches", |b| {
        b.iter(|| black_box(a.matches(&b_dn, &schema)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_schema_build,
    bench_lookup,
    bench_matching,
    bench_dn
);
criterion_main!(benches);
