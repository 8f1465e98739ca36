//! # LDAP Schema Validator
//!
//! A command-line utility for checking LDAP schema definition files before they
//! are loaded into a directory server or a [`SchemaBuilder`].
//!
//! ## Overview
//!
//! Each file is read as a subschema subentry in LDIF form: one definition per
//! attribute line, keyed by the subschema attribute that holds it. Continuation
//! lines start with a single space and `#` starts a comment.
//!
//! ```text
//! # Example schema extension
//! attributeTypes: ( 1.3.6.1.4.1.99999.1.1 NAME 'nickname'
//!   SUP name )
//! objectClasses: ( 1.3.6.1.4.1.99999.2.1 NAME 'account' SUP top STRUCTURAL
//!   MUST uid MAY nickname )
//! ```
//!
//! The definitions are loaded on top of the core schema. Every definition that
//! cannot be parsed, and every element that fails validation, is reported.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-validator schema/99-user.ldif
//! cargo run --bin schema-validator ./schema/
//! ```
//!
//! ## Output Examples
//!
//! ```text
//! Validating schema file: schema/99-user.ldif
//! ✓ Schema is valid!
//!
//! Schema Summary:
//!   Name: 99-user.ldif
//!   Definitions read: 2
//!   syntax: 27
//!   attribute type: 49
//!   object class: 15
//! ```
//!
//! ```text
//! Validating schema file: broken.ldif
//! ❌ The object class 1.3.6.1.4.1.99999.2.1 was removed from the schema: ...
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: All files are valid
//! - `1`: One or more files produced warnings or could not be read
//!
//! [`SchemaBuilder`]: ldap_schema::SchemaBuilder

use ldap_schema::schema::types::ElementKind;
use ldap_schema::{Entry, Schema, SchemaBuilder};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <schema-file-or-directory>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schema/99-user.ldif", args[0]);
        eprintln!("  {} ./schema/", args[0]);
        process::exit(1);
    }

    let path = Path::new(&args[1]);

    if path.is_file() {
        validate_single_file(path);
    } else if path.is_dir() {
        validate_directory(path);
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn validate_single_file(file_path: &Path) {
    println!("Validating schema file: {}", file_path.display());

    match load_schema(file_path) {
        Ok((schema, definitions)) if schema.warnings().is_empty() => {
            println!("✓ Schema is valid!");
            print_schema_summary(&schema, definitions);
        }
        Ok((schema, _)) => {
            for warning in schema.warnings() {
                eprintln!("❌ {}", warning);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Unable to read schema file: {}", e);
            process::exit(1);
        }
    }
}

fn validate_directory(dir_path: &Path) {
    println!("Validating schemas in directory: {}", dir_path.display());

    let mut valid_count = 0;
    let mut error_count = 0;

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("ldif" | "schema")
            )
        })
        .collect();
    paths.sort();

    for path in &paths {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("\nValidating: {}", file_name);

        match load_schema(path) {
            Ok((schema, definitions)) if schema.warnings().is_empty() => {
                println!("  ✓ Valid - {} definitions", definitions);
                valid_count += 1;
            }
            Ok((schema, _)) => {
                for warning in schema.warnings() {
                    eprintln!("  ❌ {}", warning);
                }
                error_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Unreadable - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid files: {}", valid_count);
    println!("  Invalid files: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }
}

/// Load one file on top of the core schema, returning the built catalog and
/// the number of definitions read.
fn load_schema(file_path: &Path) -> Result<(Schema, usize), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;
    let entry = parse_subschema_ldif(&content, &file_path.display().to_string())?;
    let definitions = entry.attributes().map(|a| a.values().len()).sum();

    let mut builder = SchemaBuilder::with_core_schema();
    builder.set_name(
        file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string()),
    );
    builder.add_schema_from_entry(&entry, false);
    Ok((builder.build(), definitions))
}

fn parse_subschema_ldif(content: &str, dn: &str) -> Result<Entry, String> {
    let mut entry = Entry::new(dn);
    let mut logical_lines: Vec<String> = Vec::new();

    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }
        if let Some(continuation) = line.strip_prefix(' ') {
            match logical_lines.last_mut() {
                Some(last) => last.push_str(continuation),
                None => return Err("continuation line before the first attribute".into()),
            }
        } else if !line.trim().is_empty() {
            logical_lines.push(line.to_string());
        }
    }

    for (index, line) in logical_lines.iter().enumerate() {
        let (attribute, value) = line
            .split_once(':')
            .ok_or_else(|| format!("line {} is not of the form 'attribute: value'", index + 1))?;
        let attribute = attribute.trim();
        if ElementKind::from_subschema_attribute(attribute).is_none() {
            // Entry bookkeeping such as dn or objectClass is not schema content.
            continue;
        }
        entry.add_value(attribute, value.trim());
    }

    Ok(entry)
}

fn print_schema_summary(schema: &Schema, definitions: usize) {
    println!();
    println!("Schema Summary:");
    println!("  Name: {}", schema.name());
    println!("  Definitions read: {}", definitions);
    for (kind, count) in schema.element_counts() {
        if count > 0 {
            println!("  {}: {}", kind, count);
        }
    }
}
