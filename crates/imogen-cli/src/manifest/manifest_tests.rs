#![allow(non_snake_case)]

use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

// Manifest parsing tests

#[test]
fn Manifest___from_str___parses_valid_toml() {
    let toml = r#"
[generator]
annotations_package = "com.example.imogen"
delegated_prefix = "Forwarding"
data_classes = false
indent = "    "
log_level = "debug"
output_dir = "build/generated"
dependency_manifest = "build/imogen-deps.json"

[source]
package = "com.example.model"
"#;

    let manifest = Manifest::from_str(toml).unwrap();

    assert_eq!(manifest.generator.annotations_package, "com.example.imogen");
    assert_eq!(manifest.generator.delegated_prefix, "Forwarding");
    assert!(!manifest.generator.data_classes);
    assert_eq!(manifest.generator.indent, "    ");
    assert_eq!(manifest.generator.output_dir, PathBuf::from("build/generated"));
    assert_eq!(
        manifest.generator.dependency_manifest,
        Some(PathBuf::from("build/imogen-deps.json"))
    );
    assert_eq!(manifest.source_package(), "com.example.model");
}

#[test]
fn Manifest___from_str___parses_minimal_manifest() {
    let toml = r#"
[generator]
delegated_prefix = "Forwarding"
"#;

    let manifest = Manifest::from_str(toml).unwrap();

    assert_eq!(manifest.generator.delegated_prefix, "Forwarding");
    assert_eq!(manifest.generator.annotations_package, "annotations");
    assert!(manifest.generator.data_classes);
    assert_eq!(manifest.source_package(), "");
}

#[test]
fn Manifest___from_str___empty_document_uses_defaults() {
    let manifest = Manifest::from_str("").unwrap();

    assert_eq!(manifest.generator, GeneratorConfig::default());
    assert!(manifest.source.package.is_none());
}

#[test]
fn Manifest___from_str___rejects_malformed_toml() {
    let result = Manifest::from_str("[generator\nindent = ");

    assert!(result.is_err());
}

// Manifest loading tests

#[test]
fn Manifest___from_file___reads_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("imogen.toml");
    std::fs::write(&path, "[source]\npackage = \"com.example\"\n").unwrap();

    let manifest = Manifest::from_file(&path).unwrap();

    assert_eq!(manifest.source_package(), "com.example");
}

#[test]
fn Manifest___load___missing_explicit_file___returns_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");

    let error = Manifest::load(Some(path.as_path())).unwrap_err();

    assert!(error.to_string().contains("Failed to read manifest"));
}

#[test]
fn Manifest___load___validates_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("imogen.toml");
    std::fs::write(&path, "[generator]\ndelegated_prefix = \"\"\n").unwrap();

    let error = Manifest::load(Some(path.as_path())).unwrap_err();

    assert!(error.to_string().contains("delegated_prefix"));
}

// Manifest validation tests

#[test]
fn Manifest___validate___accepts_defaults() {
    assert!(Manifest::default().validate().is_ok());
}

#[test]
fn Manifest___validate___accepts_empty_annotations_package() {
    let mut manifest = Manifest::default();
    manifest.generator.annotations_package = String::new();

    assert!(manifest.validate().is_ok());
}

#[test]
fn Manifest___validate___rejects_invalid_annotations_package() {
    let mut manifest = Manifest::default();
    manifest.generator.annotations_package = "com..example".to_string();

    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate___rejects_non_identifier_prefix() {
    let mut manifest = Manifest::default();
    manifest.generator.delegated_prefix = "1Delegated".to_string();

    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate___rejects_non_whitespace_indent() {
    let mut manifest = Manifest::default();
    manifest.generator.indent = "--".to_string();

    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate___accepts_filter_directives() {
    let mut manifest = Manifest::default();
    manifest.generator.log_level = "warn,imogen_codegen=debug".to_string();

    assert!(manifest.validate().is_ok());
}

#[test]
fn Manifest___validate___rejects_invalid_source_package() {
    let mut manifest = Manifest::default();
    manifest.source.package = Some("com.example-model".to_string());

    assert!(manifest.validate().is_err());
}

#[test]
fn is_identifier___accepts_letters_digits_underscores() {
    assert!(is_identifier("Delegated"));
    assert!(is_identifier("_internal2"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("has space"));
}
