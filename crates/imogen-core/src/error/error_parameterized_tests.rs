#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized display tests
// ============================================================================

#[test_case(
    GenerateError::InvalidName { declaration: "p.Sample".into(), name: "".into() },
    "p.Sample: invalid generated class name \"\"";
    "empty name"
)]
#[test_case(
    GenerateError::UnresolvedType { name: "Missing".into(), context: "supertypes of p.Sample".into(), property: None },
    "unresolved type Missing in supertypes of p.Sample";
    "unresolved type"
)]
#[test_case(
    GenerateError::UnresolvedType { name: "Missing".into(), context: "property items of p.Sample".into(), property: Some("items".into()) },
    "property items: unresolved type Missing";
    "unresolved property type"
)]
#[test_case(
    GenerateError::UnsupportedValue {
        annotation: "com.example.Json".into(),
        argument: "name".into(),
        value: "compute()".into(),
        property: None,
    },
    "annotation com.example.Json: unsupported value for argument name: compute()";
    "unsupported value"
)]
#[test_case(
    GenerateError::MissingArgument {
        annotation: "annotations.Derived".into(),
        property: "area".into(),
        argument: "from".into(),
    },
    "annotation annotations.Derived on area is missing argument from";
    "missing argument"
)]
fn GenerateError___variant___display_starts_with(error: GenerateError, expected: &str) {
    assert!(
        error.to_string().starts_with(expected),
        "{} should start with {}",
        error,
        expected
    );
}

#[test_case(GenerateError::NotAnInterface { declaration: "".into(), kind: "".into() }, 1; "not_an_interface")]
#[test_case(GenerateError::InvalidName { declaration: "".into(), name: "".into() }, 2; "invalid_name")]
#[test_case(GenerateError::ConflictingAnnotations { property: "".into(), annotations: vec![] }, 3; "conflicting")]
#[test_case(GenerateError::NotASingleton { property: "".into(), reference: "".into(), role: "".into() }, 4; "not_a_singleton")]
#[test_case(GenerateError::UnresolvedType { name: "".into(), context: "".into(), property: None }, 6; "unresolved")]
#[test_case(GenerateError::UnsupportedValue { annotation: "".into(), argument: "".into(), value: "".into(), property: Some("".into()) }, 7; "unsupported_value")]
fn GenerateError___variant___maps_to_correct_code(error: GenerateError, expected_code: u32) {
    assert_eq!(error.error_code(), expected_code);
}
