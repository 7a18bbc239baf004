#![allow(non_snake_case)]

use super::*;
use imogen_core::DeclarationKind;

fn graph() -> DeclarationGraph {
    DeclarationGraph::new(vec![
        Declaration::new("com.example", "Address", DeclarationKind::Class),
        Declaration::new("com.example.model", "Tag", DeclarationKind::Class),
        Declaration::new("com.example", "String", DeclarationKind::Class),
    ])
}

#[test]
fn TypeResolver___resolve_name___finds_qualified_name() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);

    let resolved = resolver.resolve_name("com.example.model.Tag", "com.example");

    assert_eq!(resolved.as_deref(), Some("com.example.model.Tag"));
}

#[test]
fn TypeResolver___resolve_name___finds_package_relative_name() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);

    let resolved = resolver.resolve_name("Address", "com.example");

    assert_eq!(resolved.as_deref(), Some("com.example.Address"));
}

#[test]
fn TypeResolver___resolve_name___falls_back_to_builtins() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);

    assert_eq!(
        resolver.resolve_name("Int", "com.other").as_deref(),
        Some("kotlin.Int")
    );
    assert_eq!(
        resolver.resolve_name("List", "com.other").as_deref(),
        Some("kotlin.collections.List")
    );
}

#[test]
fn TypeResolver___resolve_name___package_declaration_shadows_builtin() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);

    let resolved = resolver.resolve_name("String", "com.example");

    assert_eq!(resolved.as_deref(), Some("com.example.String"));
}

#[test]
fn TypeResolver___resolve_name___unknown_returns_none() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);

    assert!(resolver.resolve_name("Missing", "com.example").is_none());
}

#[test]
fn TypeResolver___resolve___resolves_generic_arguments_recursively() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);
    let usage = TypeUsage::named("Map")
        .with_argument(TypeUsage::named("String"))
        .with_argument(
            TypeUsage::named("List")
                .with_argument(TypeUsage::named("com.example.Address").nullable()),
        );

    let resolved = resolver.resolve(&usage, "com.other", "property index").unwrap();

    assert_eq!(
        resolved.to_string(),
        "kotlin.collections.Map<kotlin.String, kotlin.collections.List<com.example.Address?>>"
    );
}

#[test]
fn TypeResolver___resolve___keeps_nullability() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);

    let resolved = resolver
        .resolve(&TypeUsage::named("Address").nullable(), "com.example", "property home")
        .unwrap();

    assert_eq!(resolved, TypeName::new("com.example.Address").with_nullable(true));
}

#[test]
fn TypeResolver___resolve___unknown_top_level_kept_as_written() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);

    let resolved = resolver
        .resolve(&TypeUsage::named("java.time.Instant"), "com.example", "property at")
        .unwrap();

    assert_eq!(resolved.qualified_name, "java.time.Instant");
}

#[test]
fn TypeResolver___resolve___unknown_generic_argument_fails() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);
    let usage = TypeUsage::named("List").with_argument(TypeUsage::named("Missing"));

    let result = resolver.resolve(&usage, "com.example", "property items");

    assert_eq!(
        result,
        Err(GenerateError::UnresolvedType {
            name: "Missing".into(),
            context: "property items".into(),
            property: None,
        })
    );
}

#[test]
fn TypeResolver___resolve_strict___unknown_top_level_fails() {
    let graph = graph();
    let resolver = TypeResolver::new(&graph);

    let result = resolver.resolve_strict(&TypeUsage::named("Missing"), "com.example", "modifier");

    assert!(matches!(result, Err(GenerateError::UnresolvedType { .. })));
}

#[test]
fn TypeName___display___renders_arguments_and_nullability() {
    let ty = TypeName::new("kotlin.collections.List")
        .with_argument(TypeName::new("kotlin.String"))
        .with_nullable(true);

    assert_eq!(ty.to_string(), "kotlin.collections.List<kotlin.String>?");
    assert_eq!(ty.simple_name(), "List");
    assert_eq!(ty.package(), "kotlin.collections");
}
