#![allow(non_snake_case)]

use super::*;
use imogen_core::{
    AnnotationUsage, ArgumentValue, DeclarationGraph, GeneratorConfig, PropertyDeclaration,
    TypeUsage,
};

fn generate(name: &str) -> AnnotationUsage {
    AnnotationUsage::new("annotations.Generate")
        .with_argument("name", ArgumentValue::String(name.into()))
}

fn sample() -> Declaration {
    Declaration::new("com.example", "Sample", DeclarationKind::Interface)
        .with_source_file("Sample.kt")
        .with_annotation(generate("SampleImpl"))
        .with_property(PropertyDeclaration::new("string", TypeUsage::named("String")))
        .with_property(PropertyDeclaration::new("int", TypeUsage::named("Int")))
}

fn build(graph: &DeclarationGraph, qualified_name: &str) -> GenerateResult<ModelDescriptor> {
    let tags = TagTable::new(&GeneratorConfig::default());
    let declaration = graph.get(qualified_name).unwrap();

    ModelDescriptor::build(
        TypeResolver::new(graph),
        &tags,
        &declaration.package,
        declaration,
    )
}

#[test]
fn ModelDescriptor___build___uses_directive_name() {
    let graph = DeclarationGraph::new(vec![sample()]);

    let descriptor = build(&graph, "com.example.Sample").unwrap();

    assert_eq!(descriptor.package_name, "com.example");
    assert_eq!(descriptor.class_name, "SampleImpl");
    assert_eq!(descriptor.qualified_class_name(), "com.example.SampleImpl");
    assert_eq!(descriptor.source_interface, TypeName::new("com.example.Sample"));
    assert!(!descriptor.delegated_class);
    assert_eq!(descriptor.originating_files, vec!["Sample.kt"]);
}

#[test]
fn ModelDescriptor___build___preserves_property_order_and_types() {
    let graph = DeclarationGraph::new(vec![sample()]);

    let descriptor = build(&graph, "com.example.Sample").unwrap();

    let names: Vec<_> = descriptor.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["string", "int"]);
    assert_eq!(descriptor.properties[0].ty, TypeName::new("kotlin.String"));
    assert_eq!(descriptor.properties[1].ty, TypeName::new("kotlin.Int"));
    assert_eq!(descriptor.properties[1].declared_in, "com.example.Sample");
}

#[test]
fn ModelDescriptor___build___applies_prefix_and_suffix() {
    let declaration = Declaration::new("p", "Shape", DeclarationKind::Interface).with_annotation(
        generate("Shape")
            .with_argument("prefix", ArgumentValue::String("Default".into()))
            .with_argument("suffix", ArgumentValue::String("Model".into()))
            .with_argument("delegatedClass", ArgumentValue::Bool(true)),
    );
    let graph = DeclarationGraph::new(vec![declaration]);

    let descriptor = build(&graph, "p.Shape").unwrap();

    assert_eq!(descriptor.class_name, "DefaultShapeModel");
    assert!(descriptor.delegated_class);
}

#[test]
fn ModelDescriptor___build___name_equal_to_interface_fails() {
    let declaration = Declaration::new("p", "Sample", DeclarationKind::Interface)
        .with_annotation(generate("Sample"));
    let graph = DeclarationGraph::new(vec![declaration]);

    let result = build(&graph, "p.Sample");

    assert_eq!(
        result,
        Err(GenerateError::InvalidName {
            declaration: "p.Sample".into(),
            name: "Sample".into(),
        })
    );
}

#[test]
fn ModelDescriptor___build___empty_name_fails_even_with_prefix() {
    let declaration = Declaration::new("p", "Sample", DeclarationKind::Interface).with_annotation(
        generate("").with_argument("prefix", ArgumentValue::String("Impl".into())),
    );
    let graph = DeclarationGraph::new(vec![declaration]);

    let result = build(&graph, "p.Sample");

    assert!(matches!(result, Err(GenerateError::InvalidName { .. })));
}

#[test]
fn ModelDescriptor___build___missing_directive_is_invalid_name() {
    let declaration = Declaration::new("p", "Sample", DeclarationKind::Interface);
    let graph = DeclarationGraph::new(vec![declaration]);

    let result = build(&graph, "p.Sample");

    assert!(matches!(result, Err(GenerateError::InvalidName { .. })));
}

#[test]
fn ModelDescriptor___build___non_interface_fails() {
    let declaration =
        Declaration::new("p", "Sample", DeclarationKind::Class).with_annotation(generate("SampleImpl"));
    let graph = DeclarationGraph::new(vec![declaration]);

    let result = build(&graph, "p.Sample");

    assert_eq!(
        result,
        Err(GenerateError::NotAnInterface {
            declaration: "p.Sample".into(),
            kind: "class".into(),
        })
    );
}

#[test]
fn ModelDescriptor___build___wrong_directive_argument_type_fails() {
    let declaration = Declaration::new("p", "Sample", DeclarationKind::Interface).with_annotation(
        generate("SampleImpl").with_argument("delegatedClass", ArgumentValue::String("yes".into())),
    );
    let graph = DeclarationGraph::new(vec![declaration]);

    let result = build(&graph, "p.Sample");

    assert!(matches!(
        result,
        Err(GenerateError::UnsupportedValue { ref argument, .. }) if argument == "delegatedClass"
    ));
}

#[test]
fn ModelDescriptor___build___inherited_interfaces_exclude_classes() {
    let graph = DeclarationGraph::new(vec![
        Declaration::new("p", "Config", DeclarationKind::Interface)
            .with_source_file("Config.kt")
            .with_property(PropertyDeclaration::new("timeout", TypeUsage::named("Long"))),
        Declaration::new("p", "Styles", DeclarationKind::Interface)
            .with_property(PropertyDeclaration::new("color", TypeUsage::named("String"))),
        Declaration::new("p", "Base", DeclarationKind::Class),
        Declaration::new("p", "Bundle", DeclarationKind::Interface)
            .with_source_file("Bundle.kt")
            .with_annotation(generate("Properties"))
            .with_supertype(TypeUsage::named("Config"))
            .with_supertype(TypeUsage::named("Base"))
            .with_supertype(TypeUsage::named("Styles"))
            .with_property(PropertyDeclaration::new("name", TypeUsage::named("String"))),
    ]);

    let descriptor = build(&graph, "p.Bundle").unwrap();

    assert_eq!(
        descriptor.inherited_interfaces,
        vec![TypeName::new("p.Config"), TypeName::new("p.Styles")]
    );
    let names: Vec<_> = descriptor.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["name", "timeout", "color"]);
    assert_eq!(descriptor.properties[1].declared_in, "p.Config");
    assert_eq!(descriptor.originating_files, vec!["Bundle.kt", "Config.kt"]);
}

#[test]
fn ModelDescriptor___build___redeclared_property_keeps_own_declaration() {
    let graph = DeclarationGraph::new(vec![
        Declaration::new("p", "Named", DeclarationKind::Interface)
            .with_property(PropertyDeclaration::new("name", TypeUsage::named("String").nullable())),
        Declaration::new("p", "Person", DeclarationKind::Interface)
            .with_annotation(generate("PersonImpl"))
            .with_supertype(TypeUsage::named("Named"))
            .with_property(PropertyDeclaration::new("name", TypeUsage::named("String"))),
    ]);

    let descriptor = build(&graph, "p.Person").unwrap();

    assert_eq!(descriptor.properties.len(), 1);
    assert!(!descriptor.properties[0].ty.nullable);
    assert_eq!(descriptor.properties[0].declared_in, "p.Person");
}

#[test]
fn ModelDescriptor___build___cyclic_supertypes_terminate() {
    let graph = DeclarationGraph::new(vec![
        Declaration::new("p", "A", DeclarationKind::Interface)
            .with_annotation(generate("AImpl"))
            .with_supertype(TypeUsage::named("B"))
            .with_property(PropertyDeclaration::new("a", TypeUsage::named("Int"))),
        Declaration::new("p", "B", DeclarationKind::Interface)
            .with_supertype(TypeUsage::named("A"))
            .with_property(PropertyDeclaration::new("b", TypeUsage::named("Int"))),
    ]);

    let descriptor = build(&graph, "p.A").unwrap();

    assert_eq!(descriptor.properties.len(), 2);
}

#[test]
fn ModelDescriptor___build___unresolved_generic_argument_fails() {
    let declaration = sample().with_property(PropertyDeclaration::new(
        "items",
        TypeUsage::named("List").with_argument(TypeUsage::named("Missing")),
    ));
    let graph = DeclarationGraph::new(vec![declaration]);

    let result = build(&graph, "com.example.Sample");

    assert_eq!(
        result,
        Err(GenerateError::UnresolvedType {
            name: "Missing".into(),
            context: "property items of com.example.Sample".into(),
            property: Some("items".into()),
        })
    );
}

#[test]
fn ModelDescriptor___build___unresolved_property_annotation_names_property() {
    let declaration = sample().with_property(
        PropertyDeclaration::new("color", TypeUsage::named("String")).with_annotation(
            AnnotationUsage::new("com.example.Json")
                .with_argument("adapter", ArgumentValue::Reference("Missing".into())),
        ),
    );
    let graph = DeclarationGraph::new(vec![declaration]);

    let result = build(&graph, "com.example.Sample");

    assert_eq!(result.unwrap_err().property(), Some("color"));
}
