#![allow(non_snake_case)]

use super::*;
use imogen_core::{AnnotationUsage, ArgumentValue, DeclarationKind, PropertyDeclaration, TypeUsage};

fn generate(name: &str) -> AnnotationUsage {
    AnnotationUsage::new("annotations.Generate")
        .with_argument("name", ArgumentValue::String(name.into()))
}

fn property(name: &str, ty: &str) -> PropertyDeclaration {
    PropertyDeclaration::new(name, TypeUsage::named(ty))
}

fn derived(name: &str, ty: &str, from: &str) -> PropertyDeclaration {
    property(name, ty).with_annotation(
        AnnotationUsage::new("annotations.Derived")
            .with_argument("from", ArgumentValue::String(from.into())),
    )
}

fn sample() -> Declaration {
    Declaration::new("com.example", "Sample", DeclarationKind::Interface)
        .with_source_file("Sample.kt")
        .with_annotation(generate("SampleImpl"))
        .with_property(property("string", "String"))
        .with_property(property("int", "Int"))
}

fn generator() -> Generator {
    Generator::new(GeneratorConfig::default())
}

fn render_single(declaration: Declaration) -> String {
    let graph = DeclarationGraph::new(vec![declaration]);
    let generator = generator();

    let report = generator.process(&graph);

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(report.generated.len(), 1);
    generator.render(&report.generated[0])
}

#[test]
fn Generator___plain_interface___generates_data_class_with_conversion() {
    let source = render_single(sample());

    assert_eq!(
        source,
        "package com.example

data class SampleImpl(
  override val string: String,
  override val int: Int,
) : Sample {
  constructor(sample: Sample) : this(
    string = sample.string,
    int = sample.int,
  )
}
"
    );
}

#[test]
fn Generator___int_default___renders_default_parameter() {
    let declaration = Declaration::new("com.example", "Counter", DeclarationKind::Interface)
        .with_annotation(generate("CounterImpl"))
        .with_property(property("count", "Int").with_annotation(
            AnnotationUsage::new("IntDefault").with_argument("value", ArgumentValue::Integer(5)),
        ));

    let source = render_single(declaration);

    assert!(source.contains("  override val count: Int = 5,\n"));
}

#[test]
fn Generator___derived_property___is_initialized_in_body() {
    let declaration = Declaration::new("com.example", "Rectangle", DeclarationKind::Interface)
        .with_annotation(generate("RectangleImpl"))
        .with_property(property("width", "Int"))
        .with_property(property("height", "Int"))
        .with_property(derived("area", "Int", "width * height"));

    let source = render_single(declaration);

    assert_eq!(
        source,
        "package com.example

data class RectangleImpl(
  override val width: Int,
  override val height: Int,
) : Rectangle {
  override val area: Int = width * height

  constructor(rectangle: Rectangle) : this(
    width = rectangle.width,
    height = rectangle.height,
  )
}
"
    );
}

#[test]
fn Generator___name_equal_to_interface___reports_invalid_name() {
    let declaration = Declaration::new("com.example", "Sample", DeclarationKind::Interface)
        .with_source_file("Sample.kt")
        .with_annotation(generate("Sample"))
        .with_property(property("string", "String"));
    let graph = DeclarationGraph::new(vec![declaration]);

    let report = generator().process(&graph);

    assert!(report.generated.is_empty());
    assert_eq!(
        report.failures,
        vec![Failure {
            declaration: "com.example.Sample".into(),
            source_file: Some("Sample.kt".into()),
            error: GenerateError::InvalidName {
                declaration: "com.example.Sample".into(),
                name: "Sample".into(),
            },
        }]
    );
}

fn bundle_graph() -> DeclarationGraph {
    DeclarationGraph::new(vec![
        Declaration::new("com.example", "Config", DeclarationKind::Interface)
            .with_source_file("Config.kt")
            .with_property(property("timeout", "Long")),
        Declaration::new("com.example", "Styles", DeclarationKind::Interface)
            .with_source_file("Styles.kt")
            .with_property(property("color", "String")),
        Declaration::new("com.example", "BundleSpec", DeclarationKind::Interface)
            .with_source_file("Bundle.kt")
            .with_annotation(
                generate("Bundle").with_argument("delegatedClass", ArgumentValue::Bool(true)),
            )
            .with_supertype(TypeUsage::named("Config"))
            .with_supertype(TypeUsage::named("Styles"))
            .with_property(derived("label", "String", "color.uppercase()")),
    ])
}

#[test]
fn Generator___delegated_class___implements_parents_by_forwarding() {
    let graph = bundle_graph();
    let generator = generator();

    let report = generator.process(&graph);

    assert!(report.is_success(), "{:?}", report.failures);
    let file = &report.generated[0];
    assert_eq!(file.name, "Bundle");
    assert_eq!(
        file.originating_files,
        vec!["Bundle.kt", "Config.kt", "Styles.kt"]
    );
    assert_eq!(
        generator.render(file),
        "package com.example

data class Bundle(
  override val timeout: Long,
  override val color: String,
) : BundleSpec {
  override val label: String = color.uppercase()

  constructor(bundleSpec: BundleSpec) : this(
    timeout = bundleSpec.timeout,
    color = bundleSpec.color,
  )
}

class DelegatedBundle(
  config: Config,
  styles: Styles,
) : BundleSpec, Config by config, Styles by styles {
  override val label: String = color.uppercase()
}
"
    );
}

#[test]
fn Generator___failure___does_not_stop_the_pass() {
    let graph = DeclarationGraph::new(vec![
        Declaration::new("com.example", "Broken", DeclarationKind::Class)
            .with_source_file("Broken.kt")
            .with_annotation(generate("BrokenImpl")),
        sample(),
    ]);

    let report = generator().process(&graph);

    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].error.error_code(), 1);
    assert_eq!(
        report.failures[0].to_string(),
        "com.example.Broken (Broken.kt): com.example.Broken: the annotated declaration must be an interface, found class"
    );
    assert_eq!(report.generated.len(), 1);
    assert_eq!(report.generated[0].name, "SampleImpl");
}

#[test]
fn Generator___annotated___skips_undirected_declarations_in_graph_order() {
    let graph = DeclarationGraph::new(vec![
        Declaration::new("com.example", "Plain", DeclarationKind::Interface),
        sample(),
        Declaration::new("com.example", "Other", DeclarationKind::Interface)
            .with_annotation(AnnotationUsage::new("Generate").with_argument(
                "name",
                ArgumentValue::String("OtherImpl".into()),
            )),
    ]);

    let names: Vec<_> = generator()
        .annotated(&graph)
        .into_iter()
        .map(|declaration| declaration.name.as_str())
        .collect();

    assert_eq!(names, vec!["Sample", "Other"]);
}

#[test]
fn Generator___custom_annotations_package___recognizes_directive() {
    let config = GeneratorConfig {
        annotations_package: "io.imogen".into(),
        ..GeneratorConfig::default()
    };
    let declaration = Declaration::new("com.example", "Custom", DeclarationKind::Interface)
        .with_annotation(
            AnnotationUsage::new("io.imogen.Generate")
                .with_argument("name", ArgumentValue::String("CustomImpl".into())),
        );
    let graph = DeclarationGraph::new(vec![declaration, sample()]);

    let report = Generator::new(config).process(&graph);

    assert_eq!(report.generated.len(), 1);
    assert_eq!(report.generated[0].name, "CustomImpl");
    assert!(report.failures.is_empty());
}

#[test]
fn Generator___repeated_runs___render_identical_output() {
    let graph = bundle_graph();
    let generator = generator();

    let first: Vec<String> = generator
        .process(&graph)
        .generated
        .iter()
        .map(|file| generator.render(file))
        .collect();
    let second: Vec<String> = generator
        .process(&graph)
        .generated
        .iter()
        .map(|file| generator.render(file))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn Generator___package_declares_builtin_name___keeps_builtin_qualified() {
    let graph = DeclarationGraph::new(vec![
        Declaration::new("com.example", "String", DeclarationKind::Class),
        Declaration::new("com.example", "Labelled", DeclarationKind::Interface)
            .with_annotation(generate("LabelledImpl"))
            .with_property(property("text", "kotlin.String"))
            .with_property(property("label", "String")),
    ]);
    let generator = generator();

    let report = generator.process(&graph);
    let source = generator.render(&report.generated[0]);

    assert!(
        report.generated[0].package_names.contains("String"),
        "{:?}",
        report.generated[0].package_names
    );
    assert!(source.contains("  override val text: kotlin.String,\n"), "{source}");
    assert!(source.contains("  override val label: String,\n"), "{source}");
}
