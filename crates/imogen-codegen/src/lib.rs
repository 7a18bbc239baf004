//! Model generation from annotated interface declarations.
//!
//! Given an interface carrying the `Generate` directive, this crate
//! synthesizes a Kotlin class implementing it: constructor defaults,
//! derived properties, created properties and, on request, a second class
//! implementing every parent interface by delegation.
//!
//! # Architecture
//!
//! Data flows strictly forward:
//!
//! ```text
//! DeclarationGraph
//!     ↓
//!  [TypeResolver + AnnotationExtractor]
//!     ↓
//!  ModelDescriptor
//!     ↓
//!  [Synthesizer] ──→ derived properties ──→ [synthesize_delegated]
//!     ↓                                          ↓
//!  FileSpec ←─────────────────────────────────────┘
//!     ↓
//!  [kotlin::render_file] → *.kt → [Emitter]
//! ```
//!
//! The synthesizer never formats text; it produces the structured
//! [`FileSpec`] and the [`kotlin`] module renders it.
//!
//! # Recognized annotations
//!
//! | Annotation | Arguments | Effect |
//! |------------|-----------|--------|
//! | `Generate` | `name`, `prefix`, `suffix`, `delegatedClass` | Marks the interface, names the class |
//! | `IntDefault`, `StringDefault`, ... | `value` | Literal constructor default |
//! | `Default` | `provider` | Default from `provider.provide()` |
//! | `Derived` | `from` | Property computed from an expression |
//! | `Create` | `newProp`, `valueModifier` | Extra property `valueModifier.modify(prop)` |
//!
//! Any other annotation is copied onto the generated property.
//!
//! # Usage
//!
//! ```rust
//! use imogen_codegen::Generator;
//! use imogen_core::{
//!     AnnotationUsage, ArgumentValue, Declaration, DeclarationGraph, DeclarationKind,
//!     GeneratorConfig, PropertyDeclaration, TypeUsage,
//! };
//!
//! let sample = Declaration::new("com.example", "Sample", DeclarationKind::Interface)
//!     .with_annotation(
//!         AnnotationUsage::new("Generate")
//!             .with_argument("name", ArgumentValue::String("SampleImpl".into())),
//!     )
//!     .with_property(PropertyDeclaration::new("string", TypeUsage::named("String")));
//!
//! let generator = Generator::new(GeneratorConfig::default());
//! let report = generator.process(&DeclarationGraph::new(vec![sample]));
//!
//! assert!(report.is_success());
//! let source = generator.render(&report.generated[0]);
//! assert!(source.contains("data class SampleImpl("));
//! ```

pub mod annotations;
pub mod delegation;
pub mod descriptor;
pub mod driver;
pub mod emit;
pub mod kotlin;
pub mod naming;
pub mod spec;
pub mod synth;
pub mod tags;
pub mod types;

pub use annotations::{Annotation, AnnotationExtractor, AnnotationValue, DeclarationRef, RefKind};
pub use descriptor::{GenerateDirective, ModelDescriptor, PropertyDescriptor};
pub use driver::{Failure, Generator, ProcessReport};
pub use emit::{
    DependencyManifest, EmitError, EmittedFile, Emitter, FsEmitter, MemoryEmitter, emit_report,
};
pub use spec::{
    AnnotationSpec, ConstructorSpec, Expression, FileSpec, NamedArgument, ParameterSpec,
    PropertyInitializer, PropertySpec, Supertype, TypeSpec,
};
pub use synth::{DerivedProperty, Synthesis, Synthesizer};
pub use tags::{TagKind, TagTable};
pub use types::{TypeName, TypeResolver};
