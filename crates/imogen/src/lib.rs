//! # imogen
//!
//! Generates Kotlin model classes from annotated interface declarations.
//!
//! An interface marked with `@Generate(name = "SampleImpl")` gets a data
//! class implementing it, with:
//! - constructor defaults from `IntDefault`, `StringDefault`, ... and `Default(provider)`
//! - computed properties from `Derived(from)`
//! - extra properties from `Create(newProp, valueModifier)`
//! - a conversion constructor taking any instance of the interface
//! - with `delegatedClass = true`, a `Delegated*` class implementing every
//!   parent interface by delegation
//!
//! ## Quick Start
//!
//! ```rust
//! use imogen::prelude::*;
//!
//! let json = br#"{
//!     "declarations": [{
//!         "package": "com.example",
//!         "name": "Sample",
//!         "kind": "interface",
//!         "annotations": [{
//!             "name": "Generate",
//!             "arguments": [{ "name": "name", "value": { "string": "SampleImpl" } }]
//!         }],
//!         "properties": [
//!             { "name": "string", "type": { "name": "String" } },
//!             { "name": "int", "type": { "name": "Int" } }
//!         ]
//!     }]
//! }"#;
//!
//! let graph = DeclarationGraph::from_json(json).unwrap();
//! let generator = Generator::new(GeneratorConfig::default());
//! let mut emitter = MemoryEmitter::new();
//!
//! let report = generator.process(&graph);
//! emit_report(&generator, &report, &mut emitter).unwrap();
//!
//! let source = emitter.get("com/example/SampleImpl.kt").unwrap();
//! assert!(source.contains("constructor(sample: Sample) : this("));
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`imogen_core`] - Declaration model, errors and configuration
//! - [`imogen_codegen`] - The generation engine, Kotlin renderer and emitters

// Re-export core types
pub use imogen_core::{
    AnnotationUsage, Argument, ArgumentValue, Declaration, DeclarationGraph, DeclarationKind,
    GenerateError, GenerateResult, GeneratorConfig, PropertyDeclaration, TypeUsage,
};

// Re-export the engine
pub use imogen_codegen::{
    DependencyManifest, EmitError, EmittedFile, Emitter, Failure, FileSpec, FsEmitter, Generator,
    MemoryEmitter, ModelDescriptor, ProcessReport, TypeSpec, emit_report, kotlin, naming,
};

// Re-export common dependencies that hosts need
pub use serde;
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use imogen::prelude::*;` to import commonly used types.
pub mod prelude {
    // Declaration model
    pub use crate::{
        AnnotationUsage, ArgumentValue, Declaration, DeclarationGraph, DeclarationKind,
        PropertyDeclaration, TypeUsage,
    };

    // Generation
    pub use crate::{
        Emitter, FsEmitter, GenerateError, GenerateResult, Generator, GeneratorConfig,
        MemoryEmitter, ProcessReport, emit_report,
    };
}
