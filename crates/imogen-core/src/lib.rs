//! imogen-core - Declaration model, errors and configuration
//!
//! This crate provides the foundational types shared by the imogen generator:
//! - [`DeclarationGraph`] and [`Declaration`], the declarations a host resolved
//!   for the generator to consume
//! - [`GenerateError`] for the per-declaration failure taxonomy
//! - [`GeneratorConfig`] for generator configuration

mod config;
mod declaration;
mod error;

pub use config::GeneratorConfig;
pub use declaration::{
    AnnotationUsage, Argument, ArgumentValue, Declaration, DeclarationGraph, DeclarationKind,
    PropertyDeclaration, TypeUsage,
};
pub use error::{GenerateError, GenerateResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnnotationUsage, Argument, ArgumentValue, Declaration, DeclarationGraph, DeclarationKind,
        GenerateError, GenerateResult, GeneratorConfig, PropertyDeclaration, TypeUsage,
    };
}
