//! Error types for model generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Reasons generation can fail for a single declaration
///
/// None of these are transient: running the generator again on the same
/// declarations fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The generation directive was placed on something other than an interface
    #[error("{declaration}: the annotated declaration must be an interface, found {kind}")]
    NotAnInterface { declaration: String, kind: String },

    /// Computed class name is empty or equal to the source interface name
    #[error(
        "{declaration}: invalid generated class name \"{name}\"; the name must not be empty and must differ from the interface name"
    )]
    InvalidName { declaration: String, name: String },

    /// A property carries tags that cannot be combined
    #[error("property {property} has conflicting annotations {}; decide which one to use", annotations.join(", "))]
    ConflictingAnnotations {
        property: String,
        annotations: Vec<String>,
    },

    /// A provider or transform reference is not an `object`
    #[error("property {property}: {reference} must be an object to be used as a {role}")]
    NotASingleton {
        property: String,
        reference: String,
        role: String,
    },

    /// A created property's transform does not accept the property's type
    #[error("property {property}: unsupported type {actual} for {transform}, expected {expected}")]
    UnsupportedType {
        property: String,
        transform: String,
        expected: String,
        actual: String,
    },

    /// A type or reference could not be resolved against the declaration graph
    #[error("{}unresolved type {name} in {context}", property_prefix(property))]
    UnresolvedType {
        name: String,
        context: String,
        property: Option<String>,
    },

    /// An annotation argument value cannot be used or re-emitted
    #[error(
        "{}annotation {annotation}: unsupported value for argument {argument}: {value}",
        property_prefix(property)
    )]
    UnsupportedValue {
        annotation: String,
        argument: String,
        value: String,
        property: Option<String>,
    },

    /// A recognized annotation lacks a required argument
    #[error("annotation {annotation} on {property} is missing argument {argument}")]
    MissingArgument {
        annotation: String,
        property: String,
        argument: String,
    },
}

impl GenerateError {
    /// Stable numeric code for machine-readable reports
    pub fn error_code(&self) -> u32 {
        match self {
            GenerateError::NotAnInterface { .. } => 1,
            GenerateError::InvalidName { .. } => 2,
            GenerateError::ConflictingAnnotations { .. } => 3,
            GenerateError::NotASingleton { .. } => 4,
            GenerateError::UnsupportedType { .. } => 5,
            GenerateError::UnresolvedType { .. } => 6,
            GenerateError::UnsupportedValue { .. } => 7,
            GenerateError::MissingArgument { .. } => 8,
        }
    }

    /// Property the error is attributed to, if any
    pub fn property(&self) -> Option<&str> {
        match self {
            GenerateError::ConflictingAnnotations { property, .. }
            | GenerateError::NotASingleton { property, .. }
            | GenerateError::UnsupportedType { property, .. }
            | GenerateError::MissingArgument { property, .. } => Some(property),
            GenerateError::UnresolvedType { property, .. }
            | GenerateError::UnsupportedValue { property, .. } => property.as_deref(),
            _ => None,
        }
    }

    /// Attribute the error to `name` unless it already names a property.
    pub fn on_property(mut self, name: &str) -> Self {
        if let GenerateError::UnresolvedType { property, .. }
        | GenerateError::UnsupportedValue { property, .. } = &mut self
            && property.is_none()
        {
            *property = Some(name.to_string());
        }
        self
    }
}

fn property_prefix(property: &Option<String>) -> String {
    match property {
        Some(property) => format!("property {property}: "),
        None => String::new(),
    }
}


#[cfg(test)]
#[path = "error/error_parameterized_tests.rs"]
mod error_parameterized_tests;
