//! Structured specification of generated code.
//!
//! The synthesizer produces these values; [`crate::kotlin`] turns them into
//! source text. Nothing here knows about formatting.

use crate::annotations::AnnotationValue;
use crate::types::TypeName;
use std::collections::BTreeSet;

/// An expression in generated code
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value
    Literal(AnnotationValue),

    /// A name in scope (parameter or property)
    Name(String),

    /// `receiver.name`
    Member { receiver: String, name: String },

    /// `Object.function(arguments)` on a singleton
    Call {
        receiver: String,
        function: String,
        arguments: Vec<Expression>,
    },

    /// Source text copied as written
    Verbatim(String),
}

/// `name = value` pair of an annotation or call
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    pub name: String,
    pub value: Expression,
}

impl NamedArgument {
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// An annotation applied to a generated member
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSpec {
    pub qualified_name: String,
    pub members: Vec<NamedArgument>,
}

/// A constructor parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: TypeName,
    pub default_value: Option<Expression>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: TypeName) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
        }
    }
}

/// Where a property gets its value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyInitializer {
    /// From the primary constructor parameter of the same name
    ConstructorParameter,
    /// From an expression evaluated at construction
    Expression(Expression),
}

/// A property of a generated type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub name: String,
    pub ty: TypeName,
    pub is_override: bool,
    pub initializer: PropertyInitializer,
    pub annotations: Vec<AnnotationSpec>,
}

/// A secondary constructor forwarding to the primary one
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorSpec {
    pub parameters: Vec<ParameterSpec>,

    /// Arguments of the `this(...)` call
    pub delegation_arguments: Vec<NamedArgument>,
}

/// A supertype, optionally implemented by delegation to a parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Supertype {
    pub ty: TypeName,
    pub delegate: Option<String>,
}

impl Supertype {
    pub fn implemented(ty: TypeName) -> Self {
        Self { ty, delegate: None }
    }

    pub fn delegated(ty: TypeName, parameter: impl Into<String>) -> Self {
        Self {
            ty,
            delegate: Some(parameter.into()),
        }
    }
}

/// A generated class
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: String,
    pub is_data: bool,
    pub supertypes: Vec<Supertype>,
    pub primary_constructor: Vec<ParameterSpec>,
    pub properties: Vec<PropertySpec>,
    pub secondary_constructors: Vec<ConstructorSpec>,
}

impl TypeSpec {
    /// Parameter of the primary constructor with the given name
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.primary_constructor
            .iter()
            .find(|parameter| parameter.name == name)
    }

    /// Property with the given name
    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|property| property.name == name)
    }
}

/// A generated source file
#[derive(Debug, Clone, PartialEq)]
pub struct FileSpec {
    pub package: String,

    /// File name without extension
    pub name: String,

    pub types: Vec<TypeSpec>,

    /// Source units the file was derived from
    pub originating_files: Vec<String>,

    /// Simple names of the top-level types declared in `package`
    pub package_names: BTreeSet<String>,
}

impl FileSpec {
    /// Type with the given simple name
    pub fn type_spec(&self, name: &str) -> Option<&TypeSpec> {
        self.types.iter().find(|type_spec| type_spec.name == name)
    }
}
