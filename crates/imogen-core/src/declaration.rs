//! Declarations handed to the generator by the host's resolution pass
//!
//! These types are the boundary between whatever resolved the source program
//! (a compiler plugin, a build script, the CLI's source reader) and the
//! generator. Everything here is "as written": type names may be simple or
//! qualified and annotation references are plain names. Resolution happens in
//! the generator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// A contract: property signatures without implementation
    Interface,
    /// A regular class
    Class,
    /// A singleton: exactly one instance, referenced by name
    Object,
    /// An enum class
    Enum,
    /// A constant of an enum class
    EnumEntry,
    /// An annotation class
    Annotation,
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Interface => write!(f, "interface"),
            DeclarationKind::Class => write!(f, "class"),
            DeclarationKind::Object => write!(f, "object"),
            DeclarationKind::Enum => write!(f, "enum class"),
            DeclarationKind::EnumEntry => write!(f, "enum entry"),
            DeclarationKind::Annotation => write!(f, "annotation class"),
        }
    }
}

/// A type as written at a use site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeUsage {
    /// Simple or qualified name of the referenced declaration
    pub name: String,

    /// Generic type arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeUsage>,

    /// Whether the use site is marked nullable
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl TypeUsage {
    /// A non-nullable type without arguments
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// Add a generic type argument
    pub fn with_argument(mut self, argument: TypeUsage) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Mark the use site nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Raw value of an annotation argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentValue {
    Bool(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    String(String),
    Char(char),

    /// Name of another declaration: enum constant, object or class
    Reference(String),

    /// Array of values
    Array(Vec<ArgumentValue>),

    /// An argument the host could not reduce to a constant
    Expression(String),
}

/// A named annotation argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: ArgumentValue,
}

/// An annotation attached to a declaration or property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationUsage {
    /// Simple or qualified name of the annotation class
    pub name: String,

    /// Arguments in the order they were written
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl AnnotationUsage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Append an argument
    pub fn with_argument(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.arguments.push(Argument {
            name: name.into(),
            value,
        });
        self
    }

    /// Find an argument by name
    pub fn argument(&self, name: &str) -> Option<&ArgumentValue> {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
            .map(|argument| &argument.value)
    }
}

/// A property signature of a declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeUsage,

    #[serde(default)]
    pub annotations: Vec<AnnotationUsage>,
}

impl PropertyDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeUsage) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation
    pub fn with_annotation(mut self, annotation: AnnotationUsage) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A resolved declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Package the declaration lives in (may be empty)
    #[serde(default)]
    pub package: String,

    /// Name relative to the package; nested names use `.` (`Color.RED`)
    pub name: String,

    pub kind: DeclarationKind,

    /// Source unit the declaration was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Direct supertypes in declaration order
    #[serde(default)]
    pub supertypes: Vec<TypeUsage>,

    /// Properties in declaration order
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,

    /// Annotations in the order they were written
    #[serde(default)]
    pub annotations: Vec<AnnotationUsage>,
}

impl Declaration {
    pub fn new(package: impl Into<String>, name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            kind,
            source_file: None,
            supertypes: Vec::new(),
            properties: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Fully qualified name (`package.Name`, or `Name` in the root package)
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Last segment of the name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    pub fn with_supertype(mut self, supertype: TypeUsage) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationUsage) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// All declarations visible to the generator, indexed by qualified name
///
/// Iteration follows insertion order. When two declarations share a
/// qualified name, lookups return the first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphRepr", into = "GraphRepr")]
pub struct DeclarationGraph {
    declarations: Vec<Declaration>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct GraphRepr {
    #[serde(default)]
    declarations: Vec<Declaration>,
}

impl From<GraphRepr> for DeclarationGraph {
    fn from(repr: GraphRepr) -> Self {
        Self::new(repr.declarations)
    }
}

impl From<DeclarationGraph> for GraphRepr {
    fn from(graph: DeclarationGraph) -> Self {
        Self {
            declarations: graph.declarations,
        }
    }
}

impl DeclarationGraph {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        let mut graph = Self::default();
        for declaration in declarations {
            graph.insert(declaration);
        }
        graph
    }

    /// Load a graph from its JSON form (`{"declarations": [...]}`)
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Serialize the graph to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Add a declaration
    pub fn insert(&mut self, declaration: Declaration) {
        let position = self.declarations.len();
        self.index
            .entry(declaration.qualified_name())
            .or_insert(position);
        self.declarations.push(declaration);
    }

    /// Look up a declaration by qualified name
    pub fn get(&self, qualified_name: &str) -> Option<&Declaration> {
        self.index
            .get(qualified_name)
            .map(|&position| &self.declarations[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
