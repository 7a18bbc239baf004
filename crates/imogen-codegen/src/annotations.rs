//! Annotation extraction.
//!
//! Normalizes the annotations written on a declaration or property into
//! [`Annotation`]s: qualified names, arguments in written order, and values
//! whose declaration references are resolved to a typed [`DeclarationRef`].

use crate::naming::simple_name;
use crate::tags::TagTable;
use crate::types::TypeResolver;
use imogen_core::{AnnotationUsage, ArgumentValue, DeclarationKind, GenerateError, GenerateResult};
use std::fmt;

/// What a referenced declaration is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// A constant of an enum class
    EnumConstant,
    /// An `object`
    Singleton,
    /// Any other class-like declaration
    Class,
}

/// A resolved reference to another declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationRef {
    pub qualified_name: String,
    pub kind: RefKind,
}

impl DeclarationRef {
    pub fn new(qualified_name: impl Into<String>, kind: RefKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
        }
    }
}

/// Normalized annotation argument value
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    String(String),
    Char(char),
    Reference(DeclarationRef),
    Array(Vec<AnnotationValue>),

    /// A value that has no literal form (kept as the host wrote it)
    Unsupported(String),
}

impl AnnotationValue {
    /// Whether the value, including array elements, has a Kotlin literal form
    ///
    /// A Kotlin `Char` is a single UTF-16 code unit, so characters outside
    /// the Basic Multilingual Plane have none.
    pub fn is_renderable(&self) -> bool {
        match self {
            AnnotationValue::Unsupported(_) => false,
            AnnotationValue::Char(value) => u32::from(*value) <= 0xFFFF,
            AnnotationValue::Array(values) => values.iter().all(AnnotationValue::is_renderable),
            _ => true,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::Bool(value) => write!(f, "{value}"),
            AnnotationValue::Integer(value) => write!(f, "{value}"),
            AnnotationValue::Float(value) => write!(f, "{value:?}"),
            AnnotationValue::Double(value) => write!(f, "{value:?}"),
            AnnotationValue::String(value) => write!(f, "{value:?}"),
            AnnotationValue::Char(value) => write!(f, "{value:?}"),
            AnnotationValue::Reference(reference) => write!(f, "{}", reference.qualified_name),
            AnnotationValue::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            AnnotationValue::Unsupported(text) => write!(f, "{text}"),
        }
    }
}

/// A named argument of an [`Annotation`]
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationArgument {
    pub name: String,
    pub value: AnnotationValue,
}

/// A normalized annotation
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub qualified_name: String,
    pub arguments: Vec<AnnotationArgument>,
}

impl Annotation {
    /// Find an argument value by name
    pub fn argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
            .map(|argument| &argument.value)
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }
}

/// Reads written annotations into normalized [`Annotation`]s.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationExtractor<'a> {
    resolver: TypeResolver<'a>,
    tags: &'a TagTable,
}

impl<'a> AnnotationExtractor<'a> {
    pub fn new(resolver: TypeResolver<'a>, tags: &'a TagTable) -> Self {
        Self { resolver, tags }
    }

    /// Qualified name of a written annotation name.
    ///
    /// Graph declarations win over the recognized vocabulary; a name found in
    /// neither is kept as written.
    pub fn annotation_name(&self, name: &str, package: &str) -> String {
        self.resolver
            .resolve_name(name, package)
            .or_else(|| self.tags.qualify(name).map(str::to_string))
            .unwrap_or_else(|| name.to_string())
    }

    /// Extract annotations written in `package`, preserving order.
    pub fn extract(
        &self,
        annotations: &[AnnotationUsage],
        package: &str,
    ) -> GenerateResult<Vec<Annotation>> {
        annotations
            .iter()
            .map(|annotation| self.extract_one(annotation, package))
            .collect()
    }

    fn extract_one(&self, usage: &AnnotationUsage, package: &str) -> GenerateResult<Annotation> {
        let qualified_name = self.annotation_name(&usage.name, package);

        let arguments = usage
            .arguments
            .iter()
            .map(|argument| {
                let context = format!("argument {} of @{}", argument.name, qualified_name);
                Ok(AnnotationArgument {
                    name: argument.name.clone(),
                    value: self.normalize(&argument.value, package, &context)?,
                })
            })
            .collect::<GenerateResult<Vec<_>>>()?;

        Ok(Annotation {
            qualified_name,
            arguments,
        })
    }

    fn normalize(
        &self,
        value: &ArgumentValue,
        package: &str,
        context: &str,
    ) -> GenerateResult<AnnotationValue> {
        Ok(match value {
            ArgumentValue::Bool(value) => AnnotationValue::Bool(*value),
            ArgumentValue::Integer(value) => AnnotationValue::Integer(*value),
            ArgumentValue::Float(value) => AnnotationValue::Float(*value),
            ArgumentValue::Double(value) => AnnotationValue::Double(*value),
            ArgumentValue::String(value) => AnnotationValue::String(value.clone()),
            ArgumentValue::Char(value) => AnnotationValue::Char(*value),
            ArgumentValue::Reference(name) => {
                AnnotationValue::Reference(self.reference(name, package, context)?)
            }
            ArgumentValue::Array(values) => AnnotationValue::Array(
                values
                    .iter()
                    .map(|value| self.normalize(value, package, context))
                    .collect::<GenerateResult<Vec<_>>>()?,
            ),
            ArgumentValue::Expression(text) => AnnotationValue::Unsupported(text.clone()),
        })
    }

    fn reference(&self, name: &str, package: &str, context: &str) -> GenerateResult<DeclarationRef> {
        let qualified_name = self.resolver.resolve_name(name, package).ok_or_else(|| {
            GenerateError::UnresolvedType {
                name: name.to_string(),
                context: context.to_string(),
                property: None,
            }
        })?;

        let kind = match self.resolver.graph().get(&qualified_name).map(|d| d.kind) {
            Some(DeclarationKind::EnumEntry) => RefKind::EnumConstant,
            Some(DeclarationKind::Object) => RefKind::Singleton,
            _ => RefKind::Class,
        };

        Ok(DeclarationRef {
            qualified_name,
            kind,
        })
    }
}
