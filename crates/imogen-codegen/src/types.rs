//! Type reference resolution.
//!
//! Turns a [`TypeUsage`] as written at a use site into a normalized
//! [`TypeName`]: qualified base name, resolved generic arguments and the
//! nullability flag.
//!
//! # Resolution order
//!
//! A written name is looked up as:
//!
//! 1. a qualified name present in the [`DeclarationGraph`]
//! 2. a name relative to the use site's package
//! 3. a Kotlin built-in (`String` → `kotlin.String`, `List` → `kotlin.collections.List`)
//!
//! A top-level type that resolves nowhere is kept as written, so a contract can
//! mention types the host did not export. Generic arguments must resolve;
//! emitting a guessed argument would produce a malformed reference.

use crate::naming::{package_of, qualify, simple_name};
use imogen_core::{Declaration, DeclarationGraph, GenerateError, GenerateResult, TypeUsage};
use std::fmt;

/// Kotlin types available without an import
const BUILTIN_TYPES: &[&str] = &[
    "kotlin.Any",
    "kotlin.Array",
    "kotlin.Boolean",
    "kotlin.Byte",
    "kotlin.Char",
    "kotlin.CharSequence",
    "kotlin.Double",
    "kotlin.Float",
    "kotlin.Int",
    "kotlin.Long",
    "kotlin.Nothing",
    "kotlin.Number",
    "kotlin.Short",
    "kotlin.String",
    "kotlin.Unit",
    "kotlin.collections.Collection",
    "kotlin.collections.Iterable",
    "kotlin.collections.List",
    "kotlin.collections.Map",
    "kotlin.collections.MutableCollection",
    "kotlin.collections.MutableIterable",
    "kotlin.collections.MutableList",
    "kotlin.collections.MutableMap",
    "kotlin.collections.MutableSet",
    "kotlin.collections.Set",
];

/// Packages whose members are imported by default
pub const DEFAULT_IMPORTS: &[&str] = &["kotlin", "kotlin.collections"];

/// A normalized type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    /// Qualified name of the base type
    pub qualified_name: String,

    /// Resolved generic arguments
    pub arguments: Vec<TypeName>,

    /// Whether the reference is nullable
    pub nullable: bool,
}

impl TypeName {
    /// A non-nullable type without arguments
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// Add a generic argument
    pub fn with_argument(mut self, argument: TypeName) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Copy of this type with the given nullability
    pub fn with_nullable(&self, nullable: bool) -> Self {
        Self {
            nullable,
            ..self.clone()
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    pub fn package(&self) -> &str {
        package_of(&self.qualified_name)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name)?;
        if !self.arguments.is_empty() {
            write!(f, "<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument}")?;
            }
            write!(f, ">")?;
        }
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Check whether a qualified name is a Kotlin built-in type.
pub fn is_builtin(qualified_name: &str) -> bool {
    BUILTIN_TYPES.contains(&qualified_name)
}

/// Resolves written names and types against a declaration graph.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'g> {
    graph: &'g DeclarationGraph,
}

impl<'g> TypeResolver<'g> {
    pub fn new(graph: &'g DeclarationGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g DeclarationGraph {
        self.graph
    }

    /// Resolve a written name to a qualified name, as seen from `package`.
    pub fn resolve_name(&self, name: &str, package: &str) -> Option<String> {
        if self.graph.get(name).is_some() {
            return Some(name.to_string());
        }

        if !package.is_empty() {
            let relative = qualify(package, name);
            if self.graph.get(&relative).is_some() {
                return Some(relative);
            }
        }

        if is_builtin(name) {
            return Some(name.to_string());
        }

        DEFAULT_IMPORTS
            .iter()
            .map(|import| qualify(import, name))
            .find(|candidate| is_builtin(candidate))
    }

    /// Resolve a written name to a declaration in the graph.
    pub fn declaration(&self, name: &str, package: &str) -> Option<&'g Declaration> {
        self.resolve_name(name, package)
            .and_then(|qualified| self.graph.get(&qualified))
    }

    /// Resolve a type usage written in `package`.
    ///
    /// `context` names the use site for error messages (e.g. `property items of com.example.Sample`).
    pub fn resolve(
        &self,
        usage: &TypeUsage,
        package: &str,
        context: &str,
    ) -> GenerateResult<TypeName> {
        let qualified_name = match self.resolve_name(&usage.name, package) {
            Some(qualified) => qualified,
            None => {
                tracing::warn!(
                    name = %usage.name,
                    context,
                    "type is not known to the declaration graph, keeping it as written"
                );
                usage.name.clone()
            }
        };

        Ok(TypeName {
            qualified_name,
            arguments: self.resolve_arguments(usage, package, context)?,
            nullable: usage.nullable,
        })
    }

    /// Resolve a type usage whose base type must be known.
    pub fn resolve_strict(
        &self,
        usage: &TypeUsage,
        package: &str,
        context: &str,
    ) -> GenerateResult<TypeName> {
        let qualified_name = self.resolve_name(&usage.name, package).ok_or_else(|| {
            GenerateError::UnresolvedType {
                name: usage.name.clone(),
                context: context.to_string(),
                property: None,
            }
        })?;

        Ok(TypeName {
            qualified_name,
            arguments: self.resolve_arguments(usage, package, context)?,
            nullable: usage.nullable,
        })
    }

    fn resolve_arguments(
        &self,
        usage: &TypeUsage,
        package: &str,
        context: &str,
    ) -> GenerateResult<Vec<TypeName>> {
        usage
            .arguments
            .iter()
            .map(|argument| self.resolve_strict(argument, package, context))
            .collect()
    }
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
