//! Model descriptors.
//!
//! A [`ModelDescriptor`] is the normalized, immutable view of one annotated
//! interface: the generation directive, the resolved properties (own first,
//! then inherited) and the interfaces it directly extends.

use crate::annotations::{Annotation, AnnotationExtractor, AnnotationValue};
use crate::naming::qualify;
use crate::tags::{TagKind, TagTable, args};
use crate::types::{TypeName, TypeResolver};
use imogen_core::{Declaration, DeclarationKind, GenerateError, GenerateResult};
use std::collections::HashSet;

/// A property of the source interface
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: TypeName,
    pub annotations: Vec<Annotation>,

    /// Qualified name of the interface that declares the property
    pub declared_in: String,
}

/// Arguments of the class-level generation directive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateDirective {
    pub name: String,
    pub prefix: String,
    pub suffix: String,
    pub delegated_class: bool,
}

impl GenerateDirective {
    /// Read the directive from a normalized `Generate` annotation
    pub fn from_annotation(annotation: &Annotation) -> GenerateResult<Self> {
        let string = |argument: &str| -> GenerateResult<String> {
            match annotation.argument(argument) {
                None => Ok(String::new()),
                Some(AnnotationValue::String(value)) => Ok(value.clone()),
                Some(other) => Err(unsupported(annotation, argument, other)),
            }
        };

        let delegated_class = match annotation.argument(args::DELEGATED_CLASS) {
            None => false,
            Some(AnnotationValue::Bool(value)) => *value,
            Some(other) => return Err(unsupported(annotation, args::DELEGATED_CLASS, other)),
        };

        Ok(Self {
            name: string(args::NAME)?,
            prefix: string(args::PREFIX)?,
            suffix: string(args::SUFFIX)?,
            delegated_class,
        })
    }

    /// `prefix + name + suffix`
    pub fn class_name(&self) -> String {
        format!("{}{}{}", self.prefix, self.name, self.suffix)
    }
}

fn unsupported(annotation: &Annotation, argument: &str, value: &AnnotationValue) -> GenerateError {
    GenerateError::UnsupportedValue {
        annotation: annotation.qualified_name.clone(),
        argument: argument.to_string(),
        value: value.to_string(),
        property: None,
    }
}

/// Everything the synthesizer needs to know about one annotated interface
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    pub package_name: String,

    /// `prefix + name + suffix` of the directive
    pub class_name: String,

    /// The annotated interface
    pub source_interface: TypeName,

    /// Direct supertypes that are interfaces, in declaration order
    pub inherited_interfaces: Vec<TypeName>,

    pub properties: Vec<PropertyDescriptor>,

    /// Emit the delegation variant as well
    pub delegated_class: bool,

    /// Source units the descriptor was built from
    pub originating_files: Vec<String>,
}

impl ModelDescriptor {
    /// Build the descriptor for `declaration`, generated into `package_name`.
    pub fn build(
        resolver: TypeResolver<'_>,
        tags: &TagTable,
        package_name: &str,
        declaration: &Declaration,
    ) -> GenerateResult<Self> {
        let qualified_name = declaration.qualified_name();

        if declaration.kind != DeclarationKind::Interface {
            return Err(GenerateError::NotAnInterface {
                declaration: qualified_name,
                kind: declaration.kind.to_string(),
            });
        }

        let extractor = AnnotationExtractor::new(resolver, tags);
        let class_annotations = extractor.extract(&declaration.annotations, &declaration.package)?;
        let directive = match class_annotations
            .iter()
            .find(|annotation| tags.kind(&annotation.qualified_name) == Some(TagKind::Generate))
        {
            Some(annotation) => GenerateDirective::from_annotation(annotation)?,
            None => GenerateDirective::default(),
        };

        let class_name = directive.class_name();
        if directive.name.is_empty() || class_name == declaration.simple_name() {
            return Err(GenerateError::InvalidName {
                declaration: qualified_name,
                name: class_name,
            });
        }

        let inherited_interfaces = declaration
            .supertypes
            .iter()
            .filter_map(|supertype| {
                let parent = resolver.declaration(&supertype.name, &declaration.package)?;
                (parent.kind == DeclarationKind::Interface).then_some(supertype)
            })
            .map(|supertype| {
                resolver.resolve(
                    supertype,
                    &declaration.package,
                    &format!("supertypes of {qualified_name}"),
                )
            })
            .collect::<GenerateResult<Vec<_>>>()?;

        let mut collector = PropertyCollector {
            resolver,
            extractor,
            seen_properties: HashSet::new(),
            visited: HashSet::new(),
            properties: Vec::new(),
            originating_files: Vec::new(),
        };
        collector.collect(declaration)?;

        tracing::debug!(
            declaration = %qualified_name,
            class_name = %class_name,
            properties = collector.properties.len(),
            inherited = inherited_interfaces.len(),
            "built model descriptor"
        );

        Ok(Self {
            package_name: package_name.to_string(),
            class_name,
            source_interface: TypeName::new(qualified_name),
            inherited_interfaces,
            properties: collector.properties,
            delegated_class: directive.delegated_class,
            originating_files: collector.originating_files,
        })
    }

    /// Qualified name of the generated class
    pub fn qualified_class_name(&self) -> String {
        qualify(&self.package_name, &self.class_name)
    }
}

/// Walks an interface and its parents collecting properties
struct PropertyCollector<'a> {
    resolver: TypeResolver<'a>,
    extractor: AnnotationExtractor<'a>,
    seen_properties: HashSet<String>,
    visited: HashSet<String>,
    properties: Vec<PropertyDescriptor>,
    originating_files: Vec<String>,
}

impl PropertyCollector<'_> {
    fn collect(&mut self, declaration: &Declaration) -> GenerateResult<()> {
        let qualified_name = declaration.qualified_name();
        if !self.visited.insert(qualified_name.clone()) {
            return Ok(());
        }

        let mut contributed = false;
        for property in &declaration.properties {
            if !self.seen_properties.insert(property.name.clone()) {
                continue;
            }
            contributed = true;

            let context = format!("property {} of {}", property.name, qualified_name);
            self.properties.push(PropertyDescriptor {
                name: property.name.clone(),
                ty: self
                    .resolver
                    .resolve(&property.ty, &declaration.package, &context)
                    .map_err(|e| e.on_property(&property.name))?,
                annotations: self
                    .extractor
                    .extract(&property.annotations, &declaration.package)
                    .map_err(|e| e.on_property(&property.name))?,
                declared_in: qualified_name.clone(),
            });
        }

        let is_root = self.visited.len() == 1;
        if let Some(source_file) = &declaration.source_file
            && (is_root || contributed)
            && !self.originating_files.contains(source_file)
        {
            self.originating_files.push(source_file.clone());
        }

        for supertype in &declaration.supertypes {
            if let Some(parent) = self
                .resolver
                .declaration(&supertype.name, &declaration.package)
                .filter(|parent| parent.kind == DeclarationKind::Interface)
            {
                self.collect(parent)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "descriptor/descriptor_tests.rs"]
mod descriptor_tests;
