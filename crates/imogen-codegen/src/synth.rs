//! Annotation classification and member synthesis.
//!
//! Each property of a [`ModelDescriptor`] is governed by exactly one behavior:
//!
//! | Behavior | Constructor parameter | Property initializer |
//! |----------|-----------------------|----------------------|
//! | plain    | yes                   | the parameter        |
//! | default  | yes, with a default   | the parameter        |
//! | derived  | no                    | the `from` expression |
//!
//! A derived tag takes priority over a default tag, but a property carrying
//! both is rejected. `Create` tags add extra properties on top of the
//! governing behavior, and unrecognized tags are copied onto the generated
//! property.

use crate::annotations::{Annotation, AnnotationValue, RefKind};
use crate::descriptor::{ModelDescriptor, PropertyDescriptor};
use crate::naming::{decapitalize, simple_name};
use crate::spec::{
    AnnotationSpec, ConstructorSpec, Expression, NamedArgument, ParameterSpec, PropertyInitializer,
    PropertySpec, Supertype, TypeSpec,
};
use crate::tags::{LiteralKind, MODIFY_FUNCTION, PROVIDE_FUNCTION, TagKind, TagTable, args};
use crate::types::{TypeName, TypeResolver};
use imogen_core::{GenerateError, GenerateResult, GeneratorConfig, TypeUsage};

/// A property whose value is computed rather than supplied
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedProperty {
    pub name: String,
    pub ty: TypeName,

    /// Expression copied from the tag's `from` argument
    pub derive_from: String,
}

/// Result of synthesizing the primary generated type
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub type_spec: TypeSpec,
    pub derived: Vec<DerivedProperty>,
}

/// How a property's value is supplied
#[derive(Debug, Clone, PartialEq)]
enum Governing {
    Plain,
    Default(Expression),
    Derived(String),
}

/// A property after classification of its tags
#[derive(Debug)]
struct ClassifiedProperty<'d> {
    property: &'d PropertyDescriptor,
    governing: Governing,
    created: Vec<PropertySpec>,
    passthrough: Vec<AnnotationSpec>,
}

/// Builds the primary generated type of a [`ModelDescriptor`].
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    resolver: TypeResolver<'a>,
    tags: &'a TagTable,
    config: &'a GeneratorConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(resolver: TypeResolver<'a>, tags: &'a TagTable, config: &'a GeneratorConfig) -> Self {
        Self {
            resolver,
            tags,
            config,
        }
    }

    /// Synthesize the type implementing `descriptor.source_interface`.
    pub fn synthesize(&self, descriptor: &ModelDescriptor) -> GenerateResult<Synthesis> {
        let classified = descriptor
            .properties
            .iter()
            .map(|property| self.classify(property))
            .collect::<GenerateResult<Vec<_>>>()?;

        let mut primary_constructor = Vec::new();
        let mut properties = Vec::new();
        let mut derived = Vec::new();

        for entry in classified {
            let ClassifiedProperty {
                property,
                governing,
                created,
                passthrough,
            } = entry;

            let initializer = match governing {
                Governing::Plain => {
                    primary_constructor.push(ParameterSpec::new(&property.name, property.ty.clone()));
                    PropertyInitializer::ConstructorParameter
                }
                Governing::Default(default_value) => {
                    primary_constructor.push(ParameterSpec {
                        name: property.name.clone(),
                        ty: property.ty.clone(),
                        default_value: Some(default_value),
                    });
                    PropertyInitializer::ConstructorParameter
                }
                Governing::Derived(expression) => {
                    derived.push(DerivedProperty {
                        name: property.name.clone(),
                        ty: property.ty.clone(),
                        derive_from: expression.clone(),
                    });
                    PropertyInitializer::Expression(Expression::Verbatim(expression))
                }
            };

            properties.push(PropertySpec {
                name: property.name.clone(),
                ty: property.ty.clone(),
                is_override: true,
                initializer,
                annotations: passthrough,
            });

            // After the source property so a derived source is initialized first
            properties.extend(created);
        }

        let parameter_name = decapitalize(descriptor.source_interface.simple_name());
        let conversion = ConstructorSpec {
            parameters: vec![ParameterSpec::new(
                &parameter_name,
                descriptor.source_interface.clone(),
            )],
            delegation_arguments: primary_constructor
                .iter()
                .map(|parameter| {
                    NamedArgument::new(
                        &parameter.name,
                        Expression::Member {
                            receiver: parameter_name.clone(),
                            name: parameter.name.clone(),
                        },
                    )
                })
                .collect(),
        };

        let type_spec = TypeSpec {
            name: descriptor.class_name.clone(),
            is_data: self.config.data_classes && !primary_constructor.is_empty(),
            supertypes: vec![Supertype::implemented(descriptor.source_interface.clone())],
            primary_constructor,
            properties,
            secondary_constructors: vec![conversion],
        };

        Ok(Synthesis { type_spec, derived })
    }

    fn classify<'d>(&self, property: &'d PropertyDescriptor) -> GenerateResult<ClassifiedProperty<'d>> {
        let mut defaults = Vec::new();
        let mut derives = Vec::new();
        let mut created = Vec::new();
        let mut passthrough = Vec::new();

        for annotation in &property.annotations {
            match self.tags.kind(&annotation.qualified_name) {
                Some(kind) if kind.is_default_value() => defaults.push((kind, annotation)),
                Some(TagKind::Derived) => derives.push(annotation),
                Some(TagKind::Create) => created.push(self.created_property(property, annotation)?),
                Some(_) => {
                    tracing::warn!(
                        property = %property.name,
                        annotation = %annotation.qualified_name,
                        "class-level annotation on a property is ignored"
                    );
                }
                None => passthrough.push(passthrough_annotation(property, annotation)?),
            }
        }

        if defaults.len() + derives.len() > 1 {
            return Err(GenerateError::ConflictingAnnotations {
                property: property.name.clone(),
                annotations: defaults
                    .iter()
                    .map(|(_, annotation)| annotation.qualified_name.clone())
                    .chain(derives.iter().map(|annotation| annotation.qualified_name.clone()))
                    .collect(),
            });
        }

        let governing = if let Some(annotation) = derives.first() {
            let text = match required(property, annotation, args::FROM)? {
                AnnotationValue::String(text) => text.clone(),
                other => return Err(unsupported(property, annotation, args::FROM, other)),
            };
            Governing::Derived(text)
        } else if let Some((kind, annotation)) = defaults.first() {
            Governing::Default(self.default_value(property, *kind, annotation)?)
        } else {
            Governing::Plain
        };

        tracing::debug!(
            property = %property.name,
            governing = ?governing,
            created = created.len(),
            passthrough = passthrough.len(),
            "classified property"
        );

        Ok(ClassifiedProperty {
            property,
            governing,
            created,
            passthrough,
        })
    }

    fn default_value(
        &self,
        property: &PropertyDescriptor,
        kind: TagKind,
        annotation: &Annotation,
    ) -> GenerateResult<Expression> {
        let argument = kind.value_argument();
        let value = required(property, annotation, argument)?;

        match kind {
            TagKind::LiteralDefault(literal) => {
                if literal_matches(literal, value) && value.is_renderable() {
                    Ok(Expression::Literal(value.clone()))
                } else {
                    Err(unsupported(property, annotation, argument, value))
                }
            }
            TagKind::ProviderDefault => {
                let receiver = singleton(property, annotation, argument, value, "ValueProvider")?;
                Ok(Expression::Call {
                    receiver,
                    function: PROVIDE_FUNCTION.to_string(),
                    arguments: Vec::new(),
                })
            }
            _ => Err(unsupported(property, annotation, argument, value)),
        }
    }

    /// Extra property produced by a `Create` tag
    fn created_property(
        &self,
        property: &PropertyDescriptor,
        annotation: &Annotation,
    ) -> GenerateResult<PropertySpec> {
        let new_name = match required(property, annotation, args::NEW_PROP)? {
            AnnotationValue::String(name) if !name.is_empty() => name.clone(),
            other => return Err(unsupported(property, annotation, args::NEW_PROP, other)),
        };

        let value = required(property, annotation, args::VALUE_MODIFIER)?;
        let modifier = singleton(property, annotation, args::VALUE_MODIFIER, value, "ValueModifier")?;
        let (input, output) = self.modifier_signature(property, &modifier)?;

        if input != property.ty {
            return Err(GenerateError::UnsupportedType {
                property: property.name.clone(),
                transform: modifier,
                expected: input.to_string(),
                actual: property.ty.to_string(),
            });
        }

        tracing::debug!(
            property = %property.name,
            created = %new_name,
            modifier = %modifier,
            "created property"
        );

        Ok(PropertySpec {
            name: new_name,
            ty: output,
            is_override: false,
            initializer: PropertyInitializer::Expression(Expression::Call {
                receiver: modifier,
                function: MODIFY_FUNCTION.to_string(),
                arguments: vec![Expression::Name(property.name.clone())],
            }),
            annotations: Vec::new(),
        })
    }

    /// Input and output type arguments of the modifier's `ValueModifier` supertype
    fn modifier_signature(
        &self,
        property: &PropertyDescriptor,
        modifier: &str,
    ) -> GenerateResult<(TypeName, TypeName)> {
        let value_modifier = self.tags.value_modifier();
        let mismatch = || GenerateError::UnsupportedType {
            property: property.name.clone(),
            transform: modifier.to_string(),
            expected: format!("{value_modifier}<{}, _>", property.ty),
            actual: "no ValueModifier supertype".to_string(),
        };

        let declaration = self.resolver.graph().get(modifier).ok_or_else(mismatch)?;
        let supertype = declaration
            .supertypes
            .iter()
            .find(|supertype| {
                self.supertype_name(&supertype.name, &declaration.package) == value_modifier
            })
            .ok_or_else(mismatch)?;

        let [input, output] = supertype.arguments.as_slice() else {
            return Err(mismatch());
        };

        let context = format!("supertypes of {modifier}");
        let resolve = |usage: &TypeUsage| {
            self.resolver
                .resolve_strict(usage, &declaration.package, &context)
                .map_err(|e| e.on_property(&property.name))
        };
        Ok((resolve(input)?, resolve(output)?))
    }

    /// Qualified name of a supertype written in `package`.
    ///
    /// An unresolved bare `ValueModifier` or `ValueProvider` refers to the
    /// configured annotations package.
    fn supertype_name(&self, name: &str, package: &str) -> String {
        if let Some(qualified) = self.resolver.resolve_name(name, package) {
            return qualified;
        }
        [self.tags.value_modifier(), self.tags.value_provider()]
            .into_iter()
            .find(|qualified| simple_name(qualified) == name)
            .unwrap_or(name)
            .to_string()
    }
}

/// Whether a literal value fits the tag's literal kind
fn literal_matches(kind: LiteralKind, value: &AnnotationValue) -> bool {
    match (kind, value) {
        (LiteralKind::Boolean, AnnotationValue::Bool(_)) => true,
        (LiteralKind::Byte, AnnotationValue::Integer(value)) => i8::try_from(*value).is_ok(),
        (LiteralKind::Short, AnnotationValue::Integer(value)) => i16::try_from(*value).is_ok(),
        (LiteralKind::Int, AnnotationValue::Integer(value)) => i32::try_from(*value).is_ok(),
        (LiteralKind::Long, AnnotationValue::Integer(_)) => true,
        (LiteralKind::Char, AnnotationValue::Char(_)) => true,
        (LiteralKind::Float, AnnotationValue::Float(_)) => true,
        (LiteralKind::Double, AnnotationValue::Double(_)) => true,
        (LiteralKind::String, AnnotationValue::String(_)) => true,
        _ => false,
    }
}

/// Copy an unrecognized annotation onto the generated property
fn passthrough_annotation(
    property: &PropertyDescriptor,
    annotation: &Annotation,
) -> GenerateResult<AnnotationSpec> {
    let members = annotation
        .arguments
        .iter()
        .map(|argument| {
            if argument.value.is_renderable() {
                Ok(NamedArgument::new(
                    &argument.name,
                    Expression::Literal(argument.value.clone()),
                ))
            } else {
                Err(unsupported(property, annotation, &argument.name, &argument.value))
            }
        })
        .collect::<GenerateResult<Vec<_>>>()?;

    Ok(AnnotationSpec {
        qualified_name: annotation.qualified_name.clone(),
        members,
    })
}

fn required<'v>(
    property: &PropertyDescriptor,
    annotation: &'v Annotation,
    argument: &str,
) -> GenerateResult<&'v AnnotationValue> {
    annotation
        .argument(argument)
        .ok_or_else(|| GenerateError::MissingArgument {
            annotation: annotation.qualified_name.clone(),
            property: property.name.clone(),
            argument: argument.to_string(),
        })
}

/// Qualified name of a referenced `object`
fn singleton(
    property: &PropertyDescriptor,
    annotation: &Annotation,
    argument: &str,
    value: &AnnotationValue,
    role: &str,
) -> GenerateResult<String> {
    match value {
        AnnotationValue::Reference(reference) if reference.kind == RefKind::Singleton => {
            Ok(reference.qualified_name.clone())
        }
        AnnotationValue::Reference(reference) => Err(GenerateError::NotASingleton {
            property: property.name.clone(),
            reference: reference.qualified_name.clone(),
            role: role.to_string(),
        }),
        other => Err(unsupported(property, annotation, argument, other)),
    }
}

fn unsupported(
    property: &PropertyDescriptor,
    annotation: &Annotation,
    argument: &str,
    value: &AnnotationValue,
) -> GenerateError {
    GenerateError::UnsupportedValue {
        annotation: annotation.qualified_name.clone(),
        argument: argument.to_string(),
        value: value.to_string(),
        property: Some(property.name.clone()),
    }
}
