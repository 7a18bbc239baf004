//! Kotlin source rendering.
//!
//! Serializes a [`FileSpec`] to Kotlin source. Output is a pure function of
//! the file spec and the indent unit, so identical input renders byte-identical
//! files.
//!
//! Types from `kotlin`, `kotlin.collections` and the file's own package are
//! written by simple name; everything else is fully qualified, so the file
//! needs no imports. A default-import type whose simple name is also declared
//! in the file's package stays qualified, since the package declaration wins.

pub mod literal;

use crate::naming::package_of;
use crate::spec::{
    AnnotationSpec, ConstructorSpec, Expression, FileSpec, ParameterSpec, PropertyInitializer,
    PropertySpec, Supertype, TypeSpec,
};
use crate::types::{DEFAULT_IMPORTS, TypeName};
use std::collections::BTreeSet;
use std::fmt::Write;

/// File extension of rendered sources
pub const EXTENSION: &str = "kt";

/// Render a file using `indent` as the indentation unit.
pub fn render_file(file: &FileSpec, indent: &str) -> String {
    let mut package_names = file.package_names.clone();
    package_names.extend(file.types.iter().map(|type_spec| type_spec.name.clone()));

    let mut writer = KotlinWriter {
        out: String::new(),
        indent,
        package: &file.package,
        package_names: &package_names,
    };
    writer.file(file);
    writer.out
}

/// Render a type reference as seen from `package`.
///
/// `package_names` are the simple names declared in `package`.
pub fn type_name(ty: &TypeName, package: &str, package_names: &BTreeSet<String>) -> String {
    let mut out = short_name(&ty.qualified_name, package, package_names).to_string();
    if !ty.arguments.is_empty() {
        out.push('<');
        for (i, argument) in ty.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&type_name(argument, package, package_names));
        }
        out.push('>');
    }
    if ty.nullable {
        out.push('?');
    }
    out
}

fn short_name<'n>(
    qualified_name: &'n str,
    package: &str,
    package_names: &BTreeSet<String>,
) -> &'n str {
    let owner = package_of(qualified_name);
    if owner.is_empty() {
        return qualified_name;
    }

    let simple = &qualified_name[owner.len() + 1..];
    let visible = owner == package
        || (DEFAULT_IMPORTS.contains(&owner) && !package_names.contains(simple));
    if visible { simple } else { qualified_name }
}

/// Render an expression.
pub fn expression(expr: &Expression) -> String {
    match expr {
        Expression::Literal(value) => literal::render(value),
        Expression::Name(name) => name.clone(),
        Expression::Member { receiver, name } => format!("{receiver}.{name}"),
        Expression::Call {
            receiver,
            function,
            arguments,
        } => {
            let arguments: Vec<String> = arguments.iter().map(expression).collect();
            format!("{receiver}.{function}({})", arguments.join(", "))
        }
        Expression::Verbatim(text) => text.clone(),
    }
}

struct KotlinWriter<'a> {
    out: String,
    indent: &'a str,
    package: &'a str,
    package_names: &'a BTreeSet<String>,
}

impl KotlinWriter<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(self.indent);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn ty(&self, ty: &TypeName) -> String {
        type_name(ty, self.package, self.package_names)
    }

    fn file(&mut self, file: &FileSpec) {
        if !file.package.is_empty() {
            self.line(0, &format!("package {}", file.package));
        }

        for type_spec in &file.types {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            self.type_spec(type_spec);
        }
    }

    fn type_spec(&mut self, type_spec: &TypeSpec) {
        let (in_constructor, in_body): (Vec<&PropertySpec>, Vec<&PropertySpec>) =
            type_spec.properties.iter().partition(|property| {
                property.initializer == PropertyInitializer::ConstructorParameter
                    && type_spec.parameter(&property.name).is_some()
            });

        let keyword = if type_spec.is_data {
            "data class"
        } else {
            "class"
        };
        let header = format!("{keyword} {}(", type_spec.name);

        if type_spec.primary_constructor.is_empty() {
            self.out.push_str(&header);
        } else {
            self.line(0, &header);
            for parameter in &type_spec.primary_constructor {
                let property = in_constructor
                    .iter()
                    .find(|property| property.name == parameter.name);
                self.constructor_parameter(parameter, property.copied());
            }
        }
        self.out.push(')');

        if !type_spec.supertypes.is_empty() {
            let supertypes: Vec<String> = type_spec
                .supertypes
                .iter()
                .map(|supertype| self.supertype(supertype))
                .collect();
            let _ = write!(self.out, " : {}", supertypes.join(", "));
        }

        if in_body.is_empty() && type_spec.secondary_constructors.is_empty() {
            self.out.push('\n');
            return;
        }

        self.out.push_str(" {\n");
        let mut first = true;
        for property in in_body {
            if !first {
                self.out.push('\n');
            }
            first = false;
            self.body_property(property);
        }
        for constructor in &type_spec.secondary_constructors {
            if !first {
                self.out.push('\n');
            }
            first = false;
            self.secondary_constructor(constructor);
        }
        self.line(0, "}");
    }

    fn supertype(&self, supertype: &Supertype) -> String {
        match &supertype.delegate {
            Some(delegate) => format!("{} by {delegate}", self.ty(&supertype.ty)),
            None => self.ty(&supertype.ty),
        }
    }

    fn constructor_parameter(&mut self, parameter: &ParameterSpec, property: Option<&PropertySpec>) {
        let mut text = String::new();
        if let Some(property) = property {
            self.annotations(1, &property.annotations);
            text.push_str(modifiers(property));
        }
        let _ = write!(text, "{}: {}", parameter.name, self.ty(&parameter.ty));
        if let Some(default_value) = &parameter.default_value {
            let _ = write!(text, " = {}", expression(default_value));
        }
        text.push(',');
        self.line(1, &text);
    }

    fn body_property(&mut self, property: &PropertySpec) {
        self.annotations(1, &property.annotations);
        let mut text = format!(
            "{}{}: {}",
            modifiers(property),
            property.name,
            self.ty(&property.ty)
        );
        match &property.initializer {
            PropertyInitializer::Expression(initializer) => {
                let _ = write!(text, " = {}", expression(initializer));
            }
            PropertyInitializer::ConstructorParameter => {
                let _ = write!(text, " = {}", property.name);
            }
        }
        self.line(1, &text);
    }

    fn secondary_constructor(&mut self, constructor: &ConstructorSpec) {
        let parameters: Vec<String> = constructor
            .parameters
            .iter()
            .map(|parameter| format!("{}: {}", parameter.name, self.ty(&parameter.ty)))
            .collect();
        let header = format!("constructor({}) : this(", parameters.join(", "));

        if constructor.delegation_arguments.is_empty() {
            self.line(1, &format!("{header})"));
            return;
        }

        self.line(1, &header);
        for argument in &constructor.delegation_arguments {
            self.line(
                2,
                &format!("{} = {},", argument.name, expression(&argument.value)),
            );
        }
        self.line(1, ")");
    }

    fn annotations(&mut self, depth: usize, annotations: &[AnnotationSpec]) {
        for annotation in annotations {
            let mut text = format!("@{}", short_name(
                &annotation.qualified_name,
                self.package,
                self.package_names,
            ));
            if !annotation.members.is_empty() {
                let members: Vec<String> = annotation
                    .members
                    .iter()
                    .map(|member| format!("{} = {}", member.name, expression(&member.value)))
                    .collect();
                let _ = write!(text, "({})", members.join(", "));
            }
            self.line(depth, &text);
        }
    }
}

fn modifiers(property: &PropertySpec) -> &'static str {
    if property.is_override {
        "override val "
    } else {
        "val "
    }
}
