//! Declarations from Rust source
//!
//! Parses a Rust source file with `syn` and lowers its items to the
//! declaration model:
//! - a trait is an interface; supertraits are its supertypes and every
//!   `fn name(&self) -> T;` item is a property
//! - a unit struct is a singleton, any other struct a class
//! - an enum is an enum class with one entry per variant
//! - `impl ValueProvider<T> for X {}` and `impl ValueModifier<I, O> for X {}`
//!   add the trait as a supertype of `X`
//!
//! Attributes whose name starts with an uppercase letter become annotations
//! and `#[generate(...)]` is the generation directive. Snake-case property
//! and argument names are written in camelCase.

use anyhow::{Context, Result, bail};
use darling::FromMeta;
use imogen::naming::{qualify, to_camel_case};
use imogen::{
    AnnotationUsage, ArgumentValue, Declaration, DeclarationGraph, DeclarationKind,
    PropertyDeclaration, TypeUsage,
};
use proc_macro2::TokenStream;
use quote::ToTokens;
use std::fs;
use std::path::Path;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Expr, Fields, FnArg, GenericArgument, Item, Lit, Meta, MetaList, MetaNameValue,
    PathArguments, ReturnType, Token, TraitItem, TraitItemFn, Type, TypeParamBound, UnOp,
};

/// Type mapping from Rust to Kotlin
struct TypeMapping {
    rust_type: &'static str,
    kotlin_type: &'static str,
}

const TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping {
        rust_type: "String",
        kotlin_type: "String",
    },
    TypeMapping {
        rust_type: "str",
        kotlin_type: "String",
    },
    TypeMapping {
        rust_type: "bool",
        kotlin_type: "Boolean",
    },
    TypeMapping {
        rust_type: "char",
        kotlin_type: "Char",
    },
    TypeMapping {
        rust_type: "i8",
        kotlin_type: "Byte",
    },
    TypeMapping {
        rust_type: "i16",
        kotlin_type: "Short",
    },
    TypeMapping {
        rust_type: "i32",
        kotlin_type: "Int",
    },
    TypeMapping {
        rust_type: "i64",
        kotlin_type: "Long",
    },
    TypeMapping {
        rust_type: "isize",
        kotlin_type: "Long",
    },
    // Unsigned integers widen to the next signed type
    TypeMapping {
        rust_type: "u8",
        kotlin_type: "Short",
    },
    TypeMapping {
        rust_type: "u16",
        kotlin_type: "Int",
    },
    TypeMapping {
        rust_type: "u32",
        kotlin_type: "Long",
    },
    TypeMapping {
        rust_type: "u64",
        kotlin_type: "Long",
    },
    TypeMapping {
        rust_type: "usize",
        kotlin_type: "Long",
    },
    TypeMapping {
        rust_type: "f32",
        kotlin_type: "Float",
    },
    TypeMapping {
        rust_type: "f64",
        kotlin_type: "Double",
    },
    TypeMapping {
        rust_type: "Vec",
        kotlin_type: "List",
    },
    TypeMapping {
        rust_type: "VecDeque",
        kotlin_type: "List",
    },
    TypeMapping {
        rust_type: "HashMap",
        kotlin_type: "Map",
    },
    TypeMapping {
        rust_type: "BTreeMap",
        kotlin_type: "Map",
    },
    TypeMapping {
        rust_type: "HashSet",
        kotlin_type: "Set",
    },
    TypeMapping {
        rust_type: "BTreeSet",
        kotlin_type: "Set",
    },
];

/// Smart pointers that are written as their pointee
const TRANSPARENT_WRAPPERS: &[&str] = &["Box", "Rc", "Arc"];

/// Traits whose implementations are recorded even when declared elsewhere
const SUPERTYPE_TRAITS: &[&str] = &["ValueProvider", "ValueModifier"];

/// Attribute carrying the generation directive
const DIRECTIVE: &str = "generate";

/// Arguments of `#[generate(...)]`
#[derive(Debug, FromMeta)]
struct GenerateArgs {
    name: String,

    #[darling(default)]
    prefix: Option<String>,

    #[darling(default)]
    suffix: Option<String>,

    #[darling(default)]
    delegated_class: bool,
}

impl GenerateArgs {
    fn into_annotation(self) -> AnnotationUsage {
        let mut annotation =
            AnnotationUsage::new("Generate").with_argument("name", ArgumentValue::String(self.name));

        if let Some(prefix) = self.prefix {
            annotation = annotation.with_argument("prefix", ArgumentValue::String(prefix));
        }
        if let Some(suffix) = self.suffix {
            annotation = annotation.with_argument("suffix", ArgumentValue::String(suffix));
        }
        if self.delegated_class {
            annotation = annotation.with_argument("delegatedClass", ArgumentValue::Bool(true));
        }

        annotation
    }
}

/// A trait implementation seen before every declaration was known
struct PendingSupertype {
    target: String,
    package: String,
    supertype: TypeUsage,
}

/// Read the declarations of a Rust source file into `package`.
pub fn read_file(path: &Path, package: &str) -> Result<DeclarationGraph> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;

    // Lex errors carry spans and are not Send
    let tokens: TokenStream = source
        .parse()
        .map_err(|e| anyhow::anyhow!("Failed to parse Rust file: {}: {e}", path.display()))?;

    read_tokens(tokens, package, Some(&path.display().to_string()))
        .with_context(|| format!("Failed to read declarations from {}", path.display()))
}

/// Read declarations from a token stream holding a whole source file.
pub fn read_tokens(
    tokens: TokenStream,
    package: &str,
    source_file: Option<&str>,
) -> Result<DeclarationGraph> {
    let file: syn::File = syn::parse2(tokens).context("Failed to parse Rust tokens")?;

    SourceReader::new(source_file.map(str::to_string)).read(&file.items, package)
}

struct SourceReader {
    source_file: Option<String>,
    declarations: Vec<Declaration>,
    pending: Vec<PendingSupertype>,
}

impl SourceReader {
    fn new(source_file: Option<String>) -> Self {
        Self {
            source_file,
            declarations: Vec::new(),
            pending: Vec::new(),
        }
    }

    fn read(mut self, items: &[Item], package: &str) -> Result<DeclarationGraph> {
        self.items(items, package)?;
        self.apply_pending();

        tracing::debug!("Read {} declaration(s)", self.declarations.len());
        Ok(DeclarationGraph::new(self.declarations))
    }

    fn declaration(&self, package: &str, name: &str, kind: DeclarationKind) -> Declaration {
        let declaration = Declaration::new(package, name, kind);
        match &self.source_file {
            Some(source_file) => declaration.with_source_file(source_file.clone()),
            None => declaration,
        }
    }

    fn items(&mut self, items: &[Item], package: &str) -> Result<()> {
        for item in items {
            match item {
                Item::Trait(item) => {
                    let declaration = self.read_trait(item, package)?;
                    self.declarations.push(declaration);
                }
                Item::Struct(item) => {
                    let declaration = self.read_struct(item, package)?;
                    self.declarations.push(declaration);
                }
                Item::Enum(item) => self.read_enum(item, package)?,
                Item::Impl(item) => self.read_impl(item, package)?,
                Item::Mod(module) => {
                    if let Some((_, items)) = &module.content {
                        let package = qualify(package, &module.ident.unraw().to_string());
                        self.items(items, &package)?;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn read_trait(&self, item: &syn::ItemTrait, package: &str) -> Result<Declaration> {
        let name = item.ident.unraw().to_string();
        let mut declaration = self.declaration(package, &name, DeclarationKind::Interface);

        for bound in &item.supertraits {
            if let TypeParamBound::Trait(bound) = bound {
                let supertype = path_type(&bound.path)
                    .with_context(|| format!("Unsupported supertrait of {name}"))?;
                declaration = declaration.with_supertype(supertype);
            }
        }

        for annotation in annotations(&item.attrs).with_context(|| format!("In trait {name}"))? {
            declaration = declaration.with_annotation(annotation);
        }

        for trait_item in &item.items {
            let TraitItem::Fn(method) = trait_item else {
                continue;
            };

            match accessor_type(method) {
                Some(ty) => {
                    let property_name = to_camel_case(&method.sig.ident.unraw().to_string());
                    let ty = type_usage(ty)
                        .with_context(|| format!("In property {name}.{property_name}"))?;
                    let mut property = PropertyDeclaration::new(&property_name, ty);
                    for annotation in annotations(&method.attrs)
                        .with_context(|| format!("In property {name}.{property_name}"))?
                    {
                        property = property.with_annotation(annotation);
                    }
                    declaration = declaration.with_property(property);
                }
                None => tracing::warn!(
                    "Skipping {}::{}: not a property accessor",
                    name,
                    method.sig.ident
                ),
            }
        }

        Ok(declaration)
    }

    fn read_struct(&self, item: &syn::ItemStruct, package: &str) -> Result<Declaration> {
        let name = item.ident.unraw().to_string();
        let kind = match item.fields {
            Fields::Unit => DeclarationKind::Object,
            _ => DeclarationKind::Class,
        };
        let mut declaration = self.declaration(package, &name, kind);

        for annotation in annotations(&item.attrs).with_context(|| format!("In struct {name}"))? {
            declaration = declaration.with_annotation(annotation);
        }

        if let Fields::Named(fields) = &item.fields {
            for field in &fields.named {
                let Some(ident) = &field.ident else {
                    continue;
                };
                let field_name = to_camel_case(&ident.unraw().to_string());
                let ty = type_usage(&field.ty)
                    .with_context(|| format!("In field {name}.{field_name}"))?;
                declaration = declaration.with_property(PropertyDeclaration::new(field_name, ty));
            }
        }

        Ok(declaration)
    }

    fn read_enum(&mut self, item: &syn::ItemEnum, package: &str) -> Result<()> {
        let name = item.ident.unraw().to_string();
        let mut declaration = self.declaration(package, &name, DeclarationKind::Enum);

        for annotation in annotations(&item.attrs).with_context(|| format!("In enum {name}"))? {
            declaration = declaration.with_annotation(annotation);
        }
        self.declarations.push(declaration);

        for variant in &item.variants {
            let entry = format!("{name}.{}", variant.ident.unraw());
            let entry = self.declaration(package, &entry, DeclarationKind::EnumEntry);
            self.declarations.push(entry);
        }

        Ok(())
    }

    fn read_impl(&mut self, item: &syn::ItemImpl, package: &str) -> Result<()> {
        let Some((_, trait_path, _)) = &item.trait_ else {
            return Ok(());
        };
        let Type::Path(self_type) = item.self_ty.as_ref() else {
            return Ok(());
        };
        let Some(target) = self_type.path.segments.last() else {
            return Ok(());
        };

        let target = target.ident.unraw().to_string();
        let supertype = path_type(trait_path)
            .with_context(|| format!("Unsupported trait implemented by {target}"))?;

        self.pending.push(PendingSupertype {
            target,
            package: package.to_string(),
            supertype,
        });
        Ok(())
    }

    fn is_local_interface(&self, name: &str, package: &str) -> bool {
        let qualified = qualify(package, name);
        self.declarations.iter().any(|declaration| {
            declaration.kind == DeclarationKind::Interface
                && (declaration.qualified_name() == qualified
                    || declaration.qualified_name() == name)
        })
    }

    fn apply_pending(&mut self) {
        for pending in std::mem::take(&mut self.pending) {
            let trait_name = pending.supertype.name.rsplit('.').next().unwrap_or_default();
            if !SUPERTYPE_TRAITS.contains(&trait_name)
                && !self.is_local_interface(&pending.supertype.name, &pending.package)
            {
                continue;
            }

            let qualified = qualify(&pending.package, &pending.target);
            match self
                .declarations
                .iter_mut()
                .find(|declaration| declaration.qualified_name() == qualified)
            {
                Some(declaration) => declaration.supertypes.push(pending.supertype),
                None => tracing::warn!(
                    "Skipping impl {} for {}: type is not declared in this source",
                    pending.supertype.name,
                    qualified
                ),
            }
        }
    }
}

/// Return type of a `fn name(&self) -> T;` item
fn accessor_type(method: &TraitItemFn) -> Option<&Type> {
    let signature = &method.sig;
    let takes_only_self =
        signature.inputs.len() == 1 && matches!(signature.inputs.first(), Some(FnArg::Receiver(_)));

    if !takes_only_self || !signature.generics.params.is_empty() || method.default.is_some() {
        return None;
    }

    match &signature.output {
        ReturnType::Type(_, ty) => Some(ty.as_ref()),
        ReturnType::Default => None,
    }
}

/// Dotted name of a path, without `crate`, `self` and `super`
fn path_name(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|segment| segment.ident.unraw().to_string())
        .filter(|segment| !matches!(segment.as_str(), "crate" | "self" | "super"))
        .collect::<Vec<_>>()
        .join(".")
}

fn type_usage(ty: &Type) -> Result<TypeUsage> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path_type(&path.path),
        Type::Reference(reference) => type_usage(&reference.elem),
        Type::Paren(paren) => type_usage(&paren.elem),
        Type::Group(group) => type_usage(&group.elem),
        Type::Slice(slice) => Ok(TypeUsage::named("List").with_argument(type_usage(&slice.elem)?)),
        _ => bail!("Unsupported type: {}", ty.to_token_stream()),
    }
}

fn path_type(path: &syn::Path) -> Result<TypeUsage> {
    let Some(last) = path.segments.last() else {
        bail!("Empty type path");
    };
    let ident = last.ident.unraw().to_string();
    let mut arguments = type_arguments(&last.arguments)?;

    if arguments.len() == 1 {
        if ident == "Option" {
            return Ok(arguments.remove(0).nullable());
        }
        if TRANSPARENT_WRAPPERS.contains(&ident.as_str()) {
            return Ok(arguments.remove(0));
        }
    }

    let name = match TYPE_MAPPINGS.iter().find(|m| m.rust_type == ident) {
        Some(mapping) => mapping.kotlin_type.to_string(),
        None => path_name(path),
    };

    Ok(TypeUsage {
        name,
        arguments,
        nullable: false,
    })
}

fn type_arguments(arguments: &PathArguments) -> Result<Vec<TypeUsage>> {
    match arguments {
        PathArguments::None => Ok(Vec::new()),
        PathArguments::AngleBracketed(angle) => angle
            .args
            .iter()
            .filter_map(|argument| match argument {
                GenericArgument::Type(ty) => Some(type_usage(ty)),
                _ => None,
            })
            .collect(),
        PathArguments::Parenthesized(_) => bail!("Function types are not supported"),
    }
}

fn annotations(attrs: &[Attribute]) -> Result<Vec<AnnotationUsage>> {
    attrs
        .iter()
        .filter_map(|attr| annotation(attr).transpose())
        .collect()
}

fn annotation(attr: &Attribute) -> Result<Option<AnnotationUsage>> {
    let path = attr.path();

    if path.is_ident(DIRECTIVE) {
        // darling errors carry spans and are not Send
        let args = GenerateArgs::from_meta(&attr.meta)
            .map_err(|e| anyhow::anyhow!("Invalid #[generate] attribute: {e}"))?;
        return Ok(Some(args.into_annotation()));
    }

    let is_annotation = path
        .segments
        .last()
        .is_some_and(|segment| segment.ident.to_string().starts_with(|c: char| c.is_ascii_uppercase()));
    if !is_annotation {
        return Ok(None);
    }

    let mut annotation = AnnotationUsage::new(path_name(path));
    match &attr.meta {
        Meta::Path(_) => {}
        Meta::NameValue(meta) => {
            annotation = annotation.with_argument("value", argument_value(&meta.value)?);
        }
        Meta::List(list) => {
            for (name, value) in list_arguments(list)? {
                annotation = annotation.with_argument(name, value);
            }
        }
    }

    Ok(Some(annotation))
}

/// `name = value` pairs, or a single positional value named `value`
fn list_arguments(list: &MetaList) -> Result<Vec<(String, ArgumentValue)>> {
    if let Ok(pairs) =
        list.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)
    {
        return pairs
            .iter()
            .map(|pair| {
                let name = pair
                    .path
                    .get_ident()
                    .map(|ident| to_camel_case(&ident.unraw().to_string()))
                    .with_context(|| {
                        format!("Argument name must be an identifier: {}", pair.path.to_token_stream())
                    })?;
                Ok((name, argument_value(&pair.value)?))
            })
            .collect();
    }

    let value: Expr = list
        .parse_args()
        .with_context(|| format!("Unsupported attribute arguments: {}", list.tokens))?;
    Ok(vec![("value".to_string(), argument_value(&value)?)])
}

fn argument_value(expr: &Expr) -> Result<ArgumentValue> {
    let value = match expr {
        Expr::Lit(lit) => literal_value(&lit.lit, false)?,
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match unary.expr.as_ref() {
            Expr::Lit(lit) => literal_value(&lit.lit, true)?,
            _ => expression(expr),
        },
        Expr::Path(path) if path.qself.is_none() => ArgumentValue::Reference(path_name(&path.path)),
        Expr::Array(array) => ArgumentValue::Array(
            array
                .elems
                .iter()
                .map(argument_value)
                .collect::<Result<_>>()?,
        ),
        Expr::Group(group) => argument_value(&group.expr)?,
        Expr::Paren(paren) => argument_value(&paren.expr)?,
        _ => expression(expr),
    };

    Ok(value)
}

fn expression(expr: &Expr) -> ArgumentValue {
    ArgumentValue::Expression(expr.to_token_stream().to_string())
}

fn literal_value(lit: &Lit, negative: bool) -> Result<ArgumentValue> {
    let sign = if negative { "-" } else { "" };

    let value = match lit {
        Lit::Str(s) if !negative => ArgumentValue::String(s.value()),
        Lit::Char(c) if !negative => ArgumentValue::Char(c.value()),
        Lit::Bool(b) if !negative => ArgumentValue::Bool(b.value),
        Lit::Int(i) => {
            let digits = format!("{sign}{}", i.base10_digits());
            let value = digits
                .parse::<i64>()
                .with_context(|| format!("Integer literal out of range: {digits}"))?;
            ArgumentValue::Integer(value)
        }
        Lit::Float(f) => {
            let digits = format!("{sign}{}", f.base10_digits());
            if f.suffix() == "f32" {
                ArgumentValue::Float(
                    digits
                        .parse::<f32>()
                        .with_context(|| format!("Invalid float literal: {digits}"))?,
                )
            } else {
                ArgumentValue::Double(
                    digits
                        .parse::<f64>()
                        .with_context(|| format!("Invalid float literal: {digits}"))?,
                )
            }
        }
        _ => bail!("Unsupported literal: {sign}{}", lit.to_token_stream()),
    };

    Ok(value)
}
