//! The delegated variant of a generated model.
//!
//! For `Bundle : Config, Styles` with delegation enabled this produces
//! `DelegatedBundle(config: Config, styles: Styles)` implementing `Config` by
//! `config` and `Styles` by `styles`, with every derived property of the
//! primary type overridden again so forwarding does not bypass it.

use crate::descriptor::ModelDescriptor;
use crate::naming::decapitalize;
use crate::spec::{
    Expression, ParameterSpec, PropertyInitializer, PropertySpec, Supertype, TypeSpec,
};
use crate::synth::DerivedProperty;
use imogen_core::GeneratorConfig;

/// Build the delegated type, or `None` when it is not requested or has
/// nothing to delegate to.
pub fn synthesize_delegated(
    config: &GeneratorConfig,
    descriptor: &ModelDescriptor,
    derived: &[DerivedProperty],
) -> Option<TypeSpec> {
    if !descriptor.delegated_class || descriptor.inherited_interfaces.is_empty() {
        return None;
    }

    let source = &descriptor.source_interface.qualified_name;
    let undelegated: Vec<&str> = descriptor
        .properties
        .iter()
        .filter(|property| &property.declared_in == source)
        .filter(|property| !derived.iter().any(|d| d.name == property.name))
        .map(|property| property.name.as_str())
        .collect();
    if !undelegated.is_empty() {
        tracing::warn!(
            interface = %source,
            properties = ?undelegated,
            "delegated class does not implement properties declared directly on the interface"
        );
    }

    let mut supertypes = vec![Supertype::implemented(descriptor.source_interface.clone())];
    let mut primary_constructor = Vec::with_capacity(descriptor.inherited_interfaces.len());

    for interface in &descriptor.inherited_interfaces {
        let parameter = decapitalize(interface.simple_name());
        supertypes.push(Supertype::delegated(interface.clone(), &parameter));
        primary_constructor.push(ParameterSpec::new(parameter, interface.clone()));
    }

    let properties = derived
        .iter()
        .map(|property| PropertySpec {
            name: property.name.clone(),
            ty: property.ty.clone(),
            is_override: true,
            initializer: PropertyInitializer::Expression(Expression::Verbatim(
                property.derive_from.clone(),
            )),
            annotations: Vec::new(),
        })
        .collect();

    Some(TypeSpec {
        name: format!("{}{}", config.delegated_prefix, descriptor.class_name),
        is_data: false,
        supertypes,
        primary_constructor,
        properties,
        secondary_constructors: Vec::new(),
    })
}
