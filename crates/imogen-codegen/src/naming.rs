//! Naming convention utilities for code generation.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `Word` | [`decapitalize`] | `word` |
//! | `snake_case` | [`to_camel_case`] | `camelCase` |
//! | `a.b.Name` | [`simple_name`] | `Name` |
//! | `a.b.Name` | [`package_of`] | `a.b` |

/// Lower-case the first letter of a string.
///
/// Used for parameter names derived from interface names.
///
/// # Examples
///
/// ```
/// use imogen_codegen::naming::decapitalize;
///
/// assert_eq!(decapitalize("Sample"), "sample");
/// assert_eq!(decapitalize("URLConfig"), "uRLConfig");
/// assert_eq!(decapitalize(""), "");
/// ```
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Convert snake_case to camelCase.
///
/// # Examples
///
/// ```
/// use imogen_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("hello_world"), "helloWorld");
/// assert_eq!(to_camel_case("display_name"), "displayName");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Last dot-separated segment of a qualified name.
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, name)| name)
}

/// Everything before the last dot of a qualified name.
pub fn package_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or("", |(package, _)| package)
}

/// Join a package and a name.
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
