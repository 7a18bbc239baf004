//! The recognized annotation vocabulary.
//!
//! Every tag the generator understands, with the argument names it reads.
//! The table is built once per [`crate::Generator`] from the configured
//! annotations package.

use imogen_core::GeneratorConfig;
use std::collections::HashMap;

/// Literal type of a literal default tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    String,
}

/// Kind of a recognized tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Class-level generation directive
    Generate,
    /// `BooleanDefault(value)`, `IntDefault(value)`, ...
    LiteralDefault(LiteralKind),
    /// `Default(provider)`: default produced by a `ValueProvider` object
    ProviderDefault,
    /// `Derived(from)`: value computed from an expression
    Derived,
    /// `Create(newProp, valueModifier)`: extra property produced by a `ValueModifier`
    Create,
}

/// Argument names of the recognized tags
pub mod args {
    pub const NAME: &str = "name";
    pub const PREFIX: &str = "prefix";
    pub const SUFFIX: &str = "suffix";
    pub const DELEGATED_CLASS: &str = "delegatedClass";
    pub const VALUE: &str = "value";
    pub const PROVIDER: &str = "provider";
    pub const FROM: &str = "from";
    pub const NEW_PROP: &str = "newProp";
    pub const VALUE_MODIFIER: &str = "valueModifier";
}

/// Operation called on a `ValueProvider` object
pub const PROVIDE_FUNCTION: &str = "provide";

/// Operation called on a `ValueModifier` object
pub const MODIFY_FUNCTION: &str = "modify";

const VOCABULARY: &[(&str, TagKind)] = &[
    ("Generate", TagKind::Generate),
    ("BooleanDefault", TagKind::LiteralDefault(LiteralKind::Boolean)),
    ("ByteDefault", TagKind::LiteralDefault(LiteralKind::Byte)),
    ("CharDefault", TagKind::LiteralDefault(LiteralKind::Char)),
    ("DoubleDefault", TagKind::LiteralDefault(LiteralKind::Double)),
    ("FloatDefault", TagKind::LiteralDefault(LiteralKind::Float)),
    ("IntDefault", TagKind::LiteralDefault(LiteralKind::Int)),
    ("LongDefault", TagKind::LiteralDefault(LiteralKind::Long)),
    ("ShortDefault", TagKind::LiteralDefault(LiteralKind::Short)),
    ("StringDefault", TagKind::LiteralDefault(LiteralKind::String)),
    ("Default", TagKind::ProviderDefault),
    ("Derived", TagKind::Derived),
    ("Create", TagKind::Create),
];

impl TagKind {
    /// Whether the tag supplies a constructor default
    pub fn is_default_value(self) -> bool {
        matches!(self, TagKind::LiteralDefault(_) | TagKind::ProviderDefault)
    }

    /// Name of the argument carrying the tag's value
    pub fn value_argument(self) -> &'static str {
        match self {
            TagKind::Generate => args::NAME,
            TagKind::LiteralDefault(_) => args::VALUE,
            TagKind::ProviderDefault => args::PROVIDER,
            TagKind::Derived => args::FROM,
            TagKind::Create => args::VALUE_MODIFIER,
        }
    }
}

/// Lookup table from qualified annotation name to [`TagKind`]
#[derive(Debug, Clone)]
pub struct TagTable {
    kinds: HashMap<String, TagKind>,
    qualified: HashMap<&'static str, String>,
    value_provider: String,
    value_modifier: String,
}

impl TagTable {
    pub fn new(config: &GeneratorConfig) -> Self {
        let mut kinds = HashMap::with_capacity(VOCABULARY.len());
        let mut qualified = HashMap::with_capacity(VOCABULARY.len());

        for &(simple_name, kind) in VOCABULARY {
            let name = config.annotation(simple_name);
            kinds.insert(name.clone(), kind);
            qualified.insert(simple_name, name);
        }

        Self {
            kinds,
            qualified,
            value_provider: config.annotation("ValueProvider"),
            value_modifier: config.annotation("ValueModifier"),
        }
    }

    /// Kind of the tag with the given qualified name
    pub fn kind(&self, qualified_name: &str) -> Option<TagKind> {
        self.kinds.get(qualified_name).copied()
    }

    /// Qualified name of a vocabulary tag given its simple name
    pub fn qualify(&self, simple_name: &str) -> Option<&str> {
        self.qualified.get(simple_name).map(String::as_str)
    }

    /// Qualified name of the generation directive
    pub fn generate(&self) -> &str {
        self.qualify("Generate").unwrap_or("Generate")
    }

    /// Qualified name of the `ValueProvider` interface
    pub fn value_provider(&self) -> &str {
        &self.value_provider
    }

    /// Qualified name of the `ValueModifier` interface
    pub fn value_modifier(&self) -> &str {
        &self.value_modifier
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("annotations.IntDefault", Some(TagKind::LiteralDefault(LiteralKind::Int)))]
    #[test_case("annotations.FloatDefault", Some(TagKind::LiteralDefault(LiteralKind::Float)))]
    #[test_case("annotations.Default", Some(TagKind::ProviderDefault))]
    #[test_case("annotations.Derived", Some(TagKind::Derived))]
    #[test_case("annotations.Create", Some(TagKind::Create))]
    #[test_case("annotations.Generate", Some(TagKind::Generate))]
    #[test_case("com.example.Json", None)]
    #[test_case("IntDefault", None)]
    fn TagTable___kind___classifies_qualified_names(name: &str, expected: Option<TagKind>) {
        let table = TagTable::new(&GeneratorConfig::default());

        assert_eq!(table.kind(name), expected);
    }

    #[test]
    fn TagTable___custom_package___qualifies_vocabulary() {
        let config = GeneratorConfig {
            annotations_package: "com.example.imogen".into(),
            ..GeneratorConfig::default()
        };

        let table = TagTable::new(&config);

        assert_eq!(table.generate(), "com.example.imogen.Generate");
        assert_eq!(table.value_modifier(), "com.example.imogen.ValueModifier");
        assert_eq!(
            table.kind("com.example.imogen.Derived"),
            Some(TagKind::Derived)
        );
        assert_eq!(table.kind("annotations.Derived"), None);
    }

    #[test]
    fn TagKind___is_default_value___only_for_default_tags() {
        assert!(TagKind::LiteralDefault(LiteralKind::String).is_default_value());
        assert!(TagKind::ProviderDefault.is_default_value());
        assert!(!TagKind::Derived.is_default_value());
        assert!(!TagKind::Create.is_default_value());
        assert!(!TagKind::Generate.is_default_value());
    }

    #[test]
    fn TagKind___value_argument___matches_tag_signature() {
        assert_eq!(TagKind::LiteralDefault(LiteralKind::Int).value_argument(), "value");
        assert_eq!(TagKind::ProviderDefault.value_argument(), "provider");
        assert_eq!(TagKind::Derived.value_argument(), "from");
        assert_eq!(TagKind::Create.value_argument(), "valueModifier");
    }
}
