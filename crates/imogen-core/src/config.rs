//! Generator configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Package holding the recognized annotation vocabulary
    ///
    /// `Generate`, the `*Default` family, `Default`, `Derived`, `Create`,
    /// `ValueProvider` and `ValueModifier` are all looked up in this package.
    #[serde(default = "default_annotations_package")]
    pub annotations_package: String,

    /// Prefix of the delegated class name
    #[serde(default = "default_delegated_prefix")]
    pub delegated_prefix: String,

    /// Emit the generated implementation as a `data class`
    ///
    /// Only applies when the primary constructor has at least one parameter.
    #[serde(default = "default_data_classes")]
    pub data_classes: bool,

    /// Indentation unit used when rendering source
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Root directory generated files are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Where to write the generated-file to source-file dependency report
    #[serde(default)]
    pub dependency_manifest: Option<PathBuf>,
}

fn default_annotations_package() -> String {
    "annotations".to_string()
}

fn default_delegated_prefix() -> String {
    "Delegated".to_string()
}

fn default_data_classes() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            annotations_package: default_annotations_package(),
            delegated_prefix: default_delegated_prefix(),
            data_classes: default_data_classes(),
            indent: default_indent(),
            log_level: default_log_level(),
            output_dir: default_output_dir(),
            dependency_manifest: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Qualified name of a type in the annotations package
    pub fn annotation(&self, simple_name: &str) -> String {
        if self.annotations_package.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", self.annotations_package, simple_name)
        }
    }
}
