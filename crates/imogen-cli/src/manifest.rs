//! imogen.toml parsing and validation

use anyhow::{Context, Result};
use imogen::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Manifest read when `--config` is not given
pub const DEFAULT_MANIFEST: &str = "imogen.toml";

/// imogen.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub source: SourceSection,
}

/// Settings of the Rust-source front end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    /// Package declarations read from Rust source are placed in
    #[serde(default)]
    pub package: Option<String>,
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Load the manifest at `path`, else `imogen.toml` if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let manifest = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_MANIFEST).is_file() => Self::from_file(DEFAULT_MANIFEST)?,
            None => Self::default(),
        };

        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        let generator = &self.generator;

        if !generator.annotations_package.is_empty()
            && !is_qualified_name(&generator.annotations_package)
        {
            anyhow::bail!(
                "Invalid annotations_package: {:?}",
                generator.annotations_package
            );
        }

        if !is_identifier(&generator.delegated_prefix) {
            anyhow::bail!(
                "delegated_prefix must be an identifier: {:?}",
                generator.delegated_prefix
            );
        }

        if generator.indent.is_empty() || !generator.indent.chars().all(|c| c == ' ' || c == '\t') {
            anyhow::bail!("indent must consist of spaces or tabs");
        }

        EnvFilter::try_new(&generator.log_level)
            .with_context(|| format!("Invalid log_level: {:?}", generator.log_level))?;

        if let Some(package) = &self.source.package
            && !package.is_empty()
            && !is_qualified_name(package)
        {
            anyhow::bail!("Invalid source package: {:?}", package);
        }

        Ok(())
    }

    /// Package for declarations read from Rust source
    pub fn source_package(&self) -> &str {
        self.source.package.as_deref().unwrap_or_default()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Dot-separated identifiers
fn is_qualified_name(s: &str) -> bool {
    s.split('.').all(is_identifier)
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
