//! Output emission.
//!
//! An [`Emitter`] persists rendered files. Every emitted file records the
//! source units it was derived from; the collected records form the
//! [`DependencyManifest`] a build tool uses for incremental invalidation.

use crate::driver::{Generator, ProcessReport};
use crate::kotlin::EXTENSION;
use crate::spec::FileSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while writing generated files
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize dependency manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// One emitted file and the sources it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedFile {
    /// Path relative to the output root
    pub path: PathBuf,
    pub originating_files: Vec<String>,
}

/// Generated-file to source-file dependencies of one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    pub files: Vec<EmittedFile>,
}

impl DependencyManifest {
    pub fn to_json(&self) -> Result<String, EmitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, EmitError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Write the manifest as JSON, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<(), EmitError> {
        let json = self.to_json()?;
        create_parent(path)?;
        fs::write(path, json).map_err(|source| EmitError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Accepts finished files for persistence.
pub trait Emitter {
    /// Persist `source`, the rendering of `file`.
    fn emit(&mut self, file: &FileSpec, source: &str) -> Result<EmittedFile, EmitError>;
}

/// Path of a file relative to the output root: `<package dirs>/<name>.kt`
pub fn relative_path(file: &FileSpec) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in file.package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.{EXTENSION}", file.name));
    path
}

fn record(file: &FileSpec) -> EmittedFile {
    EmittedFile {
        path: relative_path(file),
        originating_files: file.originating_files.clone(),
    }
}

fn create_parent(path: &Path) -> Result<(), EmitError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| EmitError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Writes files below a root directory.
#[derive(Debug, Clone)]
pub struct FsEmitter {
    root: PathBuf,
}

impl FsEmitter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Emitter for FsEmitter {
    fn emit(&mut self, file: &FileSpec, source: &str) -> Result<EmittedFile, EmitError> {
        let emitted = record(file);
        let path = self.root.join(&emitted.path);

        create_parent(&path)?;
        fs::write(&path, source).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {}", path.display());
        Ok(emitted)
    }
}

/// Keeps rendered files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source emitted at a relative path
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Emitted files ordered by path
    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files
            .iter()
            .map(|(path, source)| (path.as_path(), source.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&mut self, file: &FileSpec, source: &str) -> Result<EmittedFile, EmitError> {
        let emitted = record(file);
        self.files.insert(emitted.path.clone(), source.to_string());
        Ok(emitted)
    }
}

/// Render and emit every generated file of a report.
pub fn emit_report<E: Emitter + ?Sized>(
    generator: &Generator,
    report: &ProcessReport,
    emitter: &mut E,
) -> Result<DependencyManifest, EmitError> {
    let files = report
        .generated
        .iter()
        .map(|file| emitter.emit(file, &generator.render(file)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DependencyManifest { files })
}
