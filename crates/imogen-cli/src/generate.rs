//! `imogen generate` and `imogen check`

use crate::manifest::Manifest;
use crate::source;
use anyhow::{Context, Result};
use imogen::naming::qualify;
use imogen::{DeclarationGraph, FsEmitter, Generator, ProcessReport, emit_report};
use std::path::{Path, PathBuf};

/// Inputs shared by both commands
#[derive(Debug, Clone)]
pub struct Input {
    /// Declaration graph JSON or a Rust source file
    pub path: PathBuf,

    /// Package override for Rust source input
    pub package: Option<String>,
}

/// Load the declaration graph named by `input`.
///
/// `.rs` files go through the Rust-source front end, anything else is read
/// as declaration graph JSON.
pub fn load_graph(input: &Input, manifest: &Manifest) -> Result<DeclarationGraph> {
    let is_rust = input.path.extension().is_some_and(|ext| ext == "rs");

    if is_rust {
        let package = input
            .package
            .as_deref()
            .unwrap_or(manifest.source_package());
        return source::read_file(&input.path, package);
    }

    if input.package.is_some() {
        tracing::warn!("--package only applies to Rust source input, ignoring it");
    }

    let bytes = std::fs::read(&input.path)
        .with_context(|| format!("Failed to read declarations: {}", input.path.display()))?;
    DeclarationGraph::from_json(&bytes)
        .with_context(|| format!("Failed to parse declarations: {}", input.path.display()))
}

/// Generate implementations and write them below `output`.
pub fn run(input: &Input, output: Option<&Path>, manifest: &Manifest) -> Result<()> {
    let graph = load_graph(input, manifest)?;
    let generator = Generator::new(manifest.generator.clone());
    let report = generator.process(&graph);

    let output = output.unwrap_or(manifest.generator.output_dir.as_path());
    let mut emitter = FsEmitter::new(output);
    let dependencies = emit_report(&generator, &report, &mut emitter)
        .with_context(|| format!("Failed to write generated files to {}", output.display()))?;

    for file in &dependencies.files {
        println!("✓ {}", emitter.root().join(&file.path).display());
    }

    if let Some(path) = &manifest.generator.dependency_manifest {
        dependencies
            .write_to(path)
            .with_context(|| format!("Failed to write dependency manifest: {}", path.display()))?;
        tracing::info!("Wrote dependency manifest {}", path.display());
    }

    summarize(&report)
}

/// Run the generator without writing anything.
pub fn check(input: &Input, manifest: &Manifest) -> Result<()> {
    println!("Checking declarations: {}", input.path.display());

    let graph = load_graph(input, manifest)?;
    let report = Generator::new(manifest.generator.clone()).process(&graph);

    for file in &report.generated {
        for type_spec in &file.types {
            println!("✓ {}", qualify(&file.package, &type_spec.name));
        }
    }

    summarize(&report)
}

fn summarize(report: &ProcessReport) -> Result<()> {
    for failure in &report.failures {
        eprintln!("✗ [E{}] {}", failure.error.error_code(), failure);
    }

    println!(
        "\n{} file(s) generated, {} declaration(s) failed",
        report.generated.len(),
        report.failures.len()
    );

    if !report.is_success() {
        anyhow::bail!("{} declaration(s) failed", report.failures.len());
    }

    Ok(())
}
