//! Per-declaration driver.
//!
//! Finds every declaration carrying the generation directive and runs the
//! engine on it. A failing declaration is recorded and the pass continues.

use crate::annotations::AnnotationExtractor;
use crate::delegation::synthesize_delegated;
use crate::descriptor::ModelDescriptor;
use crate::kotlin;
use crate::spec::FileSpec;
use crate::synth::Synthesizer;
use crate::tags::{TagKind, TagTable};
use crate::types::TypeResolver;
use imogen_core::{Declaration, DeclarationGraph, GenerateError, GenerateResult, GeneratorConfig};
use std::fmt;

/// A declaration the engine could not generate
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// Qualified name of the declaration
    pub declaration: String,
    pub source_file: Option<String>,
    pub error: GenerateError,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_file {
            Some(source_file) => write!(
                f,
                "{} ({source_file}): {}",
                self.declaration, self.error
            ),
            None => write!(f, "{}: {}", self.declaration, self.error),
        }
    }
}

/// Outcome of a generation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessReport {
    /// Generated files, in declaration order
    pub generated: Vec<FileSpec>,
    pub failures: Vec<Failure>,
}

impl ProcessReport {
    /// True if no declaration failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the engine over a declaration graph.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    tags: TagTable,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let tags = TagTable::new(&config);
        Self { config, tags }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Declarations carrying the generation directive, in graph order
    pub fn annotated<'g>(&self, graph: &'g DeclarationGraph) -> Vec<&'g Declaration> {
        let extractor = AnnotationExtractor::new(TypeResolver::new(graph), &self.tags);
        graph
            .iter()
            .filter(|declaration| {
                declaration.annotations.iter().any(|annotation| {
                    let name = extractor.annotation_name(&annotation.name, &declaration.package);
                    self.tags.kind(&name) == Some(TagKind::Generate)
                })
            })
            .collect()
    }

    /// Generate every annotated declaration of `graph`.
    pub fn process(&self, graph: &DeclarationGraph) -> ProcessReport {
        let mut report = ProcessReport::default();

        for declaration in self.annotated(graph) {
            let qualified_name = declaration.qualified_name();
            let _span = tracing::info_span!("declaration", name = %qualified_name).entered();

            match self.generate(graph, declaration) {
                Ok(file) => {
                    tracing::info!(
                        "Generated {} type(s) in {}.{}",
                        file.types.len(),
                        file.name,
                        kotlin::EXTENSION
                    );
                    report.generated.push(file);
                }
                Err(error) => {
                    tracing::error!("Failed to generate {}: {}", qualified_name, error);
                    report.failures.push(Failure {
                        declaration: qualified_name,
                        source_file: declaration.source_file.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Generate a single declaration.
    ///
    /// Atomic: either the whole file is produced or an error is returned.
    pub fn generate(
        &self,
        graph: &DeclarationGraph,
        declaration: &Declaration,
    ) -> GenerateResult<FileSpec> {
        let resolver = TypeResolver::new(graph);
        let descriptor =
            ModelDescriptor::build(resolver, &self.tags, &declaration.package, declaration)?;

        let synthesis = Synthesizer::new(resolver, &self.tags, &self.config).synthesize(&descriptor)?;

        let mut types = vec![synthesis.type_spec];
        types.extend(synthesize_delegated(
            &self.config,
            &descriptor,
            &synthesis.derived,
        ));

        let package_names = graph
            .iter()
            .filter(|other| other.package == descriptor.package_name)
            .filter_map(|other| other.name.split('.').next())
            .map(str::to_string)
            .collect();

        Ok(FileSpec {
            package: descriptor.package_name,
            name: descriptor.class_name,
            types,
            originating_files: descriptor.originating_files,
            package_names,
        })
    }

    /// Render a generated file as Kotlin source
    pub fn render(&self, file: &FileSpec) -> String {
        kotlin::render_file(file, &self.config.indent)
    }
}

#[cfg(test)]
#[path = "driver/driver_tests.rs"]
mod driver_tests;
