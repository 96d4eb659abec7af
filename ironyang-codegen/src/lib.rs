//! # IronYANG Codegen
//!
//! Java class hierarchy generation from YANG schema trees.
//!
//! This crate provides:
//! - Identifier normalization into valid Java identifiers
//! - YANG to ConfM type mapping and list key extraction
//! - One Java class per container and list, plus a root class per module
//! - The `.schema` metadata document and `package-info.java`
//! - Output sinks for memory and the filesystem

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod hierarchy;
pub mod ir;
pub mod java;
pub mod keys;
pub mod members;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod types;

pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::CodegenError;
pub use generator::{GenerationFailure, GenerationReport, Generator};
pub use hierarchy::{Hierarchy, HierarchyGenerator, ModuleContext};
pub use ir::{ClassKind, ClassUnit, Member};
pub use metadata::{Cardinality, cardinality, schema_document};
pub use naming::{java_identifier, normalize};
pub use output::{FsSink, MemorySink, OutputSink, OutputUnit};
pub use types::{TypeMapping, map_type};

/// Generates Java classes from a YIN document.
///
/// # Arguments
/// * `xml` - YIN module content
/// * `config` - Generator configuration
///
/// # Returns
/// The generation report with all output units.
///
/// # Errors
/// Returns `CodegenError` if the document cannot be parsed. Failures of
/// single modules or classes are reported in the returned report instead.
pub fn generate_from_yin(xml: &str, config: &GeneratorConfig) -> Result<GenerationReport, CodegenError> {
    let mut tree = ironyang_schema::parse_yin(xml)?;
    ironyang_schema::resolve(&mut tree);
    Ok(Generator::new(config).generate(tree))
}

/// Generates Java classes from a YIN file.
///
/// # Arguments
/// * `path` - Path to the YIN file
/// * `config` - Generator configuration
///
/// # Returns
/// The generation report with all output units.
///
/// # Errors
/// Returns `CodegenError` if reading or parsing fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &GeneratorConfig,
) -> Result<GenerationReport, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_yin(&xml, config)
}
