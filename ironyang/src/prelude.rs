//! Prelude module for convenient imports.
//!
//! ```ignore
//! use ironyang::prelude::*;
//! ```

// Schema types
pub use ironyang_schema::{
    Keyword, NodeId, ParseError, SchemaError, SchemaTree, parse_yin, parse_yin_into, resolve,
    validate_schema,
};

// Generation types
pub use ironyang_codegen::{
    CodegenError, Diagnostics, FsSink, GenerationReport, Generator, GeneratorConfig, MemorySink,
    OutputSink, OutputUnit, generate_from_file, generate_from_yin,
};
