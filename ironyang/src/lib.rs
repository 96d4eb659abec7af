//! # IronYANG
//!
//! Compiles YANG data models into Java class hierarchies for the ConfM
//! NETCONF library.
//!
//! ## Features
//!
//! - **YIN input** - Modules are read in their XML encoding
//! - **Grouping expansion** - `uses` statements are resolved before generation
//! - **One class per node** - Every container and list gets a Java class
//! - **Schema metadata** - A `.schema` document per module for the runtime
//!
//! ## Quick Start
//!
//! ```ignore
//! use ironyang::prelude::*;
//!
//! let config = GeneratorConfig::new("gen");
//! let report = generate_from_yin(&xml, &config)?;
//! report.write_to(&mut FsSink::new("out"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - YIN parsing, grouping resolution and validation
//! - [`codegen`] - Java class generation from schema trees

pub mod prelude;

/// YIN parsing, resolution and validation.
pub mod schema {
    pub use ironyang_schema::*;
}

/// Java class hierarchy generation.
pub mod codegen {
    pub use ironyang_codegen::*;
}
