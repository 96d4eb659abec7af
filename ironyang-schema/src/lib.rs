//! # IronYANG Schema
//!
//! YANG schema tree and YIN parser.
//!
//! This crate provides:
//! - An arena-backed schema tree with parent links
//! - YIN (XML encoding of YANG) parsing
//! - Grouping expansion and reference resolution
//! - Structural validation

pub mod error;
pub mod keyword;
pub mod parser;
pub mod resolve;
pub mod tree;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use keyword::{Keyword, YinArgument};
pub use parser::{parse_yin, parse_yin_into};
pub use resolve::{ReferenceKind, UnresolvedReference, resolve};
pub use tree::{NodeId, SchemaNode, SchemaTree};
pub use validation::{validate_module, validate_schema};
