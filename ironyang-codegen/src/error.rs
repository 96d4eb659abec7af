//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] ironyang_schema::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A module has no namespace or prefix to generate against.
    #[error("module '{module}' has no {missing} statement")]
    MissingNamespace {
        /// Module name.
        module: String,
        /// The statement that is absent.
        missing: String,
    },

    /// A list key does not name a leaf child of the list.
    #[error("key '{key}' of list '{list}' does not name a leaf child")]
    MissingKeyLeaf {
        /// Offending key identifier.
        key: String,
        /// Path of the list.
        list: String,
    },
}

impl CodegenError {
    /// Creates a missing namespace error.
    pub fn missing_namespace(module: impl Into<String>, missing: impl Into<String>) -> Self {
        Self::MissingNamespace {
            module: module.into(),
            missing: missing.into(),
        }
    }

    /// Creates a missing key leaf error.
    pub fn missing_key(key: impl Into<String>, list: impl Into<String>) -> Self {
        Self::MissingKeyLeaf {
            key: key.into(),
            list: list.into(),
        }
    }
}
