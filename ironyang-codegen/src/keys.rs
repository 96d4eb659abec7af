//! List key extraction.

use crate::diagnostics::Diagnostics;
use crate::error::CodegenError;
use crate::types::{TypeMapping, map_type};
use ironyang_schema::{Keyword, NodeId, SchemaTree};

/// A single key of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLeaf {
    /// Normalized key identifier.
    pub name: String,
    /// Mapped type of the key leaf.
    pub mapping: TypeMapping,
}

/// The keys of a list, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    /// Raw key declaration.
    pub declaration: String,
    /// Keys in declaration order.
    pub keys: Vec<KeyLeaf>,
    /// True if every key maps to a `String` primitive.
    pub all_stringlike: bool,
}

impl KeySpec {
    /// Returns true if the list declares no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the key identifiers in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.name.as_str())
    }
}

impl Default for KeySpec {
    fn default() -> Self {
        Self {
            declaration: String::new(),
            keys: Vec::new(),
            all_stringlike: true,
        }
    }
}

/// Extracts the key declaration of a list.
///
/// # Errors
/// Returns `CodegenError::MissingKeyLeaf` if a key identifier has no
/// matching leaf child.
pub fn extract_keys(
    tree: &SchemaTree,
    list: NodeId,
    diagnostics: &mut Diagnostics,
) -> Result<KeySpec, CodegenError> {
    let Some(declaration) = tree.child_arg(list, &Keyword::Key) else {
        return Ok(KeySpec::default());
    };

    let mut keys = Vec::new();
    for name in declaration.split_whitespace() {
        let leaf = tree
            .find_any_child(list, &Keyword::Leaf, Some(name))
            .ok_or_else(|| CodegenError::missing_key(name, tree.path(list)))?;
        let mapping = leaf_mapping(tree, leaf, diagnostics);
        keys.push(KeyLeaf {
            name: name.to_string(),
            mapping,
        });
    }

    let all_stringlike = keys.iter().all(|k| k.mapping.is_stringlike());
    Ok(KeySpec {
        declaration: declaration.to_string(),
        keys,
        all_stringlike,
    })
}

/// Maps the type of a leaf or leaf-list.
///
/// A leaf without a type statement is treated as a string.
pub fn leaf_mapping(tree: &SchemaTree, leaf: NodeId, diagnostics: &mut Diagnostics) -> TypeMapping {
    match tree.child_arg(leaf, &Keyword::Type) {
        Some(name) => map_type(name, diagnostics),
        None => {
            let path = tree.path(leaf);
            diagnostics.warn(
                path.clone(),
                format!("No type for {} \"{path}\", defaulting to string.", tree.keyword(leaf)),
            );
            TypeMapping::STRING
        }
    }
}
