//! Schema validation utilities.
//!
//! This module checks the structural rules the generator relies on: list
//! keys name leaf children and sibling data nodes have distinct identifiers.

use crate::error::SchemaError;
use crate::keyword::Keyword;
use crate::tree::{NodeId, SchemaTree};
use std::collections::HashSet;

/// Validates every module in the tree.
///
/// # Errors
/// Returns the first `SchemaError` found.
pub fn validate_schema(tree: &SchemaTree) -> Result<(), SchemaError> {
    for &root in tree.roots() {
        validate_module(tree, root)?;
    }
    Ok(())
}

/// Validates a single module or submodule.
///
/// # Errors
/// Returns `SchemaError` if the module lacks a name, a list key has no
/// matching leaf, or two sibling data nodes share an identifier.
pub fn validate_module(tree: &SchemaTree, module: NodeId) -> Result<(), SchemaError> {
    if !tree.keyword(module).is_module() {
        return Err(SchemaError::Validation {
            message: format!("'{}' is not a module", tree.arg(module)),
        });
    }
    validate_node(tree, module)
}

fn validate_node(tree: &SchemaTree, id: NodeId) -> Result<(), SchemaError> {
    if *tree.keyword(id) == Keyword::Grouping {
        return Ok(());
    }

    if *tree.keyword(id) == Keyword::List {
        validate_keys(tree, id)?;
    }

    let mut seen = HashSet::new();
    for child in tree.data_children(id) {
        if !seen.insert(tree.arg(child)) {
            return Err(SchemaError::DuplicateDefinition {
                kind: tree.keyword(child).to_string(),
                name: tree.arg(child).to_string(),
                scope: tree.path(id),
            });
        }
    }

    for child in tree.all_children(id) {
        validate_node(tree, child)?;
    }
    Ok(())
}

/// Validates that every key of a list names one of its leaf children.
fn validate_keys(tree: &SchemaTree, list: NodeId) -> Result<(), SchemaError> {
    for key in tree.key_names(list) {
        if tree
            .find_any_child(list, &Keyword::Leaf, Some(key))
            .is_none()
        {
            return Err(SchemaError::missing_key(key, tree.path(list)));
        }
    }
    Ok(())
}
