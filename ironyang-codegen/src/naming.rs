//! Identifier normalization.
//!
//! Schema identifiers may contain `-` and `.`, which are not valid in Java
//! names, and may collide with Java reserved words. [`normalize`] rewrites
//! every identifier in a tree once, before any generation pass reads it.

use ironyang_schema::{Keyword, NodeId, SchemaTree};
use std::collections::HashSet;

/// Prefix prepended to identifiers that are Java reserved words.
pub const ESCAPE_PREFIX: char = 'J';

/// Java reserved words and literals.
pub const JAVA_RESERVED_WORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

/// Returns true if `word` is a Java reserved word.
#[must_use]
pub fn is_reserved(word: &str) -> bool {
    JAVA_RESERVED_WORDS.contains(&word)
}

/// Drops each `-` or `.` that is followed by another character and
/// upper-cases that character. A trailing separator is kept.
///
/// # Examples
/// ```
/// use ironyang_codegen::naming::camelize;
///
/// assert_eq!(camelize("host-name"), "hostName");
/// assert_eq!(camelize("a.b-c"), "aBC");
/// assert_eq!(camelize("trailing-"), "trailing-");
/// ```
#[must_use]
pub fn camelize(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut chars = identifier.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(_) if c == '-' || c == '.' => {
                if let Some(next) = chars.next() {
                    out.extend(next.to_uppercase());
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Upper-cases the first character and lower-cases the rest.
///
/// Class names are derived from normalized identifiers this way, so
/// `hostName` becomes `Hostname`.
#[must_use]
pub fn capitalize(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Camelizes `raw` and escapes the result if it is a reserved word.
#[must_use]
pub fn java_identifier(raw: &str) -> String {
    escape_reserved(camelize(raw))
}

fn escape_reserved(mut identifier: String) -> String {
    if is_reserved(&identifier) {
        identifier.insert(0, ESCAPE_PREFIX);
    }
    identifier
}

/// Returns the normalized form of a statement argument, or `None` if the
/// statement is left untouched.
///
/// Type statements and literal arguments (namespaces, revisions,
/// descriptions, ...) are never rewritten. Range and length expressions are
/// not camelized but still escape reserved words. Each identifier of a key
/// declaration is normalized on its own, so keys keep naming their leaves.
#[must_use]
pub fn normalize_identifier(keyword: &Keyword, arg: &str) -> Option<String> {
    if keyword.is_type_family() || keyword.is_literal() {
        return None;
    }
    let normalized = match keyword {
        Keyword::Range | Keyword::Length => escape_reserved(arg.to_string()),
        Keyword::Key => arg
            .split_whitespace()
            .map(java_identifier)
            .collect::<Vec<_>>()
            .join(" "),
        _ => java_identifier(arg),
    };
    (normalized != arg).then_some(normalized)
}

/// Normalizes every identifier reachable from the roots of the tree.
///
/// Both declared children and the materialized view are followed; each node
/// is rewritten at most once. Structure is left unchanged.
#[must_use]
pub fn normalize(mut tree: SchemaTree) -> SchemaTree {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut pending: Vec<NodeId> = tree.roots().iter().rev().copied().collect();

    while let Some(id) = pending.pop() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(normalized) = normalize_identifier(tree.keyword(id), tree.arg(id)) {
            tracing::trace!(from = tree.arg(id), to = %normalized, "normalized identifier");
            tree.set_arg(id, normalized);
        }
        pending.extend(tree.all_children(id).into_iter().rev());
    }

    tree
}
