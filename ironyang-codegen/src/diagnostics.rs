//! Warning collection.
//!
//! Generation never fails on unsupported types or unresolved references;
//! it records a [`Diagnostic`] instead. Each diagnostic carries a stable key
//! and a collector keeps only the first diagnostic seen per key.

use std::collections::HashSet;
use std::fmt;

/// A single generation warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Deduplication key (type name, reference tag, ...).
    pub key: String,
    /// Human readable message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WARNING: {}", self.message)
    }
}

/// Ordered, deduplicated collection of diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    seen: HashSet<String>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic unless one with the same key was already seen.
    ///
    /// Returns true if the diagnostic was recorded.
    pub fn warn(&mut self, key: impl Into<String>, message: impl Into<String>) -> bool {
        let key = key.into();
        if self.seen.contains(&key) {
            return false;
        }
        let message = message.into();
        tracing::warn!(key = %key, "{message}");
        self.seen.insert(key.clone());
        self.entries.push(Diagnostic { key, message });
        true
    }

    /// Records that `name` is not a supported type.
    pub fn unsupported_type(&mut self, name: &str) -> bool {
        self.warn(
            name,
            format!("No support for type \"{name}\", defaulting to string."),
        )
    }

    /// Appends the diagnostics of `other` not already present here.
    pub fn merge(&mut self, other: Diagnostics) {
        for diagnostic in other.entries {
            if self.seen.insert(diagnostic.key.clone()) {
                self.entries.push(diagnostic);
            }
        }
    }

    /// Returns true if a diagnostic with `key` was recorded.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    /// Returns the recorded diagnostics in first-seen order.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Returns the number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_deduplicates_by_key() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.unsupported_type("decimal64"));
        assert!(!diagnostics.unsupported_type("decimal64"));
        assert!(diagnostics.unsupported_type("bits"));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics.entries()[0].message,
            "No support for type \"decimal64\", defaulting to string."
        );
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let mut first = Diagnostics::new();
        first.warn("a", "first a");
        first.warn("b", "first b");

        let mut second = Diagnostics::new();
        second.warn("b", "second b");
        second.warn("c", "second c");

        first.merge(second);
        let keys: Vec<&str> = first.entries().iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(first.entries()[1].message, "first b");
        assert!(first.contains("c"));
    }

    #[test]
    fn test_display() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn("x", "something odd");
        assert_eq!(diagnostics.entries()[0].to_string(), "WARNING: something odd");
    }
}
