//! Pattern table — named, reusable sequences of raw bar rows.

use std::collections::HashMap;

use super::bar::RawBar;

/// The patterns a document defines, keyed by name.
///
/// Redefining a name overwrites the earlier body; lookups always see the
/// most recent definition.
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: HashMap<String, Vec<RawBar>>,
}

impl PatternTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    /// Register a pattern body under `name`.
    pub fn define(&mut self, name: impl Into<String>, rows: Vec<RawBar>) {
        self.patterns.insert(name.into(), rows);
    }

    /// Look up a pattern body by name.
    pub fn get(&self, name: &str) -> Option<&[RawBar]> {
        self.patterns.get(name).map(Vec::as_slice)
    }

    /// Number of defined patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns are defined.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}
