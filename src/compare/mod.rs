//! Structural comparison between desired and observed resource state.
//!
//! A [`Delta`] is an ordered list of field-level differences. Entry order is
//! the order in which fields were visited; callers must query
//! [`Delta::differs_at`] with an exact path rather than rely on position.

mod equality;
mod rules;

pub use equality::{has_presence_difference, maps_equal, slices_equal};
pub use rules::{Accessor, FieldRule, FieldValue, RuleKind, walk_rules};

use serde::Serialize;
use serde_json::Value;

/// A single field-level difference.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaEntry {
    /// Dotted path to the differing field. Empty for a root-level
    /// difference (one whole snapshot absent).
    pub path: String,
    /// The desired-side value at the path.
    pub desired: Value,
    /// The observed-side value at the path.
    pub observed: Value,
}

/// Ordered collection of differences between two resource snapshots.
#[derive(Debug, Clone, Default)]
pub struct Delta {
    /// Differences in field-visit order.
    entries: Vec<DeltaEntry>,
}

impl Delta {
    /// Creates an empty delta.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records a difference at the given path.
    pub fn add(&mut self, path: impl Into<String>, desired: Value, observed: Value) {
        self.entries.push(DeltaEntry {
            path: path.into(),
            desired,
            observed,
        });
    }

    /// Returns true if the compared snapshots differ at the exact path.
    #[must_use]
    pub fn differs_at(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    /// Returns true if no differences were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of recorded differences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the recorded differences in field-visit order.
    #[must_use]
    pub fn entries(&self) -> &[DeltaEntry] {
        &self.entries
    }
}

impl std::fmt::Display for Delta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "no differences");
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let path = if entry.path.is_empty() {
                "<root>"
            } else {
                entry.path.as_str()
            };
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

/// Serializes a value for inclusion in a delta record.
#[must_use]
pub fn json_of<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
