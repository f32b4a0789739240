//! Remove records whose question text matches a target.

use serde_json::Value;

use super::{str_field, ArrayOutcome, Patch};
use crate::types::ArrayName;

/// Keys compared against the target text.
pub const MATCH_KEYS: [&str; 2] = ["front", "question"];

/// Drop every record whose `front` or `question` equals `target`.
#[derive(Debug, Clone)]
pub struct RemoveByMatch {
    pub target: String,
    pub arrays: Vec<ArrayName>,
}

impl RemoveByMatch {
    /// Match against all card arrays.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            arrays: ArrayName::ALL.to_vec(),
        }
    }

    /// Restrict to `arrays`; repeated names count once.
    pub fn with_arrays(mut self, arrays: Vec<ArrayName>) -> Self {
        self.arrays = super::unique_arrays(arrays);
        self
    }

    /// Whether `entry` is a record matching the target. Non-objects never match.
    pub fn matches(&self, entry: &Value) -> bool {
        MATCH_KEYS
            .iter()
            .any(|key| str_field(entry, key) == Some(self.target.as_str()))
    }
}

impl Patch for RemoveByMatch {
    fn name(&self) -> &'static str {
        "remove"
    }

    fn arrays(&self) -> &[ArrayName] {
        &self.arrays
    }

    fn apply_to_array(&self, entries: &mut Vec<Value>) -> ArrayOutcome {
        let before = entries.len();
        entries.retain(|entry| !self.matches(entry));
        let removed = before - entries.len();
        ArrayOutcome {
            matched: removed,
            changed: removed,
        }
    }
}
