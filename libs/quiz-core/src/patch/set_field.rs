//! Overwrite one field on every record.

use serde_json::Value;

use super::{ArrayOutcome, Patch};
use crate::types::ArrayName;

/// Level written by [`SetField::reset_levels`].
pub const RESET_LEVEL: &str = "None";

/// Set `field` to `value` on every record of the named arrays.
#[derive(Debug, Clone)]
pub struct SetField {
    pub field: String,
    pub value: Value,
    pub arrays: Vec<ArrayName>,
}

impl SetField {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            arrays: ArrayName::ALL.to_vec(),
        }
    }

    /// Clear the difficulty level of every card.
    pub fn reset_levels() -> Self {
        Self::new("level", RESET_LEVEL)
    }

    /// Restrict to `arrays`; repeated names count once.
    pub fn with_arrays(mut self, arrays: Vec<ArrayName>) -> Self {
        self.arrays = super::unique_arrays(arrays);
        self
    }
}

impl Patch for SetField {
    fn name(&self) -> &'static str {
        "set-field"
    }

    fn arrays(&self) -> &[ArrayName] {
        &self.arrays
    }

    fn apply_to_array(&self, entries: &mut Vec<Value>) -> ArrayOutcome {
        let mut outcome = ArrayOutcome::default();
        for record in entries.iter_mut().filter_map(Value::as_object_mut) {
            outcome.matched += 1;
            if record.get(&self.field) != Some(&self.value) {
                record.insert(self.field.clone(), self.value.clone());
                outcome.changed += 1;
            }
        }
        outcome
    }
}
