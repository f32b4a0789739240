//! Card-level patches applied to a loaded quiz file.

pub mod remove;
pub mod set_field;

pub use remove::RemoveByMatch;
pub use set_field::SetField;

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{QuizError, Result};
use crate::store::{self, WriteTarget};
use crate::types::{ArrayName, PatchConfig};

/// Counts for one array after a patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayOutcome {
    /// Records the patch applied to.
    pub matched: usize,
    /// Records whose content actually changed.
    pub changed: usize,
}

/// Result of applying a patch to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Only arrays that were present and of array type.
    pub arrays: Vec<(ArrayName, ArrayOutcome)>,
}

impl PatchOutcome {
    pub fn matched(&self) -> usize {
        self.arrays.iter().map(|(_, o)| o.matched).sum()
    }

    pub fn changed(&self) -> usize {
        self.arrays.iter().map(|(_, o)| o.changed).sum()
    }

    /// Counts for `name`, if the array was patched.
    pub fn get(&self, name: ArrayName) -> Option<ArrayOutcome> {
        self.arrays.iter().find(|(n, _)| *n == name).map(|(_, o)| *o)
    }
}

/// Trait for mutations over the card arrays of a quiz document.
pub trait Patch {
    /// Patch identifier for logs.
    fn name(&self) -> &'static str;

    /// Arrays the patch visits.
    fn arrays(&self) -> &[ArrayName];

    /// Apply to the entries of one array.
    fn apply_to_array(&self, entries: &mut Vec<Value>) -> ArrayOutcome;

    /// Apply to every named array present in `doc`. Missing keys and keys
    /// that do not hold an array are left alone.
    fn apply(&self, doc: &mut Map<String, Value>) -> PatchOutcome {
        let mut outcome = PatchOutcome::default();
        for &name in self.arrays() {
            if let Some(Value::Array(entries)) = doc.get_mut(name.as_str()) {
                let counts = self.apply_to_array(entries);
                tracing::debug!(patch = self.name(), array = %name, ?counts, "array patched");
                outcome.arrays.push((name, counts));
            }
        }
        outcome
    }
}

/// Summary of a patch run against a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub file: PathBuf,
    pub outcome: PatchOutcome,
    /// False when nothing changed and the file was left untouched.
    pub written: bool,
    pub backup: Option<PathBuf>,
}

/// Load the file named by `config`, apply `patch`, and write it back.
///
/// Nothing is written, backup included, when the patch changes no record.
pub fn apply_to_file(patch: &dyn Patch, config: &PatchConfig) -> Result<PatchReport> {
    let target = WriteTarget::acquire(&config.file, config.backup.clone())?;
    let text = match target.snapshot_text() {
        Some(text) => text?,
        None => {
            return Err(QuizError::MissingInput {
                path: config.file.clone(),
            })
        }
    };

    let mut doc = store::parse_value(text, &config.file)?;
    let outcome = patch.apply(&mut doc);

    if outcome.changed() == 0 {
        tracing::info!(patch = patch.name(), file = %config.file.display(), "no changes, file left untouched");
        return Ok(PatchReport {
            file: config.file.clone(),
            outcome,
            written: false,
            backup: None,
        });
    }

    let backup = target.commit(&store::to_json(&doc)?)?;
    tracing::info!(
        patch = patch.name(),
        file = %config.file.display(),
        changed = outcome.changed(),
        "patch applied"
    );
    Ok(PatchReport {
        file: config.file.clone(),
        outcome,
        written: true,
        backup,
    })
}

/// Drop repeated array names, keeping first occurrences in order.
pub(crate) fn unique_arrays(arrays: Vec<ArrayName>) -> Vec<ArrayName> {
    let mut unique = Vec::with_capacity(arrays.len());
    for name in arrays {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}

/// String value of `key` in `entry`, if it is an object holding a string.
pub(crate) fn str_field<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry.as_object()?.get(key)?.as_str()
}
