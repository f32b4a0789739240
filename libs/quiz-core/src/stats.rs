//! Record counts per array and level.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::ArrayName;

/// Bucket for records without a string `level`.
pub const UNSET_LEVEL: &str = "(unset)";

/// Counts for one card array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayStats {
    pub name: ArrayName,
    pub records: usize,
    /// Entries that are not JSON objects.
    pub skipped: usize,
    pub levels: BTreeMap<String, usize>,
}

/// Summarize every card array present in `doc`.
pub fn summarize(doc: &Map<String, Value>) -> Vec<ArrayStats> {
    ArrayName::ALL
        .iter()
        .filter_map(|&name| {
            let entries = doc.get(name.as_str())?.as_array()?;
            let mut stats = ArrayStats {
                name,
                records: 0,
                skipped: 0,
                levels: BTreeMap::new(),
            };
            for entry in entries {
                let Some(record) = entry.as_object() else {
                    stats.skipped += 1;
                    continue;
                };
                stats.records += 1;
                let level = record
                    .get("level")
                    .and_then(Value::as_str)
                    .unwrap_or(UNSET_LEVEL);
                *stats.levels.entry(level.to_string()).or_default() += 1;
            }
            Some(stats)
        })
        .collect()
}
