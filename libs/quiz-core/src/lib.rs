//! Core library for building and patching quiz files.
//!
//! Provides:
//! - Tab-separated reader for Anki plain-text exports
//! - Conversion of exported rows into a quiz document
//! - Card-level patches (remove by question text, overwrite a field)
//! - Loading and backup-guarded writing of quiz JSON
//! - Shared types (Card, QuizDocument, configs)

pub mod convert;
pub mod error;
pub mod parser;
pub mod patch;
pub mod stats;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_support;

pub use convert::{convert, ConvertReport};
pub use error::{QuizError, Result};
pub use parser::{parse_tsv, ColumnLayout, TsvTable};
pub use patch::{apply_to_file, Patch, PatchOutcome, PatchReport, RemoveByMatch, SetField};
pub use stats::{summarize, ArrayStats};
pub use store::{load_document, load_value, to_json, WriteTarget};
pub use types::{
    ArrayName, BackupPolicy, Card, ConvertConfig, PatchConfig, QuizDocument, Record, DEFAULT_LEVEL,
    DEFAULT_TITLE,
};
