//! Conversion of a TSV export into a quiz document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{QuizError, Result};
use crate::parser::{self, ColumnLayout, TsvTable};
use crate::store::{self, WriteTarget};
use crate::types::{BackupPolicy, Card, ConvertConfig, QuizDocument};

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub cards: usize,
}

/// Build a card from one padded data row.
pub fn card_from_row(row: &[String], layout: ColumnLayout, level: &str) -> Card {
    let field = |idx: usize| row.get(idx).map(String::as_str).unwrap_or_default();

    Card {
        level: level.to_string(),
        front: field(layout.front).trim().to_string(),
        back: field(layout.back).trim().to_string(),
        tags: field(layout.tags)
            .split_whitespace()
            .map(str::to_string)
            .collect(),
    }
}

/// Map every data row to a card and attach document metadata.
pub fn build_document(table: &TsvTable, config: &ConvertConfig, writeup: String) -> QuizDocument {
    let mut doc = QuizDocument::new(config.title.clone(), writeup, source_name(&config.input));
    doc.anki = table
        .rows
        .iter()
        .map(|row| card_from_row(row, table.layout, &config.level))
        .collect();
    doc
}

/// Read the companion writeup, or an empty string when it cannot be read.
pub fn read_writeup(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "writeup unavailable, using empty text");
            String::new()
        }
    }
}

/// Run the full TSV to JSON conversion described by `config`.
pub fn convert(config: &ConvertConfig) -> Result<ConvertReport> {
    let content = fs::read_to_string(&config.input).map_err(|e| QuizError::io(&config.input, e))?;
    let table = parser::parse_tsv(&content, &config.input)?;

    let writeup = config
        .writeup
        .as_deref()
        .map(read_writeup)
        .unwrap_or_default();
    let doc = build_document(&table, config, writeup);

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| QuizError::io(parent, e))?;
    }

    let target = WriteTarget::acquire(&config.output, BackupPolicy::Disabled)?;
    target.commit(&store::to_json(&doc)?)?;

    tracing::info!(output = %config.output.display(), cards = doc.anki.len(), "conversion complete");
    Ok(ConvertReport {
        output: config.output.clone(),
        cards: doc.anki.len(),
    })
}

fn source_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
