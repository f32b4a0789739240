//! Tab-separated reader for Anki plain-text exports.
//!
//! # Format
//! ```text
//! Front	Back	Tags
//! What is OIDC?	An identity layer on OAuth 2.0.	auth oidc
//! "Multi-line
//! question"	Answer
//! ```
//!
//! The first row is the header. Fields that start with `"` are quoted: a
//! doubled `""` inside them is a literal quote, and tabs or line breaks are
//! kept as text (`\r\n` and `\r` read as `\n`). Blank lines are skipped.

use std::path::Path;

use crate::error::{QuizError, Result};

const DELIMITER: char = '\t';
const QUOTE: char = '"';

/// Minimum number of fields a data row is padded to.
pub const MIN_FIELDS: usize = 3;

/// Column positions of the card fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub front: usize,
    pub back: usize,
    pub tags: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            front: 0,
            back: 1,
            tags: 2,
        }
    }
}

impl ColumnLayout {
    /// Resolve columns by header name, or fall back to positions 0, 1, 2
    /// when any of `Front`, `Back` or `Tags` is missing.
    pub fn from_header(header: &[String]) -> Self {
        let find = |name: &str| header.iter().position(|h| h == name);
        match (find("Front"), find("Back"), find("Tags")) {
            (Some(front), Some(back), Some(tags)) => Self { front, back, tags },
            _ => Self::default(),
        }
    }

    /// Number of fields a row needs so every column can be indexed.
    pub fn width(&self) -> usize {
        self.front.max(self.back).max(self.tags) + 1
    }
}

/// Header layout plus data rows, each padded to the layout width.
#[derive(Debug, Clone)]
pub struct TsvTable {
    pub layout: ColumnLayout,
    pub rows: Vec<Vec<String>>,
}

/// Parse TSV content into a table, using the first row as the header.
///
/// Fails only when there is no row at all; a lone header gives an empty
/// table. `path` is only used for error reporting.
pub fn parse_tsv(content: &str, path: &Path) -> Result<TsvTable> {
    let mut rows = read_rows(content).into_iter();
    let header = rows.next().ok_or_else(|| QuizError::EmptyInput {
        path: path.to_path_buf(),
    })?;

    let layout = ColumnLayout::from_header(&header);
    let width = layout.width().max(MIN_FIELDS);
    let rows: Vec<Vec<String>> = rows
        .map(|mut row| {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row
        })
        .collect();

    tracing::debug!(?layout, rows = rows.len(), "parsed TSV");
    Ok(TsvTable { layout, rows })
}

/// Split tab-delimited text into rows of fields.
pub fn read_rows(content: &str) -> Vec<Vec<String>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = RowReader::new();
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match reader.state {
            State::Quoted => {
                if c == '\r' {
                    // Line breaks inside quotes are normalised to `\n`.
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    reader.field.push('\n');
                } else if c == QUOTE {
                    if chars.peek() == Some(&QUOTE) {
                        chars.next();
                        reader.field.push(QUOTE);
                    } else {
                        reader.state = State::AfterQuote;
                    }
                } else {
                    reader.field.push(c);
                }
            }
            State::FieldStart | State::Unquoted | State::AfterQuote => match c {
                DELIMITER => reader.end_field(),
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    reader.end_row();
                }
                '\n' => reader.end_row(),
                QUOTE if reader.state == State::FieldStart => reader.state = State::Quoted,
                _ => {
                    reader.field.push(c);
                    if reader.state == State::FieldStart {
                        reader.state = State::Unquoted;
                    }
                }
            },
        }
    }

    reader.finish()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    AfterQuote,
}

struct RowReader {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    field: String,
    state: State,
}

impl RowReader {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            row: Vec::new(),
            field: String::new(),
            state: State::FieldStart,
        }
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
        self.state = State::FieldStart;
    }

    fn end_row(&mut self) {
        // A bare line break with nothing before it is a blank line, not a row.
        let blank = self.row.is_empty() && self.field.is_empty() && self.state == State::FieldStart;
        if !blank {
            self.end_field();
            self.rows.push(std::mem::take(&mut self.row));
        }
        self.state = State::FieldStart;
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        // An unterminated quote keeps whatever was read.
        self.end_row();
        self.rows
    }
}
