//! Core types for quiz documents.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Level assigned to every converted card.
pub const DEFAULT_LEVEL: &str = "Intermediate";

/// Title used when a conversion does not set one.
pub const DEFAULT_TITLE: &str =
    "Microsoft identity platform (Entra ID) — Developer-depth for Product Managers";

/// Loosely typed record stored in `items` and `cloze`.
pub type Record = Map<String, Value>;

/// Anki-style flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub level: String,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// JSON document consumed by the quiz app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDocument {
    pub title: String,
    pub writeup: String,
    pub source: String,
    pub anki: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Record>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloze: Option<Vec<Record>>,
    /// Top-level keys this crate does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuizDocument {
    pub fn new(title: impl Into<String>, writeup: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            writeup: writeup.into(),
            source: source.into(),
            anki: Vec::new(),
            items: None,
            cloze: None,
            extra: Map::new(),
        }
    }
}

/// Card-like arrays in a quiz document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayName {
    Anki,
    Items,
    Cloze,
}

impl ArrayName {
    pub const ALL: [ArrayName; 3] = [Self::Anki, Self::Items, Self::Cloze];

    /// Get the JSON key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anki => "anki",
            Self::Items => "items",
            Self::Cloze => "cloze",
        }
    }
}

impl fmt::Display for ArrayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anki" => Ok(Self::Anki),
            "items" => Ok(Self::Items),
            "cloze" => Ok(Self::Cloze),
            other => Err(format!("unknown array '{other}' (expected anki, items or cloze)")),
        }
    }
}

/// Whether a patch keeps a copy of the file it overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackupPolicy {
    #[default]
    Disabled,
    /// Copy to a sibling named `<file name><suffix>`.
    Sibling { suffix: String },
}

impl BackupPolicy {
    pub const DEFAULT_SUFFIX: &'static str = ".bak";

    pub fn sibling(suffix: impl Into<String>) -> Self {
        Self::Sibling {
            suffix: suffix.into(),
        }
    }
}

/// Settings for a TSV to JSON conversion.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Companion document used as the overview text.
    pub writeup: Option<PathBuf>,
    pub title: String,
    pub level: String,
}

impl ConvertConfig {
    /// Create a config with the default title and level.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            writeup: None,
            title: DEFAULT_TITLE.to_string(),
            level: DEFAULT_LEVEL.to_string(),
        }
    }
}

/// Settings shared by every patch run.
#[derive(Debug, Clone)]
pub struct PatchConfig {
    pub file: PathBuf,
    pub backup: BackupPolicy,
}

impl PatchConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            backup: BackupPolicy::default(),
        }
    }
}
