//! Error types for quiz-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors that abort a conversion or patch run.
///
/// Recoverable conditions (a missing writeup document, short TSV rows) are
/// handled where they occur and never reach this type.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("no data rows in {}", path.display())]
    EmptyInput { path: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid quiz document: {0}")]
    InvalidDocument(String),
}

impl QuizError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingInput { path }
        } else {
            Self::Io { path, source }
        }
    }
}
