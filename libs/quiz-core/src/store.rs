//! Loading and writing quiz files.
//!
//! Writes go through [`WriteTarget`]: the current contents are captured when
//! the target is acquired, copied to the backup sibling before the original
//! is touched, and the new contents land via a temp file and rename.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{QuizError, Result};
use crate::types::{BackupPolicy, QuizDocument};

/// Load a quiz file as a loose JSON object.
pub fn load_value(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path).map_err(|e| QuizError::io(path, e))?;
    parse_value(&text, path)
}

/// Parse quiz file text as a loose JSON object. `path` is used for errors.
pub fn parse_value(text: &str, path: &Path) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(text).map_err(|source| QuizError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(QuizError::InvalidDocument(format!(
            "{}: expected a JSON object at top level, found {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

/// Load a quiz file into the typed document model.
pub fn load_document(path: &Path) -> Result<QuizDocument> {
    let map = load_value(path)?;
    serde_json::from_value(Value::Object(map)).map_err(|source| QuizError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize with two-space indentation, leaving non-ASCII text unescaped.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| QuizError::InvalidDocument(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

/// Path of the backup sibling for `path` under `suffix`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

/// Path of the scratch file `commit` writes before renaming over `path`.
///
/// Hidden and uniquely named so it never lands on a backup sibling.
fn scratch_path(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4()))
}

/// A file about to be overwritten, with its prior contents captured.
#[derive(Debug)]
pub struct WriteTarget {
    path: PathBuf,
    snapshot: Option<Vec<u8>>,
    backup: BackupPolicy,
}

impl WriteTarget {
    /// Capture the current contents of `path`, if any, as raw bytes.
    pub fn acquire(path: impl Into<PathBuf>, backup: BackupPolicy) -> Result<Self> {
        let path = path.into();
        let snapshot = match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(QuizError::io(&path, e)),
        };
        Ok(Self {
            path,
            snapshot,
            backup,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Contents of the file at acquisition time.
    pub fn snapshot(&self) -> Option<&[u8]> {
        self.snapshot.as_deref()
    }

    /// Snapshot decoded as UTF-8 text.
    pub fn snapshot_text(&self) -> Option<Result<&str>> {
        self.snapshot.as_deref().map(|bytes| {
            std::str::from_utf8(bytes).map_err(|e| QuizError::Io {
                path: self.path.clone(),
                source: std::io::Error::new(ErrorKind::InvalidData, e),
            })
        })
    }

    /// Write the backup (when enabled), then replace the file with `contents`.
    ///
    /// Returns the backup path when one was written. The backup is left in
    /// place even if replacing the original fails.
    pub fn commit(self, contents: &str) -> Result<Option<PathBuf>> {
        let backup = match (&self.backup, &self.snapshot) {
            (BackupPolicy::Sibling { suffix }, Some(snapshot)) => {
                let backup = backup_path(&self.path, suffix);
                fs::write(&backup, snapshot).map_err(|e| QuizError::io(&backup, e))?;
                tracing::info!(backup = %backup.display(), "backup written");
                Some(backup)
            }
            _ => None,
        };

        let tmp = scratch_path(&self.path);
        if let Err(e) = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(QuizError::Io {
                path: self.path,
                source: e,
            });
        }

        tracing::debug!(path = %self.path.display(), bytes = contents.len(), "file written");
        Ok(backup)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
