//! olc-snapshot
//!
//! Loads the JSON snapshot collections (`pay_*.json`) from a snapshot
//! directory into typed records.
//!
//! Input format
//!
//! - a JSON array of objects, one object per record, or
//! - an object wrapping that array under the collection's wrapper key
//!   (e.g. `{"certifications": [...]}`).
//!
//! A UTF-8 BOM is tolerated. IO is explicit; parsing is pure.

mod collection;
mod error;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

pub use collection::SnapshotCollection;
pub use error::SnapshotError;

/// Directory holding one export of every collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file backing collection `T`.
    pub fn path_of<T: SnapshotCollection>(&self) -> PathBuf {
        self.root.join(T::FILE_NAME)
    }

    /// Load collection `T`. A missing file is [`SnapshotError::InputNotFound`].
    pub fn load<T: SnapshotCollection>(&self) -> Result<Vec<T>, SnapshotError> {
        load_collection_file(self.path_of::<T>())
    }
}

/// Load a collection from an explicit file path.
pub fn load_collection_file<T: SnapshotCollection>(
    path: impl AsRef<Path>,
) -> Result<Vec<T>, SnapshotError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| SnapshotError::io(path, e))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    let raw = std::str::from_utf8(bytes).map_err(|e| SnapshotError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let records = parse_collection::<T>(path, raw)?;
    tracing::debug!(
        file = T::FILE_NAME,
        records = records.len(),
        "snapshot collection loaded"
    );
    Ok(records)
}

/// Parse collection content (pure). `path` is only used for error context.
pub fn parse_collection<T: SnapshotCollection>(
    path: &Path,
    raw: &str,
) -> Result<Vec<T>, SnapshotError> {
    let doc: Value = serde_json::from_str(raw.trim_start_matches('\u{feff}')).map_err(|e| {
        SnapshotError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let items = match doc {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(T::WRAPPER_KEY) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(SnapshotError::NotACollection {
                    path: path.to_path_buf(),
                })
            }
        },
        _ => {
            return Err(SnapshotError::NotACollection {
                path: path.to_path_buf(),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(SnapshotError::MalformedEntry {
                    path: path.to_path_buf(),
                    index,
                    message: "expected a JSON object".to_string(),
                });
            }
            serde_json::from_value::<T>(item).map_err(|e| SnapshotError::MalformedEntry {
                path: path.to_path_buf(),
                index,
                message: e.to_string(),
            })
        })
        .collect()
}
