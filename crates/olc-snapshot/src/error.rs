use std::path::{Path, PathBuf};

/// Loader errors are small, explicit, and test-friendly.
///
/// Every variant is fatal for the run: a report is never produced from a
/// partially loaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    InputNotFound { path: PathBuf },
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    /// Top-level value is neither an array nor an object wrapping one.
    NotACollection { path: PathBuf },
    /// An element of the array is not a record object.
    MalformedEntry {
        path: PathBuf,
        index: usize,
        message: String,
    },
}

impl SnapshotError {
    pub fn path(&self) -> &Path {
        match self {
            SnapshotError::InputNotFound { path }
            | SnapshotError::Io { path, .. }
            | SnapshotError::Parse { path, .. }
            | SnapshotError::NotACollection { path }
            | SnapshotError::MalformedEntry { path, .. } => path,
        }
    }

    pub(crate) fn io(path: &Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            SnapshotError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SnapshotError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::InputNotFound { path } => {
                write!(f, "input not found: {}", path.display())
            }
            SnapshotError::Io { path, message } => {
                write!(f, "io error reading {}: {}", path.display(), message)
            }
            SnapshotError::Parse { path, message } => {
                write!(f, "invalid JSON in {}: {}", path.display(), message)
            }
            SnapshotError::NotACollection { path } => write!(
                f,
                "{} does not contain an array of records",
                path.display()
            ),
            SnapshotError::MalformedEntry {
                path,
                index,
                message,
            } => write!(
                f,
                "malformed record #{} in {}: {}",
                index,
                path.display(),
                message
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}
