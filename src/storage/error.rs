use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StorageError {
    IoError(String),
    FileNotFound(PathBuf),
    NotADirectory(PathBuf),
    /// Source and destination of a copy are one file
    SameFile(PathBuf),
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },
    RemoveFailed {
        path: PathBuf,
        reason: String,
    },
    ProbeFailed {
        path: PathBuf,
        reason: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(msg) => write!(f, "IO error: {}", msg),
            StorageError::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            StorageError::NotADirectory(path) => {
                write!(f, "Not a directory: {}", path.display())
            }
            StorageError::SameFile(path) => {
                write!(f, "{} is already in place, refusing to copy it onto itself", path.display())
            }
            StorageError::CopyFailed { from, to, reason } => {
                write!(
                    f,
                    "Failed to copy {} to {}: {}",
                    from.display(),
                    to.display(),
                    reason
                )
            }
            StorageError::RemoveFailed { path, reason } => {
                write!(f, "Failed to delete {}: {}", path.display(), reason)
            }
            StorageError::ProbeFailed { path, reason } => {
                write!(f, "Failed to read audio info from {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        StorageError::IoError(error.to_string())
    }
}
