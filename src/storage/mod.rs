//! File access used by folder sync.
//!
//! Folder listing, copying and deletion go through [`FileStore`] so the sync
//! engine can run against real directories ([`LocalFileStore`]) or an
//! in-memory tree ([`MemoryFileStore`]).

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod charts;
pub mod error;
pub mod local;
pub mod memory;
mod probe;

pub use charts::{sanitize_title, ChartStorage};
pub use error::StorageError;
pub use local::LocalFileStore;
pub use memory::MemoryFileStore;
pub use probe::probe_audio_duration;

/// Audio formats picked up from a repertoire's audio folder
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "aac", "wav", "flac", "ogg"];

/// Chart formats picked up from a repertoire's sheet folder
pub const CHART_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "gif", "txt", "doc", "docx", "odt",
];

pub trait FileStore {
    fn is_dir(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    /// Regular files directly inside `dir` whose extension is in
    /// `extensions`, sorted by file name.
    fn list_files(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, StorageError>;

    /// True when both paths name the same file
    fn is_same_file(&self, a: &Path, b: &Path) -> bool;

    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError>;

    fn remove(&self, path: &Path) -> Result<(), StorageError>;

    fn create_dir_all(&self, dir: &Path) -> Result<(), StorageError>;

    /// Playing time in whole seconds, if the file reports one
    fn probe_duration(&self, path: &Path) -> Option<u32>;
}

impl<T: FileStore + ?Sized> FileStore for Arc<T> {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn list_files(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, StorageError> {
        (**self).list_files(dir, extensions)
    }

    fn is_same_file(&self, a: &Path, b: &Path) -> bool {
        (**self).is_same_file(a, b)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        (**self).copy(from, to)
    }

    fn remove(&self, path: &Path) -> Result<(), StorageError> {
        (**self).remove(path)
    }

    fn create_dir_all(&self, dir: &Path) -> Result<(), StorageError> {
        (**self).create_dir_all(dir)
    }

    fn probe_duration(&self, path: &Path) -> Option<u32> {
        (**self).probe_duration(path)
    }
}

/// Case-insensitive extension check
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            extensions.iter().any(|allowed| *allowed == ext)
        })
        .unwrap_or(false)
}
