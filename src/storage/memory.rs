use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::{has_extension, FileStore, StorageError};

#[derive(Debug, Default)]
struct MemoryTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    durations: HashMap<PathBuf, u32>,
    fail_copies: bool,
    fail_removals: bool,
}

impl MemoryTree {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
            || self
                .files
                .keys()
                .any(|file| file != path && file.starts_with(path))
    }
}

/// In-memory [`FileStore`]. Directories exist when created explicitly or when
/// they hold at least one file.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    inner: Mutex<MemoryTree>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, contents: &[u8]) {
        self.inner
            .lock()
            .files
            .insert(path.as_ref().to_path_buf(), contents.to_vec());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.inner.lock().dirs.insert(path.as_ref().to_path_buf());
    }

    /// Playing time reported by `probe_duration` for this file
    pub fn set_duration(&self, path: impl AsRef<Path>, seconds: u32) {
        self.inner
            .lock()
            .durations
            .insert(path.as_ref().to_path_buf(), seconds);
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.inner.lock().files.get(path.as_ref()).cloned()
    }

    /// All file paths, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner.lock().files.keys().cloned().collect()
    }

    /// Files directly inside `dir`
    pub fn files_in(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        self.inner
            .lock()
            .files
            .keys()
            .filter(|file| file.parent() == Some(dir))
            .cloned()
            .collect()
    }

    /// Makes every subsequent `copy` fail
    pub fn fail_copies(&self, enabled: bool) {
        self.inner.lock().fail_copies = enabled;
    }

    /// Makes every subsequent `remove` fail
    pub fn fail_removals(&self, enabled: bool) {
        self.inner.lock().fail_removals = enabled;
    }
}

impl FileStore for MemoryFileStore {
    fn is_dir(&self, path: &Path) -> bool {
        self.inner.lock().is_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        let tree = self.inner.lock();
        tree.files.contains_key(path) || tree.is_dir(path)
    }

    fn list_files(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, StorageError> {
        let tree = self.inner.lock();
        if !tree.is_dir(dir) {
            return Err(StorageError::NotADirectory(dir.to_path_buf()));
        }

        Ok(tree
            .files
            .keys()
            .filter(|file| file.parent() == Some(dir) && has_extension(file, extensions))
            .cloned()
            .collect())
    }

    fn is_same_file(&self, a: &Path, b: &Path) -> bool {
        a == b
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        let mut tree = self.inner.lock();
        if tree.fail_copies {
            return Err(StorageError::CopyFailed {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                reason: "copy failure injected".to_string(),
            });
        }

        let contents = tree
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| StorageError::FileNotFound(from.to_path_buf()))?;

        match to.parent() {
            Some(parent) if tree.is_dir(parent) => {}
            _ => {
                return Err(StorageError::CopyFailed {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    reason: "destination directory does not exist".to_string(),
                })
            }
        }

        tree.files.insert(to.to_path_buf(), contents);
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), StorageError> {
        let mut tree = self.inner.lock();
        if tree.fail_removals {
            return Err(StorageError::RemoveFailed {
                path: path.to_path_buf(),
                reason: "remove failure injected".to_string(),
            });
        }

        tree.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::FileNotFound(path.to_path_buf()))
    }

    fn create_dir_all(&self, dir: &Path) -> Result<(), StorageError> {
        let mut tree = self.inner.lock();
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            tree.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn probe_duration(&self, path: &Path) -> Option<u32> {
        self.inner.lock().durations.get(path).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AUDIO_EXTENSIONS, CHART_EXTENSIONS};

    #[test]
    fn test_directories_are_implied_by_files() {
        let store = MemoryFileStore::new();
        store.add_file("/music/audio/song.mp3", b"x");

        assert!(store.is_dir(Path::new("/music/audio")));
        assert!(store.is_dir(Path::new("/music")));
        assert!(!store.is_dir(Path::new("/music/audio/song.mp3")));
        assert!(!store.is_dir(Path::new("/music/sheets")));
    }

    #[test]
    fn test_list_files_filters_by_parent_and_extension() {
        let store = MemoryFileStore::new();
        store.add_file("/m/b.mp3", b"");
        store.add_file("/m/a.wav", b"");
        store.add_file("/m/c.pdf", b"");
        store.add_file("/m/sub/d.mp3", b"");

        let audio = store.list_files(Path::new("/m"), AUDIO_EXTENSIONS).unwrap();
        assert_eq!(audio, vec![PathBuf::from("/m/a.wav"), PathBuf::from("/m/b.mp3")]);

        let charts = store.list_files(Path::new("/m"), CHART_EXTENSIONS).unwrap();
        assert_eq!(charts, vec![PathBuf::from("/m/c.pdf")]);
    }

    #[test]
    fn test_copy_requires_destination_directory() {
        let store = MemoryFileStore::new();
        store.add_file("/sheets/a.pdf", b"chart");

        assert!(store
            .copy(Path::new("/sheets/a.pdf"), Path::new("/charts/1_a.pdf"))
            .is_err());

        store.create_dir_all(Path::new("/charts")).unwrap();
        store
            .copy(Path::new("/sheets/a.pdf"), Path::new("/charts/1_a.pdf"))
            .unwrap();
        assert_eq!(store.contents("/charts/1_a.pdf").unwrap(), b"chart");
    }

    #[test]
    fn test_injected_failures() {
        let store = MemoryFileStore::new();
        store.add_file("/sheets/a.pdf", b"chart");
        store.add_dir("/charts");

        store.fail_copies(true);
        assert!(store
            .copy(Path::new("/sheets/a.pdf"), Path::new("/charts/a.pdf"))
            .is_err());

        store.fail_removals(true);
        assert!(store.remove(Path::new("/sheets/a.pdf")).is_err());
        assert!(store.exists(Path::new("/sheets/a.pdf")));
    }
}
