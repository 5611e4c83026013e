use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{has_extension, probe_audio_duration, FileStore, StorageError};

/// [`FileStore`] backed by the host filesystem.
#[derive(Debug, Default, Clone)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for LocalFileStore {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, StorageError> {
        if !dir.is_dir() {
            return Err(StorageError::NotADirectory(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }

        debug!("Listed {} matching files in {}", files.len(), dir.display());
        Ok(files)
    }

    fn is_same_file(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        fs::copy(from, to).map_err(|e| StorageError::CopyFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), StorageError> {
        fs::remove_file(path).map_err(|e| StorageError::RemoveFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn create_dir_all(&self, dir: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(dir)?;
        Ok(())
    }

    fn probe_duration(&self, path: &Path) -> Option<u32> {
        match probe_audio_duration(path) {
            Ok(duration) => duration,
            Err(e) => {
                debug!("{}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AUDIO_EXTENSIONS, CHART_EXTENSIONS};
    use std::fs::File;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn test_lists_only_supported_files_sorted_by_name() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "b song.mp3");
        create_test_file(temp_dir.path(), "a song.FLAC");
        create_test_file(temp_dir.path(), "cover.jpg");
        create_test_file(temp_dir.path(), "readme");

        let files = LocalFileStore::new()
            .list_files(temp_dir.path(), AUDIO_EXTENSIONS)
            .unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a song.FLAC", "b song.mp3"]);
    }

    #[test]
    fn test_listing_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let sub_dir = temp_dir.path().join("old");
        fs::create_dir(&sub_dir).unwrap();
        create_test_file(temp_dir.path(), "top.pdf");
        create_test_file(&sub_dir, "nested.pdf");

        let files = LocalFileStore::new()
            .list_files(temp_dir.path(), CHART_EXTENSIONS)
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "top.pdf");
    }

    #[test]
    fn test_listing_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let result = LocalFileStore::new().list_files(&missing, AUDIO_EXTENSIONS);
        assert!(matches!(result, Err(StorageError::NotADirectory(_))));
    }

    #[test]
    fn test_copy_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("chart.pdf");
        fs::write(&source, b"chart").unwrap();
        let dest = temp_dir.path().join("copy.pdf");

        let store = LocalFileStore::new();
        store.copy(&source, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"chart");

        store.remove(&dest).unwrap();
        assert!(!store.exists(&dest));
        assert!(store.exists(&source));
    }

    #[test]
    fn test_same_file_sees_through_relative_segments() {
        let temp_dir = TempDir::new().unwrap();
        let chart = create_test_file(temp_dir.path(), "chart.pdf");
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        let detour = temp_dir.path().join("sub").join("..").join("chart.pdf");
        let other = create_test_file(temp_dir.path(), "other.pdf");

        let store = LocalFileStore::new();
        assert!(store.is_same_file(&chart, &detour));
        assert!(!store.is_same_file(&chart, &other));
        assert!(!store.is_same_file(&chart, &temp_dir.path().join("missing.pdf")));
    }

    #[test]
    fn test_probe_duration_of_non_audio_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fake.mp3");
        fs::write(&path, b"not really audio").unwrap();
        assert_eq!(LocalFileStore::new().probe_duration(&path), None);
    }
}
