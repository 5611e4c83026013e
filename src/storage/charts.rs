use log::{debug, info};
use std::path::{Path, PathBuf};

use super::{FileStore, StorageError};
use crate::config::Config;

/// The managed directory chart files are copied into.
///
/// Files are named `<song_id>_<sanitized title><.ext>`; anything outside
/// the directory is an external reference.
#[derive(Debug, Clone)]
pub struct ChartStorage {
    charts_dir: PathBuf,
}

impl ChartStorage {
    pub fn new(charts_dir: impl Into<PathBuf>) -> Self {
        Self {
            charts_dir: charts_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.charts_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.charts_dir
    }

    /// True when `path` lies inside the charts directory
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.charts_dir)
    }

    pub fn canonical_path(&self, song_id: i64, title: &str, source: &Path) -> PathBuf {
        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let filename = format!("{}_{}{}", song_id, sanitize_title(title), extension);
        self.charts_dir.join(filename)
    }

    /// Copies `source` into the charts directory and returns the new path.
    ///
    /// Fails with [`StorageError::SameFile`] when `source` already is the
    /// canonical file, leaving it untouched.
    pub fn store_chart<F: FileStore + ?Sized>(
        &self,
        files: &F,
        song_id: i64,
        title: &str,
        source: &Path,
    ) -> Result<PathBuf, StorageError> {
        files.create_dir_all(&self.charts_dir)?;

        let dest = self.canonical_path(song_id, title, source);
        if files.is_same_file(source, &dest) {
            return Err(StorageError::SameFile(dest));
        }
        debug!("Copying chart {} -> {}", source.display(), dest.display());
        files.copy(source, &dest)?;

        info!("Stored chart for song {}: {}", song_id, dest.display());
        Ok(dest)
    }
}

/// Keeps alphanumerics, space, `-` and `_`, then trims
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}
