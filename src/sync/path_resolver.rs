use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{Config, DEFAULT_DRIVE_MOUNT_ROOT};

static DRIVE_LETTER_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]:/").expect("valid drive letter regex"));

/// Rewrites stored paths into ones usable on this host.
///
/// Backslashes become forward slashes and drive-letter paths are mapped
/// under the mount root (`e:\Music\a.mp3` -> `/mnt/e/Music/a.mp3`). Only the
/// string is inspected; the filesystem is never touched.
#[derive(Debug, Clone)]
pub struct PathResolver {
    mount_root: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DRIVE_MOUNT_ROOT)
    }
}

impl PathResolver {
    pub fn new(mount_root: &str) -> Self {
        Self {
            mount_root: mount_root.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.drive_mount_root)
    }

    pub fn resolve(&self, path: &str) -> String {
        let normalized = path.replace('\\', "/");

        if DRIVE_LETTER_PATH.is_match(&normalized) {
            let drive = normalized[..1].to_lowercase();
            return format!("{}/{}{}", self.mount_root, drive, &normalized[2..]);
        }

        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table() {
        let resolver = PathResolver::default();
        let cases = [
            (r"e:\Music\song.mp3", "/mnt/e/Music/song.mp3"),
            ("E:/Music/song.mp3", "/mnt/e/Music/song.mp3"),
            ("/mnt/e/Music/song.mp3", "/mnt/e/Music/song.mp3"),
            ("/home/user/song.mp3", "/home/user/song.mp3"),
            (r"charts\1_song.pdf", "charts/1_song.pdf"),
            ("relative/song.mp3", "relative/song.mp3"),
        ];

        for (input, expected) in cases {
            assert_eq!(resolver.resolve(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_custom_mount_root() {
        let resolver = PathResolver::new("/media/drives/");
        assert_eq!(resolver.resolve(r"C:\Sheets\a.pdf"), "/media/drives/c/Sheets/a.pdf");
    }

    #[test]
    fn test_colon_without_drive_prefix_is_unchanged() {
        let resolver = PathResolver::default();
        assert_eq!(resolver.resolve("notes: take 2.txt"), "notes: take 2.txt");
        assert_eq!(resolver.resolve("e:"), "e:");
    }
}
