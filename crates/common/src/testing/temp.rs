//! Self-cleaning temporary directories

#![allow(clippy::missing_errors_doc)]

use std::path::{Path, PathBuf};
use std::{fs, io};

/// Temporary directory removed on drop
///
/// ```
/// use hotelix_common::testing::TempDir;
///
/// let dir = TempDir::new("hotelix-doc").unwrap();
/// let db = dir.db_path("stats");
/// assert!(db.ends_with("stats.db"));
/// ```
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Create `<tmp>/<prefix>-<uuid>`.
    pub fn new(prefix: &str) -> io::Result<Self> {
        let path = std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a SQLite file named `<name>.db` inside the directory. The file
    /// itself is not created.
    pub fn db_path(&self, name: &str) -> PathBuf {
        self.path.join(format!("{name}.db"))
    }

    pub fn create_file(&self, name: &str, contents: &str) -> io::Result<PathBuf> {
        let file_path = self.path.join(name);
        fs::write(&file_path, contents)?;
        Ok(file_path)
    }

    /// Keep the directory on disk and return its path.
    pub fn keep(mut self) -> PathBuf {
        std::mem::take(&mut self.path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if !self.path.as_os_str().is_empty() && self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for testing::temp.
    use super::*;

    /// Validates `TempDir::new` behavior for the drop cleanup scenario.
    ///
    /// Assertions:
    /// - Confirms files can be written inside the directory.
    /// - Confirms the directory is gone after drop.
    #[test]
    fn test_removed_on_drop() {
        let dir = TempDir::new("hotelix-temp").unwrap();
        let file = dir.create_file("config.toml", "[database]").unwrap();
        let root = dir.path().to_path_buf();
        assert!(file.exists());

        drop(dir);
        assert!(!root.exists());
    }

    #[test]
    fn test_keep_survives_drop() {
        let dir = TempDir::new("hotelix-keep").unwrap();
        let kept = dir.keep();
        assert!(kept.exists());
        fs::remove_dir_all(kept).unwrap();
    }
}
