/// Plain text file manager

use super::{read_text, write_text, ResourceManager};
use crate::error::{ManagerError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Create, write, read and delete a single text file
///
/// Writes replace the whole file and are not atomic.
#[derive(Debug, Clone)]
pub struct PlainFileManager {
    path: PathBuf,
}

impl PlainFileManager {
    /// Bind a manager to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an empty file, truncating any existing content
    pub fn create(&self) -> Result<()> {
        debug!("Creating empty file {}", self.path.display());
        File::create(&self.path).map_err(|e| ManagerError::io(&self.path, e))?;
        Ok(())
    }

    /// Replace the file's content, creating the file if absent
    pub fn write(&self, content: &str) -> Result<()> {
        write_text(&self.path, content)
    }

    /// Read the file's full content
    pub fn read(&self) -> Result<String> {
        read_text(&self.path)
    }
}

impl ResourceManager for PlainFileManager {
    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_truncates() {
        let dir = TempDir::new().unwrap();
        let manager = PlainFileManager::new(dir.path().join("notes.txt"));

        manager.write("old content").unwrap();
        manager.create().unwrap();

        assert!(manager.exists());
        assert_eq!(manager.read().unwrap(), "");
    }

    #[test]
    fn test_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let manager = PlainFileManager::new(dir.path().join("notes.txt"));

        manager.write("first line\nsecond line").unwrap();
        manager.write("short").unwrap();

        assert_eq!(manager.read().unwrap(), "short");
    }

    #[test]
    fn test_create_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let manager = PlainFileManager::new(dir.path().join("missing").join("notes.txt"));

        let result = manager.create();
        assert!(result.is_err());
        assert!(!manager.exists());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let manager = PlainFileManager::new(dir.path().join("absent.txt"));

        let result = manager.read();
        assert!(matches!(result, Err(ManagerError::NotFound { .. })));
    }

    #[test]
    fn test_delete_missing_file() {
        let dir = TempDir::new().unwrap();
        let manager = PlainFileManager::new(dir.path().join("absent.txt"));

        let result = manager.delete();
        assert!(matches!(result, Err(ManagerError::NotFound { .. })));
        assert!(!manager.exists());
    }
}
