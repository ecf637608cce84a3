/// Console defaults

use crate::manager::{ArchiveManager, DEFAULT_EXTRACT_DIR};
use std::path::{Path, PathBuf};

/// File name of the console history, stored in the home directory
pub const HISTORY_FILE_NAME: &str = ".filemanager_history";

/// Settings the console applies to the managers it creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where console history is persisted, if a home directory is known
    pub history_file: Option<PathBuf>,
    /// Directory archives are extracted into
    pub extract_dir: PathBuf,
    /// Directory archive member names are made relative to
    pub base_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_file: dirs::home_dir().map(|mut p| {
                p.push(HISTORY_FILE_NAME);
                p
            }),
            extract_dir: PathBuf::from(DEFAULT_EXTRACT_DIR),
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Settings {
    /// Archive manager for `path` configured with these settings
    pub fn archive_manager<P: AsRef<Path>>(&self, path: P) -> ArchiveManager {
        ArchiveManager::new(path)
            .relative_to(&self.base_dir)
            .extract_to(&self.extract_dir)
    }
}
