/// File resource managers
///
/// Every manager is bound to a single path for its lifetime and opens,
/// uses and releases the underlying file within each call. Nothing is
/// cached between calls.

/// Zip archive manager
pub mod archive;
/// JSON document manager
pub mod json;
/// Plain text file manager
pub mod plain;
/// Flat XML document manager
pub mod xml;

pub use archive::{ArchiveManager, ArchiveMember, DEFAULT_EXTRACT_DIR};
pub use json::JsonFileManager;
pub use plain::PlainFileManager;
pub use xml::{XmlFileManager, XML_ROOT};

use crate::error::{ManagerError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Common lifecycle shared by all file managers
pub trait ResourceManager {
    /// Path this manager is bound to
    fn path(&self) -> &Path;

    /// Does the managed resource currently exist?
    fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Remove the managed resource
    ///
    /// Fails with [`ManagerError::NotFound`] if it does not exist.
    fn delete(&self) -> Result<()> {
        remove_file(self.path())
    }
}

/// Read a whole file as UTF-8 text
pub(crate) fn read_text(path: &Path) -> Result<String> {
    debug!("Reading {}", path.display());
    fs::read_to_string(path).map_err(|e| ManagerError::io(path, e))
}

/// Replace a file's whole content, creating it if absent
pub(crate) fn write_text(path: &Path, content: &str) -> Result<()> {
    debug!("Writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content).map_err(|e| ManagerError::io(path, e))
}

/// Remove a single file
pub(crate) fn remove_file(path: &Path) -> Result<()> {
    debug!("Removing {}", path.display());
    fs::remove_file(path).map_err(|e| ManagerError::io(path, e))
}
