/// Zip archive manager

use super::{remove_file, ResourceManager};
use crate::error::{ManagerError, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Directory members are extracted into unless configured otherwise
pub const DEFAULT_EXTRACT_DIR: &str = "extracted";

/// An entry stored in an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Member name (`/` separated relative path)
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

/// Create, append to, extract and delete a zip archive
#[derive(Debug, Clone)]
pub struct ArchiveManager {
    path: PathBuf,
    base_dir: Option<PathBuf>,
    extract_dir: PathBuf,
}

impl ArchiveManager {
    /// Bind a manager to the archive at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            base_dir: None,
            extract_dir: PathBuf::from(DEFAULT_EXTRACT_DIR),
        }
    }

    /// Name members relative to `dir` when the added file lies under it
    pub fn relative_to<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Extract into `dir` instead of [`DEFAULT_EXTRACT_DIR`]
    pub fn extract_to<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.extract_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Directory used by [`ArchiveManager::extract_and_list`]
    pub fn extract_dir(&self) -> &Path {
        &self.extract_dir
    }

    /// Create a new empty archive, truncating any existing one
    pub fn create_archive(&self) -> Result<()> {
        debug!("Creating archive {}", self.path.display());
        let file = File::create(&self.path).map_err(|e| ManagerError::io(&self.path, e))?;
        ZipWriter::new(file)
            .finish()
            .map_err(|e| self.zip_error(e))?;
        Ok(())
    }

    /// Append the file at `source` as a new member
    ///
    /// The member is named after the source's relative path. Appending is
    /// additive: a member with the same name is kept alongside the new one.
    pub fn add_file<P: AsRef<Path>>(&self, source: P) -> Result<ArchiveMember> {
        let source = source.as_ref();
        let metadata = fs::metadata(source).map_err(|e| ManagerError::io(source, e))?;
        if !metadata.is_file() {
            return Err(ManagerError::io(
                source,
                io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        let name = self.member_name(source);
        debug!("Adding {} to {} as {}", source.display(), self.path.display(), name);
        let mut input = File::open(source).map_err(|e| ManagerError::io(source, e))?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| ManagerError::io(&self.path, e))?;

        let mut zip = ZipWriter::new_append(file).map_err(|e| self.zip_error(e))?;
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(name.clone(), options)
            .map_err(|e| self.zip_error(e))?;
        let size = io::copy(&mut input, &mut zip).map_err(|e| ManagerError::io(&self.path, e))?;
        zip.finish().map_err(|e| self.zip_error(e))?;

        Ok(ArchiveMember { name, size })
    }

    /// Extract every member into the extraction directory and list them in archive order
    ///
    /// Members sharing a name are all listed; the last one wins on disk.
    pub fn extract_and_list(&self) -> Result<Vec<ArchiveMember>> {
        let mut archive = self.open_archive()?;
        debug!(
            "Extracting {} into {}",
            self.path.display(),
            self.extract_dir.display()
        );
        fs::create_dir_all(&self.extract_dir)
            .map_err(|e| ManagerError::io(&self.extract_dir, e))?;
        archive
            .extract(&self.extract_dir)
            .map_err(|e| self.zip_error(e))?;
        self.members(&mut archive)
    }

    /// List members without extracting
    pub fn list(&self) -> Result<Vec<ArchiveMember>> {
        let mut archive = self.open_archive()?;
        self.members(&mut archive)
    }

    /// Remove the archive, then `source` if it is non-empty
    pub fn delete_files_and_archive<P: AsRef<Path>>(&self, source: P) -> Result<()> {
        remove_file(&self.path)?;
        let source = source.as_ref();
        if !source.as_os_str().is_empty() {
            remove_file(source)?;
        }
        Ok(())
    }

    fn open_archive(&self) -> Result<ZipArchive<File>> {
        let file = File::open(&self.path).map_err(|e| ManagerError::io(&self.path, e))?;
        ZipArchive::new(file).map_err(|e| self.zip_error(e))
    }

    fn members(&self, archive: &mut ZipArchive<File>) -> Result<Vec<ArchiveMember>> {
        let mut members = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index(index).map_err(|e| self.zip_error(e))?;
            members.push(ArchiveMember {
                name: entry.name().to_string(),
                size: entry.size(),
            });
        }
        Ok(members)
    }

    /// Relative, `/` separated member name for `source`
    ///
    /// `..` removes the preceding component and never climbs above the root.
    fn member_name(&self, source: &Path) -> String {
        let relative = self
            .base_dir
            .as_deref()
            .and_then(|base| source.strip_prefix(base).ok())
            .unwrap_or(source);

        let mut parts: Vec<String> = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::ParentDir => {
                    parts.pop();
                }
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            }
        }
        parts.join("/")
    }

    fn zip_error(&self, error: ZipError) -> ManagerError {
        match error {
            ZipError::Io(e) => ManagerError::io(&self.path, e),
            other => ManagerError::parse(&self.path, "zip", other.to_string()),
        }
    }
}

impl ResourceManager for ArchiveManager {
    fn path(&self) -> &Path {
        &self.path
    }
}
