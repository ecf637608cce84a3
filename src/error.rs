use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for manager operations
pub type Result<T> = std::result::Result<T, ManagerError>;

/// Errors that can occur while managing files, archives and volumes
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The target path of an operation does not exist
    #[error("Not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The operating system refused access to a path
    #[error("Permission denied: {}", path.display())]
    PermissionDenied {
        /// Path that was refused
        path: PathBuf,
    },

    /// Content could not be parsed as the expected format
    #[error("Parse error in {} ({format}): {message}", path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// Format name (JSON, XML, zip)
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// Any other I/O failure, with the path it occurred on
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the failing call was made on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A record was rejected before anything was written
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl ManagerError {
    /// Classify an I/O error raised while operating on `path`
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => ManagerError::NotFound { path },
            io::ErrorKind::PermissionDenied => ManagerError::PermissionDenied { path },
            _ => ManagerError::Io { path, source },
        }
    }

    /// Create a parse error for a file in the given format
    pub fn parse<P: AsRef<Path>, S: Into<String>>(
        path: P,
        format: &'static str,
        message: S,
    ) -> Self {
        ManagerError::Parse {
            path: path.as_ref().to_path_buf(),
            format,
            message: message.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record<S: Into<String>>(message: S) -> Self {
        ManagerError::InvalidRecord(message.into())
    }

    /// Is this a missing-target error?
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManagerError::NotFound { .. })
    }
}
