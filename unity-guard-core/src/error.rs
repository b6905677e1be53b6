//! Error types for Unity integrity checks
//!
//! The checking pipeline itself never fails: structural problems are
//! reported as [`crate::Issue`]s. These errors only come from the edges,
//! where file content is read or configuration is assembled.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for Unity guard operations
pub type Result<T> = std::result::Result<T, UnityGuardError>;

/// Main error type for Unity guard operations
#[derive(Error, Debug)]
pub enum UnityGuardError {
    /// IO errors when reading a target file
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File content is not valid UTF-8 text
    #[error("Content of {} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },

    /// Invalid validator or classifier configuration
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl UnityGuardError {
    /// Create an IO error bound to the file it happened on
    pub fn io_at<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an encoding error
    pub fn encoding<P: AsRef<Path>>(path: P) -> Self {
        Self::Encoding {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True when the underlying IO error means the file simply is not there
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
