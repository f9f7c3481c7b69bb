//! Error types for projecttools

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for projecttools operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for projecttools
///
/// Variants fall into two classes: domain errors (bad input, duplicate or
/// missing profiles) which never mutate the config document, and I/O or
/// data errors raised while reading or writing it.
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the user's home directory")]
    HomeDirUnavailable,

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Config file '{path}' is corrupt: {reason}")]
    CorruptConfig { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid setting value for {key}: {reason}")]
    InvalidSettingValue { key: String, reason: String },

    // -------------------------------------------------------------------------
    // Profile Errors
    // -------------------------------------------------------------------------
    #[error("Profile name cannot be empty")]
    EmptyProfileName,

    #[error("Profile \"{0}\" already exists")]
    ProfileAlreadyExists(String),

    #[error("Profile \"{0}\" does not exist")]
    ProfileNotFound(String),

    #[error("Already on profile \"{0}\"")]
    AlreadyActive(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ProfileNotFound(_))
    }

    /// Check if this error was caused by user input rather than the filesystem
    ///
    /// Domain errors are raised before anything is written, so the config
    /// document is guaranteed to be unchanged.
    #[must_use]
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyProfileName
                | Error::ProfileAlreadyExists(_)
                | Error::ProfileNotFound(_)
                | Error::AlreadyActive(_)
                | Error::InvalidSettingValue { .. }
        )
    }

    /// Check if this is an I/O or data error
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        !self.is_domain_error()
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================
// These reduce repetitive map_err patterns in the store and settings modules.

/// Create a directory (and parents) with proper error handling
pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}
