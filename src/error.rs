//! Error types for Groundwork
//!
//! Uses `thiserror` for library errors; the CLI wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Groundwork operations
pub type GroundworkResult<T> = Result<T, GroundworkError>;

/// Broad failure class, surfaced in JSON events and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Manifest missing or the package manager failed
    DependencyInstall,
    /// Path collision, unwritable or unmounted volume
    Filesystem,
    /// Invalid configuration file
    Config,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorClass::DependencyInstall => write!(f, "dependency-install"),
            ErrorClass::Filesystem => write!(f, "filesystem"),
            ErrorClass::Config => write!(f, "config"),
        }
    }
}

/// Main error type for Groundwork operations
#[derive(Error, Debug)]
pub enum GroundworkError {
    /// Dependency manifest does not exist
    #[error("dependency manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Package-manager process could not be launched
    #[error("failed to launch installer '{command}': {source}")]
    InstallerSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Package manager ran but reported failure
    #[error("installer '{command}' failed with {}", fmt_exit(.code))]
    InstallerFailed { command: String, code: Option<i32> },

    /// A path segment exists but is not a directory
    #[error("path '{path}' exists but is not a directory")]
    PathConflict { path: PathBuf },

    /// Directory creation failed (unwritable or unmounted volume)
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GroundworkError {
    /// Map the error onto the bootstrap failure taxonomy.
    pub fn class(&self) -> ErrorClass {
        match self {
            GroundworkError::ManifestNotFound { .. }
            | GroundworkError::InstallerSpawn { .. }
            | GroundworkError::InstallerFailed { .. } => ErrorClass::DependencyInstall,
            GroundworkError::PathConflict { .. }
            | GroundworkError::CreateDir { .. }
            | GroundworkError::Io(_) => ErrorClass::Filesystem,
            GroundworkError::InvalidConfig { .. } => ErrorClass::Config,
        }
    }
}

fn fmt_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
