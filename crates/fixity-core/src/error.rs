//! Error types for collection runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a collection run.
#[derive(Debug, Error)]
pub enum FixityError {
    /// Scan root does not exist.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ledger could not be created, appended or flushed.
    #[error("Cannot write ledger {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration or ledger usage.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A file name cannot be written to the ledger without altering it.
    #[error("Path is not valid UTF-8: {path}")]
    InvalidPath { path: PathBuf },

    /// The walker could not read an entry.
    #[error("Traversal error at {path}: {message}")]
    Traversal { path: PathBuf, message: String },
}

impl FixityError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a ledger write error.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutputWrite { .. } | Self::InvalidConfig { .. })
    }

    /// Convert a per-file failure into a run warning.
    pub fn to_warning(&self) -> RunWarning {
        let (path, kind) = match self {
            Self::PermissionDenied { path } => (path.clone(), WarningKind::PermissionDenied),
            Self::NotFound { path } | Self::Io { path, .. } | Self::OutputWrite { path, .. } => {
                (path.clone(), WarningKind::ReadError)
            }
            Self::Traversal { path, .. } => (path.clone(), WarningKind::TraversalError),
            Self::InvalidPath { path } => (path.clone(), WarningKind::InvalidPath),
            Self::InvalidConfig { .. } => (PathBuf::new(), WarningKind::ReadError),
        };
        RunWarning {
            path,
            message: self.to_string(),
            kind,
        }
    }
}

/// Kind of per-candidate warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// The file could not be read to the end.
    ReadError,
    /// A directory or entry could not be listed.
    TraversalError,
    /// The path has no lossless text form for the ledger.
    InvalidPath,
}

/// Non-fatal failure recorded for one candidate; the run continues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl RunWarning {
    /// Create a new run warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a traversal warning.
    pub fn traversal(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(path, message, WarningKind::TraversalError)
    }

    /// Create a read error warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let kind = if error.kind() == std::io::ErrorKind::PermissionDenied {
            WarningKind::PermissionDenied
        } else {
            WarningKind::ReadError
        };
        Self {
            message: format!("Read error: {error}"),
            path: path.into(),
            kind,
        }
    }
}

impl std::fmt::Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
