//! Error types for probing, scanning and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read metadata or list a single filesystem entry.
#[derive(Debug, Error)]
#[error("cannot probe {path}: {source}")]
pub struct ProbeError {
    /// Path that could not be probed.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

impl ProbeError {
    /// Create a probe error with path context.
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// Check whether the entry simply vanished.
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }
}

/// Invalid caller-supplied configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Number of rows to report must be at least one.
    #[error("Lines to print must be a value greater than 0: {value} is not valid")]
    InvalidTopN { value: i64 },

    /// Root path was empty.
    #[error("Root path cannot be empty")]
    EmptyRoot,

    /// Other invalid configuration.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root path could not be read at all.
    #[error("cannot traverse {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A single entry failed and the policy is to abort.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The scan was cancelled before it completed.
    #[error("Scan cancelled")]
    Cancelled,
}

impl ScanError {
    /// Create a traversal error for the root path.
    pub fn traversal(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Traversal {
            path: path.into(),
            source,
        }
    }
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}
