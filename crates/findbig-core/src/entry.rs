//! Probed filesystem entries.

use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Type of filesystem object, as seen without following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (never dereferenced).
    Symlink,
    /// Other file types (sockets, devices, fifos).
    Other,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(self) -> bool {
        matches!(self, EntryKind::Symlink)
    }

    /// Classify a non-following file type.
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// Creation and modification times of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Last modification time.
    pub modified: SystemTime,
    /// Creation time. Falls back to the inode change time on platforms
    /// without birth time support.
    pub created: Option<SystemTime>,
}

impl Timestamps {
    /// Create timestamps with only modified time.
    pub fn with_modified(modified: SystemTime) -> Self {
        Self {
            modified,
            created: None,
        }
    }

    /// Create timestamps with both times.
    pub fn new(modified: SystemTime, created: Option<SystemTime>) -> Self {
        Self { modified, created }
    }

    /// Creation time, or the modification time when creation is unknown.
    pub fn created_or_modified(&self) -> SystemTime {
        self.created.unwrap_or(self.modified)
    }
}

/// The result of a single non-following metadata read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Path as it was probed.
    pub path: PathBuf,
    /// Kind of the entry itself (a link is reported as a link).
    pub kind: EntryKind,
    /// Size reported for the entry itself, in bytes.
    pub size: u64,
    /// Entry timestamps.
    pub timestamps: Timestamps,
}

impl Entry {
    /// Create a new entry.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, size: u64, timestamps: Timestamps) -> Self {
        Self {
            path: path.into(),
            kind,
            size,
            timestamps,
        }
    }
}
