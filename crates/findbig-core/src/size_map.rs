//! Aggregated size map and scan statistics.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;
use serde::{Deserialize, Serialize};

use crate::entry::{EntryKind, Timestamps};

/// A single record of the size map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizedEntry {
    /// Aggregated size in bytes (own size for files, subtree total for
    /// directories, 0 for symlinks).
    pub size: u64,
    /// Kind of the entry as listed.
    pub kind: EntryKind,
    /// Timestamps captured by the probe, if the entry could be read.
    pub timestamps: Option<Timestamps>,
}

impl SizedEntry {
    /// Create a new record.
    pub fn new(size: u64, kind: EntryKind, timestamps: Option<Timestamps>) -> Self {
        Self {
            size,
            kind,
            timestamps,
        }
    }
}

/// Mapping from path to aggregated size, in post-order of discovery.
///
/// Every path is recorded exactly once. Because the walk is post-order,
/// the walk root is always the last record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeMap {
    entries: IndexMap<PathBuf, SizedEntry>,
}

impl SizeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path.
    ///
    /// Returns `false` and leaves the map untouched if the path was already
    /// recorded.
    pub fn record(&mut self, path: impl Into<PathBuf>, entry: SizedEntry) -> bool {
        match self.entries.entry(path.into()) {
            MapEntry::Occupied(_) => false,
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }

    /// Aggregated size of a path, if it was recorded.
    pub fn size(&self, path: impl AsRef<Path>) -> Option<u64> {
        self.entries.get(path.as_ref()).map(|e| e.size)
    }

    /// Full record of a path.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&SizedEntry> {
        self.entries.get(path.as_ref())
    }

    /// Check whether a path was recorded.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// The walk root, which is recorded last.
    pub fn root(&self) -> Option<(&PathBuf, &SizedEntry)> {
        self.entries.last()
    }

    /// Total size of the scanned tree.
    pub fn total_size(&self) -> u64 {
        self.root().map(|(_, e)| e.size).unwrap_or(0)
    }

    /// Number of recorded paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &SizedEntry)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a SizeMap {
    type Item = (&'a PathBuf, &'a SizedEntry);
    type IntoIter = indexmap::map::Iter<'a, PathBuf, SizedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Summary statistics for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Directories aggregated (including the root).
    pub dirs: u64,
    /// Regular files recorded.
    pub files: u64,
    /// Symbolic links recorded with size 0.
    pub symlinks: u64,
    /// Sockets, devices and other special files.
    pub others: u64,
    /// Entries that disappeared between listing and probing.
    pub vanished: u64,
    /// Entries that failed to probe and were recorded as 0.
    pub skipped: u64,
    /// Wall-clock duration of the walk.
    pub duration: Duration,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a recorded entry by kind.
    pub fn record_kind(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::File => self.files += 1,
            EntryKind::Directory => self.dirs += 1,
            EntryKind::Symlink => self.symlinks += 1,
            EntryKind::Other => self.others += 1,
        }
    }

    /// Count an entry that vanished mid-scan.
    pub fn record_vanished(&mut self) {
        self.vanished += 1;
    }

    /// Count an entry whose probe failed.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Total number of recorded entries.
    pub fn total_entries(&self) -> u64 {
        self.dirs + self.files + self.symlinks + self.others
    }
}
