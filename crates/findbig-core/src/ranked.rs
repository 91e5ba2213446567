//! Ranked results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::entry::{EntryKind, Timestamps};

/// A single ranked path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Path of the entry.
    pub path: PathBuf,
    /// Aggregated size in bytes.
    pub size: u64,
    /// Kind of the entry.
    pub kind: EntryKind,
    /// Timestamps captured during the scan.
    pub timestamps: Option<Timestamps>,
}

/// Entries sorted by size descending, truncated to the requested count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedList {
    entries: Vec<RankedEntry>,
}

impl RankedList {
    /// Wrap already-ranked entries.
    pub fn new(entries: Vec<RankedEntry>) -> Self {
        Self { entries }
    }

    /// Number of ranked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over ranked entries, largest first.
    pub fn iter(&self) -> std::slice::Iter<'_, RankedEntry> {
        self.entries.iter()
    }

    /// `(path, size)` pairs, largest first.
    pub fn pairs(&self) -> Vec<(PathBuf, u64)> {
        self.entries.iter().map(|e| (e.path.clone(), e.size)).collect()
    }

    /// Borrow the entries as a slice.
    pub fn as_slice(&self) -> &[RankedEntry] {
        &self.entries
    }
}

impl IntoIterator for RankedList {
    type Item = RankedEntry;
    type IntoIter = std::vec::IntoIter<RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a RankedEntry;
    type IntoIter = std::slice::Iter<'a, RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
