//! JSON export of ranked results.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use findbig_analyze::{Age, HumanSize, age_since};
use findbig_core::{EntryKind, RankedList, ScanStats};
use findbig_scan::ScanReport;
use serde::Serialize;

/// A ranked entry with its derived presentation values.
#[derive(Debug, Serialize)]
pub struct JsonEntry {
    pub path: PathBuf,
    pub size: u64,
    pub human_size: String,
    pub kind: EntryKind,
    pub created_age: Option<Age>,
    pub modified_age: Option<Age>,
}

/// Complete JSON document for one scan.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub root: &'a Path,
    pub total_size: u64,
    pub stats: &'a ScanStats,
    pub entries: Vec<JsonEntry>,
    pub warnings: Vec<String>,
}

impl<'a> JsonReport<'a> {
    /// Build the document for a finished scan.
    pub fn new(root: &'a Path, report: &'a ScanReport, reference: DateTime<Local>) -> Self {
        Self {
            root,
            total_size: report.outcome.size_map.total_size(),
            stats: &report.outcome.stats,
            entries: entries(&report.ranked, reference),
            warnings: report.outcome.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn entries(ranked: &RankedList, reference: DateTime<Local>) -> Vec<JsonEntry> {
    ranked
        .iter()
        .map(|entry| JsonEntry {
            path: entry.path.clone(),
            size: entry.size,
            human_size: HumanSize::from_bytes(entry.size).to_string(),
            kind: entry.kind,
            created_age: entry
                .timestamps
                .map(|ts| age_since(ts.created_or_modified(), reference)),
            modified_age: entry.timestamps.map(|ts| age_since(ts.modified, reference)),
        })
        .collect()
}
