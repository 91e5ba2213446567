//! Core types for findbig.
//!
//! This crate provides the data structures shared across the findbig
//! workspace: probed entries, the aggregated size map, ranked results,
//! scan configuration and the error taxonomy.

mod config;
mod entry;
mod error;
mod ranked;
mod size_map;

pub use config::{DEFAULT_TOP_N, ProbeErrorPolicy, ScanConfig, ScanConfigBuilder, SymlinkRootPolicy};
pub use entry::{Entry, EntryKind, Timestamps};
pub use error::{ConfigError, ProbeError, ScanError};
pub use ranked::{RankedEntry, RankedList};
pub use size_map::{ScanStats, SizeMap, SizedEntry};
