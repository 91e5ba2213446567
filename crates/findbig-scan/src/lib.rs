//! Size aggregation engine for findbig.
//!
//! This crate walks a directory tree children-before-parent and produces a
//! [`SizeMap`] in which every directory's size is its own entry size plus
//! the sizes of everything below it. Symbolic links are recorded with size 0
//! and never followed, so a linked subtree is only ever counted through its
//! real path.
//!
//! # Overview
//!
//! - [`Prober`] reads the metadata of one path (one `lstat` per entry)
//! - [`TreeAggregator`] performs the post-order walk
//! - [`rank`] orders the result and keeps the largest entries
//! - [`scan`] composes the two for a [`ScanConfig`]
//!
//! # Example
//!
//! ```rust,no_run
//! use findbig_scan::{ScanConfig, scan};
//!
//! let config = ScanConfig::builder()
//!     .root("/var/log")
//!     .top_n(10usize)
//!     .build()
//!     .unwrap();
//! let report = scan(&config).unwrap();
//!
//! for entry in &report.ranked {
//!     println!("{:>12} {}", entry.size, entry.path.display());
//! }
//! ```

mod aggregate;
mod cancel;
mod probe;
mod rank;

pub use aggregate::{ScanOutcome, TreeAggregator};
pub use cancel::CancellationToken;
pub use probe::{FsProber, Prober};
pub use rank::{TopN, rank, rank_top};

// Re-export core types for convenience
pub use findbig_core::{
    ConfigError, EntryKind, ProbeError, ProbeErrorPolicy, RankedEntry, RankedList, ScanConfig,
    ScanError, ScanStats, SizeMap, SizedEntry, SymlinkRootPolicy, Timestamps,
};

/// Ranked entries together with the walk that produced them.
#[derive(Debug)]
pub struct ScanReport {
    /// The largest entries, largest first.
    pub ranked: RankedList,
    /// The full walk result.
    pub outcome: ScanOutcome,
}

/// Aggregate `config.root` and rank the result.
pub fn scan(config: &ScanConfig) -> Result<ScanReport, ScanError> {
    scan_with(&TreeAggregator::from_config(config), config)
}

/// Like [`scan`], with a preconfigured aggregator (custom prober or
/// cancellation token).
pub fn scan_with<P: Prober>(
    aggregator: &TreeAggregator<P>,
    config: &ScanConfig,
) -> Result<ScanReport, ScanError> {
    config.validate()?;
    let top_n = TopN::try_from(config.top_n)?;

    let outcome = aggregator.aggregate(&config.root)?;
    let ranked = rank_top(&outcome.size_map, top_n);

    Ok(ScanReport { ranked, outcome })
}
