//! Top-N selection over a size map.

use std::num::NonZeroUsize;

use findbig_core::{ConfigError, RankedEntry, RankedList, SizeMap};

/// A validated number of rows to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopN(NonZeroUsize);

impl TopN {
    /// Validate a raw, possibly negative, count.
    pub fn parse(value: i64) -> Result<Self, ConfigError> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(ConfigError::InvalidTopN { value })
    }

    /// Number of rows as a plain count.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for TopN {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value).map(Self).ok_or(ConfigError::InvalidTopN {
            value: i64::try_from(value).unwrap_or(i64::MAX),
        })
    }
}

/// Rank the entries of `size_map` by size, largest first, keeping `n`.
///
/// Entries of equal size keep their order in the map (post-order of
/// discovery), so the result is deterministic for a given walk.
pub fn rank(size_map: &SizeMap, n: usize) -> Result<RankedList, ConfigError> {
    let n = TopN::try_from(n)?;
    Ok(rank_top(size_map, n))
}

/// Rank with an already validated count.
pub fn rank_top(size_map: &SizeMap, n: TopN) -> RankedList {
    let mut entries: Vec<RankedEntry> = size_map
        .iter()
        .map(|(path, entry)| RankedEntry {
            path: path.clone(),
            size: entry.size,
            kind: entry.kind,
            timestamps: entry.timestamps,
        })
        .collect();

    // `sort_by` is stable.
    entries.sort_by(|a, b| b.size.cmp(&a.size));
    entries.truncate(n.get());

    RankedList::new(entries)
}
