//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ConfigError;

/// Default number of ranked entries when the caller does not choose one.
pub const DEFAULT_TOP_N: usize = 10;

/// What the aggregator does when a single entry cannot be probed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProbeErrorPolicy {
    /// Record the entry with size 0 and continue silently.
    #[default]
    Skip,
    /// Like `Skip`, but keep every error for the caller.
    Collect,
    /// Stop the scan at the first failure.
    Abort,
}

/// How the walk root is recorded when it is itself a symbolic link.
///
/// The children of a symlinked root are always listed and recorded with
/// their own sizes; this only decides the root's own record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SymlinkRootPolicy {
    /// The root is recorded with size 0.
    #[default]
    Collapse,
    /// The root is aggregated like any other directory.
    Measure,
}

/// Configuration for a scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "ConfigError"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Number of ranked entries to report.
    #[builder(default = "DEFAULT_TOP_N")]
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Policy for per-entry probe failures.
    #[builder(default)]
    #[serde(default)]
    pub on_probe_error: ProbeErrorPolicy,

    /// Policy for a symlinked walk root.
    #[builder(default)]
    #[serde(default)]
    pub symlink_root: SymlinkRootPolicy,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err(ConfigError::EmptyRoot);
            }
        }
        if let Some(0) = self.top_n {
            return Err(ConfigError::InvalidTopN { value: 0 });
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            top_n: DEFAULT_TOP_N,
            on_probe_error: ProbeErrorPolicy::default(),
            symlink_root: SymlinkRootPolicy::default(),
        }
    }

    /// Re-check invariants for configs built without the builder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRoot);
        }
        if self.top_n == 0 {
            return Err(ConfigError::InvalidTopN { value: 0 });
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new("./")
    }
}
