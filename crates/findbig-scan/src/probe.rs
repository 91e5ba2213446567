//! Filesystem probing.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use findbig_core::{Entry, EntryKind, ProbeError, Timestamps};

/// Reads raw metadata of single paths.
///
/// `probe` is the only primitive that touches entry metadata; the aggregator
/// calls it once per listed entry (plus one `resolve` per symbolic link). A
/// path that does not exist is reported as `Ok(None)` rather than an error,
/// because entries routinely vanish between a directory listing and the stat
/// that follows it.
pub trait Prober {
    /// Read the metadata of `path` without following symbolic links.
    fn probe(&self, path: &Path) -> Result<Option<Entry>, ProbeError>;

    /// Read the metadata of whatever `path` points to, following links.
    fn resolve(&self, path: &Path) -> Result<Option<Entry>, ProbeError>;

    /// Check whether `path` is a symbolic link.
    fn is_symlink(&self, path: &Path) -> Result<bool, ProbeError> {
        Ok(self.probe(path)?.is_some_and(|e| e.kind.is_symlink()))
    }

    /// Size of a regular file, 0 if it no longer exists.
    fn size_of_file(&self, path: &Path) -> Result<u64, ProbeError> {
        Ok(self.probe(path)?.map_or(0, |e| e.size))
    }

    /// Size the platform reports for a directory entry itself.
    fn size_of_directory_entry_itself(&self, path: &Path) -> Result<u64, ProbeError> {
        Ok(self.probe(path)?.map_or(0, |e| e.size))
    }

    /// Creation time: the inode change time on unix, birth time elsewhere.
    fn creation_time(&self, path: &Path) -> Result<Option<SystemTime>, ProbeError> {
        Ok(self.probe(path)?.map(|e| e.timestamps.created_or_modified()))
    }

    /// Last modification time.
    fn modification_time(&self, path: &Path) -> Result<Option<SystemTime>, ProbeError> {
        Ok(self.probe(path)?.map(|e| e.timestamps.modified))
    }
}

/// Prober backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProber;

impl FsProber {
    /// Create a new prober.
    pub fn new() -> Self {
        Self
    }
}

impl Prober for FsProber {
    fn probe(&self, path: &Path) -> Result<Option<Entry>, ProbeError> {
        read_entry(path, fs::symlink_metadata(path))
    }

    fn resolve(&self, path: &Path) -> Result<Option<Entry>, ProbeError> {
        read_entry(path, fs::metadata(path))
    }
}

fn read_entry(path: &Path, metadata: io::Result<fs::Metadata>) -> Result<Option<Entry>, ProbeError> {
    match metadata {
        Ok(metadata) => Ok(Some(Entry::new(
            path,
            EntryKind::from_file_type(metadata.file_type()),
            metadata.len(),
            timestamps(&metadata),
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ProbeError::new(path, err)),
    }
}

fn timestamps(metadata: &fs::Metadata) -> Timestamps {
    let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
    let created = get_ctime(metadata).or_else(|| metadata.created().ok());
    Timestamps::new(modified, created)
}

/// Get the inode change time from metadata.
#[cfg(unix)]
fn get_ctime(metadata: &fs::Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::Duration;

    let secs = u64::try_from(metadata.ctime()).ok()?;
    let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
    UNIX_EPOCH.checked_add(Duration::new(secs, nanos))
}

#[cfg(not(unix))]
fn get_ctime(_metadata: &fs::Metadata) -> Option<SystemTime> {
    None
}
