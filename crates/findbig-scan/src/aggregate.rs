//! Post-order size aggregation.

use std::collections::HashSet;
use std::io;
use std::mem;
use std::path::{Path, PathBuf};
use std::time::Instant;

use findbig_core::{
    Entry, EntryKind, ProbeError, ProbeErrorPolicy, ScanConfig, ScanError, ScanStats, SizeMap,
    SizedEntry, SymlinkRootPolicy, Timestamps,
};
use tracing::{debug, info, trace};
use walkdir::{DirEntry, WalkDir};

use crate::cancel::CancellationToken;
use crate::probe::{FsProber, Prober};

/// Everything a completed walk produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Path to aggregated size, in post-order of discovery.
    pub size_map: SizeMap,
    /// Entry counts and timing.
    pub stats: ScanStats,
    /// Probe failures kept under [`ProbeErrorPolicy::Collect`].
    pub warnings: Vec<ProbeError>,
}

impl ScanOutcome {
    /// Check if any probe failures were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Computes a [`SizeMap`] by walking a tree children-before-parent.
///
/// A directory's size is its own entry size plus the sizes of its direct
/// files plus the already-aggregated sizes of its direct subdirectories.
/// Symbolic links are recorded with size 0 and never followed.
///
/// Within one directory the records land in this order: every subdirectory
/// subtree, then files and links to files by name, then links to
/// directories by name, then the directory itself.
pub struct TreeAggregator<P = FsProber> {
    prober: P,
    policy: ProbeErrorPolicy,
    symlink_root: SymlinkRootPolicy,
    cancel: Option<CancellationToken>,
}

impl TreeAggregator<FsProber> {
    /// Create an aggregator over the real filesystem.
    pub fn new() -> Self {
        Self::with_prober(FsProber::new())
    }

    /// Create an aggregator using the policies of a scan config.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new()
            .on_probe_error(config.on_probe_error)
            .symlink_root(config.symlink_root)
    }
}

impl Default for TreeAggregator<FsProber> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Prober> TreeAggregator<P> {
    /// Create an aggregator over a custom prober.
    pub fn with_prober(prober: P) -> Self {
        Self {
            prober,
            policy: ProbeErrorPolicy::default(),
            symlink_root: SymlinkRootPolicy::default(),
            cancel: None,
        }
    }

    /// Set the policy for per-entry probe failures.
    pub fn on_probe_error(mut self, policy: ProbeErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set how a symlinked walk root is recorded.
    pub fn symlink_root(mut self, policy: SymlinkRootPolicy) -> Self {
        self.symlink_root = policy;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Access the underlying prober.
    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Walk `root` and aggregate every directory under it.
    ///
    /// Failing to read or list the root itself is fatal; failures below it
    /// are handled by the configured [`ProbeErrorPolicy`].
    pub fn aggregate(&self, root: &Path) -> Result<ScanOutcome, ScanError> {
        let start = Instant::now();

        let own = match self.prober.probe(root) {
            Ok(Some(entry)) => entry,
            Ok(None) => return Err(ScanError::traversal(root, io::ErrorKind::NotFound.into())),
            Err(err) => return Err(ScanError::traversal(err.path, err.source)),
        };

        let (base, root_is_link) = match own.kind {
            EntryKind::Directory => (own, false),
            EntryKind::Symlink => match self.prober.resolve(root) {
                Ok(Some(target)) if target.kind.is_dir() => (target, true),
                Ok(Some(_)) => return Err(ScanError::NotADirectory { path: root.to_path_buf() }),
                Ok(None) => return Err(ScanError::traversal(root, io::ErrorKind::NotFound.into())),
                Err(err) => return Err(ScanError::traversal(err.path, err.source)),
            },
            _ => return Err(ScanError::NotADirectory { path: root.to_path_buf() }),
        };

        let mut walk = Walk::new(&self.prober, self.policy, self.cancel.as_ref());
        walk.check_cancelled()?;

        for item in walker(root) {
            walk.check_cancelled()?;
            match item {
                Ok(dent) => walk.visit(&dent)?,
                // The root listing itself.
                Err(err) if err.depth() == 0 => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    return Err(ScanError::traversal(path, err.into()));
                }
                Err(err) => walk.walk_error(root, err)?,
            }
        }
        walk.check_cancelled()?;

        let children = walk.close_frame(0);
        let size = base.size + children;

        let record = if root_is_link {
            let size = match self.symlink_root {
                SymlinkRootPolicy::Collapse => 0,
                SymlinkRootPolicy::Measure => size,
            };
            SizedEntry::new(size, EntryKind::Symlink, Some(base.timestamps))
        } else {
            SizedEntry::new(size, EntryKind::Directory, Some(base.timestamps))
        };
        walk.record(root, record);

        let mut outcome = walk.outcome;
        outcome.stats.duration = start.elapsed();

        info!(
            root = %root.display(),
            entries = outcome.size_map.len(),
            total = outcome.size_map.total_size(),
            skipped = outcome.stats.skipped,
            elapsed_ms = outcome.stats.duration.as_millis() as u64,
            "scan complete"
        );

        Ok(outcome)
    }
}

/// Walk below `root` without following links, each directory's contents
/// before the directory, subdirectories ahead of other entries.
fn walker(root: &Path) -> walkdir::IntoIter {
    WalkDir::new(root)
        .follow_links(false)
        .contents_first(true)
        .min_depth(1)
        .sort_by(|a, b| {
            b.file_type()
                .is_dir()
                .cmp(&a.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
}

/// Running total of a directory whose contents are still being walked.
#[derive(Debug, Default)]
struct Frame {
    total: u64,
    /// Links to directories, recorded after the files.
    dir_links: Vec<(PathBuf, Option<Timestamps>)>,
}

/// State of one walk. Owns the accumulator until the walk returns it.
struct Walk<'a, P> {
    prober: &'a P,
    policy: ProbeErrorPolicy,
    cancel: Option<&'a CancellationToken>,
    /// Open directories, indexed by depth below the root.
    frames: Vec<Frame>,
    /// Directories whose listing failed.
    unlisted: HashSet<PathBuf>,
    outcome: ScanOutcome,
}

impl<'a, P: Prober> Walk<'a, P> {
    fn new(prober: &'a P, policy: ProbeErrorPolicy, cancel: Option<&'a CancellationToken>) -> Self {
        Self {
            prober,
            policy,
            cancel,
            frames: Vec::new(),
            unlisted: HashSet::new(),
            outcome: ScanOutcome::default(),
        }
    }

    fn check_cancelled(&self) -> Result<(), ScanError> {
        match self.cancel {
            Some(token) if token.is_cancelled() => Err(ScanError::Cancelled),
            _ => Ok(()),
        }
    }

    fn frame(&mut self, depth: usize) -> &mut Frame {
        if self.frames.len() <= depth {
            self.frames.resize_with(depth + 1, Frame::default);
        }
        &mut self.frames[depth]
    }

    /// Finish the directory open at `depth`: record its pending links and
    /// return the total of its children.
    fn close_frame(&mut self, depth: usize) -> u64 {
        let frame = self.frames.get_mut(depth).map(mem::take).unwrap_or_default();
        for (path, timestamps) in frame.dir_links {
            self.record(&path, SizedEntry::new(0, EntryKind::Symlink, timestamps));
        }
        frame.total
    }

    fn record(&mut self, path: &Path, entry: SizedEntry) {
        self.outcome.stats.record_kind(entry.kind);
        if !self.outcome.size_map.record(path, entry) {
            debug!(path = %path.display(), "path listed twice, keeping first record");
        }
    }

    fn handle_probe_error(&mut self, err: ProbeError) -> Result<(), ScanError> {
        self.outcome.stats.record_skipped();
        match self.policy {
            ProbeErrorPolicy::Skip => {
                debug!(path = %err.path.display(), error = %err.source, "skipping unreadable entry");
                Ok(())
            }
            ProbeErrorPolicy::Collect => {
                debug!(path = %err.path.display(), error = %err.source, "collecting unreadable entry");
                self.outcome.warnings.push(err);
                Ok(())
            }
            ProbeErrorPolicy::Abort => Err(ScanError::Probe(err)),
        }
    }

    /// A listing failure below the root.
    ///
    /// An unreadable directory is still yielded afterwards and is then
    /// recorded with size 0. Entries gone before they could be listed are
    /// left to the probe that follows.
    fn walk_error(&mut self, root: &Path, err: walkdir::Error) -> Result<(), ScanError> {
        let path = err.path().unwrap_or(root).to_path_buf();
        if err.io_error().is_some_and(|e| e.kind() == io::ErrorKind::NotFound) {
            trace!(path = %path.display(), "entry vanished before listing");
            return Ok(());
        }
        self.unlisted.insert(path.clone());
        self.handle_probe_error(ProbeError::new(path, err.into()))
    }

    /// Probe one entry. `None` means it vanished or failed and was handled.
    fn probe(&mut self, path: &Path) -> Result<Option<Entry>, ScanError> {
        match self.prober.probe(path) {
            Ok(Some(entry)) => Ok(Some(entry)),
            Ok(None) => {
                trace!(path = %path.display(), "entry vanished before probing");
                self.outcome.stats.record_vanished();
                Ok(None)
            }
            Err(err) => {
                self.handle_probe_error(err)?;
                Ok(None)
            }
        }
    }

    /// Fold one walked entry into the total of its parent.
    fn visit(&mut self, dent: &DirEntry) -> Result<(), ScanError> {
        let depth = dent.depth();
        let path = dent.path();

        if dent.file_type().is_dir() {
            let size = self.visit_dir(path, depth)?;
            self.frame(depth - 1).total += size;
            return Ok(());
        }

        let Some(entry) = self.probe(path)? else {
            let kind = EntryKind::from_file_type(dent.file_type());
            self.record(path, SizedEntry::new(0, kind, None));
            return Ok(());
        };

        // Checked on the probe result, the listing may be stale.
        if entry.kind.is_symlink() {
            self.visit_link(entry, depth);
        } else {
            let size = entry.size;
            self.record(path, SizedEntry::new(size, entry.kind, Some(entry.timestamps)));
            self.frame(depth - 1).total += size;
        }
        Ok(())
    }

    fn visit_link(&mut self, link: Entry, depth: usize) {
        let points_to_dir = match self.prober.resolve(&link.path) {
            Ok(target) => target.is_some_and(|t| t.kind.is_dir()),
            Err(err) => {
                trace!(path = %link.path.display(), error = %err.source, "cannot resolve link");
                false
            }
        };

        if points_to_dir {
            self.frame(depth - 1)
                .dir_links
                .push((link.path, Some(link.timestamps)));
        } else {
            self.record(&link.path, SizedEntry::new(0, EntryKind::Symlink, Some(link.timestamps)));
        }
    }

    /// Record a directory whose contents have all been walked.
    fn visit_dir(&mut self, path: &Path, depth: usize) -> Result<u64, ScanError> {
        trace!(path = %path.display(), "aggregating directory");

        let own = self.probe(path)?;
        let children = self.close_frame(depth);
        let timestamps = own.as_ref().map(|e| e.timestamps);

        let size = if self.unlisted.remove(path) {
            0
        } else {
            own.map_or(0, |e| e.size) + children
        };
        self.record(path, SizedEntry::new(size, EntryKind::Directory, timestamps));
        Ok(size)
    }
}
