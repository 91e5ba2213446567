use findbig_core::{
    ConfigError, Entry, EntryKind, ProbeError, ProbeErrorPolicy, RankedEntry, RankedList,
    ScanConfig, ScanError, ScanStats, SizeMap, SizedEntry, SymlinkRootPolicy, Timestamps,
};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

#[test]
fn test_timestamps() {
    let now = SystemTime::now();
    let timestamps = Timestamps::with_modified(now);

    assert_eq!(timestamps.modified, now);
    assert!(timestamps.created.is_none());

    let created = now - Duration::from_secs(7200);
    let full = Timestamps::new(now, Some(created));
    assert_eq!(full.created, Some(created));
    assert_eq!(full.created_or_modified(), created);
}

#[test]
fn test_entry_kind_discrimination() {
    assert!(EntryKind::Directory.is_dir());
    assert!(!EntryKind::Directory.is_symlink());
    assert!(EntryKind::Symlink.is_symlink());
    assert!(!EntryKind::File.is_dir());
    assert!(!EntryKind::Other.is_dir());
    assert!(!EntryKind::Other.is_symlink());
}

#[test]
fn test_entry_construction() {
    let now = SystemTime::now();
    let entry = Entry::new("/data/a.bin", EntryKind::File, 2048, Timestamps::with_modified(now));
    assert_eq!(entry.path, PathBuf::from("/data/a.bin"));
    assert_eq!(entry.size, 2048);
    assert!(!entry.kind.is_dir());
}

#[test]
fn test_size_map_insertion_order() {
    let mut map = SizeMap::new();
    map.record("/r/sub/c", SizedEntry::new(50, EntryKind::File, None));
    map.record("/r/sub", SizedEntry::new(4146, EntryKind::Directory, None));
    map.record("/r/link", SizedEntry::new(0, EntryKind::Symlink, None));
    map.record("/r", SizedEntry::new(8242, EntryKind::Directory, None));

    let order: Vec<_> = map.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(
        order,
        vec![
            PathBuf::from("/r/sub/c"),
            PathBuf::from("/r/sub"),
            PathBuf::from("/r/link"),
            PathBuf::from("/r"),
        ]
    );
    assert_eq!(map.total_size(), 8242);
    assert_eq!(map.get("/r/link").unwrap().kind, EntryKind::Symlink);
    assert!(!map.contains("/r/other"));
}

#[test]
fn test_empty_size_map() {
    let map = SizeMap::new();
    assert!(map.is_empty());
    assert!(map.root().is_none());
    assert_eq!(map.total_size(), 0);
}

#[test]
fn test_ranked_list_accessors() {
    let list = RankedList::new(vec![
        RankedEntry {
            path: PathBuf::from("/r"),
            size: 400,
            kind: EntryKind::Directory,
            timestamps: None,
        },
        RankedEntry {
            path: PathBuf::from("/r/b"),
            size: 300,
            kind: EntryKind::File,
            timestamps: None,
        },
    ]);

    assert_eq!(list.len(), 2);
    assert!(!list.is_empty());
    assert_eq!(list.pairs()[1], (PathBuf::from("/r/b"), 300));
    assert_eq!(list.into_iter().map(|e| e.size).sum::<u64>(), 700);
}

#[test]
fn test_scan_config_builder() {
    let config = ScanConfig::builder()
        .root("/test/path")
        .top_n(25usize)
        .on_probe_error(ProbeErrorPolicy::Collect)
        .symlink_root(SymlinkRootPolicy::Measure)
        .build()
        .unwrap();

    assert_eq!(config.root.to_str().unwrap(), "/test/path");
    assert_eq!(config.top_n, 25);
    assert_eq!(config.on_probe_error, ProbeErrorPolicy::Collect);
    assert_eq!(config.symlink_root, SymlinkRootPolicy::Measure);
}

#[test]
fn test_scan_config_validate() {
    let mut config = ScanConfig::default();
    assert_eq!(config.root, PathBuf::from("./"));
    assert!(config.validate().is_ok());

    config.top_n = 0;
    assert_eq!(config.validate(), Err(ConfigError::InvalidTopN { value: 0 }));

    config.top_n = 1;
    config.root = PathBuf::new();
    assert_eq!(config.validate(), Err(ConfigError::EmptyRoot));
}

#[test]
fn test_scan_stats() {
    let mut stats = ScanStats::new();
    for kind in [EntryKind::File, EntryKind::File, EntryKind::Directory, EntryKind::Other] {
        stats.record_kind(kind);
    }
    stats.record_vanished();

    assert_eq!(stats.files, 2);
    assert_eq!(stats.dirs, 1);
    assert_eq!(stats.others, 1);
    assert_eq!(stats.vanished, 1);
    assert_eq!(stats.total_entries(), 4);
}

#[test]
fn test_error_display() {
    let err = ScanError::traversal(
        "/missing",
        std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
    );
    assert!(err.to_string().contains("/missing"));

    let err: ScanError = ConfigError::InvalidTopN { value: -1 }.into();
    assert!(err.to_string().contains("-1 is not valid"));

    let probe = ProbeError::new(
        "/locked",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    assert!(!probe.is_not_found());
}
