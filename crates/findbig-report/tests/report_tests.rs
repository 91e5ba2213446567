use chrono::Local;
use findbig_core::{EntryKind, RankedEntry, RankedList, Timestamps};
use findbig_report::{JsonReport, Row, TableRenderer};
use findbig_scan::{FsProber, ScanConfig, scan};
use std::fs;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn scanned_tree() -> (TempDir, findbig_scan::ScanReport) {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("logs")).unwrap();
    fs::write(temp.path().join("logs/app.log"), vec![0u8; 3000]).unwrap();
    fs::write(temp.path().join("notes.txt"), vec![0u8; 12]).unwrap();

    let config = ScanConfig::builder()
        .root(temp.path())
        .top_n(3usize)
        .build()
        .unwrap();
    let report = scan(&config).unwrap();
    (temp, report)
}

#[test]
fn test_table_lists_ranked_entries() {
    let (temp, report) = scanned_tree();

    let mut out = Vec::new();
    TableRenderer::new(200)
        .render(&report.ranked, &FsProber::new(), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2 + 3);
    assert!(lines[2].starts_with(&temp.path().display().to_string()));
    assert!(lines[4].contains("app.log"));
    assert!(lines[4].contains("2.93K"));
    assert!(lines[4].contains("(sec)"));
}

#[test]
fn test_row_reads_timestamps_from_filesystem() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("f");
    fs::write(&file, b"data").unwrap();

    let entry = RankedEntry {
        path: file,
        size: 4,
        kind: EntryKind::File,
        timestamps: None,
    };
    let row = Row::from_entry(&entry, Local::now(), &FsProber::new());
    assert!(row.modified.ends_with("(sec)"));
    assert_eq!(row.size, "4B");
}

#[test]
fn test_row_ignores_scan_timestamps() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("fresh");
    fs::write(&file, b"data").unwrap();

    let ten_days_ago = SystemTime::now() - Duration::from_secs(10 * 86_400);
    let entry = RankedEntry {
        path: file,
        size: 4,
        kind: EntryKind::File,
        timestamps: Some(Timestamps::new(ten_days_ago, Some(ten_days_ago))),
    };
    let row = Row::from_entry(&entry, Local::now(), &FsProber::new());
    assert!(row.created.ends_with("(sec)"));
    assert!(row.modified.ends_with("(sec)"));
}

#[cfg(unix)]
#[test]
fn test_row_dangling_link_uses_link_itself() {
    let temp = TempDir::new().unwrap();
    let link = temp.path().join("dangling");
    std::os::unix::fs::symlink(temp.path().join("nowhere"), &link).unwrap();

    let entry = RankedEntry {
        path: link,
        size: 0,
        kind: EntryKind::Symlink,
        timestamps: None,
    };
    let row = Row::from_entry(&entry, Local::now(), &FsProber::new());
    assert!(row.modified.ends_with("(sec)"));
    assert_eq!(row.size, "0B");
}

#[test]
fn test_row_unknown_age_for_vanished_entry() {
    let temp = TempDir::new().unwrap();
    let entry = RankedEntry {
        path: temp.path().join("gone"),
        size: 0,
        kind: EntryKind::File,
        timestamps: Some(Timestamps::with_modified(SystemTime::now())),
    };
    let ranked = RankedList::new(vec![entry]);

    let rows = TableRenderer::new(80).rows(&ranked, &FsProber::new());
    assert_eq!(rows[0].created, "-");
    assert_eq!(rows[0].modified, "-");
}

#[test]
fn test_json_report() {
    let (temp, report) = scanned_tree();

    let json = JsonReport::new(temp.path(), &report, Local::now())
        .to_string_pretty()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["entries"].as_array().unwrap().len(), 3);
    assert_eq!(value["entries"][0]["kind"], "directory");
    assert_eq!(value["entries"][2]["size"], 3000);
    assert_eq!(value["entries"][2]["human_size"], "2.93K");
    assert_eq!(value["stats"]["files"], 2);
    assert!(value["warnings"].as_array().unwrap().is_empty());
}
