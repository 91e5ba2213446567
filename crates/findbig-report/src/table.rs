//! Column-fitted text table.

use std::io::{self, Write};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use findbig_analyze::{HumanSize, age_since};
use findbig_core::{Entry, ProbeError, RankedEntry, RankedList, Timestamps};
use findbig_scan::Prober;

const HEADERS: [&str; 4] = ["Directory/File", "Created", "Modified", "Size"];

/// Narrowest the path column gets.
pub const PATH_MIN_WIDTH: usize = 16;
const CREATED_WIDTH: usize = 12;
const MODIFIED_WIDTH: usize = 12;
const SIZE_WIDTH: usize = 10;

/// Terminal columns taken by everything except the path column.
pub const RESERVED_COLUMNS: usize = 44;

/// Placeholder for an age that could not be read.
const UNKNOWN: &str = "-";

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub path: String,
    pub created: String,
    pub modified: String,
    pub size: String,
}

impl Row {
    /// Format a ranked entry against `reference`.
    ///
    /// Ages are read from the filesystem at render time, following links;
    /// a dangling link falls back to the link itself and an entry that is
    /// gone shows `-`.
    pub fn from_entry<P: Prober>(
        entry: &RankedEntry,
        reference: DateTime<Local>,
        prober: &P,
    ) -> Self {
        let current = |probed: Result<Option<Entry>, ProbeError>| probed.ok().flatten();
        let timestamps = current(prober.resolve(&entry.path))
            .or_else(|| current(prober.probe(&entry.path)))
            .map(|e| e.timestamps);

        let age = |pick: fn(&Timestamps) -> SystemTime| {
            timestamps
                .as_ref()
                .map(|ts| age_since(pick(ts), reference).to_string())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        Self {
            path: entry.path.display().to_string(),
            created: age(Timestamps::created_or_modified),
            modified: age(|ts| ts.modified),
            size: HumanSize::from_bytes(entry.size).to_string(),
        }
    }
}

/// Width of the path column for a set of rows.
///
/// The column grows to the longest path but leaves room for the other
/// columns, and never shrinks below [`PATH_MIN_WIDTH`].
pub fn path_column_width(rows: &[Row], terminal_columns: usize) -> usize {
    let longest = rows.iter().map(|r| r.path.chars().count()).max().unwrap_or(0);
    let available = terminal_columns.saturating_sub(RESERVED_COLUMNS);
    longest.min(available).max(PATH_MIN_WIDTH)
}

/// Renders ranked entries as an aligned text table.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    terminal_columns: usize,
    reference: DateTime<Local>,
}

impl TableRenderer {
    /// Create a renderer for a terminal `terminal_columns` wide, with ages
    /// measured from now.
    pub fn new(terminal_columns: usize) -> Self {
        Self {
            terminal_columns,
            reference: Local::now(),
        }
    }

    /// Measure ages from a fixed reference time.
    pub fn with_reference(mut self, reference: DateTime<Local>) -> Self {
        self.reference = reference;
        self
    }

    /// Format every ranked entry.
    pub fn rows<P: Prober>(&self, ranked: &RankedList, prober: &P) -> Vec<Row> {
        ranked
            .iter()
            .map(|entry| Row::from_entry(entry, self.reference, prober))
            .collect()
    }

    /// Write the header, separator and one line per entry.
    pub fn render<P: Prober, W: Write>(
        &self,
        ranked: &RankedList,
        prober: &P,
        out: &mut W,
    ) -> io::Result<()> {
        let rows = self.rows(ranked, prober);
        self.render_rows(&rows, out)
    }

    /// Write already formatted rows.
    pub fn render_rows<W: Write>(&self, rows: &[Row], out: &mut W) -> io::Result<()> {
        let path_w = path_column_width(rows, self.terminal_columns);

        writeln!(
            out,
            "{:^path_w$} | {:^CREATED_WIDTH$} |{:^MODIFIED_WIDTH$} | {:^SIZE_WIDTH$}",
            HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3],
        )?;
        writeln!(
            out,
            "{}-|-{}-|-{}-|-{}",
            "-".repeat(path_w),
            "-".repeat(CREATED_WIDTH),
            "-".repeat(MODIFIED_WIDTH),
            "-".repeat(SIZE_WIDTH),
        )?;

        for row in rows {
            let path: String = row.path.chars().take(path_w).collect();
            writeln!(
                out,
                "{:<path_w$} |{:^CREATED_WIDTH$} |{:^MODIFIED_WIDTH$} |{:>SIZE_WIDTH$}",
                path, row.created, row.modified, row.size,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(path: &str) -> Row {
        Row {
            path: path.to_string(),
            created: "1.00 (d)".to_string(),
            modified: "2.00 (hr)".to_string(),
            size: "1.5K".to_string(),
        }
    }

    #[test]
    fn test_width_grows_to_longest_path() {
        let rows = vec![row("short"), row("a/considerably/longer/path")];
        assert_eq!(path_column_width(&rows, 120), 26);
    }

    #[test]
    fn test_width_capped_by_terminal() {
        let rows = vec![row(&"x".repeat(200))];
        assert_eq!(path_column_width(&rows, 80), 80 - RESERVED_COLUMNS);
    }

    #[test]
    fn test_width_never_below_minimum() {
        let rows = vec![row("a")];
        assert_eq!(path_column_width(&rows, 80), PATH_MIN_WIDTH);
        assert_eq!(path_column_width(&[], 10), PATH_MIN_WIDTH);
    }

    #[test]
    fn test_render_rows_layout() {
        let rows = vec![row("./big.iso"), row(&"p".repeat(100))];
        let mut out = Vec::new();
        TableRenderer::new(80).render_rows(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Directory/File"));
        assert!(lines[1].starts_with(&"-".repeat(36)));
        assert!(lines[2].starts_with("./big.iso "));
        assert!(lines[2].ends_with(" |      1.5K"));
        assert!(lines[2].contains(" |  1.00 (d)   | 2.00 (hr)   |"));
        // Truncated to the path column.
        let path_w = 80 - RESERVED_COLUMNS;
        assert_eq!(lines[3].chars().count(), path_w + 2 + CREATED_WIDTH + 2 + MODIFIED_WIDTH + 2 + SIZE_WIDTH);
        assert!(lines[1].chars().count() < 80);
    }
}
