//! findbig - find the largest files and directories under a path.
//!
//! Usage:
//!   findbig [PATH]                 Rank everything under PATH (default ./)
//!   findbig -n 10 /tmp             Show only the 10 largest entries
//!   findbig --format json [PATH]   Emit the ranking as JSON
//!   findbig --help                 Show help

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use findbig_analyze::HumanSize;
use findbig_report::{JsonReport, TableRenderer};
use findbig_scan::{FsProber, ProbeErrorPolicy, ScanConfig, SymlinkRootPolicy, TopN, scan};

/// Terminal size assumed when stdout is not a terminal.
const FALLBACK_TERMINAL_SIZE: (u16, u16) = (80, 24);

/// Lines of the terminal left free when the row count is not given.
const RESERVED_LINES: i64 = 5;

#[derive(Parser)]
#[command(
    name = "findbig",
    version,
    about = "Recursively find the largest files and directories",
    long_about = "findbig recursively finds the largest files/directories in the \
                  current working directory (default) or the specified directory, \
                  and lists them largest to smallest with their age since creation \
                  and modification.",
    after_help = "Example: findbig -n 10 /tmp"
)]
struct Cli {
    /// Directory to search instead of the current working directory
    #[arg(default_value = "./")]
    search_path: PathBuf,

    /// The number of lines to display [default: terminal height - 5]
    #[arg(short = 'n', long = "num", allow_negative_numbers = true)]
    num: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// What to do when an entry cannot be read
    #[arg(long = "on-error", value_enum, default_value_t)]
    on_error: OnError,

    /// Measure a symlinked search path like a directory instead of reporting 0
    #[arg(long)]
    measure_symlinked_root: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OnError {
    /// Count unreadable entries as 0 and carry on
    #[default]
    Skip,
    /// Like skip, then list unreadable entries on stderr
    Collect,
    /// Stop at the first unreadable entry
    Abort,
}

impl From<OnError> for ProbeErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Skip => ProbeErrorPolicy::Skip,
            OnError::Collect => ProbeErrorPolicy::Collect,
            OnError::Abort => ProbeErrorPolicy::Abort,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // Usage errors exit with 1 like every other failure.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print()?;
            std::process::exit(code);
        }
    };

    init_tracing(cli.verbose);

    let (columns, lines) = crossterm::terminal::size().unwrap_or(FALLBACK_TERMINAL_SIZE);
    let rows = cli.num.unwrap_or(i64::from(lines) - RESERVED_LINES);
    let top_n = TopN::parse(rows)?;

    let config = ScanConfig::builder()
        .root(cli.search_path)
        .top_n(top_n.get())
        .on_probe_error(ProbeErrorPolicy::from(cli.on_error))
        .symlink_root(if cli.measure_symlinked_root {
            SymlinkRootPolicy::Measure
        } else {
            SymlinkRootPolicy::Collapse
        })
        .build()?;

    let report = scan(&config).wrap_err_with(|| format!("Scan of {} failed", config.root.display()))?;

    info!(
        root = %config.root.display(),
        total = %HumanSize::from_bytes(report.outcome.size_map.total_size()),
        entries = report.outcome.size_map.len(),
        "ranking {} of {} entries",
        report.ranked.len(),
        report.outcome.size_map.len()
    );

    let written = match cli.format {
        OutputFormat::Text => {
            let mut stdout = io::stdout().lock();
            TableRenderer::new(usize::from(columns))
                .render(&report.ranked, &FsProber::new(), &mut stdout)
                .and_then(|()| stdout.flush())
        }
        OutputFormat::Json => {
            let json = JsonReport::new(&config.root, &report, chrono::Local::now())
                .to_string_pretty()
                .context("Failed to serialize report")?;
            writeln!(io::stdout().lock(), "{json}")
        }
    };
    match written {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
        other => other.context("Failed to write report")?,
    }

    if report.outcome.has_warnings() && matches!(cli.format, OutputFormat::Text) {
        eprintln!();
        eprintln!("{} entries could not be read:", report.outcome.warnings.len());
        for warning in &report.outcome.warnings {
            eprintln!("  {warning}");
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
