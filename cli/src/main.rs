//! kmenu CLI — driving adapter for the kmenu menu engine.
//!
//! Subcommands:
//! - `check [--config F]` — validate the configuration
//! - `menu [--config F] [--record F|-] [--label L]` — print visible rows for a chooser
//! - `paths --record F|-` — list every dot-notation path of a record
//! - `explain [--config F] [--record F|-]` — show why each entry is shown or hidden
//! - `preview [--config F] [--record F|-] <index>` — URL breakdown and labels for one row
//!
//! Rows are printed as `title\tdescription\turl`, one per line, so they can be
//! piped straight into `fzf --delimiter='\t'`. Logs go to stderr.

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use kmenu::{Menu, MenuItem, MenuRow, Record};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// File name looked up next to the executable when `--config` is omitted.
const CONFIG_FILE: &str = "config.json";

/// Targets whose level the logging flags control.
const OUR_CRATES: &[&str] = &["kmenu"];

#[derive(Debug, Parser)]
#[command(name = "kmenu", version, about = "Pod-aware dashboard menus")]
struct Cli {
    #[command(flatten)]
    log: LogArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the configuration
    Check {
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Print the entries visible for a record as tab-separated rows
    Menu {
        #[command(flatten)]
        config: ConfigArg,
        #[command(flatten)]
        record: RecordArg,
        /// Prefix every description with `[LABEL] `
        #[arg(long)]
        label: Option<String>,
    },
    /// Print every dot-notation path of a record with its value
    Paths {
        /// Record file, or `-` for stdin
        #[arg(long)]
        record: String,
    },
    /// Show, for every entry, each condition and its result
    Explain {
        #[command(flatten)]
        config: ConfigArg,
        #[command(flatten)]
        record: RecordArg,
    },
    /// Show the URL breakdown and record labels for one visible row
    Preview {
        #[command(flatten)]
        config: ConfigArg,
        #[command(flatten)]
        record: RecordArg,
        /// Zero-based index into the visible rows
        index: usize,
    },
}

#[derive(Debug, Clone, Args)]
struct ConfigArg {
    /// Configuration file (JSON or YAML); defaults to config.json next to the executable
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct RecordArg {
    /// Record file, or `-` for stdin; without it only unconditioned entries are shown
    #[arg(long, short)]
    record: Option<String>,
}

/// Logging controls.
#[derive(Debug, Clone, Args)]
struct LogArgs {
    /// Set log level to trace
    #[arg(long, global = true, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    trace: bool,

    /// Set log level to debug
    #[arg(long, global = true, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    debug: bool,

    /// Set a single log level (error|warn|info|debug|trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    #[arg(long, global = true)]
    log_filter: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log);

    let result = match cli.command {
        Command::Check { config } => cmd_check(&config),
        Command::Menu {
            config,
            record,
            label,
        } => cmd_menu(&config, &record, label.as_deref()),
        Command::Paths { record } => cmd_paths(&record),
        Command::Explain { config, record } => cmd_explain(&config, &record),
        Command::Preview {
            config,
            record,
            index,
        } => cmd_preview(&config, &record, index),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_check(config: &ConfigArg) -> Result<(), String> {
    let menu = load_menu(config)?;
    println!("Config valid ({} menu items)", menu.len());
    Ok(())
}

fn cmd_menu(config: &ConfigArg, record: &RecordArg, label: Option<&str>) -> Result<(), String> {
    let menu = load_menu(config)?;
    let record = load_optional_record(record)?;

    let rows = menu.rows(record.as_ref());
    if rows.is_empty() {
        warn!("no menu items match this record");
    }
    for row in &rows {
        println!("{}", format_row(row, label));
    }
    Ok(())
}

fn cmd_paths(source: &str) -> Result<(), String> {
    let record = read_record(source)?;
    let record = Record::from_slice(record).map_err(|e| format!("record: {e}"))?;
    for line in record.flatten_paths() {
        println!("{line}");
    }
    Ok(())
}

fn cmd_explain(config: &ConfigArg, record: &RecordArg) -> Result<(), String> {
    let menu = load_menu(config)?;
    let record = load_optional_record(record)?;
    for entry in menu.explain(record.as_ref()) {
        println!("{entry}");
    }
    Ok(())
}

fn cmd_preview(config: &ConfigArg, record: &RecordArg, index: usize) -> Result<(), String> {
    let menu = load_menu(config)?;
    let record = load_optional_record(record)?;
    let visible = menu.filter(record.as_ref());
    let item = visible
        .get(index)
        .ok_or_else(|| format!("no visible row at index {index} ({} visible)", visible.len()))?;

    print!("{}", render_preview(item, record.as_ref()));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_menu(config: &ConfigArg) -> Result<Menu, String> {
    let path = config.config.clone().unwrap_or_else(default_config_path);
    debug!(path = %path.display(), "loading config");
    Menu::load(&path).map_err(|e| e.to_string())
}

fn default_config_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

fn read_record(source: &str) -> Result<Vec<u8>, String> {
    if source == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("failed to read record from stdin: {e}"))?;
        return Ok(buf);
    }
    std::fs::read(source).map_err(|e| format!("failed to read \"{source}\": {e}"))
}

/// A record that cannot be decoded is reported and treated as absent.
fn load_optional_record(arg: &RecordArg) -> Result<Option<Record>, String> {
    let Some(source) = arg.record.as_deref() else {
        return Ok(None);
    };
    let raw = read_record(source)?;
    match Record::from_slice(raw) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!(source = source, error = %e, "record could not be decoded; continuing without it");
            Ok(None)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════════

fn format_row(row: &MenuRow, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{}\t[{label}] {}\t{}", row.title, row.description, row.url),
        None => format!("{}\t{}\t{}", row.title, row.description, row.url),
    }
}

fn render_preview(item: &MenuItem, record: Option<&Record>) -> String {
    let mut out = format!("── URL ──\n\n  {}\n", item.resolve_url(record));

    let fragments = item.fragments(record);
    if !fragments.is_empty() {
        out.push('\n');
        for fragment in &fragments {
            out.push_str(&format!("  {} = {}\n", fragment.path, fragment.value));
        }
    }

    if let Some(record) = record {
        out.push_str("\n── Pod Info ──\n\n");
        out.push_str(&format!("  pod  = {}\n", record.resolve("metadata.name").to_text()));
        out.push_str(&format!("  node = {}\n", record.resolve("spec.nodeName").to_text()));
        for (key, value) in record.labels() {
            out.push_str(&format!("  {key} = {value}\n"));
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// Logging
// ═══════════════════════════════════════════════════════════════════════════════

fn init_logging(log: &LogArgs) {
    let spec = compute_spec(
        log.trace,
        log.debug,
        log.log_level.as_deref(),
        log.log_filter.as_deref(),
        env::var("RUST_LOG").ok().as_deref(),
    );
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(spec))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Build a filter directive that sets `level` for all of our crates.
fn level_spec_for(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    OUR_CRATES
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the filter spec with precedence:
/// `log_filter`, then `trace`/`debug`/`log_level`, then `RUST_LOG`, then `warn`.
fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(level) = log_level {
        return level_spec_for(level);
    }
    match rust_log {
        Some(spec) if !spec.is_empty() => spec.to_string(),
        _ => level_spec_for("warn"),
    }
}
