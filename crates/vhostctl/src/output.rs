//! Output formatting: table, JSON, YAML, plain.
//!
//! Data goes to stdout in the format selected by `--output`. Status
//! messages go to stderr and honour `--quiet` and `--color`.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact` / `yaml`: serializes the original data via serde
/// - `plain`: calls `plain_fn` on each item to emit one line per item
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    plain_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(Table::new(rows).with(Style::rounded()).to_string())
        }
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(ser_err),
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(ser_err),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(ser_err),
        OutputFormat::Plain => Ok(data.iter().map(plain_fn).collect::<Vec<_>>().join("\n")),
    }
}

fn ser_err(e: impl std::fmt::Display) -> CliError {
    CliError::Serialize(e.to_string())
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Status messages ──────────────────────────────────────────────────

/// Console reporter for progress and outcome lines.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
    color: bool,
}

impl Reporter {
    pub fn new(quiet: bool, color: ColorMode) -> Self {
        Self {
            quiet,
            color: should_color(color),
        }
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{msg}");
        }
    }

    pub fn success(&self, msg: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {msg}", "✓".green());
        } else {
            eprintln!("{msg}");
        }
    }

    /// Shown even in quiet mode.
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", "!".yellow());
        } else {
            eprintln!("{msg}");
        }
    }
}
