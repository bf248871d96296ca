//! Clap derive structures for the `vhostctl` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This file
//! is also compiled by `build.rs` for man page generation, so it only
//! depends on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vhostctl -- manage nginx reverse-proxy virtual hosts
#[derive(Debug, Parser)]
#[command(
    name = "vhostctl",
    version,
    about = "Manage nginx reverse-proxy sites from the command line",
    long_about = "Renders nginx server blocks from a template, enables them through the\n\
        sites-available / sites-enabled convention, backs up removed sites,\n\
        and lists configured sites with their upstreams.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "VHOSTCTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, short = 'o', env = "VHOSTCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one row per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PoolModeArg {
    /// Two equal-weight upstreams
    Ha,
    /// A primary upstream with failure thresholds and a backup
    PrimaryBackup,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Install nginx and create the site directories
    Setup,

    /// Render a new site from the template and enable it
    #[command(name = "addserver", alias = "add")]
    AddServer(AddServerArgs),

    /// Disable a site and move its config into the backup directory
    #[command(name = "removeserver", alias = "rm")]
    RemoveServer(RemoveServerArgs),

    /// List enabled sites and their upstreams
    #[command(alias = "ls")]
    List,

    /// Manage vhostctl configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Site commands ────────────────────────────────────────────────────

/// Values not given as flags are prompted for.
#[derive(Debug, Args)]
pub struct AddServerArgs {
    /// Server name (e.g. example.com)
    #[arg(long)]
    pub name: Option<String>,

    /// Upstream pool mode
    #[arg(long, value_enum)]
    pub mode: Option<PoolModeArg>,

    /// Listen port
    #[arg(long)]
    pub port: Option<String>,

    /// Upstream address, host or host:port (give twice)
    #[arg(long = "upstream", value_name = "ADDR")]
    pub upstreams: Vec<String>,

    /// Write the site without testing and reloading nginx
    #[arg(long)]
    pub no_reload: bool,
}

#[derive(Debug, Args)]
pub struct RemoveServerArgs {
    /// Server name to remove
    #[arg(long)]
    pub name: Option<String>,

    /// Remove the site without testing and reloading nginx
    #[arg(long)]
    pub no_reload: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
