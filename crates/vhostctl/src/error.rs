//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use vhostctl_config::ConfigError;
use vhostctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const FILESYSTEM: i32 = 4;
    pub const COMMAND: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Template ─────────────────────────────────────────────────────
    #[error("Cannot load site template {path}")]
    #[diagnostic(
        code(vhostctl::template),
        help(
            "{reason}\n\
             Run: vhostctl setup to install the default template,\n\
             or point paths.template at an existing file."
        )
    )]
    Template { path: String, reason: String },

    #[error("Failed to render site '{site}'")]
    #[diagnostic(code(vhostctl::render), help("{reason}"))]
    Render { site: String, reason: String },

    // ── Filesystem ───────────────────────────────────────────────────
    #[error("Failed to {op} {path}")]
    #[diagnostic(
        code(vhostctl::filesystem),
        help("nginx site directories are usually root-owned; check permissions or retry with sudo.")
    )]
    FileSystem {
        op: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── External commands ────────────────────────────────────────────
    #[error("nginx rejected the configuration; reload skipped")]
    #[diagnostic(
        code(vhostctl::nginx_test_failed),
        help("{output}\nThe site file was kept. Fix it and run `nginx -t` again.")
    )]
    NginxTestFailed { output: String },

    #[error("`{command}` failed ({status})")]
    #[diagnostic(code(vhostctl::command_failed), help("{stderr}"))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Could not start `{command}`")]
    #[diagnostic(
        code(vhostctl::spawn_failed),
        help("Check that the program is installed, or set it under [commands] in the config.")
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vhostctl::validation))]
    Validation { field: String, reason: String },

    #[error("Prompt failed: {reason}")]
    #[diagnostic(
        code(vhostctl::prompt),
        help("Not running in a terminal? Pass --name, --mode, --port and --upstream instead.")
    )]
    Prompt { reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(vhostctl::config))]
    Config(Box<figment::Error>),

    #[error("Could not write configuration: {message}")]
    #[diagnostic(code(vhostctl::config_write))]
    ConfigWrite { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::Prompt { .. } => exit_code::USAGE,
            Self::Template { .. }
            | Self::Render { .. }
            | Self::Config(_)
            | Self::ConfigWrite { .. } => exit_code::CONFIG,
            Self::FileSystem { .. } => exit_code::FILESYSTEM,
            Self::NginxTestFailed { .. } | Self::CommandFailed { .. } | Self::Spawn { .. } => {
                exit_code::COMMAND
            }
            Self::Io(_) | Self::Serialize(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Template { path, reason } => CliError::Template {
                path: path.display().to_string(),
                reason,
            },

            CoreError::Render { site, reason } => CliError::Render { site, reason },

            CoreError::FileSystem { op, path, source } => CliError::FileSystem {
                op: op.into(),
                path: path.display().to_string(),
                source,
            },

            CoreError::Validation { field, reason } => CliError::Validation { field, reason },

            CoreError::Spawn { command, source } => CliError::Spawn { command, source },

            CoreError::CommandFailed {
                command,
                code,
                stderr,
            } => CliError::CommandFailed {
                command,
                status: code.map_or_else(|| "killed by signal".into(), |c| format!("exit {c}")),
                stderr,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Figment(inner) => CliError::Config(inner),
            other => CliError::ConfigWrite {
                message: other.to_string(),
            },
        }
    }
}
