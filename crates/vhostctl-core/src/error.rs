// ── Core error types ──
//
// Everything the core can fail with. The CLI maps these into
// user-facing diagnostics; core never prints.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Template errors ──────────────────────────────────────────────
    #[error("Cannot load site template {path}: {reason}")]
    Template { path: PathBuf, reason: String },

    #[error("Failed to render site '{site}': {reason}")]
    Render { site: String, reason: String },

    // ── Filesystem errors ────────────────────────────────────────────
    #[error("Failed to {op} {path}: {source}")]
    FileSystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── External process errors ──────────────────────────────────────
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", display_code(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".into(), |c| format!("status {c}"))
}

impl CoreError {
    /// Shorthand for wrapping an I/O error with the operation and path.
    pub(crate) fn fs(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            op,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
