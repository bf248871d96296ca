// ── External process capability ──
//
// Callers describe a command as data and get back its exit status and
// captured output. `SystemRunner` executes for real; tests substitute a
// recording fake.

use std::fmt;
use std::future::Future;

use crate::error::{CoreError, Result};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into `CoreError::CommandFailed`.
    pub fn check(self, spec: &CommandSpec) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(CoreError::CommandFailed {
            command: spec.to_string(),
            code: self.code,
            stderr: self.stderr,
        })
    }
}

/// Something that can run a [`CommandSpec`] to completion.
pub trait ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> impl Future<Output = Result<ProcessOutput>> + Send;
}

/// Runs commands on the host via `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        tracing::debug!(command = %spec, "running");
        let output = tokio::process::Command::new(&spec.program)
            .args(&spec.args)
            .output()
            .await
            .map_err(|source| CoreError::Spawn {
                command: spec.to_string(),
                source,
            })?;

        let result = ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(command = %spec, code = ?result.code, "finished");
        Ok(result)
    }
}
