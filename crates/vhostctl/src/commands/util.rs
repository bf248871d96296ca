//! Shared helpers for command handlers.

use dialoguer::Input;

use vhostctl_config::Config;
use vhostctl_core::{Orchestrator, ReloadOutcome, SystemRunner};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::Reporter;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        reason: e.to_string(),
    }
}

/// Prompt for a required, non-empty line of text.
pub fn prompt_required(prompt: &str) -> Result<String, CliError> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_err)?;
    Ok(value.trim().to_owned())
}

/// Prompt for a line of text, offering `default`.
pub fn prompt_with_default(prompt: &str, default: &str) -> Result<String, CliError> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .interact_text()
        .map_err(prompt_err)?;
    Ok(value.trim().to_owned())
}

pub fn reporter(global: &GlobalOpts) -> Reporter {
    Reporter::new(global.quiet, global.color)
}

pub fn orchestrator(config: &Config) -> Orchestrator<SystemRunner> {
    Orchestrator::new(SystemRunner, config.commands())
}

/// Test the configuration and reload nginx, unless `skip` is set.
pub async fn reload(config: &Config, reporter: Reporter, skip: bool) -> Result<(), CliError> {
    if skip {
        reporter.info("Skipping nginx test and reload (--no-reload).");
        return Ok(());
    }

    match orchestrator(config).validate_and_reload().await? {
        ReloadOutcome::Reloaded => {
            reporter.success("nginx configuration is valid; service reloaded.");
            Ok(())
        }
        ReloadOutcome::ValidationFailed(output) => {
            let text = if output.stderr.trim().is_empty() {
                output.stdout
            } else {
                output.stderr
            };
            Err(CliError::NginxTestFailed {
                output: text.trim_end().to_owned(),
            })
        }
    }
}
