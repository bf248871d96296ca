//! Install, validate and reload nginx through a [`ProcessRunner`].
//!
//! Every command's exit status is checked explicitly. A reload is only
//! attempted after `nginx -t` succeeds.

use crate::config::CommandSet;
use crate::error::Result;
use crate::process::{CommandSpec, ProcessOutput, ProcessRunner};

/// Outcome of [`Orchestrator::validate_and_reload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    Reloaded,
    /// `nginx -t` rejected the configuration. The service was not reloaded.
    ValidationFailed(ProcessOutput),
}

pub struct Orchestrator<R> {
    runner: R,
    commands: CommandSet,
}

impl<R: ProcessRunner> Orchestrator<R> {
    pub fn new(runner: R, commands: CommandSet) -> Self {
        Self { runner, commands }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// `apt update`, then `apt install -y nginx`.
    pub async fn install(&self) -> Result<()> {
        let service = self.commands.service.clone();
        let steps = [
            self.command(&self.commands.apt, ["update".to_owned()]),
            self.command(
                &self.commands.apt,
                ["install".to_owned(), "-y".to_owned(), service],
            ),
        ];

        for spec in &steps {
            tracing::info!(command = %spec, "installing");
            self.runner.run(spec).await?.check(spec)?;
        }
        Ok(())
    }

    /// `nginx -t`, then `systemctl reload nginx` if the test passed.
    pub async fn validate_and_reload(&self) -> Result<ReloadOutcome> {
        let test = self.command(&self.commands.nginx, ["-t".to_owned()]);
        let output = self.runner.run(&test).await?;
        if !output.success() {
            tracing::warn!(command = %test, code = ?output.code, "configuration test failed");
            return Ok(ReloadOutcome::ValidationFailed(output));
        }

        let reload = self.command(
            &self.commands.systemctl,
            ["reload".to_owned(), self.commands.service.clone()],
        );
        self.runner.run(&reload).await?.check(&reload)?;
        tracing::info!(service = %self.commands.service, "reloaded");
        Ok(ReloadOutcome::Reloaded)
    }

    fn command<const N: usize>(&self, program: &str, args: [String; N]) -> CommandSpec {
        if self.commands.elevate {
            CommandSpec::new(
                self.commands.sudo.clone(),
                std::iter::once(program.to_owned()).chain(args),
            )
        } else {
            CommandSpec::new(program, args)
        }
    }
}
