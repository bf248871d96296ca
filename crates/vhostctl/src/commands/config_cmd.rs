//! Config subcommand handlers.

use std::path::Path;

use vhostctl_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(
    args: ConfigArgs,
    cfg: &Config,
    config_path: &Path,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let toml_str =
                toml::to_string_pretty(cfg).map_err(|e| CliError::Serialize(e.to_string()))?;
            output::print_output(toml_str.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if config_path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!(
                        "{} already exists (use --force to overwrite)",
                        config_path.display()
                    ),
                });
            }
            config::save_config(&Config::default(), config_path)?;
            if !global.quiet {
                eprintln!("Wrote default configuration to {}", config_path.display());
            }
            Ok(())
        }
    }
}
