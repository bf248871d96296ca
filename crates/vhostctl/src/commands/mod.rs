//! Command dispatch: bridges CLI args -> core operations -> output.

pub mod add;
pub mod config_cmd;
pub mod list;
pub mod remove;
pub mod setup;
pub mod util;

use std::path::{Path, PathBuf};

use vhostctl_config::Config;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// `--config` / `VHOSTCTL_CONFIG`, else the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(vhostctl_config::config_path)
}

/// Dispatch a command to its handler.
pub async fn dispatch(
    cmd: Command,
    config: &Config,
    config_path: &Path,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Setup => setup::handle(config, global).await,
        Command::AddServer(args) => add::handle(args, config, global).await,
        Command::RemoveServer(args) => remove::handle(args, config, global).await,
        Command::List => list::handle(config, global),
        Command::Config(args) => config_cmd::handle(args, config, config_path, global),
        // Completions is handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}
