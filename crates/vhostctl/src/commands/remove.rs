//! `removeserver`: disable a site and back up its config.

use vhostctl_config::Config;
use vhostctl_core::{RemoveOutcome, SiteDirectory};

use crate::cli::{GlobalOpts, RemoveServerArgs};
use crate::error::CliError;

use super::util;

pub async fn handle(
    args: RemoveServerArgs,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let reporter = util::reporter(global);

    let name = match args.name {
        Some(name) => name,
        None => util::prompt_required("Enter the server name to remove")?,
    };

    let sites = SiteDirectory::new(config.layout());
    match sites.remove_site(&name)? {
        RemoveOutcome::NotFound => {
            reporter.warn("Server not found.");
            Ok(())
        }
        RemoveOutcome::Removed { backup, unlinked } => {
            tracing::debug!(backup = %backup.display(), unlinked, "site removed");
            reporter.success(&format!("Server {name} removed and backed up."));
            util::reload(config, reporter, args.no_reload).await
        }
    }
}
