//! `setup`: install nginx and prepare the site directories.

use vhostctl_config::Config;
use vhostctl_core::SiteDirectory;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

pub async fn handle(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let reporter = util::reporter(global);
    reporter.info("Setting up NGINX load balancer...");

    util::orchestrator(config).install().await?;

    let sites = SiteDirectory::new(config.layout());
    sites.ensure_layout()?;
    if sites.install_default_template()? {
        reporter.info(&format!(
            "Installed default template at {}",
            sites.layout().template_path.display()
        ));
    }

    reporter.success("NGINX setup completed.");
    Ok(())
}
