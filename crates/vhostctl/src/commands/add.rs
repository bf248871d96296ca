//! `addserver`: render a site from the template and enable it.

use vhostctl_config::Config;
use vhostctl_core::{PoolMode, SiteDirectory, SiteRequest, TemplateRenderer};

use crate::cli::{AddServerArgs, GlobalOpts, PoolModeArg};
use crate::error::CliError;

use super::util;

impl From<PoolModeArg> for PoolMode {
    fn from(arg: PoolModeArg) -> Self {
        match arg {
            PoolModeArg::Ha => Self::Ha,
            PoolModeArg::PrimaryBackup => Self::PrimaryBackup,
        }
    }
}

pub async fn handle(
    args: AddServerArgs,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let reporter = util::reporter(global);
    let layout = config.layout();

    // Fail on a missing template before asking anything.
    let renderer = TemplateRenderer::from_file(&layout.template_path)?;

    let no_reload = args.no_reload;
    let request = gather_request(args, config)?;
    let document = renderer.render(&request)?;

    let sites = SiteDirectory::new(layout);
    let path = sites.write_site(&request.name, &document)?;
    tracing::debug!(path = %path.display(), "site written");
    reporter.success(&format!("Server {} added successfully.", request.name));

    util::reload(config, reporter, no_reload).await
}

/// Build the request from flags, prompting for whatever is missing.
fn gather_request(args: AddServerArgs, config: &Config) -> Result<SiteRequest, CliError> {
    let name = match args.name {
        Some(name) => name,
        None => util::prompt_required("Enter the server name (e.g., example.com)")?,
    };

    let mode: PoolMode = match args.mode {
        Some(mode) => mode.into(),
        None => {
            let selector = util::prompt_with_default(
                "Select pool mode: 1 = HA (two equal upstreams), 2 = primary/backup",
                "1",
            )?;
            PoolMode::from_selector(&selector)?
        }
    };

    let port = match args.port {
        Some(port) => port,
        None => util::prompt_with_default("Enter the port", &config.defaults.port)?,
    };

    let mut addresses = args.upstreams;
    for label in mode.address_labels().iter().skip(addresses.len()) {
        addresses.push(util::prompt_required(&format!(
            "{label} (e.g., 10.0.0.5 or app.internal:8080)"
        ))?);
    }

    Ok(SiteRequest::new(name, port, mode, addresses))
}
