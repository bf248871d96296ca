//! `list`: enabled sites and their upstreams.

use tabled::Tabled;

use vhostctl_config::Config;
use vhostctl_core::InventoryRow;
use vhostctl_core::inventory;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Site:Port")]
    site: String,
    #[tabled(rename = "Upstream:Port")]
    upstream: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Metrics")]
    metrics: String,
}

impl From<&InventoryRow> for SiteRow {
    fn from(row: &InventoryRow) -> Self {
        Self {
            site: row.site.clone(),
            upstream: row.upstream.clone(),
            status: row.status.clone(),
            metrics: row.metrics.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let format = resolve_format(global, config)?;
    let layout = config.layout();

    let records = inventory::scan_dir(&layout.enabled_dir)?;
    let rows = inventory::rows(&records);

    let out = output::render_list(format, &rows, |r| SiteRow::from(r), |r| {
        format!("{}\t{}", r.site, r.upstream)
    })?;

    if format == OutputFormat::Table {
        output::print_output(
            &format!(
                "Listing all configured servers and upstream connectors:\n{out}\n\n\
                 Total servers configured: {}",
                rows.len()
            ),
            global.quiet,
        );
    } else {
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

/// `--output`, else the configured default.
fn resolve_format(global: &GlobalOpts, config: &Config) -> Result<OutputFormat, CliError> {
    if let Some(format) = global.output {
        return Ok(format);
    }
    <OutputFormat as clap::ValueEnum>::from_str(&config.defaults.output, true).map_err(|_| {
        CliError::Validation {
            field: "defaults.output".into(),
            reason: format!(
                "expected table, json, json-compact, yaml or plain, got '{}'",
                config.defaults.output
            ),
        }
    })
}
