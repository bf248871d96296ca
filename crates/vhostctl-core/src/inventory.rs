//! Inventory of enabled sites, recovered by scanning their config files.
//!
//! The scan is a plain line matcher: a line that contains `server_name`,
//! `listen` or `proxy_pass` anywhere contributes its second
//! whitespace-separated token. It is not comment-aware.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::SITE_EXTENSION;
use crate::error::{CoreError, Result};
use crate::model::DEFAULT_PORT;

/// Status shown for every upstream. No health check is performed.
pub const SIMULATED_STATUS: &str = "active";

/// Latency shown for every upstream. Nothing is measured.
pub const SIMULATED_LATENCY: &str = "100ms";

const SERVER_NAME: &str = "server_name";
const LISTEN: &str = "listen";
const PROXY_PASS: &str = "proxy_pass";

/// What one config file says about its site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteRecord {
    pub server_name: String,
    pub port: String,
    /// `proxy_pass` targets in file order.
    pub upstreams: Vec<String>,
}

/// One `(site, upstream)` pair as presented by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub site: String,
    pub upstream: String,
    pub status: String,
    pub metrics: String,
}

/// Extract the site record from a config file's text.
///
/// Returns `None` unless both a server name and at least one upstream were
/// found. For `server_name` and `listen` the last matching line wins.
pub fn parse_config(text: &str) -> Option<SiteRecord> {
    let mut server_name = None;
    let mut port = None;
    let mut upstreams = Vec::new();

    for line in text.lines() {
        if line.contains(SERVER_NAME) {
            if let Some(token) = directive_value(line) {
                server_name = Some(token);
            }
        }
        if line.contains(PROXY_PASS) {
            if let Some(token) = directive_value(line) {
                upstreams.push(token);
            }
        }
        if line.contains(LISTEN) {
            if let Some(token) = directive_value(line) {
                port = Some(token);
            }
        }
    }

    let server_name = server_name?;
    if upstreams.is_empty() {
        return None;
    }
    Some(SiteRecord {
        server_name,
        port: port.unwrap_or_else(|| DEFAULT_PORT.to_owned()),
        upstreams,
    })
}

/// Second token of the line with any trailing `;` removed.
fn directive_value(line: &str) -> Option<String> {
    let token = line.split_whitespace().nth(1)?;
    Some(token.trim_end_matches(';').to_owned())
}

/// Split a `proxy_pass` target into host and port.
///
/// `http://` / `https://` and a trailing `/` are dropped first; a target
/// without `:` gets port 80.
pub fn parse_upstream(target: &str) -> (String, String) {
    let bare = target
        .strip_prefix("http://")
        .or_else(|| target.strip_prefix("https://"))
        .unwrap_or(target)
        .trim_end_matches('/');

    match bare.split_once(':') {
        Some((host, port)) => (host.to_owned(), port.to_owned()),
        None => (bare.to_owned(), DEFAULT_PORT.to_owned()),
    }
}

/// Every `*.conf` directly inside `dir`, sorted by file name.
pub fn config_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| CoreError::fs("read directory", dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| CoreError::fs("read directory", dir, e))?
            .path();
        if path.extension().is_some_and(|ext| ext == SITE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse every enabled site config in `dir`.
pub fn scan_dir(dir: &Path) -> Result<Vec<SiteRecord>> {
    let mut records = Vec::new();
    for path in config_files(dir)? {
        let text = fs::read_to_string(&path).map_err(|e| CoreError::fs("read", &path, e))?;
        match parse_config(&text) {
            Some(record) => records.push(record),
            None => tracing::debug!(path = %path.display(), "no site name or upstream, skipped"),
        }
    }
    Ok(records)
}

/// Flatten records into one row per upstream.
pub fn rows(records: &[SiteRecord]) -> Vec<InventoryRow> {
    records
        .iter()
        .flat_map(|record| {
            record.upstreams.iter().map(move |target| {
                let (host, port) = parse_upstream(target);
                InventoryRow {
                    site: format!("{}:{}", record.server_name, record.port),
                    upstream: format!("{host}:{port}"),
                    status: SIMULATED_STATUS.to_owned(),
                    metrics: SIMULATED_LATENCY.to_owned(),
                }
            })
        })
        .collect()
}
