//! Site template rendering.
//!
//! Templates are Handlebars documents. The variables exposed to a template
//! are `server_name`, `port`, `upstream_name` and `upstreams` (one string per
//! pool member, iterate with `{{#each upstreams}}`). Older flat templates
//! written against `{{SERVER_NAME}}`, `{{UPSTREAM}}` and `{{BACKUP}}` keep
//! working through uppercase aliases.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde_json::json;

use crate::error::{CoreError, Result};
use crate::model::SiteRequest;

/// Template shipped with the tool, written out by `setup` when none exists.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/site.template");

const TEMPLATE_NAME: &str = "site";

/// Compiled site template.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Load and compile the template at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| CoreError::Template {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded site template");
        Self::compile(&source, path)
    }

    /// Compile a template held in memory.
    pub fn from_source(source: &str) -> Result<Self> {
        Self::compile(source, Path::new("<inline>"))
    }

    /// The built-in template.
    pub fn builtin() -> Result<Self> {
        Self::compile(DEFAULT_TEMPLATE, Path::new("<built-in>"))
    }

    fn compile(source: &str, origin: &Path) -> Result<Self> {
        let mut registry = Handlebars::new();
        // Output is nginx config, not HTML.
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|e| CoreError::Template {
                path: PathBuf::from(origin),
                reason: e.to_string(),
            })?;
        Ok(Self { registry })
    }

    /// Render the server block document for `request`.
    pub fn render(&self, request: &SiteRequest) -> Result<String> {
        let pool = request.pool()?;
        let upstream_name = request.upstream_name();
        let lines: Vec<String> = pool.iter().map(ToString::to_string).collect();
        let address = |idx: usize| {
            pool.get(idx)
                .map(|entry| entry.endpoint.to_string())
                .unwrap_or_default()
        };

        let data = json!({
            "server_name": request.name,
            "port": request.port,
            "upstream_name": upstream_name,
            "upstreams": lines,
            "SERVER_NAME": request.name,
            "PORT": request.port,
            "UPSTREAM_NAME": upstream_name,
            "UPSTREAM": address(0),
            "BACKUP": address(1),
        });

        self.registry
            .render(TEMPLATE_NAME, &data)
            .map_err(|e| CoreError::Render {
                site: request.name.clone(),
                reason: e.to_string(),
            })
    }
}
