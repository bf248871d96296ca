//! Site management engine behind the `vhostctl` CLI.
//!
//! This crate owns everything that touches nginx site configuration:
//!
//! - **[`TemplateRenderer`]** — fills a Handlebars server-block template from
//!   a [`SiteRequest`] (name, port, [`PoolMode`], upstream addresses).
//!
//! - **[`SiteDirectory`]** — writes rendered sites into sites-available,
//!   links them into sites-enabled, and moves removed sites into a backup
//!   directory instead of deleting them.
//!
//! - **[`inventory`]** — re-reads the enabled set and reports one row per
//!   `(site, upstream)` pair.
//!
//! - **[`Orchestrator`]** — installs, validates and reloads nginx through an
//!   injectable [`ProcessRunner`].
//!
//! Paths and command names arrive as [`SiteLayout`] and [`CommandSet`];
//! nothing here reads a config file.

pub mod config;
pub mod error;
pub mod inventory;
pub mod model;
pub mod orchestrator;
pub mod process;
pub mod render;
pub mod sites;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CommandSet, SiteLayout};
pub use error::CoreError;
pub use inventory::{InventoryRow, SiteRecord};
pub use model::{Endpoint, EntryRole, PoolMode, SiteRequest, UpstreamEntry};
pub use orchestrator::{Orchestrator, ReloadOutcome};
pub use process::{CommandSpec, ProcessOutput, ProcessRunner, SystemRunner};
pub use render::TemplateRenderer;
pub use sites::{RemoveOutcome, SiteDirectory};
