// ── Domain model ──
//
// Canonical input types for rendering a site. The CLI fills these from
// prompts or flags; the renderer and directory manager only ever see
// these types.

pub mod site;
pub mod upstream;

pub use site::{DEFAULT_PORT, PoolMode, SiteRequest, upstream_pool_name};
pub use upstream::{Endpoint, EntryRole, UpstreamEntry};
