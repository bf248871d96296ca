// ── Site request ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::upstream::{Endpoint, EntryRole, UpstreamEntry};
use crate::error::{CoreError, Result};

/// Listen port used when none is given.
pub const DEFAULT_PORT: &str = "80";

/// Shape of the upstream pool behind a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum PoolMode {
    /// Two equal-weight members.
    Ha,
    /// One preferred member with failure thresholds, one standby.
    PrimaryBackup,
}

impl PoolMode {
    /// Resolve the numeric menu choice (`1` = HA, `2` = primary/backup).
    pub fn from_selector(selector: &str) -> Result<Self> {
        match selector.trim() {
            "1" => Ok(Self::Ha),
            "2" => Ok(Self::PrimaryBackup),
            other => Err(CoreError::Validation {
                field: "pool mode".into(),
                reason: format!("expected 1 (HA) or 2 (primary/backup), got '{other}'"),
            }),
        }
    }

    /// Prompt labels for the two addresses this mode asks for.
    pub fn address_labels(self) -> [&'static str; 2] {
        match self {
            Self::Ha => ["First upstream address", "Second upstream address"],
            Self::PrimaryBackup => ["Primary upstream address", "Backup upstream address"],
        }
    }
}

/// Everything needed to render one site, as entered by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRequest {
    pub name: String,
    pub port: String,
    pub mode: PoolMode,
    /// Raw addresses in prompt order: `[first, second]` or `[primary, backup]`.
    pub addresses: Vec<String>,
}

impl SiteRequest {
    pub fn new(
        name: impl Into<String>,
        port: impl Into<String>,
        mode: PoolMode,
        addresses: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            port: port.into(),
            mode,
            addresses,
        }
    }

    /// Name of the `upstream` block for this site.
    pub fn upstream_name(&self) -> String {
        upstream_pool_name(&self.name)
    }

    /// Build the ordered pool entries.
    ///
    /// Addresses entered without a port take the site's port in both modes.
    pub fn pool(&self) -> Result<Vec<UpstreamEntry>> {
        let [first, second] = self.addresses.as_slice() else {
            return Err(CoreError::Validation {
                field: "upstreams".into(),
                reason: format!(
                    "{} mode needs exactly two addresses, got {}",
                    self.mode,
                    self.addresses.len()
                ),
            });
        };

        let (first_role, second_role) = match self.mode {
            PoolMode::Ha => (EntryRole::Balanced, EntryRole::Balanced),
            PoolMode::PrimaryBackup => (EntryRole::Primary, EntryRole::Backup),
        };

        Ok(vec![
            self.entry(first, first_role),
            self.entry(second, second_role),
        ])
    }

    fn entry(&self, raw: &str, role: EntryRole) -> UpstreamEntry {
        UpstreamEntry::new(Endpoint::parse(raw).with_default_port(&self.port), role)
    }
}

/// `example.com` → `example_com_backend`.
pub fn upstream_pool_name(site: &str) -> String {
    format!("{}_backend", site.replace('.', "_"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(mode: PoolMode, addresses: &[&str]) -> SiteRequest {
        SiteRequest::new(
            "example.com",
            "8080",
            mode,
            addresses.iter().map(ToString::to_string).collect(),
        )
    }

    #[test]
    fn selector_maps_menu_choices() {
        assert_eq!(PoolMode::from_selector("1").unwrap(), PoolMode::Ha);
        assert_eq!(PoolMode::from_selector(" 2 ").unwrap(), PoolMode::PrimaryBackup);
        assert!(matches!(
            PoolMode::from_selector("3"),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn mode_parses_from_name() {
        assert_eq!("ha".parse::<PoolMode>().unwrap(), PoolMode::Ha);
        assert_eq!(
            "Primary-Backup".parse::<PoolMode>().unwrap(),
            PoolMode::PrimaryBackup
        );
        assert_eq!(PoolMode::PrimaryBackup.to_string(), "primary-backup");
    }

    #[test]
    fn pool_name_replaces_dots() {
        assert_eq!(upstream_pool_name("api.example.com"), "api_example_com_backend");
        assert_eq!(upstream_pool_name("localhost"), "localhost_backend");
    }

    #[test]
    fn ha_pool_suffixes_site_port() {
        let pool = request(PoolMode::Ha, &["10.0.0.1", "10.0.0.2"]).pool().unwrap();
        let lines: Vec<String> = pool.iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["10.0.0.1:8080", "10.0.0.2:8080"]);
    }

    #[test]
    fn ha_pool_keeps_explicit_ports() {
        let pool = request(PoolMode::Ha, &["10.0.0.1:9000", "10.0.0.2"]).pool().unwrap();
        assert_eq!(pool[0].to_string(), "10.0.0.1:9000");
        assert_eq!(pool[1].to_string(), "10.0.0.2:8080");
    }

    #[test]
    fn primary_backup_pool_annotates_both_members() {
        let pool = request(PoolMode::PrimaryBackup, &["onprem.internal", "cloud.internal:443"])
            .pool()
            .unwrap();
        assert_eq!(pool[0].role, EntryRole::Primary);
        assert_eq!(
            pool[0].to_string(),
            "onprem.internal:8080 max_fails=3 fail_timeout=10s"
        );
        assert_eq!(pool[1].role, EntryRole::Backup);
        assert_eq!(pool[1].to_string(), "cloud.internal:443 backup");
    }

    #[test]
    fn pool_rejects_wrong_address_count() {
        let err = request(PoolMode::Ha, &["only-one"]).pool().unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(err.to_string().contains("exactly two"));
    }
}
