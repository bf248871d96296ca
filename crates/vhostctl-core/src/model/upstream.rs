// ── Upstream endpoint types ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// Failure thresholds applied to the preferred member of a primary/backup pool.
pub const PRIMARY_ANNOTATION: &str = "max_fails=3 fail_timeout=10s";

/// Marker applied to the standby member of a primary/backup pool.
pub const BACKUP_ANNOTATION: &str = "backup";

/// A backend address, with the port kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: Option<String>,
}

impl Endpoint {
    /// Parse a raw address such as `10.0.0.5`, `app.internal:8080` or `[::1]:9000`.
    ///
    /// A bracketed IPv6 literal only carries a port when written `[addr]:port`.
    /// A bare IPv6 literal such as `2001:db8::1` never carries one and is
    /// bracketed so an appended port stays unambiguous.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        let split = if raw.starts_with('[') {
            raw.rfind("]:").map(|idx| (&raw[..=idx], &raw[idx + 2..]))
        } else if raw.matches(':').count() > 1 {
            return Self {
                host: format!("[{raw}]"),
                port: None,
            };
        } else {
            raw.split_once(':')
        };

        match split {
            Some((host, port)) => Self {
                host: host.to_owned(),
                port: Some(port.to_owned()),
            },
            None => Self {
                host: raw.to_owned(),
                port: None,
            },
        }
    }

    /// Fill in `port` when the address was entered without one.
    pub fn with_default_port(mut self, port: &str) -> Self {
        if self.port.is_none() {
            self.port = Some(port.to_owned());
        }
        self
    }

    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.port {
            Some(port) => write!(f, "{}:{port}", self.host),
            None => f.write_str(&self.host),
        }
    }
}

/// How a member participates in its upstream pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRole {
    /// Equal-weight member of an HA pool.
    Balanced,
    Primary,
    Backup,
}

/// One `server` line inside an upstream block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamEntry {
    pub endpoint: Endpoint,
    pub role: EntryRole,
}

impl UpstreamEntry {
    pub fn new(endpoint: Endpoint, role: EntryRole) -> Self {
        Self { endpoint, role }
    }
}

impl fmt::Display for UpstreamEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            EntryRole::Balanced => write!(f, "{}", self.endpoint),
            EntryRole::Primary => write!(f, "{} {PRIMARY_ANNOTATION}", self.endpoint),
            EntryRole::Backup => write!(f, "{} {BACKUP_ANNOTATION}", self.endpoint),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_without_port() {
        let ep = Endpoint::parse("backend.internal");
        assert_eq!(ep.host, "backend.internal");
        assert!(!ep.has_port());
    }

    #[test]
    fn endpoint_with_port() {
        let ep = Endpoint::parse(" 10.0.0.5:8080 ");
        assert_eq!(ep.host, "10.0.0.5");
        assert_eq!(ep.port.as_deref(), Some("8080"));
    }

    #[test]
    fn bracketed_ipv6_without_port() {
        let ep = Endpoint::parse("[2001:db8::1]");
        assert_eq!(ep.host, "[2001:db8::1]");
        assert!(!ep.has_port());
    }

    #[test]
    fn bracketed_ipv6_with_port() {
        let ep = Endpoint::parse("[2001:db8::1]:9000");
        assert_eq!(ep.host, "[2001:db8::1]");
        assert_eq!(ep.port.as_deref(), Some("9000"));
    }

    #[test]
    fn bare_ipv6_has_no_port() {
        let ep = Endpoint::parse("2001:db8::1");
        assert_eq!(ep.host, "[2001:db8::1]");
        assert!(!ep.has_port());
        assert_eq!(ep.with_default_port("80").to_string(), "[2001:db8::1]:80");
    }

    #[test]
    fn default_port_only_fills_missing() {
        assert_eq!(Endpoint::parse("a").with_default_port("81").to_string(), "a:81");
        assert_eq!(
            Endpoint::parse("a:9000").with_default_port("81").to_string(),
            "a:9000"
        );
    }

    #[test]
    fn entry_lines_carry_role_annotations() {
        let ep = Endpoint::parse("a:80");
        assert_eq!(UpstreamEntry::new(ep.clone(), EntryRole::Balanced).to_string(), "a:80");
        assert_eq!(
            UpstreamEntry::new(ep.clone(), EntryRole::Primary).to_string(),
            "a:80 max_fails=3 fail_timeout=10s"
        );
        assert_eq!(
            UpstreamEntry::new(ep, EntryRole::Backup).to_string(),
            "a:80 backup"
        );
    }
}
