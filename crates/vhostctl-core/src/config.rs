// ── Runtime configuration ──
//
// These types describe *where* sites live and *which* external commands
// manage nginx. They never touch disk themselves: the CLI resolves them
// from its config file and hands them in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extension of every managed site file.
pub const SITE_EXTENSION: &str = "conf";

/// Filesystem locations used by the directory manager and scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLayout {
    /// All rendered sites (`/etc/nginx/sites-available`).
    pub available_dir: PathBuf,
    /// Symlinks to the active subset (`/etc/nginx/sites-enabled`).
    pub enabled_dir: PathBuf,
    /// Where removed sites are moved to.
    pub backup_dir: PathBuf,
    /// Source template for new sites.
    pub template_path: PathBuf,
}

impl SiteLayout {
    /// Standard Debian layout, with backups and template under `tool_dir`.
    pub fn standard(tool_dir: &Path) -> Self {
        Self {
            available_dir: PathBuf::from("/etc/nginx/sites-available"),
            enabled_dir: PathBuf::from("/etc/nginx/sites-enabled"),
            backup_dir: tool_dir.join("nginx_config_backup"),
            template_path: tool_dir.join("templates").join("site.template"),
        }
    }

    /// Everything rooted under one directory. Handy for tests and staging.
    pub fn rooted(root: &Path) -> Self {
        Self {
            available_dir: root.join("sites-available"),
            enabled_dir: root.join("sites-enabled"),
            backup_dir: root.join("nginx_config_backup"),
            template_path: root.join("templates").join("site.template"),
        }
    }

    pub fn file_name(name: &str) -> String {
        format!("{name}.{SITE_EXTENSION}")
    }

    pub fn available_path(&self, name: &str) -> PathBuf {
        self.available_dir.join(Self::file_name(name))
    }

    pub fn enabled_path(&self, name: &str) -> PathBuf {
        self.enabled_dir.join(Self::file_name(name))
    }

    pub fn backup_path(&self, name: &str) -> PathBuf {
        self.backup_dir.join(Self::file_name(name))
    }
}

/// External programs used to install, validate and reload nginx.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSet {
    /// Prefix every command with `sudo`.
    pub elevate: bool,
    pub sudo: String,
    pub apt: String,
    pub nginx: String,
    pub systemctl: String,
    /// Package and unit name.
    pub service: String,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            elevate: true,
            sudo: "sudo".into(),
            apt: "apt".into(),
            nginx: "nginx".into(),
            systemctl: "systemctl".into(),
            service: "nginx".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_matches_debian_paths() {
        let layout = SiteLayout::standard(Path::new("/opt/vhostctl"));
        assert_eq!(
            layout.available_path("example.com"),
            PathBuf::from("/etc/nginx/sites-available/example.com.conf")
        );
        assert_eq!(
            layout.enabled_path("example.com"),
            PathBuf::from("/etc/nginx/sites-enabled/example.com.conf")
        );
        assert_eq!(
            layout.backup_path("example.com"),
            PathBuf::from("/opt/vhostctl/nginx_config_backup/example.com.conf")
        );
        assert_eq!(
            layout.template_path,
            PathBuf::from("/opt/vhostctl/templates/site.template")
        );
    }
}
