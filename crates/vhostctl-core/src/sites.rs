//! Site directory manager: the sites-available / sites-enabled convention.
//!
//! A site is a single `{name}.conf` file in the available directory plus a
//! symlink to it in the enabled directory. Removing a site never deletes the
//! file; it is moved into the backup directory, replacing any earlier backup
//! of the same name.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::SiteLayout;
use crate::error::{CoreError, Result};
use crate::render::DEFAULT_TEMPLATE;

/// What `remove_site` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No available-sites file for that name. Nothing was touched.
    NotFound,
    Removed {
        /// Where the file now lives.
        backup: PathBuf,
        /// Whether an enabled-sites link was removed.
        unlinked: bool,
    },
}

/// Writes, links and retires site files under a [`SiteLayout`].
#[derive(Debug, Clone)]
pub struct SiteDirectory {
    layout: SiteLayout,
}

impl SiteDirectory {
    pub fn new(layout: SiteLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SiteLayout {
        &self.layout
    }

    /// Create the available, enabled and backup directories.
    pub fn ensure_layout(&self) -> Result<()> {
        for dir in [
            &self.layout.available_dir,
            &self.layout.enabled_dir,
            &self.layout.backup_dir,
        ] {
            create_dir(dir)?;
        }
        Ok(())
    }

    /// Write the built-in template unless one already exists.
    ///
    /// Returns `true` when a file was written.
    pub fn install_default_template(&self) -> Result<bool> {
        let path = &self.layout.template_path;
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        fs::write(path, DEFAULT_TEMPLATE).map_err(|e| CoreError::fs("write", path, e))?;
        tracing::info!(path = %path.display(), "installed default site template");
        Ok(true)
    }

    /// Write `document` as the site's config and link it into the enabled set.
    ///
    /// An existing file or link for the same name is replaced.
    pub fn write_site(&self, name: &str, document: &str) -> Result<PathBuf> {
        let available = self.layout.available_path(name);
        let enabled = self.layout.enabled_path(name);

        fs::write(&available, document).map_err(|e| CoreError::fs("write", &available, e))?;
        tracing::info!(path = %available.display(), "wrote site config");

        if is_present(&enabled) {
            fs::remove_file(&enabled).map_err(|e| CoreError::fs("unlink", &enabled, e))?;
        }
        let target = absolute(&available)?;
        std::os::unix::fs::symlink(&target, &enabled)
            .map_err(|e| CoreError::fs("symlink", &enabled, e))?;
        tracing::info!(link = %enabled.display(), target = %target.display(), "enabled site");

        Ok(available)
    }

    /// Disable the site and move its config into the backup directory.
    pub fn remove_site(&self, name: &str) -> Result<RemoveOutcome> {
        let available = self.layout.available_path(name);
        if !is_present(&available) {
            tracing::debug!(path = %available.display(), "site not found");
            return Ok(RemoveOutcome::NotFound);
        }

        let enabled = self.layout.enabled_path(name);
        let unlinked = is_present(&enabled);
        if unlinked {
            fs::remove_file(&enabled).map_err(|e| CoreError::fs("unlink", &enabled, e))?;
            tracing::info!(link = %enabled.display(), "disabled site");
        }

        create_dir(&self.layout.backup_dir)?;
        let backup = self.layout.backup_path(name);
        relocate(&available, &backup)?;
        tracing::info!(from = %available.display(), to = %backup.display(), "backed up site");

        Ok(RemoveOutcome::Removed { backup, unlinked })
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| CoreError::fs("create directory", dir, e))
}

/// True for regular files and for symlinks, dangling or not.
fn is_present(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| CoreError::fs("resolve", path, e))
}

/// Rename, falling back to copy + delete across filesystems.
fn relocate(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            fs::copy(from, to).map_err(|e| CoreError::fs("copy", to, e))?;
            fs::remove_file(from).map_err(|e| CoreError::fs("remove", from, e))
        }
        Err(e) => Err(CoreError::fs("move", from, e)),
    }
}
