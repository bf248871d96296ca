//! Configuration for vhostctl: TOML file, environment overrides, and
//! translation into `vhostctl_core` runtime types.
//!
//! Core never sees these types -- it receives a resolved `SiteLayout` and
//! `CommandSet`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use vhostctl_core::{CommandSet, SiteLayout};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VHOSTCTL_CONFIG";

/// Prefix for per-key overrides, nested with `__`
/// (e.g. `VHOSTCTL_PATHS__ENABLED_DIR`).
pub const ENV_PREFIX: &str = "VHOSTCTL_";

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(Box<figment::Error>),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub paths: Paths,

    #[serde(default)]
    pub commands: CommandSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format for `list` when `--output` is not given.
    #[serde(default = "default_output")]
    pub output: String,

    /// Offered as the default at the port prompt. Accepts `8080` or `"8080"`.
    #[serde(default = "default_port", deserialize_with = "port_text")]
    pub port: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            port: default_port(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_port() -> String {
    vhostctl_core::model::DEFAULT_PORT.into()
}

// Environment values like `8080` arrive as integers.
fn port_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(u64),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Text(text) => text,
        Port::Number(number) => number.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Paths {
    #[serde(default = "default_available_dir")]
    pub available_dir: PathBuf,

    #[serde(default = "default_enabled_dir")]
    pub enabled_dir: PathBuf,

    /// Base for `backup_dir` and `template` when those are unset.
    /// Defaults to the directory holding the executable.
    pub tool_dir: Option<PathBuf>,

    pub backup_dir: Option<PathBuf>,

    pub template: Option<PathBuf>,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            available_dir: default_available_dir(),
            enabled_dir: default_enabled_dir(),
            tool_dir: None,
            backup_dir: None,
            template: None,
        }
    }
}

fn default_available_dir() -> PathBuf {
    "/etc/nginx/sites-available".into()
}
fn default_enabled_dir() -> PathBuf {
    "/etc/nginx/sites-enabled".into()
}

impl Config {
    /// Resolve the filesystem layout, filling unset paths from the tool dir.
    pub fn layout(&self) -> SiteLayout {
        let tool_dir = self.paths.tool_dir.clone().unwrap_or_else(tool_dir);
        let standard = SiteLayout::standard(&tool_dir);
        SiteLayout {
            available_dir: self.paths.available_dir.clone(),
            enabled_dir: self.paths.enabled_dir.clone(),
            backup_dir: self.paths.backup_dir.clone().unwrap_or(standard.backup_dir),
            template_path: self.paths.template.clone().unwrap_or(standard.template_path),
        }
    }

    pub fn commands(&self) -> CommandSet {
        self.commands.clone()
    }
}

/// Directory containing the running executable, or `.` if unknown.
pub fn tool_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `VHOSTCTL_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("", "", "vhostctl")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("vhostctl");
            p.push("config.toml");
            p
        })
}

// ── Config loading ──────────────────────────────────────────────────

/// Load defaults, then `path` if it exists, then environment overrides.
///
/// A missing file yields the defaults; a malformed one is an error.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");
    let config = figment_for(path)
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

/// Serialize `cfg` as TOML to `path`, creating parent directories.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str).map_err(write_err)?;
    Ok(())
}
