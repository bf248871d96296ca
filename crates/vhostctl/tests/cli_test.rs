//! Integration tests for the `vhostctl` binary.
//!
//! Every test runs against a throwaway directory tree with `true` / `false`
//! standing in for apt, nginx and systemctl, so nothing touches /etc/nginx.
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

struct Sandbox {
    root: TempDir,
    config: PathBuf,
}

impl Sandbox {
    /// A config pointing every path into a temp dir; `nginx` is the program
    /// used for `nginx -t`.
    fn new(nginx: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let config = root.path().join("config.toml");
        let base = root.path().display();
        fs::write(
            &config,
            format!(
                "[paths]\n\
                 available_dir = \"{base}/sites-available\"\n\
                 enabled_dir = \"{base}/sites-enabled\"\n\
                 tool_dir = \"{base}\"\n\
                 \n\
                 [commands]\n\
                 elevate = false\n\
                 apt = \"true\"\n\
                 nginx = \"{nginx}\"\n\
                 systemctl = \"true\"\n"
            ),
        )
        .unwrap();
        Self { root, config }
    }

    /// Sandbox with `setup` already run.
    fn ready() -> Self {
        let sandbox = Self::new("true");
        sandbox.cmd().arg("setup").assert().success();
        sandbox
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = vhostctl_cmd();
        cmd.env("VHOSTCTL_CONFIG", &self.config);
        cmd
    }

    fn add_ha(&self, name: &str) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["addserver", "--name", name, "--mode", "ha", "--port", "8080"])
            .args(["--upstream", "10.0.0.1", "--upstream", "10.0.0.2:9000"])
            .assert()
    }
}

/// Build a [`Command`] for the `vhostctl` binary with env isolation.
fn vhostctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vhostctl");
    cmd.env("HOME", "/tmp/vhostctl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/vhostctl-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("VHOSTCTL_CONFIG")
        .env_remove("VHOSTCTL_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vhostctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_actions() {
    vhostctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("setup")
            .and(predicate::str::contains("addserver"))
            .and(predicate::str::contains("removeserver"))
            .and(predicate::str::contains("list")),
    );
}

#[test]
fn test_invalid_action() {
    vhostctl_cmd()
        .arg("restart")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("restart"));
}

#[test]
fn test_completions_bash() {
    vhostctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Setup ───────────────────────────────────────────────────────────

#[test]
fn test_setup_creates_layout_and_template() {
    let sandbox = Sandbox::ready();
    assert!(sandbox.path("sites-available").is_dir());
    assert!(sandbox.path("sites-enabled").is_dir());
    assert!(sandbox.path("nginx_config_backup").is_dir());
    let template = fs::read_to_string(sandbox.path("templates/site.template")).unwrap();
    assert!(template.contains("{{#each upstreams}}"));
}

#[test]
fn test_setup_fails_when_install_fails() {
    let sandbox = Sandbox::new("true");
    let config = fs::read_to_string(&sandbox.config)
        .unwrap()
        .replace("apt = \"true\"", "apt = \"false\"");
    fs::write(&sandbox.config, config).unwrap();

    sandbox
        .cmd()
        .arg("setup")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("false update"));
    assert!(!sandbox.path("sites-enabled").exists());
}

// ── List ────────────────────────────────────────────────────────────

#[test]
fn test_list_empty() {
    Sandbox::ready()
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total servers configured: 0"));
}

#[test]
fn test_list_without_enabled_dir_fails() {
    Sandbox::new("true").cmd().arg("list").assert().code(4);
}

#[test]
fn test_list_reports_each_upstream() {
    let sandbox = Sandbox::ready();
    fs::write(
        sandbox.path("sites-enabled/shop.conf"),
        "server {\n\
         \x20   listen 443;\n\
         \x20   server_name shop.example;\n\
         \x20   location /api {\n\
         \x20       proxy_pass http://api.internal:9000;\n\
         \x20   }\n\
         \x20   location / {\n\
         \x20       proxy_pass http://web.internal;\n\
         \x20   }\n\
         }\n",
    )
    .unwrap();

    sandbox.cmd().arg("list").assert().success().stdout(
        predicate::str::contains("shop.example:443")
            .and(predicate::str::contains("api.internal:9000"))
            .and(predicate::str::contains("web.internal:80"))
            .and(predicate::str::contains("active"))
            .and(predicate::str::contains("100ms"))
            .and(predicate::str::contains("Total servers configured: 2")),
    );
}

// ── Add ─────────────────────────────────────────────────────────────

#[test]
fn test_addserver_ha_writes_and_links() {
    let sandbox = Sandbox::ready();
    sandbox
        .add_ha("example.com")
        .success()
        .stderr(predicate::str::contains("Server example.com added successfully."));

    let available = sandbox.path("sites-available/example.com.conf");
    let doc = fs::read_to_string(&available).unwrap();
    assert!(doc.contains("server 10.0.0.1:8080;"));
    assert!(doc.contains("server 10.0.0.2:9000;"));
    assert!(!doc.contains("max_fails"));
    assert!(is_symlink(&sandbox.path("sites-enabled/example.com.conf")));

    sandbox.cmd().arg("list").assert().success().stdout(
        predicate::str::contains("example.com:8080")
            .and(predicate::str::contains("example_com_backend:80"))
            .and(predicate::str::contains("Total servers configured: 1")),
    );
}

#[test]
fn test_addserver_primary_backup() {
    let sandbox = Sandbox::ready();
    sandbox
        .cmd()
        .args(["addserver", "--name", "app.example", "--mode", "primary-backup"])
        .args(["--port", "80", "--upstream", "onprem", "--upstream", "cloud"])
        .assert()
        .success();

    let doc = fs::read_to_string(sandbox.path("sites-available/app.example.conf")).unwrap();
    assert!(doc.contains("server onprem:80 max_fails=3 fail_timeout=10s;"));
    assert!(doc.contains("server cloud:80 backup;"));
}

#[test]
fn test_addserver_without_template() {
    let sandbox = Sandbox::new("true");
    sandbox
        .add_ha("example.com")
        .code(3)
        .stderr(predicate::str::contains("Cannot load site template"));
}

#[test]
fn test_addserver_with_failing_nginx_test() {
    let sandbox = Sandbox::new("false");
    sandbox.cmd().arg("setup").assert().success();

    sandbox
        .add_ha("example.com")
        .code(5)
        .stderr(predicate::str::contains("reload skipped"));
    // The site stays written; nothing is rolled back.
    assert!(sandbox.path("sites-available/example.com.conf").is_file());
}

#[test]
fn test_addserver_no_reload_skips_nginx() {
    let sandbox = Sandbox::new("false");
    sandbox.cmd().arg("setup").assert().success();
    sandbox
        .cmd()
        .args(["addserver", "--name", "a.example", "--mode", "ha", "--port", "80"])
        .args(["--upstream", "x", "--upstream", "y", "--no-reload"])
        .assert()
        .success();
}

// ── Remove ──────────────────────────────────────────────────────────

#[test]
fn test_removeserver_not_found() {
    let sandbox = Sandbox::ready();
    sandbox
        .cmd()
        .args(["removeserver", "--name", "ghost.example"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Server not found."));
    assert_eq!(
        fs::read_dir(sandbox.path("nginx_config_backup")).unwrap().count(),
        0
    );
}

#[test]
fn test_removeserver_backs_up_and_unlinks() {
    let sandbox = Sandbox::ready();
    sandbox.add_ha("example.com").success();

    sandbox
        .cmd()
        .args(["removeserver", "--name", "example.com"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Server example.com removed and backed up."));

    assert!(!sandbox.path("sites-available/example.com.conf").exists());
    assert!(!is_symlink(&sandbox.path("sites-enabled/example.com.conf")));
    let backup = fs::read_to_string(sandbox.path("nginx_config_backup/example.com.conf")).unwrap();
    assert!(backup.contains("server_name example.com;"));

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total servers configured: 0"));
}

// ── Output formats ──────────────────────────────────────────────────

#[test]
fn test_list_json_output() {
    let sandbox = Sandbox::ready();
    sandbox.add_ha("example.com").success();

    sandbox
        .cmd()
        .args(["--output", "json", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"site\": \"example.com:8080\"")
                .and(predicate::str::contains("Total servers").not()),
        );
}

#[test]
fn test_invalid_output_format() {
    Sandbox::ready()
        .cmd()
        .args(["--output", "invalid", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    vhostctl_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/etc/nginx/sites-enabled"));
}

#[test]
fn test_config_path_honours_env() {
    let sandbox = Sandbox::new("true");
    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(sandbox.config.display().to_string()));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let sandbox = Sandbox::new("true");
    sandbox.cmd().args(["config", "init"]).assert().code(2);

    let fresh = sandbox.path("fresh/config.toml");
    vhostctl_cmd()
        .arg("--config")
        .arg(&fresh)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(fs::read_to_string(fresh).unwrap().contains("[commands]"));
}
