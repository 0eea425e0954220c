//! Test plan for the `adopta-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, environment overrides, and validation behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use adopta_config::{load, ApiConfig, AppConfig, CatalogConfig, CsrfConfig, NavigationConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "ADOPTA_CONFIG",
    "ADOPTA__API__BASE_URL",
    "ADOPTA__API__REQUEST_TIMEOUT_SECONDS",
    "ADOPTA__API__USER_AGENT",
    "ADOPTA__CATALOG__PREVIEW_LIMIT",
    "ADOPTA__CSRF__COOKIE_NAME",
    "ADOPTA__CSRF__HEADER_NAME",
    "ADOPTA__NAVIGATION__LOGIN_REDIRECT",
    "ADOPTA__SESSION__REJECT_OVERLAPPING_SUBMISSIONS",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

fn isolated() -> (TempDir, TestContext) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());
    (temp_dir, ctx)
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let (_temp_dir, _ctx) = isolated();

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.api.base_url, defaults.api.base_url);
    assert_eq!(
        config.api.request_timeout_seconds,
        defaults.api.request_timeout_seconds
    );
    assert_eq!(config.csrf.cookie_name, "csrftoken");
    assert_eq!(config.csrf.header_name, "X-CSRFToken");
    assert!(config.session.reject_overlapping_submissions);
    assert_eq!(config.catalog.preview_limit, 3);
    assert_eq!(config.navigation.login_redirect, "/register");
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "adopta.toml",
        r#"
        [catalog]
        preview_limit = 6
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/adopta.toml",
        r#"
        [catalog]
        preview_limit = 9
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.catalog.preview_limit, 6);
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "adopta.toml",
        r#"
        [api]
        base_url = "https://adopta.example.org/api/"

        [session]
        reject_overlapping_submissions = false
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = AppConfig::default();

    assert_eq!(config.api.base_url, "https://adopta.example.org/api");
    assert_eq!(config.api.user_agent, defaults.api.user_agent);
    assert!(!config.session.reject_overlapping_submissions);
    assert_eq!(config.csrf.cookie_name, defaults.csrf.cookie_name);
}

#[test]
#[serial]
fn load_reads_explicit_path_from_adopta_config() {
    let (temp_dir, mut ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "elsewhere/client.toml",
        r#"
        [navigation]
        login_redirect = "/login"
        "#,
    );
    let path = temp_dir.path().join("elsewhere/client.toml");
    ctx.set_var("ADOPTA_CONFIG", path.display().to_string());

    let config = load().expect("explicit configuration path should load");
    assert_eq!(config.navigation.login_redirect, "/login");
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let (temp_dir, mut ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "adopta.toml",
        r#"
        [api]
        request_timeout_seconds = 10
        "#,
    );

    ctx.set_var("ADOPTA__API__REQUEST_TIMEOUT_SECONDS", "5");
    ctx.set_var("ADOPTA__CSRF__HEADER_NAME", "X-Custom-Csrf");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.api.request_timeout_seconds, 5);
    assert_eq!(config.csrf.header_name, "X-Custom-Csrf");
}

#[test]
#[serial]
fn load_restores_default_preview_limit_when_zero() {
    let (_temp_dir, mut ctx) = isolated();

    ctx.set_var("ADOPTA__CATALOG__PREVIEW_LIMIT", "0");

    let config = load().expect("configuration load should succeed");
    assert_eq!(config.catalog.preview_limit, CatalogConfig::default().preview_limit);
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "adopta.toml",
        r#"
        [api]
        request_timeout_seconds = "not-a-number
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration") || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn api_config_defaults_point_at_local_service() {
    let defaults = ApiConfig::default();
    assert_eq!(defaults.base_url, "http://127.0.0.1:8000/api");
    assert_eq!(defaults.user_agent, "adopta-client");
}

#[test]
fn csrf_and_navigation_defaults_match_service_contract() {
    assert_eq!(CsrfConfig::default().cookie_name, "csrftoken");
    assert_eq!(NavigationConfig::default().login_redirect, "/register");
}
