use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "adopta.toml",
    "config/adopta.toml",
    "crates/config/adopta.toml",
    "../adopta.toml",
    "../config/adopta.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub csrf: CsrfConfig,
    pub session: SessionConfig,
    pub catalog: CatalogConfig,
    pub navigation: NavigationConfig,
}

/// Where the remote adoption service lives and how to talk to it.
///
/// ```
/// use adopta_config::ApiConfig;
///
/// let api = ApiConfig::default();
/// assert_eq!(api.base_url, "http://127.0.0.1:8000/api");
/// assert_eq!(api.request_timeout_seconds, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ApiConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "ApiConfig::default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    fn default_base_url() -> String {
        "http://127.0.0.1:8000/api".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    fn default_user_agent() -> String {
        "adopta-client".to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
            user_agent: Self::default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: "csrftoken".to_string(),
            header_name: "X-CSRFToken".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fail a login/register that starts while another one is still in flight.
    #[serde(default = "SessionConfig::default_reject_overlapping")]
    pub reject_overlapping_submissions: bool,
}

impl SessionConfig {
    const fn default_reject_overlapping() -> bool {
        true
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reject_overlapping_submissions: Self::default_reject_overlapping(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub preview_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { preview_limit: 3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    pub login_redirect: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_redirect: "/register".to_string(),
        }
    }
}

/// Load the client configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use adopta_config::load;
///
/// std::env::remove_var("ADOPTA_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.api.base_url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let request_timeout =
        i64::try_from(defaults.api.request_timeout_seconds).unwrap_or(i64::MAX);
    let preview_limit = i64::try_from(defaults.catalog.preview_limit).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("api.base_url", defaults.api.base_url.clone())?
        .set_default("api.request_timeout_seconds", request_timeout)?
        .set_default("api.user_agent", defaults.api.user_agent.clone())?
        .set_default("csrf.cookie_name", defaults.csrf.cookie_name.clone())?
        .set_default("csrf.header_name", defaults.csrf.header_name.clone())?
        .set_default(
            "session.reject_overlapping_submissions",
            defaults.session.reject_overlapping_submissions,
        )?
        .set_default("catalog.preview_limit", preview_limit)?
        .set_default(
            "navigation.login_redirect",
            defaults.navigation.login_redirect.clone(),
        )?;

    let environment_overrides = config::Environment::with_prefix("ADOPTA").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ADOPTA_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ADOPTA_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
    if config.catalog.preview_limit == 0 {
        config.catalog.preview_limit = defaults.catalog.preview_limit;
    }

    debug!(?config, "loaded client configuration");
    Ok(config)
}
