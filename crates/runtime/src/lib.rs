use std::sync::Arc;

use adopta_api::ApiClient;
use adopta_config::AppConfig;
use adopta_pets::{PetRepo, PetService, SearchStore};
use adopta_router::Route;
use adopta_users::SessionStore;
use anyhow::{Context, Result};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_target(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything the views share, built once at boot.
#[derive(Clone)]
pub struct AppServices {
    pub config: AppConfig,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
    pub search: Arc<SearchStore>,
    pub pets: PetService,
    /// Where guests are sent when they open a protected view
    pub login_redirect: Route,
}

impl AppServices {
    /// Build the services in dependency order and run the boot-time identity
    /// check before returning.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let login_redirect = Route::parse(&config.navigation.login_redirect).with_context(|| {
            format!(
                "invalid navigation.login_redirect: {}",
                config.navigation.login_redirect
            )
        })?;

        let api = Arc::new(ApiClient::from_config(config).context("failed to build http client")?);
        info!(base_url = %api.base_url(), "adoption service client ready");

        let session = Arc::new(
            SessionStore::new(api.clone())
                .reject_overlapping_submissions(config.session.reject_overlapping_submissions),
        );
        let restored = session.initialize().await;
        info!(
            authenticated = restored.is_authenticated,
            "session store initialised"
        );

        let search = Arc::new(SearchStore::new());
        let repo: Arc<dyn PetRepo> = api.clone();
        let pets = PetService::new(repo);

        Ok(Self {
            config: config.clone(),
            api,
            session,
            search,
            pets,
            login_redirect,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
