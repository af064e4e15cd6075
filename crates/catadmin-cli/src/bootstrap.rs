//! Wires configuration, storage, session, router and HTTP client together.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use catadmin_application::Router;
use catadmin_core::{InMemoryKeyValueStore, KeyValueStore, Route, SessionHandle, SessionStore};
use catadmin_infrastructure::{AdminConfig, AdminPaths, FileKeyValueStore};
use catadmin_interaction::ApiClient;
use tracing_subscriber::EnvFilter;

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub ephemeral: bool,
}

pub struct AppContext {
    pub config: AdminConfig,
    pub session: SessionStore,
    pub client: ApiClient,
    pub router: Arc<Router>,
}

impl AppContext {
    /// Must run inside a tokio runtime: the router's guard loop is spawned here.
    pub fn bootstrap(options: &BootstrapOptions) -> Result<Self> {
        let paths = AdminPaths::new();
        let config_path = match &options.config {
            Some(path) => path.clone(),
            None => paths.config_file()?,
        };
        let mut config = AdminConfig::load(&config_path)?;
        if let Some(url) = &options.api_url {
            config.api.base_url = url.clone();
        }

        init_tracing(&config.logging.level);
        tracing::debug!(config = %config_path.display(), base_url = %config.api.base_url, "Configuration loaded");

        let storage: Arc<dyn KeyValueStore> = if options.ephemeral {
            Arc::new(InMemoryKeyValueStore::new())
        } else {
            Arc::new(FileKeyValueStore::new(paths.session_file()?))
        };

        let handle = SessionHandle::hydrate(storage);
        let router = Arc::new(Router::new(handle.clone()));
        router.spawn_guard_loop();
        let client = ApiClient::from_config(&config.api, handle.clone())?.with_navigator(router.clone());
        let session = SessionStore::new(handle, Arc::new(client.clone()));

        Ok(Self {
            config,
            session,
            client,
            router,
        })
    }

    /// Mounts `route`, failing with a readable message when a guard redirects.
    pub fn require(&self, route: Route) -> Result<()> {
        match self.router.open(route) {
            mounted if mounted == route => Ok(()),
            Route::Login => Err(anyhow!("Not signed in. Run `catadmin login` first.")),
            _ => Err(anyhow!("The `admin` ability is required for {}", route)),
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level. Logs go to stderr.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
