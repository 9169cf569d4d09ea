use crate::clients::SessionClient;
use crate::config::StorefrontConfig;
use crate::services::{
    GenerationService, LogSink, OfflineCatalog, OrderSink, ProxyGenerationService,
};
use crate::session::{self, Session, SessionDeps, SessionSettings};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("session actor failed: {0}")]
    ActorFailed(#[from] tokio::task::JoinError),
}

/// The running storefront: one session actor and the client that drives it.
pub struct StorefrontSystem {
    /// Client for interacting with the Session actor
    pub client: SessionClient,

    /// Task handle of the session actor (used for graceful shutdown)
    handle: JoinHandle<Session>,
}

impl StorefrontSystem {
    /// Starts a storefront from configuration.
    ///
    /// Uses the HTTP proxy when one is configured and the offline catalog
    /// otherwise.
    pub async fn start(config: &StorefrontConfig) -> Result<Self, LifecycleError> {
        let service: Arc<dyn GenerationService> = match config.proxy.proxy_config() {
            Some(proxy) => {
                info!(url = %proxy.url, model = %proxy.model, "Using generation proxy");
                Arc::new(ProxyGenerationService::new(proxy)?)
            }
            None => {
                warn!("STOREFRONT_PROXY_URL is not set, running with offline demo data");
                Arc::new(OfflineCatalog::new())
            }
        };
        let sink: Arc<dyn OrderSink> = Arc::new(LogSink::new(config.session.record_delay()));

        Ok(Self::start_with(service, sink, config.session.settings()).await)
    }

    /// Starts a storefront with explicit dependencies.
    ///
    /// The initial restaurant load is awaited. A failed load is not fatal: it
    /// leaves an error alert and an empty listing, and can be retried with
    /// [`SessionClient::load_restaurants`].
    pub async fn start_with(
        service: Arc<dyn GenerationService>,
        sink: Arc<dyn OrderSink>,
        settings: SessionSettings,
    ) -> Self {
        let (actor, generic_client) = session::new(Session::new(settings));
        let client = SessionClient::new(generic_client);

        let deps = SessionDeps::new(service, sink);
        let handle = tokio::spawn(actor.run(deps));

        match client.load_restaurants().await {
            Ok(restaurants) => info!(count = restaurants.len(), "Storefront ready"),
            Err(e) => warn!(error = %e, "Initial restaurant load failed"),
        }

        Self { client, handle }
    }

    /// Gracefully shuts down the storefront.
    ///
    /// Drops the client, which closes the actor's channel, then waits for the
    /// actor to finish outstanding work. Returns the final session.
    pub async fn shutdown(self) -> Result<Session, LifecycleError> {
        info!("Shutting down storefront...");
        drop(self.client);

        match self.handle.await {
            Ok(session) => {
                info!("Storefront shutdown complete.");
                Ok(session)
            }
            Err(e) => {
                error!("Session actor failed: {:?}", e);
                Err(e.into())
            }
        }
    }
}
