//! Main FormBridge server implementation

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use formbridge_core::{BridgeServices, Collaborators};

use crate::clients::{HttpHostPlatform, HttpTableStore};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Main server implementation
#[derive(Clone)]
pub struct FormBridgeServer {
    /// Configuration
    pub config: ServerConfig,

    /// Application services
    services: BridgeServices,
}

impl std::fmt::Debug for FormBridgeServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormBridgeServer")
            .field("config", &self.config)
            .finish()
    }
}

impl FormBridgeServer {
    /// Create a server over already wired services
    pub fn new(config: ServerConfig, services: BridgeServices) -> Self {
        Self { config, services }
    }

    /// Create a server talking to the collaborators named in `config`
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let services = build_services(&config)?;
        Ok(Self::new(config, services))
    }

    /// Application services
    pub fn services(&self) -> &BridgeServices {
        &self.services
    }

    /// Whether the property bag answers
    pub async fn check_property_store_health(&self) -> bool {
        self.services.health_check().await
    }

    /// Bind and serve until ctrl-c
    pub async fn run(self) -> ServerResult<()> {
        info!("Starting FormBridge server");

        let addr: SocketAddr = format!("{}:{}", self.config.bind_address, self.config.port)
            .parse()
            .map_err(|e| ServerError::ConfigError(format!("Invalid bind address: {}", e)))?;

        let app = crate::api::build_router(Arc::new(self)).layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!(address = %addr, "Server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Wire the application services over the HTTP clients
pub fn build_services(config: &ServerConfig) -> ServerResult<BridgeServices> {
    let store = Arc::new(HttpTableStore::new(&config.table_store_url, config.http_timeout())?);
    let platform = Arc::new(HttpHostPlatform::new(
        &config.host_api_url,
        config.host_api_token.clone(),
        config.http_timeout(),
    )?);

    Ok(BridgeServices::new(
        Collaborators {
            properties: platform.clone(),
            store,
            host: platform.clone(),
            mailer: platform,
        },
        config.qr_service(),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
