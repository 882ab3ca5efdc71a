//!
//! FormBridge Server - HTTP service for the FormBridge table/form bridge
//!
//! Exposes the host's submit triggers as webhooks and provides the reqwest
//! clients for the remote table store and the hosted platform.

/// API module
pub mod api;

/// HTTP clients for the remote collaborators
pub mod clients;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

/// Logging initialisation
pub mod logging;

/// Server module
pub mod server;

// Re-export key types
pub use config::{LogFormat, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{build_services, FormBridgeServer};

use formbridge_core::{ProvisionedForm, PublishedForm};

/// Serve the webhooks until shutdown
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    FormBridgeServer::from_config(config)?.run().await
}

/// Install the initialization form on the host
pub async fn install(config: &ServerConfig) -> ServerResult<PublishedForm> {
    let services = build_services(config)?;
    Ok(services.bootstrap.install().await?)
}

/// Provision a form for `table_name` without going through the init form
pub async fn init(
    config: &ServerConfig,
    key: &str,
    table_name: &str,
    email: &str,
) -> ServerResult<ProvisionedForm> {
    let services = build_services(config)?;
    Ok(services.bootstrap.init(key, table_name, email).await?)
}
