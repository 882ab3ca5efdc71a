//! Health check endpoint for the FormBridge server

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::server::FormBridgeServer;

/// Health check handler
///
/// Reports the configured collaborators and whether the property bag, which
/// holds every trigger binding, answers.
pub async fn health_check(State(server): State<Arc<FormBridgeServer>>) -> impl IntoResponse {
    debug!("Health check requested");

    let properties_up = server.check_property_store_health().await;
    let status = if properties_up { "UP" } else { "DOWN" };

    let body = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "propertyStore": { "status": status },
            "tableStore": { "url": server.config.table_store_url },
            "hostPlatform": { "url": server.config.host_api_url },
        },
    });

    let code = if properties_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(body))
}
