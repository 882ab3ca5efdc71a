//! API module for the FormBridge server

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod errors;
pub mod health;
pub mod hooks;

use crate::server::FormBridgeServer;

/// Build the router for API endpoints
pub fn build_router(server: Arc<FormBridgeServer>) -> Router {
    Router::new()
        // Host trigger callbacks, one per handler name
        .route("/v1/hooks/init-submit", post(hooks::handle_init_submit))
        .route("/v1/hooks/submit", post(hooks::handle_submit))
        // Health check
        .route("/health", get(health::health_check))
        .with_state(server)
}
