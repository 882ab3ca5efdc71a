//! HTTP clients for the remote collaborators

pub mod host_platform;
pub mod table_store;

pub use host_platform::HttpHostPlatform;
pub use table_store::HttpTableStore;

use reqwest::Client;
use std::time::Duration;

use crate::error::ServerResult;

/// Build the reqwest client shared by a collaborator
pub(crate) fn build_client(timeout: Duration) -> ServerResult<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Error text from a reply body, falling back to the raw body
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match &value["error"] {
            serde_json::Value::String(message) => message.clone(),
            serde_json::Value::Null => body.to_string(),
            other => other
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        },
        Err(_) => body.to_string(),
    }
}
