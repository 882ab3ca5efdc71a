//! Table store client
//!
//! The store exposes one `evaluate` endpoint that takes the request object
//! and answers with JSON. A reply carrying an `error` member is a failure
//! even when the status is 2xx.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use formbridge_core::{CoreError, StoreRequest, TableStore};

use super::{build_client, error_message};
use crate::error::ServerResult;

/// reqwest implementation of TableStore
#[derive(Debug, Clone)]
pub struct HttpTableStore {
    /// Full URL of the evaluate endpoint
    endpoint: String,

    /// HTTP client
    client: Client,
}

impl HttpTableStore {
    /// Create a client for the store at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ServerResult<Self> {
        Ok(Self {
            endpoint: format!("{}/evaluate", base_url.trim_end_matches('/')),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl TableStore for HttpTableStore {
    async fn evaluate(&self, request: &StoreRequest) -> Result<Value, CoreError> {
        debug!(action = request.action(), table = %request.table(), "Calling table store");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request.to_json())
            .send()
            .await
            .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::StoreUnavailable(e.to_string()))?;

        if !status.is_success() {
            warn!(status = %status, table = %request.table(), "Table store refused request");
            return Err(CoreError::StoreUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_message(&body)
            )));
        }

        let reply: Value = serde_json::from_str(&body)
            .map_err(|e| CoreError::StoreUnavailable(format!("invalid reply: {}", e)))?;

        if let Some(error) = reply.get("error").filter(|e| !e.is_null()) {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(CoreError::StoreUnavailable(message));
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn store(server: &MockServer) -> HttpTableStore {
        HttpTableStore::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_read_schema_posts_request_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .and(body_json(json!({
                "key": "K", "action": "read", "type": "table", "table": "people",
                "columnInfo": true, "page": 1, "limit": 0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "columns": [{"name": "name", "dataType": "string"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = store(&server)
            .await
            .evaluate(&StoreRequest::read_table_schema("K", "people"))
            .await
            .unwrap();
        assert_eq!(reply["columns"][0]["name"], "name");
    }

    #[tokio::test]
    async fn test_error_member_is_store_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid key"})))
            .mount(&server)
            .await;

        let err = store(&server)
            .await
            .evaluate(&StoreRequest::read_table_schema("bad", "people"))
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::StoreUnavailable("invalid key".to_string()));
    }

    #[tokio::test]
    async fn test_http_failure_is_store_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&server)
            .await;

        let err = store(&server)
            .await
            .evaluate(&StoreRequest::create_entry("K", "people", Default::default()))
            .await
            .unwrap_err();
        match err {
            CoreError::StoreUnavailable(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("down for maintenance"));
            }
            other => panic!("Expected StoreUnavailable, got {:?}", other),
        }
    }
}
