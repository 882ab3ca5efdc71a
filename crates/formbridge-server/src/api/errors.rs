//! Error handling for the FormBridge API
//!
//! Every error reply has the shape `{"error": {"code", "message"}}`.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use formbridge_core::CoreError;

/// API Error type for returning standard error responses
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),
    /// Error raised by the application services
    Core(CoreError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Core(err) => write!(f, "{}", err),
        }
    }
}

/// Status and error code for an application error
fn core_error_status(err: &CoreError) -> (StatusCode, &'static str) {
    match err {
        CoreError::SchemaError(_) => (StatusCode::BAD_REQUEST, "ERR_SCHEMA"),
        CoreError::MissingBinding(_) => (StatusCode::NOT_FOUND, "ERR_MISSING_BINDING"),
        CoreError::TriggerNotFound(_) => (StatusCode::NOT_FOUND, "ERR_TRIGGER_NOT_FOUND"),
        CoreError::StoreUnavailable(_) => (StatusCode::BAD_GATEWAY, "ERR_STORE_UNAVAILABLE"),
        CoreError::HostError(_) => (StatusCode::BAD_GATEWAY, "ERR_HOST"),
        CoreError::DeliveryFailure(_) => (StatusCode::BAD_GATEWAY, "ERR_DELIVERY_FAILURE"),
        CoreError::StorageFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERR_STORAGE_FAILURE"),
        CoreError::SerializationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERR_SERIALIZATION"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "ERR_BAD_REQUEST", msg.clone()),
            ApiError::Core(err) => {
                let (status, code) = core_error_status(err);
                (status, code, err.to_string())
            }
        };

        if status.is_server_error() {
            error!(status = %status, code = code, message = %message, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": {
                    "code": code,
                    "message": message,
                }
            })),
        )
            .into_response()
    }
}
