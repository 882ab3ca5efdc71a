use thiserror::Error;

/// Core error type for FormBridge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Unknown column data type, or a required field is missing
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// The external table store failed to read or write
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The property bag rejected a write or delete
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    /// A handler fired for a trigger that has no binding
    #[error("No binding for trigger: {0}")]
    MissingBinding(String),

    /// The host has no trigger with this identifier
    #[error("Trigger not found: {0}")]
    TriggerNotFound(String),

    /// The notification channel failed to send
    #[error("Delivery failure: {0}")]
    DeliveryFailure(String),

    /// The host platform refused a form or trigger operation
    #[error("Host error: {0}")]
    HostError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether the error came from the external table store
    pub fn is_store_error(&self) -> bool {
        matches!(self, CoreError::StoreUnavailable(_))
    }

    /// Rewrap any error as a storage failure, keeping storage failures as they are
    pub(crate) fn into_storage_failure(self) -> Self {
        match self {
            CoreError::StorageFailure(_) => self,
            other => CoreError::StorageFailure(other.to_string()),
        }
    }

    /// Rewrap any error as a store failure, keeping store failures as they are
    pub(crate) fn into_store_unavailable(self) -> Self {
        match self {
            CoreError::StoreUnavailable(_) => self,
            other => CoreError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            (CoreError::SchemaError("bad".to_string()), "Schema error: bad"),
            (CoreError::StoreUnavailable("boom".to_string()), "Store unavailable: boom"),
            (CoreError::StorageFailure("full".to_string()), "Storage failure: full"),
            (CoreError::MissingBinding("t1".to_string()), "No binding for trigger: t1"),
            (CoreError::TriggerNotFound("t2".to_string()), "Trigger not found: t2"),
            (CoreError::DeliveryFailure("smtp".to_string()), "Delivery failure: smtp"),
            (CoreError::HostError("quota".to_string()), "Host error: quota"),
            (CoreError::SerializationError("eof".to_string()), "Serialization error: eof"),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: CoreError = json_error.into();

        match error {
            CoreError::SerializationError(msg) => assert!(msg.contains("expected value")),
            _ => panic!("Expected SerializationError variant"),
        }
    }

    #[test]
    fn test_rewrapping_keeps_matching_variant() {
        let original = CoreError::StorageFailure("disk".to_string());
        assert_eq!(original.clone().into_storage_failure(), original);

        let wrapped = CoreError::HostError("503".to_string()).into_storage_failure();
        assert_eq!(wrapped, CoreError::StorageFailure("Host error: 503".to_string()));

        let wrapped = CoreError::HostError("timeout".to_string()).into_store_unavailable();
        assert!(wrapped.is_store_error());
    }
}
