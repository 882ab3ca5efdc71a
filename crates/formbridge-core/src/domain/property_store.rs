//! Property bag interface
//!
//! The host offers each installation a flat key/value bag of strings. It is
//! the only durable state FormBridge has; trigger bindings live in it.

use async_trait::async_trait;

use crate::CoreError;

/// A flat, installation-scoped key/value store of string values
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Get the value stored under a key
    async fn get_property(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Store a value under a key, replacing any previous value
    async fn set_property(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Remove a key; removing an absent key is not an error
    async fn delete_property(&self, key: &str) -> Result<(), CoreError>;

    /// List all keys
    async fn list_properties(&self) -> Result<Vec<String>, CoreError>;

    /// Health check for the store
    async fn health_check(&self) -> Result<bool, CoreError> {
        Ok(true)
    }
}
