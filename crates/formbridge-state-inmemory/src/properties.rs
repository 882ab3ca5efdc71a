//! In-memory implementation of the PropertyStore interface

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use formbridge_core::{CoreError, PropertyStore};

/// Property bag held in a shared map
#[derive(Clone)]
pub struct InMemoryPropertyStore {
    properties: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPropertyStore {
    /// Create an empty property bag
    pub fn new() -> Self {
        info!("Creating new InMemoryPropertyStore");
        Self {
            properties: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored properties
    pub async fn len(&self) -> usize {
        self.properties.read().await.len()
    }

    /// Whether the bag is empty
    pub async fn is_empty(&self) -> bool {
        self.properties.read().await.is_empty()
    }
}

impl Default for InMemoryPropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn get_property(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.properties.read().await.get(key).cloned())
    }

    async fn set_property(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.properties
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        debug!(key = %key, "Set property");
        Ok(())
    }

    async fn delete_property(&self, key: &str) -> Result<(), CoreError> {
        if self.properties.write().await.remove(key).is_some() {
            debug!(key = %key, "Deleted property");
        }
        Ok(())
    }

    async fn list_properties(&self) -> Result<Vec<String>, CoreError> {
        let mut keys: Vec<String> = self.properties.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
