//! Trigger-argument store
//!
//! Host event handlers cannot close over values when they are attached, and
//! they run in a fresh process when they fire. The only thing a handler gets
//! is the identifier of the trigger that fired, so the arguments it needs are
//! written to the property bag under that identifier at attach time and read
//! back when it fires.
//!
//! A one-shot binding is removed, together with its host trigger, the first
//! time it is consumed. A recurring binding stays until it is unbound.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::binding::{TriggerBinding, TriggerId};
use crate::domain::platform::FormHost;
use crate::domain::property_store::PropertyStore;
use crate::CoreError;

/// Binds JSON arguments to trigger identifiers
pub struct TriggerArgumentStore {
    properties: Arc<dyn PropertyStore>,
    host: Arc<dyn FormHost>,
    /// Serializes consumption so a binding is read and removed as one step
    consume_lock: Mutex<()>,
}

impl TriggerArgumentStore {
    /// Create a store over the given property bag and host
    pub fn new(properties: Arc<dyn PropertyStore>, host: Arc<dyn FormHost>) -> Self {
        Self {
            properties,
            host,
            consume_lock: Mutex::new(()),
        }
    }

    /// Persist `arguments` under `trigger`, overwriting any previous binding
    pub async fn bind<T>(&self, trigger: &TriggerId, arguments: &T, recurring: bool) -> Result<(), CoreError>
    where
        T: Serialize + ?Sized + Sync,
    {
        let binding = TriggerBinding {
            recurring,
            arguments: serde_json::to_value(arguments)?,
        };
        let encoded = serde_json::to_string(&binding)?;

        self.properties
            .set_property(trigger.as_str(), &encoded)
            .await
            .map_err(CoreError::into_storage_failure)?;

        debug!(trigger_id = %trigger, recurring, "Bound trigger arguments");
        Ok(())
    }

    /// Read the binding for `trigger` without consuming it
    pub async fn lookup(&self, trigger: &TriggerId) -> Result<Option<TriggerBinding>, CoreError> {
        match self.properties.get_property(trigger.as_str()).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Return the arguments bound to `trigger`
    ///
    /// For a one-shot binding the binding and then the host trigger are
    /// removed before returning. Neither removal failing loses the arguments:
    /// a binding that cannot be deleted is left orphaned, and a host that no
    /// longer knows the trigger is logged and tolerated.
    pub async fn consume<T>(&self, trigger: &TriggerId) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
    {
        let _guard = self.consume_lock.lock().await;

        let binding = self
            .lookup(trigger)
            .await?
            .ok_or_else(|| CoreError::MissingBinding(trigger.to_string()))?;

        let arguments: T = serde_json::from_value(binding.arguments)?;

        if !binding.recurring {
            if let Err(e) = self.unbind(trigger).await {
                error!(trigger_id = %trigger, error = %e, "Failed to remove consumed binding, leaving it orphaned");
            }
            match self.delete_host_trigger(trigger).await {
                Ok(()) => {}
                Err(CoreError::TriggerNotFound(id)) => {
                    warn!(trigger_id = %id, "Could not find host trigger for consumed binding");
                }
                Err(e) => {
                    error!(trigger_id = %trigger, error = %e, "Failed to delete host trigger");
                }
            }
            info!(trigger_id = %trigger, "Consumed one-shot binding");
        } else {
            debug!(trigger_id = %trigger, "Read recurring binding");
        }

        Ok(arguments)
    }

    /// Remove the binding only; removing an absent binding is a no-op
    pub async fn unbind(&self, trigger: &TriggerId) -> Result<(), CoreError> {
        self.properties
            .delete_property(trigger.as_str())
            .await
            .map_err(CoreError::into_storage_failure)
    }

    /// Remove a host trigger that fired without a binding
    ///
    /// Such a trigger can never do useful work. Returns whether a trigger was
    /// actually removed.
    pub async fn discard_orphan_trigger(&self, trigger: &TriggerId) -> Result<bool, CoreError> {
        match self.delete_host_trigger(trigger).await {
            Ok(()) => {
                warn!(trigger_id = %trigger, "Removed orphan trigger with no binding");
                Ok(true)
            }
            Err(CoreError::TriggerNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn delete_host_trigger(&self, trigger: &TriggerId) -> Result<(), CoreError> {
        let triggers = self.host.list_triggers().await?;
        if !triggers.iter().any(|t| t == trigger) {
            return Err(CoreError::TriggerNotFound(trigger.to_string()));
        }
        self.host.delete_trigger(trigger).await
    }
}
