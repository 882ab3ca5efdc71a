//! Doubles shared by the unit tests of the application services

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::binding::TriggerId;
use crate::domain::form::{FormId, HandlerName};
use crate::domain::message::EmailMessage;
use crate::domain::platform::{FormHost, Mailer, TableStore};
use crate::domain::property_store::PropertyStore;
use crate::domain::schema::FieldDescriptor;
use crate::domain::store::StoreRequest;
use crate::CoreError;

/// Property bag backed by a plain map, with switches to refuse writes or deletes
#[derive(Default)]
pub(crate) struct MemoryProperties {
    values: Mutex<HashMap<String, String>>,
    refuse_writes: AtomicBool,
    refuse_deletes: AtomicBool,
}

impl MemoryProperties {
    pub(crate) fn fail_writes(&self) {
        self.refuse_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_deletes(&self) {
        self.refuse_deletes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

#[async_trait]
impl PropertyStore for MemoryProperties {
    async fn get_property(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set_property(&self, key: &str, value: &str) -> Result<(), CoreError> {
        if self.refuse_writes.load(Ordering::SeqCst) {
            return Err(CoreError::StorageFailure("property bag is read-only".to_string()));
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_property(&self, key: &str) -> Result<(), CoreError> {
        if self.refuse_deletes.load(Ordering::SeqCst) {
            return Err(CoreError::StorageFailure("down".to_string()));
        }
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list_properties(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.values.lock().unwrap().keys().cloned().collect())
    }
}

mock! {
    pub FormHost {}

    #[async_trait]
    impl FormHost for FormHost {
        async fn create_form(&self, title: &str) -> Result<FormId, CoreError>;
        async fn add_field(&self, form: &FormId, field: &FieldDescriptor) -> Result<(), CoreError>;
        async fn published_url(&self, form: &FormId) -> Result<String, CoreError>;
        async fn create_submit_trigger(&self, form: &FormId, handler: HandlerName) -> Result<TriggerId, CoreError>;
        async fn list_triggers(&self) -> Result<Vec<TriggerId>, CoreError>;
        async fn delete_trigger(&self, trigger: &TriggerId) -> Result<(), CoreError>;
    }
}

mock! {
    pub TableStore {}

    #[async_trait]
    impl TableStore for TableStore {
        async fn evaluate(&self, request: &StoreRequest) -> Result<Value, CoreError>;
    }
}

mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &EmailMessage) -> Result<(), CoreError>;
    }
}
