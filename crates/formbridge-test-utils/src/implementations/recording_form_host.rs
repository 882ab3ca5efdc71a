//! In-memory implementation of the FormHost trait.

use async_trait::async_trait;
use formbridge_core::{CoreError, FieldDescriptor, FormHost, FormId, HandlerName, TriggerId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// A form created on the fake host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedForm {
    /// Form title
    pub title: String,
    /// Fields in the order they were added
    pub fields: Vec<FieldDescriptor>,
}

/// A live trigger on the fake host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedTrigger {
    /// Form the trigger watches
    pub form: FormId,
    /// Handler it routes to
    pub handler: HandlerName,
}

/// Form host that keeps forms and triggers in memory.
#[derive(Clone, Default)]
pub struct RecordingFormHost {
    forms: Arc<RwLock<HashMap<FormId, HostedForm>>>,
    triggers: Arc<RwLock<HashMap<TriggerId, HostedTrigger>>>,
    deleted: Arc<RwLock<Vec<TriggerId>>>,
    next_id: Arc<AtomicUsize>,
    fail_triggers: Arc<AtomicBool>,
}

impl fmt::Debug for RecordingFormHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingFormHost")
            .field("form_count", &self.forms.read().len())
            .field("trigger_count", &self.triggers.read().len())
            .finish()
    }
}

impl RecordingFormHost {
    /// Creates a host with no forms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Public URL the host reports for `form`.
    pub fn url_for(form: &FormId) -> String {
        format!("https://forms.test/{}/viewform", form)
    }

    /// Makes trigger creation fail.
    pub fn set_fail_triggers(&self, fail: bool) {
        self.fail_triggers.store(fail, Ordering::SeqCst);
    }

    /// Looks up a form.
    pub fn form(&self, form: &FormId) -> Option<HostedForm> {
        self.forms.read().get(form).cloned()
    }

    /// Live triggers.
    pub fn triggers(&self) -> HashMap<TriggerId, HostedTrigger> {
        self.triggers.read().clone()
    }

    /// Triggers deleted so far, in order.
    pub fn deleted_triggers(&self) -> Vec<TriggerId> {
        self.deleted.read().clone()
    }

    /// Registers a trigger the services know nothing about.
    pub fn insert_trigger(&self, trigger: TriggerId, form: FormId, handler: HandlerName) {
        self.triggers.write().insert(trigger, HostedTrigger { form, handler });
    }

    fn next(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl FormHost for RecordingFormHost {
    async fn create_form(&self, title: &str) -> Result<FormId, CoreError> {
        let id = FormId::new(self.next("form"));
        self.forms.write().insert(
            id.clone(),
            HostedForm {
                title: title.to_string(),
                fields: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn add_field(&self, form: &FormId, field: &FieldDescriptor) -> Result<(), CoreError> {
        let mut forms = self.forms.write();
        let hosted = forms
            .get_mut(form)
            .ok_or_else(|| CoreError::HostError(format!("no such form: {}", form)))?;
        hosted.fields.push(field.clone());
        Ok(())
    }

    async fn published_url(&self, form: &FormId) -> Result<String, CoreError> {
        if !self.forms.read().contains_key(form) {
            return Err(CoreError::HostError(format!("no such form: {}", form)));
        }
        Ok(Self::url_for(form))
    }

    async fn create_submit_trigger(&self, form: &FormId, handler: HandlerName) -> Result<TriggerId, CoreError> {
        if self.fail_triggers.load(Ordering::SeqCst) {
            return Err(CoreError::HostError("trigger quota exceeded".to_string()));
        }
        let id = TriggerId::new(self.next("trigger"));
        self.insert_trigger(id.clone(), form.clone(), handler);
        Ok(id)
    }

    async fn list_triggers(&self) -> Result<Vec<TriggerId>, CoreError> {
        Ok(self.triggers.read().keys().cloned().collect())
    }

    async fn delete_trigger(&self, trigger: &TriggerId) -> Result<(), CoreError> {
        if self.triggers.write().remove(trigger).is_none() {
            return Err(CoreError::TriggerNotFound(trigger.to_string()));
        }
        self.deleted.write().push(trigger.clone());
        Ok(())
    }
}
