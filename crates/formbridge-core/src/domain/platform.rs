//! Interfaces to the external collaborators
//!
//! The table store, the form host and the mail channel are all remote
//! services; FormBridge only talks to them through these traits.

use async_trait::async_trait;
use serde_json::Value;

use super::binding::TriggerId;
use super::form::{FormId, HandlerName};
use super::message::EmailMessage;
use super::schema::FieldDescriptor;
use super::store::StoreRequest;
use crate::CoreError;

/// The remote key-addressed table service
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Evaluate a request and return the raw reply
    async fn evaluate(&self, request: &StoreRequest) -> Result<Value, CoreError>;
}

/// Form creation and trigger management on the hosted platform
#[async_trait]
pub trait FormHost: Send + Sync {
    /// Create an empty form with the given title
    async fn create_form(&self, title: &str) -> Result<FormId, CoreError>;

    /// Append a field to a form
    async fn add_field(&self, form: &FormId, field: &FieldDescriptor) -> Result<(), CoreError>;

    /// Public URL respondents open
    async fn published_url(&self, form: &FormId) -> Result<String, CoreError>;

    /// Attach a submit trigger that routes to `handler`
    async fn create_submit_trigger(
        &self,
        form: &FormId,
        handler: HandlerName,
    ) -> Result<TriggerId, CoreError>;

    /// Identifiers of all triggers in this installation
    async fn list_triggers(&self) -> Result<Vec<TriggerId>, CoreError>;

    /// Remove a trigger
    async fn delete_trigger(&self, trigger: &TriggerId) -> Result<(), CoreError>;
}

/// Outgoing email
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message
    async fn send(&self, message: &EmailMessage) -> Result<(), CoreError>;
}
