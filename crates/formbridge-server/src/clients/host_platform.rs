//! Hosted platform client
//!
//! One REST API covers the three host-side collaborators: forms and
//! triggers, the installation property bag, and outgoing mail.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use formbridge_core::{
    CoreError, EmailBody, EmailMessage, FieldDescriptor, FormHost, FormId, HandlerName, Mailer,
    PropertyStore, TriggerId,
};

use super::{build_client, error_message};
use crate::config::REDACTED;
use crate::error::ServerResult;

#[derive(Deserialize)]
struct CreatedForm {
    id: FormId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormDetails {
    published_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggerSummary {
    unique_id: TriggerId,
}

#[derive(Deserialize)]
struct PropertyValue {
    value: String,
}

#[derive(Deserialize)]
struct PropertyKeys {
    keys: Vec<String>,
}

/// reqwest implementation of FormHost, PropertyStore and Mailer
#[derive(Clone)]
pub struct HttpHostPlatform {
    /// Base URL of the platform API
    base_url: String,

    /// Bearer token
    api_token: Option<String>,

    /// HTTP client
    client: Client,
}

impl fmt::Debug for HttpHostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpHostPlatform")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| REDACTED))
            .finish_non_exhaustive()
    }
}

impl HttpHostPlatform {
    /// Create a client for the platform at `base_url`
    pub fn new(base_url: &str, api_token: Option<String>, timeout: Duration) -> ServerResult<Self> {
        if api_token.is_none() {
            warn!("No HOST_API_TOKEN provided - host platform calls are unauthenticated");
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client: build_client(timeout)?,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn form_path(form: &FormId) -> String {
        format!("/forms/{}", urlencoding::encode(form.as_str()))
    }

    fn trigger_path(trigger: &TriggerId) -> String {
        format!("/triggers/{}", urlencoding::encode(trigger.as_str()))
    }

    fn property_path(key: &str) -> String {
        format!("/properties/{}", urlencoding::encode(key))
    }

    async fn dispatch(builder: RequestBuilder) -> Result<Response, String> {
        builder.send().await.map_err(|e| e.to_string())
    }
}

/// Fail unless the reply is 2xx
async fn ensure_success(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(format!("HTTP {}: {}", status.as_u16(), error_message(&body)))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    response.json::<T>().await.map_err(|e| e.to_string())
}

#[async_trait]
impl FormHost for HttpHostPlatform {
    async fn create_form(&self, title: &str) -> Result<FormId, CoreError> {
        let response = Self::dispatch(self.request(Method::POST, "/forms").json(&json!({ "title": title })))
            .await
            .map_err(CoreError::HostError)?;
        let response = ensure_success(response).await.map_err(CoreError::HostError)?;
        let created: CreatedForm = read_json(response).await.map_err(CoreError::HostError)?;

        debug!(form_id = %created.id, title = %title, "Created host form");
        Ok(created.id)
    }

    async fn add_field(&self, form: &FormId, field: &FieldDescriptor) -> Result<(), CoreError> {
        let path = format!("{}/items", Self::form_path(form));
        let response = Self::dispatch(self.request(Method::POST, &path).json(field))
            .await
            .map_err(CoreError::HostError)?;
        ensure_success(response).await.map_err(CoreError::HostError)?;
        Ok(())
    }

    async fn published_url(&self, form: &FormId) -> Result<String, CoreError> {
        let response = Self::dispatch(self.request(Method::GET, &Self::form_path(form)))
            .await
            .map_err(CoreError::HostError)?;
        let response = ensure_success(response).await.map_err(CoreError::HostError)?;
        let details: FormDetails = read_json(response).await.map_err(CoreError::HostError)?;
        Ok(details.published_url)
    }

    async fn create_submit_trigger(&self, form: &FormId, handler: HandlerName) -> Result<TriggerId, CoreError> {
        let body = json!({ "formId": form, "handler": handler });
        let response = Self::dispatch(self.request(Method::POST, "/triggers").json(&body))
            .await
            .map_err(CoreError::HostError)?;
        let response = ensure_success(response).await.map_err(CoreError::HostError)?;
        let created: TriggerSummary = read_json(response).await.map_err(CoreError::HostError)?;

        debug!(form_id = %form, trigger_id = %created.unique_id, handler = %handler, "Created submit trigger");
        Ok(created.unique_id)
    }

    async fn list_triggers(&self) -> Result<Vec<TriggerId>, CoreError> {
        let response = Self::dispatch(self.request(Method::GET, "/triggers"))
            .await
            .map_err(CoreError::HostError)?;
        let response = ensure_success(response).await.map_err(CoreError::HostError)?;
        let triggers: Vec<TriggerSummary> = read_json(response).await.map_err(CoreError::HostError)?;
        Ok(triggers.into_iter().map(|t| t.unique_id).collect())
    }

    async fn delete_trigger(&self, trigger: &TriggerId) -> Result<(), CoreError> {
        let response = Self::dispatch(self.request(Method::DELETE, &Self::trigger_path(trigger)))
            .await
            .map_err(CoreError::HostError)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::TriggerNotFound(trigger.to_string()));
        }
        ensure_success(response).await.map_err(CoreError::HostError)?;
        debug!(trigger_id = %trigger, "Deleted host trigger");
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for HttpHostPlatform {
    async fn get_property(&self, key: &str) -> Result<Option<String>, CoreError> {
        let response = Self::dispatch(self.request(Method::GET, &Self::property_path(key)))
            .await
            .map_err(CoreError::StorageFailure)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await.map_err(CoreError::StorageFailure)?;
        let property: PropertyValue = read_json(response).await.map_err(CoreError::StorageFailure)?;
        Ok(Some(property.value))
    }

    async fn set_property(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let request = self
            .request(Method::PUT, &Self::property_path(key))
            .json(&json!({ "value": value }));
        let response = Self::dispatch(request).await.map_err(CoreError::StorageFailure)?;
        ensure_success(response).await.map_err(CoreError::StorageFailure)?;
        Ok(())
    }

    async fn delete_property(&self, key: &str) -> Result<(), CoreError> {
        let response = Self::dispatch(self.request(Method::DELETE, &Self::property_path(key)))
            .await
            .map_err(CoreError::StorageFailure)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        ensure_success(response).await.map_err(CoreError::StorageFailure)?;
        Ok(())
    }

    async fn list_properties(&self) -> Result<Vec<String>, CoreError> {
        let response = Self::dispatch(self.request(Method::GET, "/properties"))
            .await
            .map_err(CoreError::StorageFailure)?;
        let response = ensure_success(response).await.map_err(CoreError::StorageFailure)?;
        let listing: PropertyKeys = read_json(response).await.map_err(CoreError::StorageFailure)?;
        Ok(listing.keys)
    }

    async fn health_check(&self) -> Result<bool, CoreError> {
        let response = Self::dispatch(self.request(Method::GET, "/properties"))
            .await
            .map_err(CoreError::StorageFailure)?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl Mailer for HttpHostPlatform {
    async fn send(&self, message: &EmailMessage) -> Result<(), CoreError> {
        let mut body = json!({ "to": message.to, "subject": message.subject });
        match &message.body {
            EmailBody::Text(text) => body["body"] = Value::String(text.clone()),
            EmailBody::Html(html) => body["htmlBody"] = Value::String(html.clone()),
        }

        let response = Self::dispatch(self.request(Method::POST, "/mail").json(&body))
            .await
            .map_err(CoreError::DeliveryFailure)?;
        ensure_success(response).await.map_err(CoreError::DeliveryFailure)?;

        debug!(recipient = %message.to, subject = %message.subject, "Sent mail");
        Ok(())
    }
}
