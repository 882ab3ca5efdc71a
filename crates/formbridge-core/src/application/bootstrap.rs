//! Operator bootstrap
//!
//! Installs the initialization form (Email, Key, Table Name) and turns its
//! submissions into provisioning runs. The init trigger is bound as
//! recurring so it keeps firing for every operator submission.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use super::provisioner::{FormProvisioner, ProvisionedForm};
use super::trigger_arguments::TriggerArgumentStore;
use crate::domain::form::{FormResponse, HandlerName, PublishedForm, SubmitEvent};
use crate::domain::platform::FormHost;
use crate::domain::schema::{FieldDescriptor, FieldKind};
use crate::CoreError;

/// Title of the initialization form
pub const INIT_FORM_TITLE: &str = "Dynamic Form Initialization";

/// Init form field holding the recipient address
pub const EMAIL_FIELD: &str = "Email";

/// Init form field holding the table store key
pub const KEY_FIELD: &str = "Key";

/// Init form field holding the table name
pub const TABLE_NAME_FIELD: &str = "Table Name";

/// Operator entry points
pub struct Bootstrap {
    host: Arc<dyn FormHost>,
    bindings: Arc<TriggerArgumentStore>,
    provisioner: Arc<FormProvisioner>,
}

impl Bootstrap {
    /// Create the bootstrap service
    pub fn new(
        host: Arc<dyn FormHost>,
        bindings: Arc<TriggerArgumentStore>,
        provisioner: Arc<FormProvisioner>,
    ) -> Self {
        Self {
            host,
            bindings,
            provisioner,
        }
    }

    /// Create the initialization form and attach its recurring trigger
    pub async fn install(&self) -> Result<PublishedForm, CoreError> {
        let form_id = self.host.create_form(INIT_FORM_TITLE).await?;
        for title in [EMAIL_FIELD, KEY_FIELD, TABLE_NAME_FIELD] {
            let field = FieldDescriptor::new(title, FieldKind::ShortText).required();
            self.host.add_field(&form_id, &field).await?;
        }

        let trigger_id = self
            .host
            .create_submit_trigger(&form_id, HandlerName::InitSubmit)
            .await?;
        self.bindings.bind(&trigger_id, &json!({}), true).await?;

        let url = self.host.published_url(&form_id).await?;
        info!(form_id = %form_id, trigger_id = %trigger_id, url = %url, "Installed initialization form");
        Ok(PublishedForm { id: form_id, url })
    }

    /// Provision a form directly, without going through the init form
    pub async fn init(
        &self,
        key: &str,
        table_name: &str,
        email: &str,
    ) -> Result<ProvisionedForm, CoreError> {
        self.provisioner.provision(key, table_name, email).await
    }

    /// Handle a submission of the initialization form
    pub async fn handle_init_submit(&self, event: &SubmitEvent) -> Result<ProvisionedForm, CoreError> {
        let _: Value = self.bindings.consume(&event.trigger_uid).await.map_err(|e| {
            warn!(trigger_id = %event.trigger_uid, error = %e, "Init submission without a usable binding");
            e
        })?;

        let email = required_answer(&event.response, EMAIL_FIELD)?;
        let key = required_answer(&event.response, KEY_FIELD)?;
        let table_name = required_answer(&event.response, TABLE_NAME_FIELD)?;

        self.provisioner.provision(&key, &table_name, &email).await
    }
}

fn required_answer(response: &FormResponse, title: &str) -> Result<String, CoreError> {
    response
        .answer(title)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|answer| !answer.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::SchemaError(format!("required field '{}' is missing", title)))
}
