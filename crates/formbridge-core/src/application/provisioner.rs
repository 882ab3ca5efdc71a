//! Form provisioning
//!
//! Reads a table's schema, synthesizes a form from it, attaches a one-shot
//! submit trigger bound to the table, and mails the form link to the
//! recipient.
//!
//! Nothing is persisted until the trigger binding is written. From that
//! point on the binding stays even if later steps fail; the operator can
//! rerun provisioning.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::form_mapper::map_columns;
use super::notifications::{form_ready_message, QrCodeService};
use super::trigger_arguments::TriggerArgumentStore;
use crate::domain::binding::{SubmissionTarget, TriggerId};
use crate::domain::form::{FormId, HandlerName};
use crate::domain::platform::{FormHost, Mailer, TableStore};
use crate::domain::schema::ColumnDescriptor;
use crate::domain::store::{StoreRequest, TableSchema};
use crate::CoreError;

/// Result of a successful provisioning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedForm {
    /// Form created on the host
    pub form_id: FormId,
    /// Submit trigger bound to the table
    pub trigger_id: TriggerId,
    /// Published URL of the form
    pub url: String,
    /// Whether the delivery mail went out
    pub delivered: bool,
}

/// Creates table-backed forms
pub struct FormProvisioner {
    store: Arc<dyn TableStore>,
    host: Arc<dyn FormHost>,
    mailer: Arc<dyn Mailer>,
    bindings: Arc<TriggerArgumentStore>,
    qr: QrCodeService,
}

impl FormProvisioner {
    /// Create a provisioner
    pub fn new(
        store: Arc<dyn TableStore>,
        host: Arc<dyn FormHost>,
        mailer: Arc<dyn Mailer>,
        bindings: Arc<TriggerArgumentStore>,
        qr: QrCodeService,
    ) -> Self {
        Self {
            store,
            host,
            mailer,
            bindings,
            qr,
        }
    }

    /// Provision a form for `table_name` and deliver it to `recipient`
    pub async fn provision(
        &self,
        key: &str,
        table_name: &str,
        recipient: &str,
    ) -> Result<ProvisionedForm, CoreError> {
        require("key", key)?;
        require("table name", table_name)?;
        require("recipient", recipient)?;

        info!(table = %table_name, recipient = %recipient, "Provisioning form");

        let columns = self.read_columns(key, table_name).await?;
        let fields = map_columns(&columns)?;

        let form_id = self.host.create_form(table_name).await?;
        for field in &fields {
            self.host.add_field(&form_id, field).await?;
        }
        debug!(form_id = %form_id, fields = fields.len(), "Created form");

        let trigger_id = self
            .host
            .create_submit_trigger(&form_id, HandlerName::Submit)
            .await?;

        let target = SubmissionTarget::new(key, table_name, recipient);
        if let Err(e) = self.bindings.bind(&trigger_id, &target, false).await {
            self.abandon_trigger(&form_id, &trigger_id).await;
            return Err(e);
        }

        let url = self.host.published_url(&form_id).await?;
        let message = form_ready_message(recipient, &url, &self.qr);
        let delivered = match self.mailer.send(&message).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    form_id = %form_id,
                    recipient = %recipient,
                    error = %e,
                    "Failed to deliver form link"
                );
                false
            }
        };

        info!(form_id = %form_id, trigger_id = %trigger_id, url = %url, "Provisioned form");
        Ok(ProvisionedForm {
            form_id,
            trigger_id,
            url,
            delivered,
        })
    }

    async fn read_columns(&self, key: &str, table_name: &str) -> Result<Vec<ColumnDescriptor>, CoreError> {
        let request = StoreRequest::read_table_schema(key, table_name);
        let reply = self
            .store
            .evaluate(&request)
            .await
            .map_err(CoreError::into_store_unavailable)?;

        let schema: TableSchema = serde_json::from_value(reply).map_err(|e| {
            CoreError::SchemaError(format!(
                "table store returned no usable column list for '{}': {}",
                table_name, e
            ))
        })?;
        Ok(schema.columns)
    }

    /// Remove a trigger whose binding could not be written
    async fn abandon_trigger(&self, form_id: &FormId, trigger_id: &TriggerId) {
        if let Err(e) = self.host.delete_trigger(trigger_id).await {
            warn!(trigger_id = %trigger_id, error = %e, "Failed to remove unbound trigger");
        }
        warn!(form_id = %form_id, "Form left without a submission handler");
    }
}

fn require(what: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::SchemaError(format!("{} is required", what)));
    }
    Ok(())
}
