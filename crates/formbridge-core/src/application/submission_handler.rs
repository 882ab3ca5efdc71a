//! Submission handling
//!
//! Fired by the host when a synthesized form is submitted. The handler
//! recovers the table binding for the trigger, writes the submission as a
//! new row and tells the recipient how it went. It never fails outward:
//! every failure ends up in the log, in an error mail, or both.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::notifications::{submission_error_message, submission_success_message};
use super::trigger_arguments::TriggerArgumentStore;
use crate::domain::binding::SubmissionTarget;
use crate::domain::form::SubmitEvent;
use crate::domain::message::EmailMessage;
use crate::domain::platform::{Mailer, TableStore};
use crate::domain::store::StoreRequest;
use crate::CoreError;

/// What became of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The row was written
    Written {
        /// Row passed to the table store
        row: Map<String, Value>,
        /// Whether the confirmation mail went out
        delivered: bool,
    },
    /// The table store refused the row
    Rejected {
        /// Row passed to the table store
        row: Map<String, Value>,
        /// Store error
        error: CoreError,
        /// Whether the error mail went out
        delivered: bool,
    },
    /// No binding could be recovered; nothing was written or sent
    Dropped {
        /// Why the binding could not be recovered
        reason: CoreError,
    },
}

/// Writes form submissions back to their table
pub struct SubmissionHandler {
    store: Arc<dyn TableStore>,
    mailer: Arc<dyn Mailer>,
    bindings: Arc<TriggerArgumentStore>,
}

impl SubmissionHandler {
    /// Create a submission handler
    pub fn new(
        store: Arc<dyn TableStore>,
        mailer: Arc<dyn Mailer>,
        bindings: Arc<TriggerArgumentStore>,
    ) -> Self {
        Self {
            store,
            mailer,
            bindings,
        }
    }

    /// Handle one submit event
    pub async fn handle(&self, event: &SubmitEvent) -> SubmissionOutcome {
        let trigger = &event.trigger_uid;

        let target: SubmissionTarget = match self.bindings.consume(trigger).await {
            Ok(target) => target,
            Err(reason @ CoreError::MissingBinding(_)) => {
                warn!(trigger_id = %trigger, "Submission for unbound trigger dropped");
                if let Err(e) = self.bindings.discard_orphan_trigger(trigger).await {
                    warn!(trigger_id = %trigger, error = %e, "Failed to remove orphan trigger");
                }
                return SubmissionOutcome::Dropped { reason };
            }
            Err(reason) => {
                error!(trigger_id = %trigger, error = %reason, "Failed to recover trigger binding");
                return SubmissionOutcome::Dropped { reason };
            }
        };

        let row = event.response.to_row();
        let request = StoreRequest::create_entry(&target.key, &target.table_name, row.clone());

        match self.store.evaluate(&request).await {
            Ok(_) => {
                info!(table = %target.table_name, columns = row.len(), "Wrote submission row");
                let message = submission_success_message(&target.recipient, &target.table_name, &row);
                let delivered = self.deliver(&message).await;
                SubmissionOutcome::Written { row, delivered }
            }
            Err(e) => {
                let error = e.into_store_unavailable();
                error!(table = %target.table_name, error = %error, "Failed to write submission row");
                let message = submission_error_message(&target.recipient, &target.table_name, &error);
                let delivered = self.deliver(&message).await;
                SubmissionOutcome::Rejected {
                    row,
                    error,
                    delivered,
                }
            }
        }
    }

    async fn deliver(&self, message: &EmailMessage) -> bool {
        match self.mailer.send(message).await {
            Ok(()) => true,
            Err(e) => {
                error!(recipient = %message.to, subject = %message.subject, error = %e, "Failed to deliver notification");
                false
            }
        }
    }
}
