//! Service wiring
//!
//! Builds the application services over one set of collaborators so the
//! provisioner, the submission handler and the bootstrap share a single
//! trigger-argument store.

use std::sync::Arc;

use super::bootstrap::Bootstrap;
use super::notifications::QrCodeService;
use super::provisioner::FormProvisioner;
use super::submission_handler::SubmissionHandler;
use super::trigger_arguments::TriggerArgumentStore;
use crate::domain::platform::{FormHost, Mailer, TableStore};
use crate::domain::property_store::PropertyStore;

/// The external collaborators FormBridge runs against
#[derive(Clone)]
pub struct Collaborators {
    /// Installation property bag
    pub properties: Arc<dyn PropertyStore>,
    /// Remote table store
    pub store: Arc<dyn TableStore>,
    /// Form host
    pub host: Arc<dyn FormHost>,
    /// Notification channel
    pub mailer: Arc<dyn Mailer>,
}

/// All application services, wired together
#[derive(Clone)]
pub struct BridgeServices {
    /// Trigger-argument store
    pub bindings: Arc<TriggerArgumentStore>,
    /// Form provisioner
    pub provisioner: Arc<FormProvisioner>,
    /// Submission handler
    pub submissions: Arc<SubmissionHandler>,
    /// Operator bootstrap
    pub bootstrap: Arc<Bootstrap>,
    properties: Arc<dyn PropertyStore>,
}

impl BridgeServices {
    /// Wire the services over `collaborators`
    pub fn new(collaborators: Collaborators, qr: QrCodeService) -> Self {
        let Collaborators {
            properties,
            store,
            host,
            mailer,
        } = collaborators;

        let bindings = Arc::new(TriggerArgumentStore::new(properties.clone(), host.clone()));
        let provisioner = Arc::new(FormProvisioner::new(
            store.clone(),
            host.clone(),
            mailer.clone(),
            bindings.clone(),
            qr,
        ));
        let submissions = Arc::new(SubmissionHandler::new(store, mailer, bindings.clone()));
        let bootstrap = Arc::new(Bootstrap::new(host, bindings.clone(), provisioner.clone()));

        Self {
            bindings,
            provisioner,
            submissions,
            bootstrap,
            properties,
        }
    }

    /// Whether the property bag is reachable
    pub async fn health_check(&self) -> bool {
        match self.properties.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!(error = %e, "Property store health check failed");
                false
            }
        }
    }
}
