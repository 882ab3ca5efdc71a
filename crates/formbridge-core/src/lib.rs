//!
//! FormBridge Core - table to form to row
//!
//! Reads a table's schema from a remote table store, synthesizes a hosted
//! form from it, and writes each submission back to the table as a new row.
//! Host triggers carry no state of their own, so the arguments a submit
//! handler needs are bound to the trigger identifier in the installation's
//! property bag.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - value types and collaborator interfaces
pub mod domain;

/// Application services - provisioning, submission handling, bindings
pub mod application;

/// Error types
pub mod error;

pub use error::CoreError;

pub use application::bootstrap::Bootstrap;
pub use application::form_mapper::{map_column, map_columns};
pub use application::notifications::QrCodeService;
pub use application::provisioner::{FormProvisioner, ProvisionedForm};
pub use application::services::{BridgeServices, Collaborators};
pub use application::submission_handler::{SubmissionHandler, SubmissionOutcome};
pub use application::trigger_arguments::TriggerArgumentStore;

pub use domain::binding::{SubmissionTarget, TriggerBinding, TriggerId};
pub use domain::form::{FormId, FormResponse, HandlerName, ItemResponse, PublishedForm, SubmitEvent};
pub use domain::message::{EmailBody, EmailMessage};
pub use domain::platform::{FormHost, Mailer, TableStore};
pub use domain::property_store::PropertyStore;
pub use domain::schema::{ColumnDescriptor, DataType, FieldDescriptor, FieldKind};
pub use domain::store::{StoreRequest, TableSchema};
