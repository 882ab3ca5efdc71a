//! Test implementations (fakes) of the collaborator interfaces.
//!
//! Each fake is cheap to clone; clones share state so a test can keep a
//! handle for inspection after handing one to the services.

pub mod fake_table_store;
pub mod recording_form_host;
pub mod recording_mailer;

pub use fake_table_store::FakeTableStore;
pub use recording_form_host::{HostedForm, HostedTrigger, RecordingFormHost};
pub use recording_mailer::RecordingMailer;
