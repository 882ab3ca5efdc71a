//! Testing utilities for FormBridge.
//!
//! Fakes for the remote collaborators (table store, form host, mail
//! channel), a builder that wires them into the application services, and
//! fixture data.

pub mod builders;
pub mod data_generators;
pub mod implementations;

/// Re-export commonly used types for convenience
pub use mockall;

pub use builders::TestBridge;
pub use implementations::{FakeTableStore, RecordingFormHost, RecordingMailer};
