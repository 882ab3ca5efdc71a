//! In-memory state for FormBridge
//!
//! Provides a process-local property bag. Useful for development, tests and
//! single-process deployments where bindings do not need to outlive a
//! restart.

pub mod properties;
pub use properties::InMemoryPropertyStore;
