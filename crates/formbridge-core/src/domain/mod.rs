//! Domain module for FormBridge
//!
//! Value types and the collaborator interfaces.

pub mod binding;
pub mod form;
pub mod message;
pub mod platform;
pub mod property_store;
pub mod schema;
pub mod store;
