//! Builders that wire fakes into the application services.

pub mod test_bridge;

pub use test_bridge::{TestBridge, TestBridgeBuilder};
