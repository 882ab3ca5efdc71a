//! Application services for FormBridge

pub mod bootstrap;
pub mod form_mapper;
pub mod notifications;
pub mod provisioner;
pub mod services;
pub mod submission_handler;
pub mod trigger_arguments;

#[cfg(test)]
pub(crate) mod test_support;
