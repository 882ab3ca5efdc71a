//! TestBridge builder and handles for scenario tests.

use crate::data_generators::{PEOPLE_COLUMNS, TEST_KEY};
use crate::implementations::{FakeTableStore, RecordingFormHost, RecordingMailer};
use formbridge_core::{BridgeServices, Collaborators, QrCodeService};
use formbridge_state_inmemory::InMemoryPropertyStore;
use std::sync::Arc;

/// Application services running against in-memory fakes.
///
/// The fakes are kept alongside the services so a test can drive the
/// services and then inspect what reached each collaborator.
pub struct TestBridge {
    /// The wired services
    pub services: BridgeServices,
    /// Property bag holding the trigger bindings
    pub properties: InMemoryPropertyStore,
    /// Table store fake
    pub store: FakeTableStore,
    /// Form host fake
    pub host: RecordingFormHost,
    /// Mail channel fake
    pub mailer: RecordingMailer,
}

impl TestBridge {
    /// Starts a builder.
    pub fn builder() -> TestBridgeBuilder {
        TestBridgeBuilder::default()
    }

    /// Services over a store holding the `people` table.
    pub fn with_people_table() -> Self {
        Self::builder()
            .with_store(FakeTableStore::new(TEST_KEY).with_table("people", PEOPLE_COLUMNS))
            .build()
    }

    /// Number of stored trigger bindings.
    pub async fn binding_count(&self) -> usize {
        self.properties.len().await
    }
}

/// Builder for [`TestBridge`].
#[derive(Default)]
pub struct TestBridgeBuilder {
    store: Option<FakeTableStore>,
    properties: Option<InMemoryPropertyStore>,
}

impl TestBridgeBuilder {
    /// Uses the given table store.
    pub fn with_store(mut self, store: FakeTableStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses the given property bag.
    pub fn with_properties(mut self, properties: InMemoryPropertyStore) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Wires the services.
    pub fn build(self) -> TestBridge {
        let store = self.store.unwrap_or_else(|| FakeTableStore::new(TEST_KEY));
        let host = RecordingFormHost::default();
        let mailer = RecordingMailer::default();
        let properties = self.properties.unwrap_or_default();

        let services = BridgeServices::new(
            Collaborators {
                properties: Arc::new(properties.clone()),
                store: Arc::new(store.clone()),
                host: Arc::new(host.clone()),
                mailer: Arc::new(mailer.clone()),
            },
            QrCodeService::default(),
        );

        TestBridge {
            services,
            properties,
            store,
            host,
            mailer,
        }
    }
}
