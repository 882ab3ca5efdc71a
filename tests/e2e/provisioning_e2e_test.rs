use async_trait::async_trait;
use formbridge_core::application::bootstrap::INIT_FORM_TITLE;
use formbridge_core::application::notifications::FORM_READY_SUBJECT;
use formbridge_core::{
    BridgeServices, Collaborators, CoreError, FieldKind, HandlerName, PropertyStore, QrCodeService, SubmissionTarget, TriggerBinding,
};
use formbridge_state_inmemory::InMemoryPropertyStore;
use formbridge_test_utils::data_generators::{
    init_submit_event, ALL_TYPES_COLUMNS, TEST_KEY, TEST_RECIPIENT,
};
use formbridge_test_utils::{FakeTableStore, RecordingFormHost, RecordingMailer, TestBridge};
use mockall::mock;
use serde_json::json;
use std::sync::Arc;

mock! {
    Properties {}

    #[async_trait]
    impl PropertyStore for Properties {
        async fn get_property(&self, key: &str) -> Result<Option<String>, CoreError>;
        async fn set_property(&self, key: &str, value: &str) -> Result<(), CoreError>;
        async fn delete_property(&self, key: &str) -> Result<(), CoreError>;
        async fn list_properties(&self) -> Result<Vec<String>, CoreError>;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("formbridge_core=debug")
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_provision_people_table() {
    init_tracing();
    let bridge = TestBridge::with_people_table();

    let provisioned = bridge
        .services
        .provisioner
        .provision(TEST_KEY, "people", TEST_RECIPIENT)
        .await
        .unwrap();

    let form = bridge.host.form(&provisioned.form_id).unwrap();
    assert_eq!(form.title, "people");
    let fields: Vec<(&str, FieldKind)> = form.fields.iter().map(|f| (f.title.as_str(), f.kind)).collect();
    assert_eq!(
        fields,
        vec![("name", FieldKind::LongText), ("age", FieldKind::ShortTextInteger)]
    );
    assert!(form.fields[1].validation.is_some());

    let triggers = bridge.host.triggers();
    let trigger = &triggers[&provisioned.trigger_id];
    assert_eq!(trigger.form, provisioned.form_id);
    assert_eq!(trigger.handler, HandlerName::Submit);

    let raw = bridge
        .properties
        .get_property(provisioned.trigger_id.as_str())
        .await
        .unwrap()
        .unwrap();
    let binding: TriggerBinding = serde_json::from_str(&raw).unwrap();
    assert!(!binding.recurring);
    assert_eq!(
        serde_json::from_value::<SubmissionTarget>(binding.arguments).unwrap(),
        SubmissionTarget::new(TEST_KEY, "people", TEST_RECIPIENT)
    );

    let sent = bridge.mailer.sent_to(TEST_RECIPIENT);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, FORM_READY_SUBJECT);
    assert!(sent[0].body.is_html());
    let body = sent[0].body.content();
    assert!(body.contains(&provisioned.url));
    assert!(body.contains(&QrCodeService::default().image_url(&provisioned.url)));
}

#[tokio::test]
async fn test_every_data_type_maps_to_a_field() {
    let bridge = TestBridge::builder()
        .with_store(FakeTableStore::new(TEST_KEY).with_table("everything", ALL_TYPES_COLUMNS))
        .build();

    let provisioned = bridge
        .services
        .provisioner
        .provision(TEST_KEY, "everything", TEST_RECIPIENT)
        .await
        .unwrap();

    let kinds: Vec<FieldKind> = bridge
        .host
        .form(&provisioned.form_id)
        .unwrap()
        .fields
        .iter()
        .map(|f| f.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            FieldKind::LongText,
            FieldKind::ShortTextInteger,
            FieldKind::ShortTextNumber,
            FieldKind::Checkbox,
            FieldKind::LongTextJson,
        ]
    );
}

#[tokio::test]
async fn test_boolean_only_table() {
    let bridge = TestBridge::builder()
        .with_store(FakeTableStore::new(TEST_KEY).with_table("flags", &[("id", "integer"), ("active", "boolean")]))
        .build();

    let provisioned = bridge
        .services
        .provisioner
        .provision(TEST_KEY, "flags", TEST_RECIPIENT)
        .await
        .unwrap();

    let form = bridge.host.form(&provisioned.form_id).unwrap();
    assert_eq!(form.fields.len(), 1);
    assert_eq!(form.fields[0].title, "active");
    assert_eq!(form.fields[0].kind, FieldKind::Checkbox);
}

#[tokio::test]
async fn test_unknown_data_type_leaves_no_trace() {
    let bridge = TestBridge::builder()
        .with_store(FakeTableStore::new(TEST_KEY).with_table("blobs", &[("name", "string"), ("data", "bytes")]))
        .build();

    let err = bridge
        .services
        .provisioner
        .provision(TEST_KEY, "blobs", TEST_RECIPIENT)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::SchemaError(_)));
    assert!(bridge.host.triggers().is_empty());
    assert_eq!(bridge.binding_count().await, 0);
    assert!(bridge.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_store_down_aborts_provisioning() {
    let bridge = TestBridge::with_people_table();
    bridge.store.set_unavailable(true);

    let err = bridge
        .services
        .provisioner
        .provision(TEST_KEY, "people", TEST_RECIPIENT)
        .await
        .unwrap_err();

    assert!(err.is_store_error());
    assert!(bridge.host.triggers().is_empty());
    assert_eq!(bridge.binding_count().await, 0);
}

#[tokio::test]
async fn test_failed_binding_removes_trigger() {
    let mut properties = MockProperties::new();
    properties
        .expect_set_property()
        .returning(|_, _| Err(CoreError::StorageFailure("quota exceeded".to_string())));

    let host = RecordingFormHost::new();
    let store = FakeTableStore::new(TEST_KEY).with_table("people", &[("name", "string")]);
    let services = BridgeServices::new(
        Collaborators {
            properties: Arc::new(properties),
            store: Arc::new(store),
            host: Arc::new(host.clone()),
            mailer: Arc::new(RecordingMailer::new()),
        },
        QrCodeService::default(),
    );

    let err = services
        .provisioner
        .provision(TEST_KEY, "people", TEST_RECIPIENT)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::StorageFailure(_)));
    assert!(host.triggers().is_empty());
    assert_eq!(host.deleted_triggers().len(), 1);
}

#[tokio::test]
async fn test_init_form_round_trip() {
    init_tracing();
    let bridge = TestBridge::with_people_table();

    let init = bridge.services.bootstrap.install().await.unwrap();
    let hosted = bridge.host.form(&init.id).unwrap();
    assert_eq!(hosted.title, INIT_FORM_TITLE);
    let titles: Vec<&str> = hosted.fields.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["Email", "Key", "Table Name"]);
    assert!(hosted.fields.iter().all(|f| f.required));

    let (init_trigger, hosted_trigger) = bridge
        .host
        .triggers()
        .into_iter()
        .find(|(_, t)| t.form == init.id)
        .unwrap();
    assert_eq!(hosted_trigger.handler, HandlerName::InitSubmit);

    // Every operator submission provisions a new form; the init trigger stays.
    for _ in 0..2 {
        let event = init_submit_event(&init_trigger, TEST_RECIPIENT, TEST_KEY, "people");
        let provisioned = bridge.services.bootstrap.handle_init_submit(&event).await.unwrap();
        assert!(provisioned.delivered);
    }

    assert!(bridge.host.triggers().contains_key(&init_trigger));
    assert_eq!(bridge.mailer.sent_to(TEST_RECIPIENT).len(), 2);
    assert_eq!(bridge.binding_count().await, 3);
}

#[tokio::test]
async fn test_operator_init_uses_shared_property_bag() {
    let properties = InMemoryPropertyStore::new();
    let bridge = TestBridge::builder()
        .with_store(FakeTableStore::new(TEST_KEY).with_table("people", &[("name", "string")]))
        .with_properties(properties.clone())
        .build();

    let provisioned = bridge
        .services
        .bootstrap
        .init(TEST_KEY, "people", TEST_RECIPIENT)
        .await
        .unwrap();

    let stored = properties
        .get_property(provisioned.trigger_id.as_str())
        .await
        .unwrap()
        .unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(
        stored,
        json!({
            "recurring": false,
            "arguments": {"key": TEST_KEY, "tableName": "people", "recipient": TEST_RECIPIENT}
        })
    );
}
