use formbridge_core::application::notifications::{SUBMISSION_ERROR_SUBJECT, SUBMISSION_SUCCESS_SUBJECT};
use formbridge_core::{CoreError, FormId, HandlerName, SubmissionOutcome, TriggerId};
use formbridge_test_utils::data_generators::{submit_event, TEST_KEY, TEST_RECIPIENT};
use formbridge_test_utils::TestBridge;
use serde_json::{json, Value};
use std::sync::Arc;

async fn provisioned_people() -> (TestBridge, TriggerId) {
    let bridge = TestBridge::with_people_table();
    let provisioned = bridge
        .services
        .provisioner
        .provision(TEST_KEY, "people", TEST_RECIPIENT)
        .await
        .unwrap();
    (bridge, provisioned.trigger_id)
}

#[tokio::test]
async fn test_submission_becomes_row() {
    let (bridge, trigger) = provisioned_people().await;

    let outcome = bridge
        .services
        .submissions
        .handle(&submit_event(&trigger, &[("name", "Ada"), ("age", "36")]))
        .await;

    assert!(matches!(outcome, SubmissionOutcome::Written { delivered: true, .. }));

    let rows = bridge.store.rows("people");
    assert_eq!(rows.len(), 1);
    assert_eq!(Value::Object(rows[0].clone()), json!({"name": "Ada", "age": "36"}));

    assert_eq!(bridge.binding_count().await, 0);
    assert!(!bridge.host.triggers().contains_key(&trigger));
    assert_eq!(bridge.host.deleted_triggers(), vec![trigger]);

    let confirmation = bridge
        .mailer
        .sent_to(TEST_RECIPIENT)
        .into_iter()
        .find(|m| m.subject == SUBMISSION_SUCCESS_SUBJECT)
        .unwrap();
    assert!(confirmation.body.content().contains("people"));
    assert!(confirmation.body.content().contains("\"name\": \"Ada\""));
}

#[tokio::test]
async fn test_duplicate_fire_writes_once() {
    let (bridge, trigger) = provisioned_people().await;
    let event = submit_event(&trigger, &[("name", "Ada"), ("age", "36")]);

    let first = bridge.services.submissions.handle(&event).await;
    let second = bridge.services.submissions.handle(&event).await;

    assert!(matches!(first, SubmissionOutcome::Written { .. }));
    assert_eq!(
        second,
        SubmissionOutcome::Dropped {
            reason: CoreError::MissingBinding(trigger.to_string())
        }
    );
    assert_eq!(bridge.store.rows("people").len(), 1);
}

#[tokio::test]
async fn test_concurrent_fires_write_once() {
    let (bridge, trigger) = provisioned_people().await;
    let submissions = bridge.services.submissions.clone();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let submissions = Arc::clone(&submissions);
            let event = submit_event(&trigger, &[("name", "Ada"), ("age", "36")]);
            tokio::spawn(async move { submissions.handle(&event).await })
        })
        .collect();

    let mut written = 0;
    for handle in handles {
        if let SubmissionOutcome::Written { .. } = handle.await.unwrap() {
            written += 1;
        }
    }

    assert_eq!(written, 1);
    assert_eq!(bridge.store.rows("people").len(), 1);
}

#[tokio::test]
async fn test_store_failure_sends_error_mail() {
    let (bridge, trigger) = provisioned_people().await;
    bridge.store.set_reject_writes(true);

    let outcome = bridge
        .services
        .submissions
        .handle(&submit_event(&trigger, &[("name", "Ada"), ("age", "36")]))
        .await;

    match outcome {
        SubmissionOutcome::Rejected { error, delivered, .. } => {
            assert!(error.is_store_error());
            assert!(delivered);
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }

    assert!(bridge.store.rows("people").is_empty());
    assert_eq!(bridge.binding_count().await, 0);

    let report = bridge
        .mailer
        .sent_to(TEST_RECIPIENT)
        .into_iter()
        .find(|m| m.subject == SUBMISSION_ERROR_SUBJECT)
        .unwrap();
    assert!(report.body.content().contains("people"));
    assert!(report.body.content().contains("write to people rejected"));
}

#[tokio::test]
async fn test_mail_failure_keeps_row() {
    let (bridge, trigger) = provisioned_people().await;
    bridge.mailer.set_fail(true);

    let outcome = bridge
        .services
        .submissions
        .handle(&submit_event(&trigger, &[("name", "Ada"), ("age", "36")]))
        .await;

    assert!(matches!(outcome, SubmissionOutcome::Written { delivered: false, .. }));
    assert_eq!(bridge.store.rows("people").len(), 1);
}

#[tokio::test]
async fn test_orphan_trigger_is_removed() {
    let bridge = TestBridge::with_people_table();
    let orphan = TriggerId::new("orphan-1");
    bridge
        .host
        .insert_trigger(orphan.clone(), FormId::new("lost-form"), HandlerName::Submit);

    let outcome = bridge
        .services
        .submissions
        .handle(&submit_event(&orphan, &[("name", "Ada")]))
        .await;

    assert!(matches!(outcome, SubmissionOutcome::Dropped { reason: CoreError::MissingBinding(_) }));
    assert!(bridge.host.triggers().is_empty());
    assert!(bridge.store.requests().is_empty());
    assert!(bridge.mailer.sent().is_empty());
}
