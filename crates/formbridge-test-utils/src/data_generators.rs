//! Fixture data for FormBridge tests.

use formbridge_core::{FormResponse, ItemResponse, SubmitEvent, TriggerId};

/// Table store key the fixtures use
pub const TEST_KEY: &str = "K";

/// Recipient the fixtures use
pub const TEST_RECIPIENT: &str = "a@x";

/// Columns of the `people` table
pub const PEOPLE_COLUMNS: &[(&str, &str)] = &[("id", "integer"), ("name", "string"), ("age", "integer")];

/// Columns covering every supported data type
pub const ALL_TYPES_COLUMNS: &[(&str, &str)] = &[
    ("id", "integer"),
    ("name", "string"),
    ("age", "integer"),
    ("score", "float"),
    ("active", "boolean"),
    ("meta", "json"),
];

/// Submit event built from `(title, answer)` pairs.
pub fn submit_event(trigger: &TriggerId, answers: &[(&str, &str)]) -> SubmitEvent {
    SubmitEvent::new(
        trigger.clone(),
        FormResponse::new(
            answers
                .iter()
                .map(|(title, answer)| ItemResponse::new(*title, *answer))
                .collect(),
        ),
    )
}

/// Submission of the init form.
pub fn init_submit_event(trigger: &TriggerId, email: &str, key: &str, table: &str) -> SubmitEvent {
    submit_event(trigger, &[("Email", email), ("Key", key), ("Table Name", table)])
}
