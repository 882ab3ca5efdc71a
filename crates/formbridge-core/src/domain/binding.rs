//! Trigger identifiers and the records bound to them

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque identifier the host assigns to an attached trigger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerId(pub String);

impl TriggerId {
    /// Create a trigger identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The record persisted under a trigger identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerBinding {
    /// Recurring bindings survive consumption; one-shot bindings do not
    pub recurring: bool,

    /// Arguments the handler needs when the trigger fires
    pub arguments: Value,
}

/// Arguments bound to a form's submission trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionTarget {
    /// Table store key
    pub key: String,

    /// Table the submissions are written to
    pub table_name: String,

    /// Address notified about each submission
    pub recipient: String,
}

impl SubmissionTarget {
    /// Create a submission target
    pub fn new(
        key: impl Into<String>,
        table_name: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            table_name: table_name.into(),
            recipient: recipient.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_binding_wire_format() {
        let target = SubmissionTarget::new("K", "people", "a@x");
        let binding = TriggerBinding {
            recurring: false,
            arguments: serde_json::to_value(&target).unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&binding).unwrap(),
            json!({
                "recurring": false,
                "arguments": {"key": "K", "tableName": "people", "recipient": "a@x"}
            })
        );
    }

    #[test]
    fn test_trigger_id_is_transparent() {
        let id: TriggerId = serde_json::from_value(json!("abc-123")).unwrap();
        assert_eq!(id, TriggerId::new("abc-123"));
        assert_eq!(id.to_string(), "abc-123");
    }
}
