//! Hosted forms, their responses and the events the host fires

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::binding::TriggerId;

/// Opaque identifier of a form created on the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub String);

impl FormId {
    /// Create a form identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handlers the host can route a submit trigger to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlerName {
    /// Submissions of the initialization form
    InitSubmit,
    /// Submissions of a synthesized table form
    Submit,
}

impl HandlerName {
    /// Name used on the wire and in webhook paths
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerName::InitSubmit => "init-submit",
            HandlerName::Submit => "submit",
        }
    }
}

impl fmt::Display for HandlerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A form that exists on the host together with its public URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedForm {
    /// Form identifier
    pub id: FormId,
    /// Published URL
    pub url: String,
}

/// Answer to a single form item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Item title
    pub title: String,
    /// The answer as the host reports it
    pub response: Value,
}

impl ItemResponse {
    /// Create an item response
    pub fn new(title: impl Into<String>, response: impl Into<Value>) -> Self {
        Self {
            title: title.into(),
            response: response.into(),
        }
    }
}

/// A full form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    /// Answers in form order
    #[serde(default)]
    pub item_responses: Vec<ItemResponse>,
}

impl FormResponse {
    /// Create a response from item answers
    pub fn new(item_responses: Vec<ItemResponse>) -> Self {
        Self { item_responses }
    }

    /// Answer of the first item with exactly this title
    pub fn answer(&self, title: &str) -> Option<&Value> {
        self.item_responses
            .iter()
            .find(|item| item.title == title)
            .map(|item| &item.response)
    }

    /// Row object keyed by item title
    ///
    /// Item titles equal column names, so the result can be written back as
    /// a table entry. A repeated title keeps its last answer.
    pub fn to_row(&self) -> Map<String, Value> {
        self.item_responses
            .iter()
            .map(|item| (item.title.clone(), item.response.clone()))
            .collect()
    }
}

/// Event delivered by the host when a submit trigger fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEvent {
    /// Identifier of the trigger that fired
    pub trigger_uid: TriggerId,
    /// The submission
    #[serde(default)]
    pub response: FormResponse,
}

impl SubmitEvent {
    /// Create a submit event
    pub fn new(trigger_uid: TriggerId, response: FormResponse) -> Self {
        Self {
            trigger_uid,
            response,
        }
    }
}
