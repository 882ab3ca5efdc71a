//! Email messages sent through the notification channel

use serde::{Deserialize, Serialize};

/// Message body; the provisioning mail is HTML, submission results are plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmailBody {
    /// Plain text body
    Text(String),
    /// HTML body
    Html(String),
}

impl EmailBody {
    /// The raw body content
    pub fn content(&self) -> &str {
        match self {
            EmailBody::Text(body) | EmailBody::Html(body) => body,
        }
    }

    /// Whether the body is HTML
    pub fn is_html(&self) -> bool {
        matches!(self, EmailBody::Html(_))
    }
}

/// A single outgoing email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Body
    pub body: EmailBody,
}

impl EmailMessage {
    /// Create a plain text message
    pub fn text(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: EmailBody::Text(body.into()),
        }
    }

    /// Create an HTML message
    pub fn html(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: EmailBody::Html(body.into()),
        }
    }
}
