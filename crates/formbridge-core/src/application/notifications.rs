//! Message composition for the notification channel

use serde_json::{Map, Value};

use crate::domain::message::EmailMessage;
use crate::CoreError;

/// Subject of the mail that delivers a new form
pub const FORM_READY_SUBJECT: &str = "Your Form is Ready!";

/// Subject of the mail sent after a row was written
pub const SUBMISSION_SUCCESS_SUBJECT: &str = "Form Submission Successful";

/// Subject of the mail sent when a row could not be written
pub const SUBMISSION_ERROR_SUBJECT: &str = "Form Submission Error";

/// Default QR rendering endpoint
pub const DEFAULT_QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Default QR image edge in pixels
pub const DEFAULT_QR_SIZE: u32 = 150;

/// External QR-code rendering service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeService {
    base_url: String,
    size: u32,
}

impl QrCodeService {
    /// Create a QR service reference
    pub fn new(base_url: impl Into<String>, size: u32) -> Self {
        Self {
            base_url: base_url.into(),
            size,
        }
    }

    /// Image edge in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Image URL that renders `data` as a QR code
    pub fn image_url(&self, data: &str) -> String {
        format!(
            "{}?size={size}x{size}&data={}",
            self.base_url,
            encode_uri_component(data),
            size = self.size
        )
    }
}

/// Percent-encode `value` leaving the URI mark characters `!'()*` intact
fn encode_uri_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

impl Default for QrCodeService {
    fn default() -> Self {
        Self::new(DEFAULT_QR_SERVICE_URL, DEFAULT_QR_SIZE)
    }
}

/// HTML mail carrying the form link and its QR code
pub fn form_ready_message(recipient: &str, form_url: &str, qr: &QrCodeService) -> EmailMessage {
    let qr_url = qr.image_url(form_url);
    let body = format!(
        r#"<html>
  <head>
    <style>
      body {{ font-family: Arial, sans-serif; }}
      .container {{ max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ccc; border-radius: 5px; }}
      .form-link {{ margin-bottom: 20px; }}
      .qr-code {{ text-align: center; }}
    </style>
  </head>
  <body>
    <div class="container">
      <h2>{subject}</h2>
      <p>Here is the link to your form:</p>
      <p class="form-link"><a href="{url}">{url}</a></p>
      <p>Scan the QR code below to access the form:</p>
      <div class="qr-code">
        <img src="{qr_url}" alt="QR Code" width="{size}" height="{size}">
      </div>
    </div>
  </body>
</html>
"#,
        subject = FORM_READY_SUBJECT,
        url = form_url,
        qr_url = qr_url,
        size = qr.size(),
    );

    EmailMessage::html(recipient, FORM_READY_SUBJECT, body)
}

/// Plain text mail confirming a written row
pub fn submission_success_message(
    recipient: &str,
    table_name: &str,
    row: &Map<String, Value>,
) -> EmailMessage {
    let pretty = format!("{:#}", Value::Object(row.clone()));
    let body = format!(
        "Thank you for your submission to {}. Here are your responses:\n\n{}\n\nYour submission was successful.",
        table_name, pretty
    );
    EmailMessage::text(recipient, SUBMISSION_SUCCESS_SUBJECT, body)
}

/// Plain text mail reporting a failed write
pub fn submission_error_message(recipient: &str, table_name: &str, error: &CoreError) -> EmailMessage {
    let body = format!(
        "There was an error processing your submission to {}.\n\nError Details:\n{}",
        table_name, error
    );
    EmailMessage::text(recipient, SUBMISSION_ERROR_SUBJECT, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_qr_url_encodes_form_url() {
        let qr = QrCodeService::default();
        let url = qr.image_url("https://forms.example/f/abc?x=1&y=2");

        assert_eq!(
            url,
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=https%3A%2F%2Fforms.example%2Ff%2Fabc%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_qr_url_keeps_mark_characters() {
        let url = QrCodeService::default().image_url("https://f.example/a(b)!*'~ c");

        assert!(url.ends_with("&data=https%3A%2F%2Ff.example%2Fa(b)!*'~%20c"));
    }

    #[test]
    fn test_form_ready_message() {
        let qr = QrCodeService::default();
        let message = form_ready_message("a@x", "https://forms.example/f/1", &qr);

        assert_eq!(message.to, "a@x");
        assert_eq!(message.subject, FORM_READY_SUBJECT);
        assert!(message.body.is_html());
        let body = message.body.content();
        assert!(body.contains("https://forms.example/f/1"));
        assert!(body.contains(&format!(r#"<img src="{}""#, qr.image_url("https://forms.example/f/1"))));
    }

    #[test]
    fn test_success_message_pretty_prints_row() {
        let mut row = Map::new();
        row.insert("name".to_string(), json!("Ada"));
        row.insert("age".to_string(), json!("36"));

        let message = submission_success_message("a@x", "people", &row);
        assert_eq!(message.subject, SUBMISSION_SUCCESS_SUBJECT);
        assert!(!message.body.is_html());
        let body = message.body.content();
        assert!(body.contains("people"));
        assert!(body.contains(&serde_json::to_string_pretty(&row).unwrap()));
    }

    #[test]
    fn test_error_message_carries_cause() {
        let message = submission_error_message(
            "a@x",
            "people",
            &CoreError::StoreUnavailable("boom".to_string()),
        );
        assert_eq!(message.subject, SUBMISSION_ERROR_SUBJECT);
        assert!(message.body.content().contains("boom"));
    }
}
