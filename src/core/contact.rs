//! The contact-form endpoint.
//!
//! Every invocation is independent: the handler holds no mutable state, so a
//! single [`ContactEndpoint`] can be shared across concurrent requests.

use crate::core::notify::LogNotifier;
use crate::domain::model::ContactSubmission;
use crate::domain::ports::Notifier;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

pub const CONTACT_FORM_PATH: &str = "/.netlify/functions/contact-form";

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill out all fields.";
pub const FAILURE_MESSAGE: &str = "Failed to send message.";

const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "message"];

/// The subset of a serverless HTTP event the endpoint looks at.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

impl FunctionResponse {
    pub fn json_message(status_code: u16, message: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        // A struct of one &str field always serializes.
        let body = serde_json::to_string(&MessageBody { message })
            .unwrap_or_else(|_| format!("{{\"message\":{:?}}}", message));

        Self {
            status_code,
            headers,
            body,
        }
    }

    /// The `message` field of the JSON body, if it has one.
    pub fn message(&self) -> Option<String> {
        serde_json::from_str::<Value>(&self.body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_string)
    }
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("method {method} is not allowed")]
    MethodNotAllowed { method: String },

    #[error("one or more required fields are missing")]
    MissingFields,

    #[error("failed to process submission: {reason}")]
    Processing { reason: String },
}

impl ContactError {
    pub fn status_code(&self) -> u16 {
        match self {
            ContactError::MethodNotAllowed { .. } => 405,
            ContactError::MissingFields => 400,
            ContactError::Processing { .. } => 500,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            ContactError::MethodNotAllowed { .. } => METHOD_NOT_ALLOWED_MESSAGE,
            ContactError::MissingFields => MISSING_FIELDS_MESSAGE,
            ContactError::Processing { .. } => FAILURE_MESSAGE,
        }
    }
}

#[derive(Clone)]
pub struct ContactEndpoint {
    notifier: Arc<dyn Notifier>,
}

impl Default for ContactEndpoint {
    fn default() -> Self {
        Self::new(Arc::new(LogNotifier))
    }
}

impl ContactEndpoint {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub async fn handle_request(&self, request: &FunctionRequest) -> FunctionResponse {
        self.handle(&request.http_method, request.body.as_deref()).await
    }

    pub async fn handle(&self, method: &str, body: Option<&str>) -> FunctionResponse {
        match self.process(method, body).await {
            Ok(()) => FunctionResponse::json_message(200, SUCCESS_MESSAGE),
            Err(err) => {
                match &err {
                    ContactError::Processing { .. } => {
                        tracing::error!("Error processing form submission: {}", err)
                    }
                    _ => tracing::warn!("Rejected contact form request: {}", err),
                }
                FunctionResponse::json_message(err.status_code(), err.public_message())
            }
        }
    }

    async fn process(&self, method: &str, body: Option<&str>) -> Result<(), ContactError> {
        if method != "POST" {
            return Err(ContactError::MethodNotAllowed {
                method: method.to_string(),
            });
        }

        // An absent body parses as JSON null, which then fails like any other unusable payload.
        let submission = parse_submission(body.unwrap_or("null"))?;

        self.notifier
            .deliver(&submission)
            .await
            .map_err(|e| ContactError::Processing {
                reason: e.to_string(),
            })?;

        tracing::debug!("Contact form submission from {} accepted", submission.email);
        Ok(())
    }
}

/// Parses a raw request body and checks the three required fields.
///
/// Parsing is strict JSON: numbers beyond `f64` range and lone UTF-16 surrogate
/// escapes are rejected as unprocessable rather than coerced.
pub fn parse_submission(raw: &str) -> Result<ContactSubmission, ContactError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ContactError::Processing {
        reason: format!("invalid JSON body: {}", e),
    })?;

    let fields = match &value {
        Value::Null => {
            return Err(ContactError::Processing {
                reason: "request body is null".to_string(),
            })
        }
        Value::Object(fields) => fields,
        _ => return Err(ContactError::MissingFields),
    };

    let mut values = REQUIRED_FIELDS.iter().map(|key| {
        fields
            .get(*key)
            .filter(|v| is_truthy(v))
            .map(field_text)
    });

    match (values.next().flatten(), values.next().flatten(), values.next().flatten()) {
        (Some(name), Some(email), Some(message)) => Ok(ContactSubmission {
            name,
            email,
            message,
            received_at: Utc::now(),
        }),
        _ => Err(ContactError::MissingFields),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!(7)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_parse_submission_accepts_complete_body() {
        let submission =
            parse_submission(r#"{"name":"Ann","email":"a@b.com","message":"Hi"}"#).unwrap();
        assert_eq!(submission.name, "Ann");
        assert_eq!(submission.email, "a@b.com");
        assert_eq!(submission.message, "Hi");
    }

    #[test]
    fn test_parse_submission_keeps_non_string_values_as_json_text() {
        let submission = parse_submission(r#"{"name":42,"email":"a@b.com","message":true}"#).unwrap();
        assert_eq!(submission.name, "42");
        assert_eq!(submission.message, "true");
    }

    #[test]
    fn test_parse_submission_error_kinds() {
        assert!(matches!(
            parse_submission(r#"{"email":"a@b.com","message":"Hi"}"#),
            Err(ContactError::MissingFields)
        ));
        assert!(matches!(parse_submission("[]"), Err(ContactError::MissingFields)));
        assert!(matches!(parse_submission("\"hi\""), Err(ContactError::MissingFields)));
        assert!(matches!(
            parse_submission("null"),
            Err(ContactError::Processing { .. })
        ));
        assert!(matches!(
            parse_submission("name=Ann"),
            Err(ContactError::Processing { .. })
        ));
        assert!(matches!(parse_submission(""), Err(ContactError::Processing { .. })));
    }

    #[test]
    fn test_parse_submission_rejects_unrepresentable_values() {
        assert!(matches!(
            parse_submission(r#"{"name":1e400,"email":"a@b.com","message":"Hi"}"#),
            Err(ContactError::Processing { .. })
        ));
        assert!(matches!(
            parse_submission(r#"{"name":"\ud800","email":"a@b.com","message":"Hi"}"#),
            Err(ContactError::Processing { .. })
        ));
    }

    #[test]
    fn test_error_mapping() {
        let not_allowed = ContactError::MethodNotAllowed {
            method: "GET".to_string(),
        };
        assert_eq!(not_allowed.status_code(), 405);
        assert_eq!(not_allowed.public_message(), "Method Not Allowed");
        assert_eq!(ContactError::MissingFields.status_code(), 400);
        let failed = ContactError::Processing {
            reason: "boom".to_string(),
        };
        assert_eq!(failed.status_code(), 500);
        assert_eq!(failed.public_message(), "Failed to send message.");
    }

    #[test]
    fn test_json_message_response_shape() {
        let response = FunctionResponse::json_message(400, MISSING_FIELDS_MESSAGE);
        assert_eq!(response.body, r#"{"message":"Please fill out all fields."}"#);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(response.message().as_deref(), Some(MISSING_FIELDS_MESSAGE));
    }

    #[test]
    fn test_function_request_from_event_json() {
        let request: FunctionRequest =
            serde_json::from_str(r#"{"httpMethod":"GET","path":"/x"}"#).unwrap();
        assert_eq!(request.http_method, "GET");
        assert!(request.body.is_none());
    }
}
