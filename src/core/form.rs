use crate::domain::model::{FormField, FormState, SubmissionStatus};
use crate::utils::error::Result;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// View state behind the contact form: field values, last outcome, and whether a request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    state: FormState,
    status: SubmissionStatus,
    is_loading: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: FormState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn handle_change(&mut self, field: FormField, value: impl Into<String>) {
        self.state.set(field, value);
    }

    /// Marks a submission as in flight and returns the payload to send.
    /// Returns `None` if one is already outstanding.
    pub fn begin_submit(&mut self) -> Option<FormState> {
        if self.is_loading {
            return None;
        }
        self.is_loading = true;
        self.status = SubmissionStatus::Idle;
        Some(self.state.clone())
    }

    pub fn finish_submit(&mut self, ok: bool) {
        self.is_loading = false;
        if ok {
            self.status = SubmissionStatus::Success;
            self.state.clear();
        } else {
            self.status = SubmissionStatus::Error;
        }
    }

    /// Runs one complete submission against `client`. Every failure ends in
    /// [`SubmissionStatus::Error`]; the reason is only logged.
    pub async fn submit_with(&mut self, client: &ContactClient) -> SubmissionStatus {
        let Some(payload) = self.begin_submit() else {
            return self.status;
        };

        match client.submit(&payload).await {
            Ok(outcome) if outcome.ok => self.finish_submit(true),
            Ok(outcome) => {
                tracing::error!("Submission error: {}", outcome.message);
                self.finish_submit(false);
            }
            Err(e) => {
                tracing::error!("Network or fetch error: {}", e);
                self.finish_submit(false);
            }
        }

        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub ok: bool,
    pub status: u16,
    pub message: String,
}

/// Posts form state to the contact endpoint.
#[derive(Debug, Clone)]
pub struct ContactClient {
    client: Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn submit(&self, form: &FormState) -> Result<SubmitOutcome> {
        tracing::debug!("Posting contact form to {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(form).send().await?;
        let status = response.status();

        // A reply that is not JSON is treated like a transport failure.
        let body: Value = response.json().await?;
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(SubmitOutcome {
            ok: status.is_success(),
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_submit_debounces_duplicates() {
        let mut form = ContactForm::with_state(FormState::new("Ann", "a@b.com", "Hi"));
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.name, "Ann");
        assert!(form.is_loading());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_finish_submit_success_clears_fields() {
        let mut form = ContactForm::with_state(FormState::new("Ann", "a@b.com", "Hi"));
        form.begin_submit();
        form.finish_submit(true);
        assert_eq!(form.status(), SubmissionStatus::Success);
        assert_eq!(form.state(), &FormState::default());
        assert!(!form.is_loading());
    }

    #[test]
    fn test_finish_submit_error_keeps_fields() {
        let mut form = ContactForm::new();
        form.handle_change(FormField::Name, "Ann");
        form.begin_submit();
        form.finish_submit(false);
        assert_eq!(form.status(), SubmissionStatus::Error);
        assert_eq!(form.state().name, "Ann");
    }

    #[test]
    fn test_begin_submit_resets_previous_status() {
        let mut form = ContactForm::new();
        form.begin_submit();
        form.finish_submit(false);
        form.begin_submit();
        assert_eq!(form.status(), SubmissionStatus::Idle);
    }
}
