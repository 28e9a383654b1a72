use crate::domain::model::ContactSubmission;
use crate::domain::ports::Notifier;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Records a submission in the log and delivers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<()> {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            message = %submission.message,
            received_at = %submission.received_at,
            "Received a new contact form submission"
        );
        Ok(())
    }
}

/// Forwards each submission as JSON to an HTTP endpoint (a mail relay, chat hook, ...).
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<()> {
        tracing::debug!("Forwarding contact submission to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(submission)
            .send()
            .await
            .map_err(|e| SiteError::DeliveryError {
                message: format!("request to {} failed: {}", self.url, e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::DeliveryError {
                message: format!("{} responded with {}", self.url, status),
            });
        }

        tracing::info!(email = %submission.email, "Contact submission forwarded");
        Ok(())
    }
}

/// Picks the webhook notifier when a URL is configured, otherwise log-only.
pub fn notifier_for(webhook_url: Option<&str>, timeout: Duration) -> Result<Arc<dyn Notifier>> {
    match webhook_url {
        Some(url) => {
            tracing::info!("Contact submissions will be forwarded to {}", url);
            Ok(Arc::new(WebhookNotifier::new(url, timeout)?))
        }
        None => {
            tracing::info!("No delivery configured; contact submissions are only logged");
            Ok(Arc::new(LogNotifier))
        }
    }
}
