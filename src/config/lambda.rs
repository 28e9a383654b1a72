use crate::core::contact::ContactEndpoint;
use crate::core::notify::notifier_for;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use std::env;
use std::time::Duration;

/// Function settings, read from the environment the platform provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub webhook_url: Option<String>,
    pub webhook_timeout_secs: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup("CONTACT_WEBHOOK_URL").filter(|v| !v.trim().is_empty());
        let webhook_timeout_secs = match lookup("CONTACT_WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SiteError::InvalidConfigValueError {
                    field: "CONTACT_WEBHOOK_TIMEOUT_SECS".to_string(),
                    value: raw.clone(),
                    reason: "Expected a whole number of seconds".to_string(),
                })?,
            None => 10,
        };

        Ok(Self {
            webhook_url,
            webhook_timeout_secs,
        })
    }

    pub fn contact_endpoint(&self) -> Result<ContactEndpoint> {
        let notifier = notifier_for(
            self.webhook_url.as_deref(),
            Duration::from_secs(self.webhook_timeout_secs),
        )?;
        Ok(ContactEndpoint::new(notifier))
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.webhook_url {
            validation::validate_url("CONTACT_WEBHOOK_URL", url)?;
        }
        validation::validate_range(
            "CONTACT_WEBHOOK_TIMEOUT_SECS",
            self.webhook_timeout_secs,
            1,
            120,
        )?;

        tracing::info!("✅ Function configuration validation passed");
        Ok(())
    }
}
