use crate::domain::model::{
    About, ContactInfo, PortfolioData, Profile, Project, SocialLinks, Theme,
};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Portfolio content as written in a TOML file. Omitted sections fall back to the built-in sample.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub site: Option<SiteConfig>,
    pub profile: Option<Profile>,
    pub about: Option<About>,
    pub projects: Option<Vec<Project>>,
    pub social_links: Option<SocialLinks>,
    pub contact: Option<ContactInfo>,
    pub delivery: Option<DeliveryConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    pub prefers_dark: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryConfig {
    pub webhook_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl DeliveryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_WEBHOOK_TIMEOUT_SECS))
    }
}

impl PortfolioConfig {
    /// Reads and parses a portfolio TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: Self = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// Replaces `${VAR_NAME}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The configured theme, or `None` when the page should follow the visitor's system setting.
    pub fn theme(&self) -> Option<Theme> {
        self.site
            .as_ref()
            .and_then(|s| s.prefers_dark)
            .map(Theme::from_prefers_dark)
    }

    pub fn portfolio_data(&self) -> PortfolioData {
        let defaults = PortfolioData::default();
        PortfolioData {
            profile: self.profile.clone().unwrap_or(defaults.profile),
            about: self.about.clone().unwrap_or(defaults.about),
            projects: self.projects.clone().unwrap_or(defaults.projects),
            social_links: self.social_links.clone().unwrap_or(defaults.social_links),
            contact: self.contact.clone().unwrap_or(defaults.contact),
        }
    }

    /// Loads, merges with defaults and validates in one step.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, PortfolioData)> {
        let config = Self::from_file(path)?;
        config.validate()?;
        let data = config.portfolio_data();
        data.validate()?;
        Ok((config, data))
    }
}

impl Validate for PortfolioConfig {
    fn validate(&self) -> Result<()> {
        if let Some(delivery) = &self.delivery {
            if let Some(url) = &delivery.webhook_url {
                validation::validate_url("delivery.webhook_url", url)?;
            }
            if let Some(timeout) = delivery.timeout_seconds {
                validation::validate_range("delivery.timeout_seconds", timeout, 1, 120)?;
            }
        }
        Ok(())
    }
}

impl Validate for PortfolioData {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("profile.name", &self.profile.name)?;
        validation::validate_non_empty_string("profile.title", &self.profile.title)?;
        validation::validate_url("profile.profile_pic_url", &self.profile.profile_pic_url)?;
        validation::validate_link("profile.resume_url", &self.profile.resume_url)?;

        validation::validate_unique_ids("projects.id", self.projects.iter().map(|p| p.id))?;
        for project in &self.projects {
            validation::validate_non_empty_string("projects.title", &project.title)?;
            validation::validate_url("projects.link", &project.link)?;
        }

        validation::validate_url("social_links.github", &self.social_links.github)?;
        validation::validate_url("social_links.linkedin", &self.social_links.linkedin)?;
        validation::validate_url("social_links.twitter", &self.social_links.twitter)?;

        validation::validate_email_shape("contact.email", &self.contact.email)?;

        tracing::debug!("Portfolio data validation passed");
        Ok(())
    }
}
