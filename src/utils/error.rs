use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Message delivery failed: {message}")]
    DeliveryError { message: String },
}

impl SiteError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::IoError(e) => format!("Could not read or write a file: {}", e),
            SiteError::HttpError(e) if e.is_timeout() => "The request timed out".to_string(),
            SiteError::HttpError(_) => "Could not reach the server".to_string(),
            SiteError::TomlError(_) => "The portfolio configuration file is not valid TOML".to_string(),
            SiteError::ConfigError { message } => message.clone(),
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            SiteError::DeliveryError { .. } => "The message could not be delivered".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SiteError::IoError(_) => "Check that the path exists and is writable",
            SiteError::HttpError(_) => "Check the endpoint URL and that the server is running",
            SiteError::TomlError(_) => "Fix the syntax error reported in the configuration file",
            SiteError::ConfigError { .. } | SiteError::InvalidConfigValueError { .. } => {
                "Review the configuration values and try again"
            }
            SiteError::DeliveryError { .. } => "Check the webhook URL and the receiving service",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
