use crate::utils::error::{Result, SiteError};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SiteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Like [`validate_url`] but also accepts in-page anchors such as `#` or `#projects`.
pub fn validate_link(field_name: &str, link: &str) -> Result<()> {
    if link.starts_with('#') {
        return Ok(());
    }
    validate_url(field_name, link)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_email_shape(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Email address must look like name@domain".to_string(),
        }),
    }
}

pub fn validate_unique_ids<T>(field_name: &str, ids: impl IntoIterator<Item = T>) -> Result<()>
where
    T: Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        let rendered = id.to_string();
        if !seen.insert(id) {
            return Err(SiteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: rendered,
                reason: "Duplicate identifier".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
