use super::models::Config;
use reqwest::header::{HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("base_url '{url}' is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("base_url scheme '{scheme}' is not supported, expected 'http' or 'https'")]
    UnsupportedScheme { scheme: String },

    #[error("fixed header name '{0}' is not a valid HTTP header name")]
    InvalidHeaderName(String),

    #[error("fixed header '{0}' has a value that is not a valid HTTP header value")]
    InvalidHeaderValue(String),
}

/// Validate the entire configuration
///
/// Credentials are not checked: their format is owned by the archive.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_base_url(&config.api.base_url)?;
    validate_fixed_headers(config)?;
    Ok(())
}

fn validate_base_url(base_url: &str) -> Result<(), ValidationError> {
    let url = Url::parse(base_url).map_err(|e| ValidationError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ValidationError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

fn validate_fixed_headers(config: &Config) -> Result<(), ValidationError> {
    for (name, value) in &config.api.fixed_headers {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ValidationError::InvalidHeaderName(name.clone()))?;
        HeaderValue::from_str(value)
            .map_err(|_| ValidationError::InvalidHeaderValue(name.clone()))?;
    }
    Ok(())
}
