//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, status codes in range)
//! - Check configured endpoint URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SelectConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::SelectConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("probe.success_statuses must not be empty")]
    NoSuccessStatuses,

    #[error("{0} is not a valid HTTP status code")]
    InvalidStatus(u16),

    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

pub fn validate_config(config: &SelectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.race.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("race.timeout_ms"));
    }
    if config.probe.connect_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("probe.connect_timeout_ms"));
    }
    if config.probe.request_timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout("probe.request_timeout_ms"));
    }

    if config.probe.success_statuses.is_empty() {
        errors.push(ValidationError::NoSuccessStatuses);
    }
    for &status in &config.probe.success_statuses {
        if !(100..=599).contains(&status) {
            errors.push(ValidationError::InvalidStatus(status));
        }
    }

    for url in &config.endpoints.urls {
        if let Err(e) = validate_endpoint(url) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that `url` is an absolute http(s) URL.
pub fn validate_endpoint(url: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidEndpoint {
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
