//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL parses and uses a supported scheme
//! - Validate value ranges (timeouts > 0, grace window sane)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::ClientConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The base URL does not parse.
    InvalidBaseUrl { url: String, reason: String },
    /// The base URL uses a scheme other than http/https.
    UnsupportedScheme { scheme: String },
    /// A timeout field is zero.
    ZeroTimeout { field: &'static str },
    /// Dedup is enabled but the grace window is zero.
    ZeroGraceWindow,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBaseUrl { url, reason } => {
                write!(f, "base URL '{}' is invalid: {}", url, reason)
            }
            ValidationError::UnsupportedScheme { scheme } => {
                write!(f, "base URL scheme '{}' is not supported (use http or https)", scheme)
            }
            ValidationError::ZeroTimeout { field } => {
                write!(f, "{} must be greater than zero", field)
            }
            ValidationError::ZeroGraceWindow => {
                write!(f, "dedup.grace_window_ms must be greater than zero when dedup is enabled")
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.api.base_url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                errors.push(ValidationError::UnsupportedScheme {
                    scheme: scheme.to_string(),
                });
            }
        }
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            url: config.api.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.api.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "api.request_timeout_secs",
        });
    }
    if config.api.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "api.connect_timeout_secs",
        });
    }
    if config.dedup.enabled && config.dedup.grace_window_ms == 0 {
        errors.push(ValidationError::ZeroGraceWindow);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
