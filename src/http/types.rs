//! Client-facing types and error definitions.

use thiserror::Error;

/// Errors surfaced by the dispatch pipeline.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An identical request is already in flight; this one was never sent.
    ///
    /// Synthetic and local: no network call happened. Callers may ignore it
    /// or await the outstanding request's result through other means.
    #[error("duplicate request suppressed: {fingerprint}")]
    DuplicateSuppressed {
        /// Fingerprint shared with the request that is still outstanding.
        fingerprint: String,
    },

    /// The backend rejected the credential (HTTP 401).
    ///
    /// The stored credential has already been cleared and the expiry event
    /// published by the time this error is returned.
    #[error("session expired: credential cleared")]
    SessionExpired,

    /// Network or protocol failure from the underlying transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The request path could not be joined onto the base URL.
    #[error("invalid request path '{0}'")]
    InvalidPath(String),

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    BodyEncoding(#[from] serde_json::Error),
}

impl ClientError {
    /// True for the deduplicator's own suppression signal.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, ClientError::DuplicateSuppressed { .. })
    }

    /// True when the error means the caller must re-authenticate.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::DuplicateSuppressed {
            fingerprint: "POST /api/contact {}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate request suppressed: POST /api/contact {}"
        );

        let err = ClientError::InvalidBaseUrl("not a url".to_string());
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_error_classification() {
        let suppressed = ClientError::DuplicateSuppressed {
            fingerprint: "GET /api/grades ".to_string(),
        };
        assert!(suppressed.is_suppressed());
        assert!(!suppressed.is_session_expired());

        let expired = ClientError::SessionExpired;
        assert!(expired.is_session_expired());
        assert!(!expired.is_suppressed());
    }
}
