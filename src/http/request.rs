//! Outgoing request assembly.
//!
//! # Responsibilities
//! - Generate a unique per-request ID for tracing
//! - Attach the Authorization header when a credential is present
//!
//! # Design Decisions
//! - Absence of a credential is a valid state; the request proceeds
//!   unauthenticated rather than failing
//! - The request ID is attached to every dispatch, authenticated or not

use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use std::fmt;
use uuid::Uuid;

use crate::session::store::SessionStore;

/// Header carrying the per-request trace ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Unique identifier attached to every outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new unique request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attach tracing and auth headers to an outgoing request.
///
/// Returns the generated request ID so the dispatch path can log it.
pub(crate) fn attach_headers(
    builder: RequestBuilder,
    session: &SessionStore,
) -> (RequestBuilder, RequestId) {
    let request_id = RequestId::new();
    let mut builder = builder.header(X_REQUEST_ID, request_id.to_string());

    if let Some(token) = session.token() {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    (builder, request_id)
}
