//! Response-phase normalization.
//!
//! # Responsibilities
//! - Distinguish authentication failures from everything else
//! - Drive session invalidation on 401
//! - Hand every other response back to the caller unchanged
//!
//! # Design Decisions
//! - Non-401 statuses, success or not, are not errors at this layer; the
//!   calling feature code owns user-visible handling
//! - This layer never retries

use reqwest::{Method, Response, StatusCode};
use std::time::Instant;

use crate::http::request::RequestId;
use crate::http::types::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::session::store::SessionStore;

/// True when the status means the credential is no longer accepted.
pub(crate) fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED
}

/// Normalize a settled response.
///
/// A 401 clears the session (memory and token file), publishes the expiry
/// event, and surfaces as [`ClientError::SessionExpired`]. Any other status
/// is returned unchanged for local handling.
pub(crate) fn normalize(
    response: Response,
    session: &SessionStore,
    method: &Method,
    request_id: RequestId,
    start: Instant,
) -> ClientResult<Response> {
    let status = response.status();
    metrics::record_request(method.as_str(), status.as_u16(), start);

    if is_auth_failure(status) {
        tracing::warn!(
            request_id = %request_id,
            status = %status,
            "Authentication failure, invalidating session"
        );
        session.expire();
        return Err(ClientError::SessionExpired);
    }

    tracing::debug!(request_id = %request_id, status = %status, "Request settled");
    Ok(response)
}
