//! Metrics collection.
//!
//! # Metrics
//! - `client_requests_total` (counter): settled requests by method, status
//! - `client_requests_suppressed_total` (counter): duplicates never sent
//! - `client_transport_errors_total` (counter): requests that never settled
//! - `client_session_expired_total` (counter): credential invalidations
//! - `client_request_duration_seconds` (histogram): dispatch-to-settle latency
//!
//! Recording goes through the `metrics` facade; installing an exporter is
//! the embedding application's choice. With no recorder installed these
//! calls are no-ops.

use std::time::Instant;

/// Record a settled request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!("client_requests_total", "method" => method.to_string(), "status" => status.to_string()).increment(1);
    metrics::histogram!("client_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a suppressed duplicate.
pub fn record_suppressed(method: &str) {
    metrics::counter!("client_requests_suppressed_total", "method" => method.to_string()).increment(1);
}

/// Record a request that failed before producing a response.
pub fn record_transport_error(method: &str) {
    metrics::counter!("client_transport_errors_total", "method" => method.to_string()).increment(1);
}

/// Record a session expiry.
pub fn record_session_expired() {
    metrics::counter!("client_session_expired_total").increment(1);
}
