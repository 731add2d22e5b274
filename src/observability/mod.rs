//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing, initialized once by the application
//! - Metrics go through the `metrics` facade; exporters are the embedding
//!   application's concern
//! - Request IDs correlate client logs with backend traces

pub mod logging;
pub mod metrics;
