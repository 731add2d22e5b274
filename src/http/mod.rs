//! HTTP dispatch layer.
//!
//! # Data Flow
//! ```text
//! feature code
//!     → client.rs ApiClient::request
//!         → dedup (may resolve locally as DuplicateSuppressed)
//!         → request.rs (bearer token + x-request-id)
//!         → wire
//!     ← response.rs (401 → SessionExpired, everything else unchanged)
//! ```
//!
//! # Design Decisions
//! - One error enum for the whole pipeline; callers match on it instead of
//!   inspecting strings
//! - No retries and no response-body interpretation here; feature code owns
//!   both

pub mod client;
pub mod request;
pub mod response;
pub mod types;

pub use client::ApiClient;
pub use request::{RequestId, X_REQUEST_ID};
pub use types::{ClientError, ClientResult};
