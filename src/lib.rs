//! HTTP client layer for the campus portal backend.

pub mod config;
pub mod dedup;
pub mod http;
pub mod observability;
pub mod session;

pub use config::schema::ClientConfig;
pub use http::{ApiClient, ClientError, ClientResult};
pub use session::{SessionEvent, SessionStore};
