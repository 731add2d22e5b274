//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → ApiClient::new
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so a minimal config is valid
//! - Validation separates syntactic (serde) from semantic checks
//! - Config is immutable once the client is built

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ClientConfig;
pub use schema::{ApiConfig, DedupConfig, ObservabilityConfig, SessionConfig};
