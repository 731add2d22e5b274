//! Duplicate request suppression subsystem.
//!
//! # Data Flow
//! ```text
//! outgoing request
//!     → fingerprint.rs (derive method + path + body key)
//!     → registry.rs (atomic check-then-insert)
//!         occupied → suppress (resolved locally, never transmitted)
//!         vacant   → transmit, holding an in-flight guard
//! settlement or grace-window expiry
//!     → registry.rs (free the fingerprint, first wins)
//! ```
//!
//! # Design Decisions
//! - At most one in-flight marker per fingerprint at any instant
//! - A suppressed duplicate resolves immediately, without touching the network
//! - The grace window bounds how long a missed cleanup can block a fingerprint

pub mod fingerprint;
pub mod registry;

pub use fingerprint::{applies_to, Fingerprint};
pub use registry::{InFlightGuard, InFlightRegistry};
