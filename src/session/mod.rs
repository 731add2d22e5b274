//! Session credential subsystem.
//!
//! # Data Flow
//! ```text
//! login (application)
//!     → store.rs set_token (memory + optional token file, arms expiry)
//! dispatch (http layer)
//!     → store.rs token (read-only)
//! 401 response
//!     → store.rs expire (clear memory + disk, publish Expired once)
//!     → events.rs broadcast → application subscribers decide navigation
//! logout (application)
//!     → store.rs clear (no event)
//! ```
//!
//! # Design Decisions
//! - The credential is owned here; no other component may mutate it
//! - Navigation is never performed by this crate; subscribers own it

pub mod events;
pub mod store;

pub use events::{SessionEvent, SessionEvents};
pub use store::SessionStore;
