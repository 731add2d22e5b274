//! Session credential storage.
//!
//! # Responsibilities
//! - Hold the current bearer token (lock-free reads on the dispatch path)
//! - Persist the token to an optional token file; remove it on invalidation
//! - Publish [`SessionEvent::Expired`] exactly once per session epoch
//!
//! # Design Decisions
//! - The dispatch path only reads; login, logout, and 401 handling are the
//!   only writers
//! - Expiry is latched: the first 401 after a login wins, concurrent 401s
//!   and 401s with no live credential publish nothing
//! - The token value itself is never logged

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::observability::metrics;
use crate::session::events::{SessionEvent, SessionEvents};

/// On-disk shape of a persisted session.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Owns the session credential for one client instance.
pub struct SessionStore {
    /// Current bearer token, if any.
    token: ArcSwapOption<String>,
    /// Armed while a credential is live; the first expiry after arming wins.
    armed: AtomicBool,
    /// Optional token file written on login and removed on invalidation.
    token_file: Option<PathBuf>,
    /// Expiry notification hub.
    events: SessionEvents,
}

impl SessionStore {
    /// Create an in-memory store with no credential.
    pub fn new() -> Self {
        Self {
            token: ArcSwapOption::empty(),
            armed: AtomicBool::new(false),
            token_file: None,
            events: SessionEvents::new(),
        }
    }

    /// Create a store bound to a token file.
    ///
    /// An existing file is loaded immediately; an unreadable or malformed
    /// file is treated as "no session" rather than an error.
    pub fn with_token_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let store = Self {
            token: ArcSwapOption::empty(),
            armed: AtomicBool::new(false),
            token_file: Some(path.clone()),
            events: SessionEvents::new(),
        };

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str::<StoredSession>(&raw) {
                    Ok(stored) => {
                        store.token.store(Some(Arc::new(stored.token)));
                        store.armed.store(true, Ordering::SeqCst);
                        tracing::info!(path = %path.display(), "Loaded persisted session");
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Ignoring malformed token file"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read token file"
                    );
                }
            }
        }

        store
    }

    /// Current credential, if any.
    pub fn token(&self) -> Option<Arc<String>> {
        self.token.load_full()
    }

    /// True while a credential is installed.
    pub fn is_authenticated(&self) -> bool {
        self.token.load().is_some()
    }

    /// Install a new credential (login).
    ///
    /// Arms expiry notification and writes the token file if one is bound.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.persist(&token);
        self.token.store(Some(Arc::new(token)));
        self.armed.store(true, Ordering::SeqCst);
        tracing::debug!("Session credential installed");
    }

    /// Drop the credential (logout). Publishes no event; the caller
    /// initiated this.
    pub fn clear(&self) {
        self.armed.store(false, Ordering::SeqCst);
        self.token.store(None);
        self.remove_token_file();
        tracing::debug!("Session credential cleared");
    }

    /// Invalidate the credential after an authentication failure.
    ///
    /// Clears memory and the token file, then publishes
    /// [`SessionEvent::Expired`] at most once per armed session, however
    /// many requests fail concurrently. With no armed session this is a
    /// no-op.
    pub(crate) fn expire(&self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.token.store(None);
            self.remove_token_file();
            self.events.publish(SessionEvent::Expired);
            metrics::record_session_expired();
            tracing::warn!("Session expired: credential cleared");
        }
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn persist(&self, token: &str) {
        if let Some(path) = &self.token_file {
            let stored = StoredSession {
                token: token.to_string(),
            };
            let write = serde_json::to_string(&stored)
                .map_err(|e| e.to_string())
                .and_then(|raw| fs::write(path, raw).map_err(|e| e.to_string()));
            if let Err(e) = write {
                tracing::warn!(path = %path.display(), error = %e, "Failed to persist session");
            }
        }
    }

    fn remove_token_file(&self) {
        if let Some(path) = &self.token_file {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to remove token file"
                    );
                }
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("token_file", &self.token_file)
            .finish()
    }
}
