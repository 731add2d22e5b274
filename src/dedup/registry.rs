//! In-flight request registry with grace-window expiry.
//!
//! # Responsibilities
//! - Track fingerprints of requests that are currently outstanding
//! - Reject a second dispatch sharing an in-flight fingerprint
//! - Free entries on settlement (guard drop) or grace-window expiry,
//!   whichever fires first
//!
//! # Design Decisions
//! - Check-then-insert is atomic via the DashMap entry API
//! - Entries carry a generation tag so a stale timer can never evict a
//!   newer request's entry for the same fingerprint
//! - The grace-window timer is a cleanup fallback, not a network timeout;
//!   it does not abort the transmitted request

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::dedup::fingerprint::Fingerprint;

/// Tracks which fingerprints are currently in flight.
///
/// Cheap to clone; clones share the underlying map.
#[derive(Clone)]
pub struct InFlightRegistry {
    entries: Arc<DashMap<Fingerprint, u64>>,
    /// Relaxed ordering is sufficient: generations only need uniqueness.
    next_generation: Arc<AtomicU64>,
    grace_window: Duration,
}

impl InFlightRegistry {
    /// Create a registry with the given grace window.
    pub fn new(grace_window: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            next_generation: Arc::new(AtomicU64::new(1)),
            grace_window,
        }
    }

    /// Try to mark `fingerprint` as in flight.
    ///
    /// Returns `None` when an identical request is already outstanding; the
    /// caller must suppress instead of transmitting. Otherwise inserts the
    /// fingerprint, schedules its grace-window removal, and returns a guard
    /// whose drop marks settlement.
    ///
    /// Must be called from within a tokio runtime (the expiry timer is a
    /// spawned task).
    pub fn begin(&self, fingerprint: &Fingerprint) -> Option<InFlightGuard> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        match self.entries.entry(fingerprint.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(generation);
                let timer = self.spawn_expiry_timer(fingerprint.clone(), generation);
                Some(InFlightGuard {
                    entries: self.entries.clone(),
                    fingerprint: fingerprint.clone(),
                    generation,
                    timer,
                })
            }
        }
    }

    /// True if the fingerprint is currently marked in flight.
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    /// Number of fingerprints currently marked in flight.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured grace window.
    pub fn grace_window(&self) -> Duration {
        self.grace_window
    }

    fn spawn_expiry_timer(&self, fingerprint: Fingerprint, generation: u64) -> JoinHandle<()> {
        let entries = self.entries.clone();
        let grace = self.grace_window;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            // Only evict our own insertion; settlement may already have won.
            if entries
                .remove_if(&fingerprint, |_, gen| *gen == generation)
                .is_some()
            {
                tracing::debug!(
                    fingerprint = %fingerprint,
                    "In-flight marker expired after grace window"
                );
            }
        })
    }
}

impl fmt::Debug for InFlightRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlightRegistry")
            .field("in_flight", &self.entries.len())
            .field("grace_window", &self.grace_window)
            .finish()
    }
}

/// RAII marker for one in-flight request.
///
/// Dropping it (on settlement, success or failure) cancels the expiry timer
/// and frees the fingerprint, unless the timer already did.
pub struct InFlightGuard {
    entries: Arc<DashMap<Fingerprint, u64>>,
    fingerprint: Fingerprint,
    generation: u64,
    timer: JoinHandle<()>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.timer.abort();
        self.entries
            .remove_if(&self.fingerprint, |_, gen| *gen == self.generation);
    }
}

impl fmt::Debug for InFlightGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlightGuard")
            .field("fingerprint", &self.fingerprint)
            .field("generation", &self.generation)
            .finish()
    }
}
