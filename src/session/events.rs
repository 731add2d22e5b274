//! Session event notification.
//!
//! The client performs no navigation. When the session is invalidated it
//! publishes an event here; the embedding application subscribes and decides
//! what "go to the login screen" means for it.

use tokio::sync::broadcast;

/// Events published by the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend rejected the credential; it has been cleared everywhere.
    Expired,
}

/// Broadcast hub for session events.
///
/// Any number of subscribers; publishing never blocks. Publishing with no
/// subscribers is a valid state (headless or CLI usage).
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Create a new event hub.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub(crate) fn publish(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let events = SessionEvents::new();
        let mut rx = events.subscribe();

        events.publish(SessionEvent::Expired);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::Expired);
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_harmless() {
        let events = SessionEvents::new();
        assert_eq!(events.subscriber_count(), 0);
        events.publish(SessionEvent::Expired);

        // A late subscriber does not see past events.
        let mut rx = events.subscribe();
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }
}
