//! Session event bus.
//!
//! SYSTEM CONTEXT
//! ==============
//! The fault handler cannot navigate anywhere itself. It publishes
//! [`SessionEvent::Expired`] here and the host decides what navigation means
//! (a router push, a CLI hint). The session controller subscribes too, so an
//! expiry seen on any request revokes the reactive state.

use tokio::sync::broadcast;

use super::guard::Route;

const EVENT_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the credential. It has already been cleared;
    /// the host should navigate to `redirect`.
    Expired { redirect: Route },
}

/// Cloneable handle to one application instance's event bus.
#[derive(Clone, Debug)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish to current subscribers. Having none is fine.
    pub fn emit(&self, event: SessionEvent) {
        let delivered = self.tx.send(event).unwrap_or(0);
        tracing::debug!(?event, delivered, "session event");
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
