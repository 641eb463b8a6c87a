//! # Event bus for broadcasting runtime events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking event publishing from the run loop.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or awaits.
//! - **Bounded capacity**: one ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are dropped if there are no active receivers at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); publishers and
/// subscribers may live on different tasks.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to a minimum of 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped; this function still
    /// returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that observes subsequent events.
    ///
    /// Each call creates an independent receiver; a receiver only sees events
    /// sent after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Downgrades to a handle that does not keep the channel alive.
    pub(crate) fn downgrade(&self) -> WeakBus {
        WeakBus {
            tx: self.tx.downgrade(),
        }
    }
}

/// Weak publishing handle.
///
/// Does not count as a sender: the channel closes once every [`Bus`] clone is
/// dropped, regardless of how many `WeakBus` handles remain. Used by
/// subscriber workers so their tasks never keep their own event source alive.
#[derive(Clone, Debug)]
pub(crate) struct WeakBus {
    tx: broadcast::WeakSender<Event>,
}

impl WeakBus {
    /// Publishes an event if the bus still has strong senders; otherwise the
    /// event is dropped.
    pub(crate) fn publish(&self, ev: Event) {
        if let Some(tx) = self.tx.upgrade() {
            let _ = tx.send(ev);
        }
    }
}
