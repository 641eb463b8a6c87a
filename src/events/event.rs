//! # Runtime events emitted by the component run loop.
//!
//! [`EventKind`] classifies events across three categories:
//! - **Connection events**: establishing the consumer (failed, retry scheduled, connected)
//! - **Message events**: per-message outcomes (acked, nacked, processing failed)
//! - **Terminal events**: consumer errors, close, run stop
//!
//! The [`Event`] struct carries metadata such as timestamps, component name,
//! attempt numbers, delays, and failure reasons.
//!
//! ## Ordering
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically; use it to restore order when events are observed out of band.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Connection events ===
    /// A connection attempt (factory create or consume start) failed.
    ///
    /// Sets: `component`, `attempt`, `reason`.
    ConnectFailed,

    /// A reconnect attempt was scheduled after a connection failure.
    ///
    /// Sets: `component`, `attempt`, `delay_ms`, `reason`.
    RetryScheduled,

    /// A consumer was established and its streams are being drained.
    ///
    /// Sets: `component`, `attempt`.
    Connected,

    // === Message events ===
    /// A message was positively acknowledged.
    ///
    /// Sets: `component`.
    MessageAcked,

    /// A message was negatively acknowledged.
    ///
    /// Sets: `component`.
    MessageNacked,

    /// The processor returned an error for a message.
    ///
    /// Sets: `component`, `reason`.
    ProcessFailed,

    // === Terminal events ===
    /// The consumer delivered an error on its error stream.
    ///
    /// Sets: `component`, `reason`.
    ConsumerError,

    /// The consumer was closed. `reason` is set only if the close itself failed.
    ///
    /// Sets: `component`, optional `reason`.
    ConsumerClosed,

    /// The run loop returned. `reason` carries the error label, or is absent
    /// on clean shutdown.
    ///
    /// Sets: `component`, optional `reason`.
    RunStopped,

    // === Subscriber events ===
    /// A subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `component` (subscriber name), `reason`.
    SubscriberOverflow,

    /// A subscriber panicked while handling an event.
    ///
    /// Sets: `component` (subscriber name), `reason` (panic info).
    SubscriberPanicked,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Component (or subscriber) name, if applicable.
    pub component: Option<Arc<str>>,
    /// Connection attempt count (starting from 1).
    pub attempt: Option<u32>,
    /// Reconnect delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            component: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches a component name.
    #[inline]
    pub fn with_component(mut self, component: impl Into<Arc<str>>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Attaches a connection attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a reconnect delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_component(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_component(subscriber)
            .with_reason(info)
    }
}
