//! # Failure strategies for processing errors.
//!
//! [`FailureStrategy`] decides what happens to a message — and to the run loop —
//! when the processor returns an error.
//!
//! - [`FailureStrategy::NackExit`] nack the message and terminate the run (default).
//! - [`FailureStrategy::Nack`] nack the message and keep consuming.
//! - [`FailureStrategy::Ack`] ack the message anyway (skip-on-error) and keep consuming.
//!
//! ## Choosing the right strategy
//!
//! **Stop on first failure** (fail fast, let the orchestrator restart):
//! ```text
//! FailureStrategy::NackExit     → message requeued, run returns an error
//! ```
//!
//! **Let the source redeliver** (poison messages cycle until a DLQ catches them):
//! ```text
//! FailureStrategy::Nack         → message requeued, run keeps going
//! ```
//!
//! **Drop bad messages** (at-most-once for failures):
//! ```text
//! FailureStrategy::Ack          → message consumed despite the error
//! ```
//!
//! Acknowledgement failures are orthogonal: whichever strategy is active, an
//! ack/nack call that itself fails terminates the run — a broken delivery
//! guarantee cannot be papered over by policy.

/// Policy applied to a message whose processing failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureStrategy {
    /// Nack the message, then terminate the run with the processing error (default).
    NackExit,
    /// Nack the message and continue with subsequent messages.
    Nack,
    /// Ack the message despite the failure (treat as consumed) and continue.
    Ack,
}

impl Default for FailureStrategy {
    /// Returns [`FailureStrategy::NackExit`].
    fn default() -> Self {
        FailureStrategy::NackExit
    }
}

impl FailureStrategy {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            FailureStrategy::NackExit => "nack_exit",
            FailureStrategy::Nack => "nack",
            FailureStrategy::Ack => "ack",
        }
    }
}
