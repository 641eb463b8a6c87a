//! Failure-handling and retry policies.
//!
//! This module groups the knobs that control **what happens** when processing
//! fails and **how long** to wait between reconnect attempts.
//!
//! ## Contents
//! - [`FailureStrategy`] what to do with a failed message (nack-exit / nack / ack)
//! - [`RetryPolicy`] how reconnect delays evolve (wait / factor / max + jitter)
//! - [`Jitter`] randomization strategy for reconnect delays
//!
//! ## Defaults
//! - `FailureStrategy::NackExit` (fail fast; the orchestrator decides about restarts).
//! - `RetryPolicy::default()` → wait=100ms, factor=1.0 (constant), max=30s, no jitter.

mod backoff;
mod strategy;

pub use backoff::{Jitter, RetryPolicy};
pub use strategy::FailureStrategy;
