//! Error types used by the queuevisor runtime.
//!
//! This module defines two main error enums:
//!
//! - [`BuildError`] — violations detected while assembling a component.
//! - [`RunError`] — terminal conditions of a [`Component::run`](crate::Component::run) call.
//!
//! Capability seams (factory, consumer, message, processor) exchange errors as
//! [`DynError`], so transport implementations keep their own error types and the
//! runtime wraps them with phase context. Both enums provide `as_label` helpers
//! for logs/metrics.

use thiserror::Error;

/// Boxed error used at the capability seams.
///
/// Factories, consumers, messages, and processors all return this type; the
/// runtime attaches phase information via [`RunError`] when it propagates them.
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// # Errors produced while assembling a [`Component`](crate::Component).
///
/// The builder accumulates violations across chained calls and aggregates them
/// at `create()`: a single violation is returned as-is, multiple violations are
/// wrapped in [`BuildError::Invalid`].
///
/// Range violations (negative retry wait, out-of-range failure strategy) are
/// unrepresentable: `Duration` is unsigned and
/// [`FailureStrategy`](crate::FailureStrategy) is a closed enum.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BuildError {
    /// The component name was empty or blank.
    #[error("component name must not be empty")]
    EmptyName,

    /// No processor was supplied before `create()`.
    #[error("a processor is required")]
    MissingProcessor,

    /// No consumer factory was supplied before `create()`.
    #[error("a consumer factory is required")]
    MissingConsumerFactory,

    /// Multiple violations were accumulated across builder calls.
    #[error("invalid component configuration: {}", join_violations(.0))]
    Invalid(Vec<BuildError>),
}

impl BuildError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use queuevisor::BuildError;
    ///
    /// assert_eq!(BuildError::EmptyName.as_label(), "build_empty_name");
    /// assert_eq!(BuildError::MissingProcessor.as_label(), "build_missing_processor");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BuildError::EmptyName => "build_empty_name",
            BuildError::MissingProcessor => "build_missing_processor",
            BuildError::MissingConsumerFactory => "build_missing_consumer_factory",
            BuildError::Invalid(_) => "build_invalid",
        }
    }
}

fn join_violations(violations: &[BuildError]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// # Terminal conditions of a `run` call.
///
/// Every variant except [`RunError::Canceled`] wraps the underlying cause from
/// the capability that failed. The consumer is closed before any of these are
/// returned.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunError {
    /// The context was cancelled while establishing the consumer
    /// (before an attempt or during the retry wait).
    ///
    /// Cancellation during steady-state consumption is **not** an error;
    /// `run` returns `Ok(())` in that case.
    #[error("context cancelled while establishing consumer")]
    Canceled,

    /// The factory or the initial `consume` call kept failing until the
    /// retry budget was exhausted.
    #[error("failed to establish consumer after {attempts} attempt(s): {source}")]
    Connect {
        /// Total connection attempts made (initial attempt plus retries).
        attempts: u32,
        /// The last factory/consume error.
        #[source]
        source: DynError,
    },

    /// The consumer delivered an error on its error stream during
    /// steady-state consumption. Always terminal at this layer.
    #[error("consumer error: {0}")]
    Consumer(#[source] DynError),

    /// The processor failed and the failure strategy terminates the run
    /// (the message was nacked successfully first).
    #[error("message processing failed: {0}")]
    Process(#[source] DynError),

    /// A positive acknowledgement could not be delivered. Always fatal,
    /// regardless of failure strategy.
    #[error("failed to ack message: {0}")]
    Ack(#[source] DynError),

    /// A negative acknowledgement could not be delivered. Always fatal.
    #[error("failed to nack message: {0}")]
    Nack(#[source] DynError),

    /// Both the processor and the subsequent nack failed. The nack failure
    /// takes precedence in the message; both causes are preserved.
    #[error("failed to nack message: {nack}; processing error: {process}")]
    NackWithProcess {
        /// The nack delivery failure.
        nack: DynError,
        /// The original processing error.
        process: DynError,
    },
}

impl RunError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use queuevisor::RunError;
    ///
    /// assert_eq!(RunError::Canceled.as_label(), "run_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::Canceled => "run_canceled",
            RunError::Connect { .. } => "run_connect_failed",
            RunError::Consumer(_) => "run_consumer_error",
            RunError::Process(_) => "run_process_failed",
            RunError::Ack(_) => "run_ack_failed",
            RunError::Nack(_) => "run_nack_failed",
            RunError::NackWithProcess { .. } => "run_nack_failed",
        }
    }

    /// Indicates whether the error originated in acknowledgement delivery
    /// (ack or nack), i.e. the delivery-guarantee channel itself is broken.
    pub fn is_ack_failure(&self) -> bool {
        matches!(
            self,
            RunError::Ack(_) | RunError::Nack(_) | RunError::NackWithProcess { .. }
        )
    }
}
