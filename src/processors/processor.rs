//! # Processor abstraction.
//!
//! A [`Processor`] consumes one [`Message`] at a time and reports the outcome.
//! The runtime owns acknowledgement: a processor never acks or nacks — it
//! decodes, does its business logic, and returns `Ok`/`Err`. What happens to
//! the message afterwards is decided by the configured
//! [`FailureStrategy`](crate::FailureStrategy).

use async_trait::async_trait;

use crate::error::DynError;
use crate::source::Message;

/// # Caller-supplied, per-message business logic.
///
/// Invoked strictly sequentially by the runtime: the next message is not
/// pulled until the current one's ack/nack completes, which gives natural
/// backpressure. Processors that want internal concurrency manage it
/// themselves.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use queuevisor::{DynError, Message, Processor};
///
/// struct Auditor;
///
/// #[async_trait]
/// impl<M: Message> Processor<M> for Auditor {
///     async fn process(&self, message: &M) -> Result<(), DynError> {
///         if message.context().is_cancelled() {
///             return Ok(());
///         }
///         // decode and handle...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Processor<M: Message>: Send + Sync + 'static {
    /// Processes a single message.
    ///
    /// `Ok(())` → the runtime acks the message.
    /// `Err(_)` → the runtime applies the failure strategy (nack-and-exit,
    /// nack-and-continue, or ack-and-skip).
    async fn process(&self, message: &M) -> Result<(), DynError>;
}
