//! # Message capability: one unit of work pulled from a source.
//!
//! A [`Message`] wraps a payload together with the source-specific delivery
//! state needed to acknowledge it. It carries a per-message cancellation
//! context, decodes its payload on demand, and signals the consumption outcome
//! back to the source via [`ack`](Message::ack) / [`nack`](Message::nack).
//!
//! Messages are ephemeral: produced by a [`Consumer`](crate::Consumer),
//! handled exactly once by the processor plus the failure-strategy logic,
//! then discarded.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::DynError;

/// # A single message pulled from a source.
///
/// Implementations own the payload bytes and whatever delivery state the
/// transport requires (receipt handle, delivery tag, offset). The runtime
/// never inspects the payload; decoding is the processor's business.
///
/// ## Acknowledgement contract
/// The runtime calls exactly one of [`ack`](Message::ack) / [`nack`](Message::nack)
/// per message, after processing, depending on the outcome and the configured
/// [`FailureStrategy`](crate::FailureStrategy). Both calls may fail
/// independently of the processing outcome; such failures are always terminal
/// for the run.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use serde::de::DeserializeOwned;
/// use tokio_util::sync::CancellationToken;
/// use queuevisor::{DynError, Message};
///
/// struct JsonMessage {
///     body: Vec<u8>,
///     ctx: CancellationToken,
/// }
///
/// #[async_trait]
/// impl Message for JsonMessage {
///     fn context(&self) -> CancellationToken {
///         self.ctx.clone()
///     }
///
///     fn decode<T: DeserializeOwned>(&self) -> Result<T, DynError> {
///         serde_json::from_slice(&self.body).map_err(Into::into)
///     }
///
///     async fn ack(&self) -> Result<(), DynError> {
///         // delete from the queue / commit the offset
///         Ok(())
///     }
///
///     async fn nack(&self) -> Result<(), DynError> {
///         // requeue / reject
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Message: Send + Sync + 'static {
    /// Returns the per-message cancellation context.
    ///
    /// Processors should derive their own cancellation/correlation from this
    /// token rather than from ambient state.
    fn context(&self) -> CancellationToken;

    /// Deserializes the payload into the caller-supplied target type.
    ///
    /// Format-specific and opaque to the runtime; only processors call this.
    fn decode<T: DeserializeOwned>(&self) -> Result<T, DynError>
    where
        Self: Sized;

    /// Signals successful consumption back to the source.
    async fn ack(&self) -> Result<(), DynError>;

    /// Signals unsuccessful consumption back to the source.
    async fn nack(&self) -> Result<(), DynError>;
}
