//! # Consumer and factory capabilities.
//!
//! A [`Consumer`] is tied to one connection/session lifetime: it starts
//! delivering messages when [`consume`](Consumer::consume) is called and
//! releases all underlying resources on [`close`](Consumer::close). A
//! [`ConsumerFactory`] manufactures consumers, once per connection attempt
//! (including reconnect retries).
//!
//! ## Stream contract
//! `consume` hands back two bounded mpsc receivers: the message stream and the
//! error stream. The consumer is free to populate them from any number of
//! internal workers (one per partition, for example); that concurrency is
//! invisible to the runtime, which drains the streams strictly sequentially.
//! Both streams must eventually stop producing once the given context is
//! cancelled — internal shutdown is the consumer's own responsibility.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::DynError;
use crate::source::message::Message;

/// Message type produced by a factory's consumer.
///
/// Shorthand for spelling out the nested associated-type projection at the
/// runtime seams.
pub type MessageFor<F> = <<F as ConsumerFactory>::Consumer as Consumer>::Message;

/// # Source of messages and delivery errors for one session.
///
/// Exclusively owned by a single [`Component::run`](crate::Component::run)
/// invocation for its duration; the runtime closes it on every exit path.
#[async_trait]
pub trait Consumer: Send + 'static {
    /// The message type this consumer delivers.
    type Message: Message;

    /// Begins delivering messages, honoring the given cancellation context.
    ///
    /// Returns the message stream and the error stream, or an immediate error
    /// if consumption cannot start (no partitions available, subscription
    /// rejected). A start failure is retried by the runtime with the same
    /// budget as a factory failure.
    async fn consume(
        &mut self,
        ctx: CancellationToken,
    ) -> Result<(mpsc::Receiver<Self::Message>, mpsc::Receiver<DynError>), DynError>;

    /// Releases all underlying resources (connections, internal workers).
    ///
    /// Called exactly once per run attempt, on every exit path — including
    /// when [`consume`](Consumer::consume) itself never succeeded, so
    /// implementations must tolerate being closed in that state.
    async fn close(&mut self) -> Result<(), DynError>;
}

/// # Capability that manufactures consumers on demand.
///
/// [`create`](ConsumerFactory::create) must be safely callable multiple times:
/// the runtime invokes it once per connection attempt, including every
/// reconnect retry. Each call either yields a fresh, usable consumer or an
/// error describing why none could be made.
#[async_trait]
pub trait ConsumerFactory: Send + Sync + 'static {
    /// The consumer type this factory produces.
    type Consumer: Consumer;

    /// Creates a fresh consumer.
    async fn create(&self) -> Result<Self::Consumer, DynError>;
}
