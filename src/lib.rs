//! # queuevisor
//!
//! **Queuevisor** is an async consumer execution engine for Rust built on
//! [Tokio](https://tokio.rs): plug in a message source and a processing
//! function, and it drives connection, retry, sequential processing,
//! acknowledgement and shutdown for you.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Component                            │
//! │  ┌───────────────┐   create()   ┌──────────────────────┐    │
//! │  │ConsumerFactory│ ───────────► │       Consumer        │   │
//! │  └───────────────┘  (retried)   │  messages ──┐         │   │
//! │                                 │  errors   ──┤         │   │
//! │                                 └─────────────┼────────┘    │
//! │                                               ▼             │
//! │  ┌───────────┐    process()    ┌──────────────────────┐     │
//! │  │ Processor │ ◄────────────── │       run loop        │    │
//! │  └───────────┘                 │  ack / nack / exit    │    │
//! │                                └──────────┬───────────┘     │
//! │                                           ▼                 │
//! │                              Bus ──► SubscriberSet          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **Capabilities** ([`ConsumerFactory`], [`Consumer`], [`Message`],
//!   [`Processor`]) are the seams you implement for a concrete transport
//!   (Kafka, AMQP, an in-memory queue). They exchange errors as [`DynError`].
//! - **Policies** ([`FailureStrategy`], [`RetryPolicy`]) decide what happens
//!   when processing or connecting fails.
//! - **Runtime** ([`Component`], [`ComponentBuilder`]) wires everything into a
//!   cancellation-aware run loop.
//! - **Events** ([`Bus`], [`Event`], [`Subscribe`]) expose what the loop does
//!   without coupling it to any logging or metrics stack.
//!
//! ## Lifecycle
//!
//! `run(ctx)` establishes the consumer (factory create + consume start as one
//! retried unit), then drains the message and error streams sequentially:
//!
//! - processing success → `ack` → next message
//! - processing failure → [`FailureStrategy`] decides: nack and stop
//!   (`NackExit`, default), nack and continue (`Nack`), or ack and continue
//!   (`Ack`)
//! - ack/nack delivery failure → always terminal
//! - consumer error stream item → always terminal
//! - context cancelled while consuming → clean stop, `Ok(())`
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use serde::de::DeserializeOwned;
//! use tokio::sync::mpsc;
//! use tokio_util::sync::CancellationToken;
//!
//! use queuevisor::{
//!     ComponentBuilder, Consumer, ConsumerFactory, DynError, FailureStrategy, Message, Processor,
//! };
//!
//! struct InMemoryMessage {
//!     body: Vec<u8>,
//! }
//!
//! #[async_trait]
//! impl Message for InMemoryMessage {
//!     fn context(&self) -> CancellationToken {
//!         CancellationToken::new()
//!     }
//!
//!     fn decode<T: DeserializeOwned>(&self) -> Result<T, DynError> {
//!         serde_json::from_slice(&self.body).map_err(Into::into)
//!     }
//!
//!     async fn ack(&self) -> Result<(), DynError> {
//!         Ok(())
//!     }
//!
//!     async fn nack(&self) -> Result<(), DynError> {
//!         Ok(())
//!     }
//! }
//!
//! struct InMemoryConsumer {
//!     pending: Vec<InMemoryMessage>,
//! }
//!
//! #[async_trait]
//! impl Consumer for InMemoryConsumer {
//!     type Message = InMemoryMessage;
//!
//!     async fn consume(
//!         &mut self,
//!         _ctx: CancellationToken,
//!     ) -> Result<(mpsc::Receiver<InMemoryMessage>, mpsc::Receiver<DynError>), DynError> {
//!         let (msg_tx, msg_rx) = mpsc::channel(8);
//!         let (_err_tx, err_rx) = mpsc::channel(8);
//!         for message in self.pending.drain(..) {
//!             let _ = msg_tx.try_send(message);
//!         }
//!         // Senders drop here, so the streams end once drained.
//!         Ok((msg_rx, err_rx))
//!     }
//!
//!     async fn close(&mut self) -> Result<(), DynError> {
//!         Ok(())
//!     }
//! }
//!
//! struct InMemoryFactory;
//!
//! #[async_trait]
//! impl ConsumerFactory for InMemoryFactory {
//!     type Consumer = InMemoryConsumer;
//!
//!     async fn create(&self) -> Result<InMemoryConsumer, DynError> {
//!         Ok(InMemoryConsumer {
//!             pending: vec![InMemoryMessage {
//!                 body: br#""hello""#.to_vec(),
//!             }],
//!         })
//!     }
//! }
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl Processor<InMemoryMessage> for Printer {
//!     async fn process(&self, message: &InMemoryMessage) -> Result<(), DynError> {
//!         let text: String = message.decode()?;
//!         println!("processing: {text}");
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let component = ComponentBuilder::new("greeter")
//!         .with_consumer_factory(InMemoryFactory)
//!         .with_processor(Printer)
//!         .with_failure_strategy(FailureStrategy::NackExit)
//!         .with_retries(3)
//!         .with_retry_wait(std::time::Duration::from_millis(200))
//!         .create()?;
//!
//!     component.run(CancellationToken::new()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature flags
//!
//! | Feature   | Default | Description                            |
//! |-----------|---------|----------------------------------------|
//! | `logging` | off     | `LogWriter` stdout subscriber for demos |

mod error;
mod events;
mod policies;
mod processors;
mod runtime;
mod source;
mod subscribers;

pub use error::{BuildError, DynError, RunError};
pub use events::{Bus, Event, EventKind};
pub use policies::{FailureStrategy, Jitter, RetryPolicy};
pub use processors::{BoxProcessFuture, Processor, ProcessorFn};
pub use runtime::{Component, ComponentBuilder};
pub use source::{Consumer, ConsumerFactory, Message, MessageFor};
pub use subscribers::{Subscribe, SubscriberSet};

#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
