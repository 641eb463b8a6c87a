//! # Function-backed processor (`ProcessorFn`)
//!
//! [`ProcessorFn`] wraps a function `F: for<'a> Fn(&'a M) -> BoxProcessFuture<'a>`,
//! producing a fresh future per message. No shared mutable state, no `Mutex`
//! required; if the handler needs shared state, capture an `Arc<...>` in the
//! closure explicitly.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use queuevisor::{BoxProcessFuture, DynError, Message, ProcessorFn};
//!
//! # use async_trait::async_trait;
//! # use serde::de::DeserializeOwned;
//! # use tokio_util::sync::CancellationToken;
//! # struct MyMessage { body: Vec<u8>, ctx: CancellationToken }
//! # #[async_trait]
//! # impl Message for MyMessage {
//! #     fn context(&self) -> CancellationToken { self.ctx.clone() }
//! #     fn decode<T: DeserializeOwned>(&self) -> Result<T, DynError> {
//! #         serde_json::from_slice(&self.body).map_err(Into::into)
//! #     }
//! #     async fn ack(&self) -> Result<(), DynError> { Ok(()) }
//! #     async fn nack(&self) -> Result<(), DynError> { Ok(()) }
//! # }
//! fn handle(message: &MyMessage) -> BoxProcessFuture<'_> {
//!     Box::pin(async move {
//!         let text: String = message.decode()?;
//!         println!("got: {text}");
//!         Ok(())
//!     })
//! }
//!
//! let processor = ProcessorFn::arc(handle);
//! # let _ = processor;
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DynError;
use crate::processors::processor::Processor;
use crate::source::Message;

/// Boxed future returned by a function-backed processor.
///
/// The lifetime ties the future to the message borrow, so handlers can decode
/// lazily without cloning the payload.
pub type BoxProcessFuture<'a> = Pin<Box<dyn Future<Output = Result<(), DynError>> + Send + 'a>>;

/// Function-backed processor implementation.
///
/// Wraps a function that *creates* a new future per message.
#[derive(Debug)]
pub struct ProcessorFn<F> {
    f: F,
}

impl<F> ProcessorFn<F> {
    /// Creates a new function-backed processor.
    ///
    /// Prefer [`ProcessorFn::arc`] when you immediately need a shared handle.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the processor and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<M, F> Processor<M> for ProcessorFn<F>
where
    M: Message,
    F: for<'a> Fn(&'a M) -> BoxProcessFuture<'a> + Send + Sync + 'static, // Fn, not FnMut
{
    async fn process(&self, message: &M) -> Result<(), DynError> {
        (self.f)(message).await
    }
}
