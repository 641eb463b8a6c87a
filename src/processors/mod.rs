//! Processing seam: the per-message business logic supplied by the caller.
//!
//! - [`Processor`] — trait invoked once per message, strictly sequentially.
//! - [`ProcessorFn`] — function-backed adapter for plain handlers.

mod processor;
mod processor_fn;

pub use processor::Processor;
pub use processor_fn::{BoxProcessFuture, ProcessorFn};
