//! Source capabilities: the seams a transport implements.
//!
//! Concrete transports (a broker client, a queue SDK wrapper) plug into the
//! runtime by implementing three traits:
//! - [`Message`] — one unit of work: context, decode, ack/nack;
//! - [`Consumer`] — a session-scoped stream pair (messages + errors), closable;
//! - [`ConsumerFactory`] — manufactures consumers, once per connection attempt.

mod consumer;
mod message;

pub use consumer::{Consumer, ConsumerFactory, MessageFor};
pub use message::Message;
