//! Runtime events and the broadcast bus that carries them.
//!
//! The run loop publishes an [`Event`] at every lifecycle transition
//! (connection attempts, per-message outcomes, terminal conditions);
//! observers receive them via [`Bus::subscribe`] or through the
//! [`Subscribe`](crate::Subscribe) fan-out.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};

pub(crate) use bus::WeakBus;
