//! Observer seam: per-component event subscribers.
//!
//! - [`Subscribe`] — async handler for runtime events.
//! - [`SubscriberSet`] — bounded-queue fan-out with panic isolation.
//! - `LogWriter` — stdout demo subscriber (feature `logging`).

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
