//! Runtime core: component lifecycle and assembly.
//!
//! - [`Component`] — supervised consumer/processor pair with a `run` loop.
//! - [`ComponentBuilder`] — fluent, validating assembly.
//! - `runner` — per-message processing and failure-strategy dispatch.

mod builder;
mod component;
mod runner;

pub use builder::ComponentBuilder;
pub use component::Component;
