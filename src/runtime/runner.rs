//! # Handle a single message through processing and acknowledgement.
//!
//! Runs the processor for one [`Message`], applies the configured
//! [`FailureStrategy`] to the outcome, and publishes per-message events to the
//! [`Bus`].
//!
//! ## Outcome flow
//!
//! ```text
//! Success:
//!   processor → Ok(()) → ack()
//!       ├─ ack Ok   → publish MessageAcked → continue
//!       └─ ack Err  → RunError::Ack (fatal, any strategy)
//!
//! Failure:
//!   processor → Err(e) → publish ProcessFailed → dispatch on strategy:
//!       ├─ NackExit → nack()
//!       │     ├─ Ok  → publish MessageNacked → RunError::Process(e)
//!       │     └─ Err → RunError::NackWithProcess { nack, process: e }
//!       ├─ Nack     → nack()
//!       │     ├─ Ok  → publish MessageNacked → continue
//!       │     └─ Err → RunError::Nack (fatal)
//!       └─ Ack      → ack()
//!             ├─ Ok  → publish MessageAcked → continue
//!             └─ Err → RunError::Ack (fatal)
//! ```
//!
//! ## Rules
//! - Exactly one of ack/nack is attempted per message.
//! - An ack/nack delivery failure is always terminal: the delivery-guarantee
//!   channel itself is broken and no strategy may continue past it.
//! - `NackExit` terminates even when the nack succeeds; the returned error
//!   wraps the original processing cause.

use std::sync::Arc;

use crate::{
    error::{DynError, RunError},
    events::{Bus, Event, EventKind},
    policies::FailureStrategy,
    processors::Processor,
    source::Message,
};

/// Processes one message and applies the failure strategy to the outcome.
///
/// `Ok(())` means the run loop may pull the next message; any `Err` is
/// terminal for the run (the caller closes the consumer).
pub(crate) async fn handle_message<M, P>(
    component: &Arc<str>,
    processor: &P,
    message: &M,
    strategy: FailureStrategy,
    bus: &Bus,
) -> Result<(), RunError>
where
    M: Message,
    P: Processor<M> + ?Sized,
{
    match processor.process(message).await {
        Ok(()) => match message.ack().await {
            Ok(()) => {
                publish_acked(bus, component);
                Ok(())
            }
            Err(cause) => Err(RunError::Ack(cause)),
        },
        Err(cause) => dispatch_failure(component, message, strategy, cause, bus).await,
    }
}

/// Applies the failure strategy to a processing error.
async fn dispatch_failure<M: Message>(
    component: &Arc<str>,
    message: &M,
    strategy: FailureStrategy,
    cause: DynError,
    bus: &Bus,
) -> Result<(), RunError> {
    publish_failed(bus, component, &cause);

    match strategy {
        FailureStrategy::NackExit => match message.nack().await {
            Ok(()) => {
                publish_nacked(bus, component);
                Err(RunError::Process(cause))
            }
            Err(nack) => Err(RunError::NackWithProcess {
                nack,
                process: cause,
            }),
        },
        FailureStrategy::Nack => match message.nack().await {
            Ok(()) => {
                publish_nacked(bus, component);
                Ok(())
            }
            Err(nack) => Err(RunError::Nack(nack)),
        },
        FailureStrategy::Ack => match message.ack().await {
            Ok(()) => {
                publish_acked(bus, component);
                Ok(())
            }
            Err(ack) => Err(RunError::Ack(ack)),
        },
    }
}

/// Publishes `MessageAcked`.
fn publish_acked(bus: &Bus, component: &Arc<str>) {
    bus.publish(Event::now(EventKind::MessageAcked).with_component(Arc::clone(component)));
}

/// Publishes `MessageNacked`.
fn publish_nacked(bus: &Bus, component: &Arc<str>) {
    bus.publish(Event::now(EventKind::MessageNacked).with_component(Arc::clone(component)));
}

/// Publishes `ProcessFailed` with the error message.
fn publish_failed(bus: &Bus, component: &Arc<str>, cause: &DynError) {
    bus.publish(
        Event::now(EventKind::ProcessFailed)
            .with_component(Arc::clone(component))
            .with_reason(cause.to_string()),
    );
}
