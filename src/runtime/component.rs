//! # Supervised execution of one consumer/processor pair.
//!
//! [`Component`] owns a [`ConsumerFactory`], a [`Processor`] and the policies
//! that tie them together, and drives the whole lifecycle from a single `run`
//! call:
//!
//! ```text
//!                 ┌────────────────────────────┐
//!                 ▼                            │ retry (delay, budget)
//! run(ctx) ─► CONNECTING ──connect Err──► ConnectFailed
//!                 │
//!            connect Ok
//!                 ▼
//!             CONSUMING ◄────────────┐
//!                 │                  │ next message
//!          ┌──────┼──────────┐      │
//!          │      │          │      │
//!       cancel  message   consumer  │
//!          │      │        error    │
//!          │      ▼          │      │
//!          │  PROCESSING ────┘──────┘
//!          │      │
//!          ▼      ▼ terminal outcome
//!             TERMINATED (close consumer, publish RunStopped)
//! ```
//!
//! ## Rules
//! - Connection establishment is **factory create + consume start** as one
//!   unit: if `consume` fails on a fresh consumer, that consumer is closed and
//!   the whole unit is retried.
//! - The retry budget covers connection establishment only. Errors after the
//!   streams are live (consumer error stream, processing, ack/nack) are
//!   terminal; the caller decides whether to call `run` again.
//! - Messages are processed **sequentially**, in stream order; the next
//!   message is not pulled until the previous one is fully resolved.
//! - On every exit path the consumer is closed exactly once and a `RunStopped`
//!   event is published.
//! - Cancellation while connecting (or waiting to retry) yields
//!   [`RunError::Canceled`]; cancellation while consuming is a clean stop and
//!   yields `Ok(())`.

use std::sync::Arc;

use tokio::{sync::mpsc, time};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{DynError, RunError},
    events::{Bus, Event, EventKind},
    policies::{FailureStrategy, RetryPolicy},
    processors::Processor,
    runtime::{builder::ComponentBuilder, runner},
    source::{Consumer, ConsumerFactory, MessageFor},
};

/// Consumer streams as returned by a successful connection attempt.
type Streams<F> = (
    <F as ConsumerFactory>::Consumer,
    mpsc::Receiver<MessageFor<F>>,
    mpsc::Receiver<DynError>,
);

/// A supervised consumer/processor pair.
///
/// Built via [`ComponentBuilder`]; immutable once created. `run` may be called
/// again after a terminal error to restart the whole lifecycle with a fresh
/// consumer.
#[derive(Debug)]
pub struct Component<F, P>
where
    F: ConsumerFactory,
    P: Processor<MessageFor<F>>,
{
    pub(crate) name: Arc<str>,
    pub(crate) factory: F,
    pub(crate) processor: Arc<P>,
    pub(crate) strategy: FailureStrategy,
    pub(crate) retries: u32,
    pub(crate) retry: RetryPolicy,
    pub(crate) bus: Bus,
}

impl<F, P> Component<F, P>
where
    F: ConsumerFactory,
    P: Processor<MessageFor<F>>,
{
    /// Starts building a component with the given name.
    pub fn builder(name: impl Into<Arc<str>>) -> ComponentBuilder<F, P> {
        ComponentBuilder::new(name)
    }

    /// Returns the component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configured failure strategy.
    pub fn strategy(&self) -> FailureStrategy {
        self.strategy
    }

    /// Returns the configured number of connection retries
    /// (attempts beyond the first).
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the event bus; subscribe to observe the run.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Runs the component until a terminal condition.
    ///
    /// Establishes a consumer (with retries), then drains its streams until
    /// the context is cancelled, a stream ends, or an error occurs. The
    /// consumer is closed before this returns.
    ///
    /// Returns `Ok(())` on cancellation during consumption or when the message
    /// stream ends; see [`RunError`] for the terminal error conditions.
    pub async fn run(&self, ctx: CancellationToken) -> Result<(), RunError> {
        let outcome = self.run_inner(&ctx).await;

        let mut stopped = Event::now(EventKind::RunStopped).with_component(Arc::clone(&self.name));
        if let Err(cause) = &outcome {
            stopped = stopped.with_reason(cause.as_label());
        }
        self.bus.publish(stopped);

        outcome
    }

    async fn run_inner(&self, ctx: &CancellationToken) -> Result<(), RunError> {
        let (mut consumer, messages, errors) = self.connect(ctx).await?;
        let outcome = self.drain(ctx, messages, errors).await;
        self.close(&mut consumer).await;
        outcome
    }

    /// Establishes a consumer with live streams, retrying within the budget.
    ///
    /// Attempt numbering starts at 1; the budget allows `retries + 1` total
    /// attempts. The retry wait is cancellable.
    async fn connect(&self, ctx: &CancellationToken) -> Result<Streams<F>, RunError> {
        let mut attempt: u32 = 0;

        loop {
            if ctx.is_cancelled() {
                return Err(RunError::Canceled);
            }

            attempt += 1;
            match self.try_connect(ctx).await {
                Ok(streams) => {
                    self.bus.publish(
                        Event::now(EventKind::Connected)
                            .with_component(Arc::clone(&self.name))
                            .with_attempt(attempt),
                    );
                    return Ok(streams);
                }
                Err(cause) => {
                    let reason: Arc<str> = Arc::from(cause.to_string());
                    self.bus.publish(
                        Event::now(EventKind::ConnectFailed)
                            .with_component(Arc::clone(&self.name))
                            .with_attempt(attempt)
                            .with_reason(Arc::clone(&reason)),
                    );

                    if attempt > self.retries {
                        return Err(RunError::Connect {
                            attempts: attempt,
                            source: cause,
                        });
                    }

                    let delay = self.retry.delay_for(attempt - 1);
                    self.bus.publish(
                        Event::now(EventKind::RetryScheduled)
                            .with_component(Arc::clone(&self.name))
                            .with_attempt(attempt)
                            .with_delay(delay)
                            .with_reason(reason),
                    );

                    tokio::select! {
                        _ = time::sleep(delay) => {}
                        _ = ctx.cancelled() => return Err(RunError::Canceled),
                    }
                }
            }
        }
    }

    /// One connection attempt: create a consumer and start consumption.
    ///
    /// A consumer whose `consume` fails is closed before the error propagates,
    /// so each retry starts from a fresh consumer.
    async fn try_connect(&self, ctx: &CancellationToken) -> Result<Streams<F>, DynError> {
        let mut consumer = self.factory.create().await?;

        match consumer.consume(ctx.child_token()).await {
            Ok((messages, errors)) => Ok((consumer, messages, errors)),
            Err(cause) => {
                self.close(&mut consumer).await;
                Err(cause)
            }
        }
    }

    /// Drains the consumer streams, dispatching each message through the
    /// processor and the failure strategy.
    ///
    /// Exits cleanly on cancellation or when the message stream ends. A closed
    /// error stream only disables that arm; consumption continues.
    async fn drain(
        &self,
        ctx: &CancellationToken,
        mut messages: mpsc::Receiver<MessageFor<F>>,
        mut errors: mpsc::Receiver<DynError>,
    ) -> Result<(), RunError> {
        let mut errors_open = true;

        loop {
            tokio::select! {
                _ = ctx.cancelled() => return Ok(()),

                reported = errors.recv(), if errors_open => match reported {
                    Some(cause) => {
                        self.bus.publish(
                            Event::now(EventKind::ConsumerError)
                                .with_component(Arc::clone(&self.name))
                                .with_reason(cause.to_string()),
                        );
                        return Err(RunError::Consumer(cause));
                    }
                    None => errors_open = false,
                },

                received = messages.recv() => match received {
                    Some(message) => {
                        runner::handle_message(
                            &self.name,
                            self.processor.as_ref(),
                            &message,
                            self.strategy,
                            &self.bus,
                        )
                        .await?;
                    }
                    None => return Ok(()),
                },
            }
        }
    }

    /// Closes the consumer and publishes `ConsumerClosed`.
    ///
    /// A close failure is reported on the bus but never overrides the run
    /// outcome.
    async fn close(&self, consumer: &mut F::Consumer) {
        let mut closed = Event::now(EventKind::ConsumerClosed).with_component(Arc::clone(&self.name));
        if let Err(cause) = consumer.close().await {
            closed = closed.with_reason(cause.to_string());
        }
        self.bus.publish(closed);
    }
}
