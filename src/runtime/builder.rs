//! # Fluent builder for [`Component`].
//!
//! Collects the consumer factory, processor, failure strategy, retry policy
//! and observability wiring, validates the configuration, and produces an
//! immutable [`Component`].
//!
//! ## Rules
//! - Violations accumulate across chained calls and surface only at
//!   `create()`: one violation is returned as-is, several are aggregated in
//!   [`BuildError::Invalid`].
//! - `create()` never partially constructs: it returns either a fully
//!   operational component or an error.
//! - When subscribers are registered, `create()` spawns the event fan-out and
//!   therefore must run inside a Tokio runtime. Without subscribers no task is
//!   spawned.
//!
//! ## Example
//! ```rust,ignore
//! let component = ComponentBuilder::new("orders")
//!     .with_consumer_factory(factory)
//!     .with_processor(processor)
//!     .with_failure_strategy(FailureStrategy::Nack)
//!     .with_retries(5)
//!     .with_retry_wait(Duration::from_millis(500))
//!     .create()?;
//! ```

use std::sync::Arc;

use crate::{
    error::BuildError,
    events::Bus,
    policies::{FailureStrategy, RetryPolicy},
    processors::Processor,
    runtime::component::Component,
    source::{ConsumerFactory, MessageFor},
    subscribers::{Subscribe, SubscriberSet},
};

/// Default event bus capacity.
const DEFAULT_BUS_CAPACITY: usize = 256;

/// Builder for [`Component`].
///
/// Obtained via [`ComponentBuilder::new`] or [`Component::builder`].
pub struct ComponentBuilder<F, P>
where
    F: ConsumerFactory,
    P: Processor<MessageFor<F>>,
{
    name: Arc<str>,
    factory: Option<F>,
    processor: Option<Arc<P>>,
    strategy: FailureStrategy,
    retries: u32,
    retry: RetryPolicy,
    bus_capacity: usize,
    subscribers: Vec<Arc<dyn Subscribe>>,
    violations: Vec<BuildError>,
}

impl<F, P> ComponentBuilder<F, P>
where
    F: ConsumerFactory,
    P: Processor<MessageFor<F>>,
{
    /// Creates a builder for a component with the given name.
    ///
    /// A blank name is recorded as a violation and reported at `create()`.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let mut violations = Vec::new();
        if name.trim().is_empty() {
            violations.push(BuildError::EmptyName);
        }

        Self {
            name,
            factory: None,
            processor: None,
            strategy: FailureStrategy::default(),
            retries: 0,
            retry: RetryPolicy::default(),
            bus_capacity: DEFAULT_BUS_CAPACITY,
            subscribers: Vec::new(),
            violations,
        }
    }

    /// Sets the consumer factory. Required.
    #[must_use]
    pub fn with_consumer_factory(mut self, factory: F) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Sets the processor. Required.
    ///
    /// Accepts either an owned processor or a shared `Arc` (for processors
    /// reused across components).
    #[must_use]
    pub fn with_processor(mut self, processor: impl Into<Arc<P>>) -> Self {
        self.processor = Some(processor.into());
        self
    }

    /// Sets the failure strategy. Default: [`FailureStrategy::NackExit`].
    #[must_use]
    pub fn with_failure_strategy(mut self, strategy: FailureStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets how many times a failed connection attempt is retried.
    /// Default: 0 (a single attempt).
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets a flat delay between connection attempts.
    ///
    /// Shorthand for `with_retry_policy(RetryPolicy::fixed(wait))`.
    #[must_use]
    pub fn with_retry_wait(mut self, wait: std::time::Duration) -> Self {
        self.retry = RetryPolicy::fixed(wait);
        self
    }

    /// Sets the full retry policy (backoff growth, cap, jitter).
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the event bus capacity (clamped to a minimum of 1).
    /// Default: 256.
    #[must_use]
    pub fn with_bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity;
        self
    }

    /// Registers event subscribers for this component.
    ///
    /// Each subscriber gets its own bounded queue and worker task; see
    /// [`Subscribe`] for the isolation rules.
    #[must_use]
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers.extend(subscribers);
        self
    }

    /// Registers a single event subscriber.
    #[must_use]
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Validates the configuration and builds the component.
    ///
    /// # Errors
    /// Returns the accumulated [`BuildError`] violations; multiple violations
    /// are aggregated in [`BuildError::Invalid`].
    pub fn create(self) -> Result<Component<F, P>, BuildError> {
        let mut violations = self.violations;
        if self.processor.is_none() {
            violations.push(BuildError::MissingProcessor);
        }
        if self.factory.is_none() {
            violations.push(BuildError::MissingConsumerFactory);
        }

        match (self.factory, self.processor, violations.is_empty()) {
            (Some(factory), Some(processor), true) => {
                let bus = Bus::new(self.bus_capacity);
                if !self.subscribers.is_empty() {
                    spawn_fanout(&bus, self.subscribers);
                }

                Ok(Component {
                    name: self.name,
                    factory,
                    processor,
                    strategy: self.strategy,
                    retries: self.retries,
                    retry: self.retry,
                    bus,
                })
            }
            _ => Err(aggregate(violations)),
        }
    }
}

/// Bridges the broadcast bus into the per-subscriber fan-out.
///
/// The task holds no strong bus handle (the set downgrades its copy), so the
/// component's own [`Bus`] is the last sender: dropping the component closes
/// the channel, `recv` returns, and the subscriber workers are shut down.
fn spawn_fanout(bus: &Bus, subscribers: Vec<Arc<dyn Subscribe>>) {
    let set = SubscriberSet::new(subscribers, bus.clone());
    let mut rx = bus.subscribe();

    tokio::spawn(async move {
        while let Ok(ev) = rx.recv().await {
            set.emit(&ev);
        }
        set.shutdown().await;
    });
}

fn aggregate(mut violations: Vec<BuildError>) -> BuildError {
    if violations.len() == 1 {
        violations.remove(0)
    } else {
        BuildError::Invalid(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::de::DeserializeOwned;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use crate::error::DynError;
    use crate::source::{Consumer, Message};

    struct NullMessage;

    #[async_trait]
    impl Message for NullMessage {
        fn context(&self) -> CancellationToken {
            CancellationToken::new()
        }

        fn decode<T: DeserializeOwned>(&self) -> Result<T, DynError> {
            Err("no payload".into())
        }

        async fn ack(&self) -> Result<(), DynError> {
            Ok(())
        }

        async fn nack(&self) -> Result<(), DynError> {
            Ok(())
        }
    }

    struct NullConsumer;

    #[async_trait]
    impl Consumer for NullConsumer {
        type Message = NullMessage;

        async fn consume(
            &mut self,
            _ctx: CancellationToken,
        ) -> Result<(mpsc::Receiver<NullMessage>, mpsc::Receiver<DynError>), DynError> {
            Err("not consumable".into())
        }

        async fn close(&mut self) -> Result<(), DynError> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct NullFactory;

    #[async_trait]
    impl ConsumerFactory for NullFactory {
        type Consumer = NullConsumer;

        async fn create(&self) -> Result<NullConsumer, DynError> {
            Ok(NullConsumer)
        }
    }

    #[derive(Debug)]
    struct NullProcessor;

    #[async_trait]
    impl Processor<NullMessage> for NullProcessor {
        async fn process(&self, _message: &NullMessage) -> Result<(), DynError> {
            Ok(())
        }
    }

    type TestBuilder = ComponentBuilder<NullFactory, NullProcessor>;

    #[test]
    fn test_valid_builder_produces_component_with_defaults() {
        let component = TestBuilder::new("orders")
            .with_consumer_factory(NullFactory)
            .with_processor(NullProcessor)
            .create()
            .expect("valid configuration");

        assert_eq!(component.name(), "orders");
        assert_eq!(component.strategy(), FailureStrategy::NackExit);
        assert_eq!(component.retries(), 0);
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = TestBuilder::new("   ")
            .with_consumer_factory(NullFactory)
            .with_processor(NullProcessor)
            .create()
            .expect_err("blank name");

        assert!(matches!(err, BuildError::EmptyName), "got {err:?}");
    }

    #[test]
    fn test_missing_processor_rejected() {
        let err = TestBuilder::new("orders")
            .with_consumer_factory(NullFactory)
            .create()
            .expect_err("missing processor");

        assert!(matches!(err, BuildError::MissingProcessor), "got {err:?}");
    }

    #[test]
    fn test_missing_factory_rejected() {
        let err = TestBuilder::new("orders")
            .with_processor(NullProcessor)
            .create()
            .expect_err("missing factory");

        assert!(
            matches!(err, BuildError::MissingConsumerFactory),
            "got {err:?}"
        );
    }

    #[test]
    fn test_violations_are_aggregated() {
        let err = TestBuilder::new("").create().expect_err("everything missing");

        match err {
            BuildError::Invalid(violations) => {
                assert_eq!(violations.len(), 3);
                assert!(matches!(violations[0], BuildError::EmptyName));
                assert!(matches!(violations[1], BuildError::MissingProcessor));
                assert!(matches!(violations[2], BuildError::MissingConsumerFactory));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_registered_subscriber_receives_events() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::time::Duration;

        use crate::events::{Event, EventKind};

        struct Counting {
            seen: Arc<AtomicUsize>,
        }

        #[async_trait]
        impl Subscribe for Counting {
            async fn on_event(&self, _event: &Event) {
                self.seen.fetch_add(1, Ordering::SeqCst);
            }

            fn name(&self) -> &'static str {
                "counting"
            }
        }

        let seen = Arc::new(AtomicUsize::new(0));
        let component = TestBuilder::new("orders")
            .with_consumer_factory(NullFactory)
            .with_processor(NullProcessor)
            .with_subscriber(Arc::new(Counting {
                seen: Arc::clone(&seen),
            }))
            .create()
            .expect("valid configuration");

        component
            .bus()
            .publish(Event::now(EventKind::Connected).with_component("orders"));

        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        while seen.load(Ordering::SeqCst) == 0 {
            assert!(
                tokio::time::Instant::now() < deadline,
                "event never reached the registered subscriber"
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn test_subscriber_released_after_component_drop() {
        use std::time::Duration;

        use crate::events::Event;

        struct Noop;

        #[async_trait]
        impl Subscribe for Noop {
            async fn on_event(&self, _event: &Event) {}

            fn name(&self) -> &'static str {
                "noop"
            }
        }

        let subscriber: Arc<dyn Subscribe> = Arc::new(Noop);
        let weak = Arc::downgrade(&subscriber);

        let component = TestBuilder::new("orders")
            .with_consumer_factory(NullFactory)
            .with_processor(NullProcessor)
            .with_subscriber(subscriber)
            .create()
            .expect("valid configuration");

        // The component's bus is the only remaining strong sender; dropping it
        // must wind down the fan-out task and its subscriber workers.
        drop(component);

        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        while weak.upgrade().is_some() {
            assert!(
                tokio::time::Instant::now() < deadline,
                "subscriber still referenced after component drop"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[test]
    fn test_shared_processor_is_accepted() {
        let processor = Arc::new(NullProcessor);

        let component = TestBuilder::new("orders")
            .with_consumer_factory(NullFactory)
            .with_processor(Arc::clone(&processor))
            .create()
            .expect("valid configuration");

        assert_eq!(component.name(), "orders");
    }
}
