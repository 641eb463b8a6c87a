//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [connect-failed] component=orders attempt=1 err="broker unreachable"
//! [retry] component=orders attempt=1 delay=200ms err="broker unreachable"
//! [connected] component=orders attempt=2
//! [acked] component=orders
//! [process-failed] component=orders err="bad payload"
//! [nacked] component=orders
//! [closed] component=orders
//! [stopped] component=orders reason="run_process_failed"
//! ```

use async_trait::async_trait;
use std::time::Duration;

use crate::events::{Event, EventKind};
use crate::subscribers::subscriber::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Intended for development and demos —
/// implement a custom [`Subscribe`] for structured logging or metrics.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ConnectFailed => {
                println!(
                    "[connect-failed] component={:?} attempt={:?} err={:?}",
                    e.component, e.attempt, e.reason
                );
            }
            EventKind::RetryScheduled => {
                let delay = e.delay_ms.map(|ms| Duration::from_millis(ms.into()));
                println!(
                    "[retry] component={:?} attempt={:?} delay={:?} err={:?}",
                    e.component, e.attempt, delay, e.reason
                );
            }
            EventKind::Connected => {
                println!(
                    "[connected] component={:?} attempt={:?}",
                    e.component, e.attempt
                );
            }
            EventKind::MessageAcked => {
                println!("[acked] component={:?}", e.component);
            }
            EventKind::MessageNacked => {
                println!("[nacked] component={:?}", e.component);
            }
            EventKind::ProcessFailed => {
                println!(
                    "[process-failed] component={:?} err={:?}",
                    e.component, e.reason
                );
            }
            EventKind::ConsumerError => {
                println!(
                    "[consumer-error] component={:?} err={:?}",
                    e.component, e.reason
                );
            }
            EventKind::ConsumerClosed => {
                println!("[closed] component={:?}", e.component);
            }
            EventKind::RunStopped => {
                println!(
                    "[stopped] component={:?} reason={:?}",
                    e.component, e.reason
                );
            }
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber] component={:?} reason={:?}",
                    e.component, e.reason
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
