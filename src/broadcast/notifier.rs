//! Fan-out of the current flag value to every subscriber.

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt};
use std::fmt::Display;

use crate::broadcast::subscribers::SubscriberSet;
use crate::health::FlagStore;
use crate::observability::metrics;

/// Outcome of one fan-out pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Wire form of a status push: a bare JSON boolean in a text frame.
pub fn status_message(enabled: bool) -> Message {
    Message::Text(serde_json::Value::Bool(enabled).to_string().into())
}

/// Push the flag's current value to every registered subscriber.
///
/// The flag is read after each subscriber's sink is locked, so whichever
/// fan-out reaches a subscriber last delivers the latest value.
/// Sends run one after another, so a slow peer delays the rest. A failed
/// send is logged and skipped; the subscriber stays registered until its own
/// read loop notices the broken connection.
pub async fn notify_clients<S>(flag: &FlagStore, subscribers: &SubscriberSet<S>) -> NotifyReport
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let mut report = NotifyReport::default();

    for (id, sink) in subscribers.snapshot() {
        let mut sink = sink.lock().await;
        let enabled = flag.get();
        match sink.send(status_message(enabled)).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                metrics::record_notify_failure();
                tracing::warn!(subscriber = %id, error = %e, "Error notifying client");
            }
        }
    }

    tracing::debug!(
        delivered = report.delivered,
        failed = report.failed,
        "Status fan-out complete"
    );
    report
}
