//! Registry of live streaming connections.

use axum::extract::ws::{Message, WebSocket};
use dashmap::DashMap;
use futures_util::stream::SplitSink;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::observability::metrics;

/// Identity assigned to a connection when it subscribes.
pub type SubscriberId = Uuid;

/// Outbound half of an upgraded socket.
pub type WsSink = SplitSink<WebSocket, Message>;

/// Sink shared between a connection's own task and the notifier.
pub type SharedSink<S> = Arc<Mutex<S>>;

/// Concurrent set of subscribers keyed by connection identity.
///
/// Generic over the sink so the fan-out can be exercised without sockets.
pub struct SubscriberSet<S = WsSink> {
    inner: DashMap<SubscriberId, SharedSink<S>>,
}

impl<S> SubscriberSet<S> {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Wrap a sink so it can be registered and used by its owner.
    pub fn share(sink: S) -> SharedSink<S> {
        Arc::new(Mutex::new(sink))
    }

    /// Register a sink under a fresh identity.
    pub fn insert(&self, sink: SharedSink<S>) -> SubscriberId {
        let id = Uuid::new_v4();
        self.inner.insert(id, sink);
        metrics::record_subscriber_added();
        tracing::debug!(subscriber = %id, total = self.inner.len(), "Subscriber registered");
        id
    }

    /// Drop a subscriber. Returns its sink if it was still registered.
    pub fn remove(&self, id: &SubscriberId) -> Option<SharedSink<S>> {
        let removed = self.inner.remove(id).map(|(_, sink)| sink);
        if removed.is_some() {
            metrics::record_subscriber_removed();
            tracing::debug!(subscriber = %id, total = self.inner.len(), "Subscriber removed");
        }
        removed
    }

    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.inner.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Copy out the current members. Shard locks are released on return.
    pub fn snapshot(&self) -> Vec<(SubscriberId, SharedSink<S>)> {
        self.inner
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }
}

impl<S> Default for SubscriberSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let set: SubscriberSet<Vec<u8>> = SubscriberSet::new();
        assert!(set.is_empty());

        let a = set.insert(SubscriberSet::share(Vec::new()));
        let b = set.insert(SubscriberSet::share(Vec::new()));
        assert_ne!(a, b);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));

        assert!(set.remove(&a).is_some());
        assert!(!set.contains(&a));
        assert_eq!(set.len(), 1);

        // Second removal is a no-op
        assert!(set.remove(&a).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_subscriber_gauge_tracks_membership() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            let set: SubscriberSet<Vec<u8>> = SubscriberSet::new();
            let a = set.insert(SubscriberSet::share(Vec::new()));
            set.insert(SubscriberSet::share(Vec::new()));
            set.insert(SubscriberSet::share(Vec::new()));
            set.remove(&a);
            // Unknown or already removed ids leave the gauge alone
            set.remove(&a);
            set.remove(&Uuid::new_v4());
        });

        let rendered = handle.render();
        assert!(
            rendered.lines().any(|line| line == "probe_subscribers 2"),
            "{rendered}"
        );
    }

    #[tokio::test]
    async fn test_snapshot_shares_sinks() {
        let set: SubscriberSet<Vec<u8>> = SubscriberSet::new();
        let handle = SubscriberSet::share(Vec::new());
        let id = set.insert(handle.clone());

        let snapshot = set.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].0, id);

        snapshot[0].1.lock().await.push(7);
        assert_eq!(*handle.lock().await, vec![7]);

        // Removing after the snapshot leaves the snapshot intact
        set.remove(&id);
        assert!(set.is_empty());
        assert_eq!(snapshot.len(), 1);
    }
}
