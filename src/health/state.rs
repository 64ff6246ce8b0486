//! Service health flag.
//!
//! # States
//! - Enabled: `/health` answers 200 "healthy"
//! - Disabled: `/health` answers 503 "unhealthy"
//!
//! # State Transitions
//! ```text
//! Enabled ←→ Disabled: toggle() or set_enabled()
//! ```

use std::sync::{PoisonError, RwLock};

use crate::observability::metrics;

/// Reader/writer guarded boolean describing whether the service reports healthy.
#[derive(Debug)]
pub struct FlagStore {
    enabled: RwLock<bool>,
}

impl FlagStore {
    /// Create a store holding `enabled`. Does not log.
    pub fn new(enabled: bool) -> Self {
        metrics::record_flag(enabled);
        Self {
            enabled: RwLock::new(enabled),
        }
    }

    /// Current value, read under the shared lock.
    pub fn get(&self) -> bool {
        // A bool cannot be left half-written, so a poisoned lock is still usable.
        *self.enabled.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Overwrite the flag under the exclusive lock.
    pub fn set_enabled(&self, enabled: bool) {
        let mut guard = self.enabled.write().unwrap_or_else(PoisonError::into_inner);
        *guard = enabled;
        log_change(enabled);
    }

    /// Flip the flag under the exclusive lock and return the new value.
    pub fn toggle(&self) -> bool {
        let mut guard = self.enabled.write().unwrap_or_else(PoisonError::into_inner);
        *guard = !*guard;
        let enabled = *guard;
        drop(guard);

        metrics::record_toggle();
        log_change(enabled);
        enabled
    }
}

impl Default for FlagStore {
    /// Services start healthy.
    fn default() -> Self {
        Self::new(true)
    }
}

fn log_change(enabled: bool) {
    metrics::record_flag(enabled);
    if enabled {
        tracing::info!(enabled, "Health check set to enabled");
    } else {
        tracing::info!(enabled, "Health check set to disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_default_is_healthy() {
        assert!(FlagStore::default().get());
    }

    #[test]
    fn test_toggle_parity() {
        for initial in [true, false] {
            let store = FlagStore::new(initial);
            for count in 1..=7 {
                let returned = store.toggle();
                let expected = initial ^ (count % 2 == 1);
                assert_eq!(returned, expected);
                assert_eq!(store.get(), expected);
            }
        }
    }

    #[test]
    fn test_set_enabled_is_idempotent() {
        let store = FlagStore::new(true);
        store.set_enabled(false);
        store.set_enabled(false);
        assert!(!store.get());
        store.set_enabled(true);
        assert!(store.get());
    }

    #[test]
    fn test_concurrent_toggles_are_not_lost() {
        let store = Arc::new(FlagStore::new(true));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..101 {
                        store.toggle();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        // 808 flips in total: even, so back to the start
        assert!(store.get());
    }
}
