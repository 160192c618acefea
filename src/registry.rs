//! Unknown key registry
//!
//! Remembers which unrecognized key names have already been reported so
//! each one is surfaced at most once.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Set of key names already reported as unknown
#[derive(Debug, Default)]
pub struct UnknownKeyRegistry {
    seen: Mutex<HashSet<String>>,
}

impl UnknownKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`; returns `true` only for the first caller to see it.
    pub fn insert(&self, key: &str) -> bool {
        let mut seen = self.lock();
        if seen.contains(key) {
            return false;
        }
        seen.insert(key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget everything reported so far
    pub fn reset(&self) {
        self.lock().clear();
    }

    // The set is only ever grown by a single insert, so a panic elsewhere
    // cannot leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_insert_once() {
        let registry = UnknownKeyRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.insert("blorp"));
        assert!(!registry.insert("blorp"));
        assert!(registry.insert("zap"));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("blorp"));
    }

    #[test]
    fn test_reset() {
        let registry = UnknownKeyRegistry::new();
        registry.insert("blorp");
        registry.reset();
        assert!(registry.is_empty());
        assert!(registry.insert("blorp"));
    }

    #[test]
    fn test_concurrent_insert_reports_once() {
        let registry = UnknownKeyRegistry::new();
        let winners = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..100 {
                        if registry.insert("contended") {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                });
            }
        });

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }
}
