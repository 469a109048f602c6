// File: src/shared.rs
use crate::core::engine::CategoryResolver;
use crate::core::types::{CategoryKey, Suggestion};
use crate::error::Result;
use crate::learning::LearningTable;
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle for using one resolver from several threads.
///
/// Suggestions share the read lock. Learning takes the write lock, so two sessions
/// confirming the same item never lose an increment.
#[derive(Clone)]
pub struct SharedResolver {
    inner: Arc<RwLock<CategoryResolver>>,
}

impl SharedResolver {
    pub fn new(resolver: CategoryResolver) -> Self {
        Self { inner: Arc::new(RwLock::new(resolver)) }
    }

    // Classification cannot leave the resolver half-updated, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, CategoryResolver> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CategoryResolver> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.read().normalize(raw)
    }

    pub fn suggest_category(&self, raw: &str) -> CategoryKey {
        self.read().suggest_category(raw)
    }

    pub fn explain(&self, raw: &str) -> Suggestion {
        self.read().explain(raw)
    }

    pub fn similar_items(&self, raw: &str) -> BTreeSet<String> {
        self.read().similar_items(raw)
    }

    pub fn learn_category(&self, raw: &str, category: &str) -> Option<u64> {
        self.write().learn_category(raw, category)
    }

    pub fn snapshot(&self) -> LearningTable {
        self.read().learning().clone()
    }

    pub fn save_learning(&self) -> Result<()> {
        self.read().save_learning()
    }

    /// Runs `f` with exclusive access, for multi-step updates.
    pub fn with_resolver<R>(&self, f: impl FnOnce(&mut CategoryResolver) -> R) -> R {
        f(&mut self.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_learning_loses_no_updates() {
        let shared = SharedResolver::new(CategoryResolver::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        shared.learn_category("Tomatoes", "canned");
                        let _ = shared.suggest_category("tomato");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let table = shared.snapshot();
        assert_eq!(table.counts("tomato").and_then(|c| c.get("canned")), Some(&2000));
        assert_eq!(shared.suggest_category("tomato"), "canned");
        assert_eq!(shared.normalize("Tomatoes"), "tomato");
        assert!(shared.similar_items("tomato").contains("tomatoes"));
    }

    #[test]
    fn test_with_resolver_gives_exclusive_access() {
        let shared = SharedResolver::new(CategoryResolver::new());
        let count = shared.with_resolver(|resolver| {
            resolver.learn_category("oats", "breakfast");
            resolver.learn_category("oats", "breakfast")
        });
        assert_eq!(count, Some(2));
        assert_eq!(shared.explain("Oats").category, "breakfast");
    }
}
