use crate::capability::{Items, PreferenceStore};
use prefsync_core::{PrefError, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// In-process store.  Clones share the same contents, which is how several
/// popup instances observe one another's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items:       Arc<Mutex<Items>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `items`.
    pub fn with_items(items: Items) -> Self {
        Self {
            items:       Arc::new(Mutex::new(items)),
            fail_writes: Arc::default(),
        }
    }

    /// Make every subsequent `set` reject (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Copy of the whole store.
    pub fn snapshot(&self) -> Items {
        self.lock().clone()
    }

    /// Current value of `key`, if any.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Items> {
        // A panicking writer cannot leave the map half-updated.
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PreferenceStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Items> {
        let items = self.lock();
        Ok(keys
            .iter()
            .filter_map(|key| items.get(*key).map(|v| ((*key).to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Items) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PrefError::Store("write rejected".into()));
        }
        self.lock().extend(items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_returns_only_present_keys() {
        let store = MemoryStore::new();
        store
            .set(json!({ "toggleState": true }).as_object().cloned().unwrap())
            .await
            .unwrap();

        let got = store.get(&["toggleState", "themeIndex"]).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got["toggleState"], json!(true));
    }

    #[tokio::test]
    async fn clones_share_contents() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set(json!({ "themeIndex": 4 }).as_object().cloned().unwrap())
            .await
            .unwrap();
        assert_eq!(b.value("themeIndex"), Some(json!(4)));
    }

    #[tokio::test]
    async fn failing_writes_leave_contents_untouched() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let res = store
            .set(json!({ "themeIndex": 1 }).as_object().cloned().unwrap())
            .await;
        assert!(res.is_err());
        assert!(store.snapshot().is_empty());
    }
}
