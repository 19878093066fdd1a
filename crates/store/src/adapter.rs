use crate::capability::{Items, PreferenceStore};
use prefsync_core::{MasterState, Result};
use serde_json::Value;
use tracing::warn;

/// Storage key of the master switch.
pub const MASTER_KEY: &str = "toggleState";
/// Storage key of the theme index.
pub const THEME_INDEX_KEY: &str = "themeIndex";
/// Storage key of the active theme id.
pub const THEME_COLOR_KEY: &str = "themeColor";

/// Typed front for a [`PreferenceStore`]; every popup read and write goes
/// through here.
///
/// Writes are fire-and-forget from the caller's point of view: a rejected
/// write is logged and dropped, never retried and never surfaced.
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    pub async fn master_state(&self) -> Result<MasterState> {
        let items = self.store.get(&[MASTER_KEY]).await?;
        Ok(MasterState::from_stored(items.get(MASTER_KEY)))
    }

    /// Raw stored theme index; `None` when absent or not an integer.
    pub async fn theme_index(&self) -> Result<Option<i64>> {
        let items = self.store.get(&[THEME_INDEX_KEY]).await?;
        Ok(items.get(THEME_INDEX_KEY).and_then(Value::as_i64))
    }

    /// Preference record `key`; `None` when absent or not a boolean.
    pub async fn record(&self, key: &str) -> Result<Option<bool>> {
        let items = self.store.get(&[key]).await?;
        Ok(items.get(key).and_then(Value::as_bool))
    }

    // ── Writes ────────────────────────────────────────────────────────────────

    /// Write `items`, logging instead of failing.  Returns whether the write
    /// landed so callers and tests can observe it; nothing acts on `false`.
    pub async fn persist(&self, items: Items) -> bool {
        let keys = items.keys().cloned().collect::<Vec<_>>().join(", ");
        match self.store.set(items).await {
            Ok(()) => true,
            Err(e) => {
                warn!("[STORAGE] Could not set storage item for {keys}: {e}");
                false
            }
        }
    }

    pub async fn persist_record(&self, key: &str, value: bool) -> bool {
        self.persist(single(key, Value::Bool(value))).await
    }

    pub async fn persist_master(&self, enabled: bool) -> bool {
        self.persist(single(MASTER_KEY, Value::Bool(enabled))).await
    }

    /// First-run initialization: master enabled, theme reset.
    pub async fn persist_first_run(&self) -> bool {
        let mut items = single(MASTER_KEY, Value::Bool(true));
        items.insert(THEME_INDEX_KEY.to_string(), Value::from(0));
        self.persist(items).await
    }

    /// Theme selection: index plus the theme id for other extension parts.
    pub async fn persist_theme(&self, index: usize, id: &str) -> bool {
        let mut items = single(THEME_INDEX_KEY, Value::from(index));
        items.insert(THEME_COLOR_KEY.to_string(), Value::from(id));
        self.persist(items).await
    }
}

fn single(key: &str, value: Value) -> Items {
    let mut items = Items::new();
    items.insert(key.to_string(), value);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn absent_master_is_uninitialized() {
        let prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.master_state().await.unwrap(), MasterState::Uninitialized);
        assert_eq!(prefs.theme_index().await.unwrap(), None);
    }

    #[tokio::test]
    async fn first_run_sets_master_and_theme() {
        let store = MemoryStore::new();
        let prefs = Preferences::new(store.clone());
        assert!(prefs.persist_first_run().await);
        assert_eq!(store.value(MASTER_KEY), Some(json!(true)));
        assert_eq!(store.value(THEME_INDEX_KEY), Some(json!(0)));
    }

    #[tokio::test]
    async fn malformed_record_reads_as_absent() {
        let store = MemoryStore::with_items(
            json!({ "toggleNavState": "off" }).as_object().cloned().unwrap(),
        );
        let prefs = Preferences::new(store);
        assert_eq!(prefs.record("toggleNavState").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejected_write_is_swallowed() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let prefs = Preferences::new(store.clone());
        assert!(!prefs.persist_record("toggleNavState", false).await);
        assert_eq!(store.value("toggleNavState"), None);
    }

    #[tokio::test]
    async fn theme_write_carries_id() {
        let store = MemoryStore::new();
        let prefs = Preferences::new(store.clone());
        prefs.persist_theme(5, "eden").await;
        assert_eq!(store.value(THEME_INDEX_KEY), Some(json!(5)));
        assert_eq!(store.value(THEME_COLOR_KEY), Some(json!("eden")));
    }
}
