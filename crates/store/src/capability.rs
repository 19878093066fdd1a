use prefsync_core::Result;
use serde_json::{Map, Value};
use std::future::Future;

/// Flat key → JSON value mapping, the unit of every store read and write.
pub type Items = Map<String, Value>;

/// Async key-value capability backing the popup's preferences.
///
/// Mirrors the browser's synced extension storage: a flat namespace, no
/// transactions across calls, absent keys simply missing from `get` results.
pub trait PreferenceStore {
    /// Fetch the subset of `keys` that exist.
    fn get(&self, keys: &[&str]) -> impl Future<Output = Result<Items>> + Send;

    /// Merge `items` into the store.
    fn set(&self, items: Items) -> impl Future<Output = Result<()>> + Send;
}
