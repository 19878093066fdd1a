//! Preference persistence for the popup.
//!
//! - [`PreferenceStore`]: the async key-value capability
//! - [`MemoryStore`] / [`FileStore`]: in-process and on-disk backings
//! - [`Preferences`]: typed adapter with log-and-continue writes
//! - [`StoreWatcher`]: change notifications for the on-disk store

pub mod adapter;
pub mod capability;
pub mod file;
pub mod memory;
pub mod watcher;

pub use adapter::{Preferences, MASTER_KEY, THEME_COLOR_KEY, THEME_INDEX_KEY};
pub use capability::{Items, PreferenceStore};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use watcher::StoreWatcher;
