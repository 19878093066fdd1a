//! Preference synchronization for the extension popup.
//!
//! Wires the toggle registry, the per-toggle synchronizer, the master switch
//! and the theme cycle engine into a [`Popup`] that is rebuilt from the store
//! on every open.

pub mod disclosure;
pub mod effects;
pub mod master;
pub mod popup;
pub mod registry;
pub mod sync;
pub mod view;

pub use disclosure::Disclosure;
pub use effects::{reload_monitored_tabs, RecordingIcon, RecordingTabs};
pub use master::{render_group, MasterSwitch};
pub use popup::Popup;
pub use registry::ToggleRegistry;
pub use sync::{Reconciled, ToggleSynchronizer};
pub use view::MemoryView;
