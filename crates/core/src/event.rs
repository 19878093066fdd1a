use crate::state::Step;

/// Every user or store event a popup instance reacts to.
///
/// Sources:
/// - Popup controls   → `PowerClicked`, `ToggleClicked`, `ThemeStep`, `ReloadClicked`
/// - Settings headers → `GroupHeaderClicked`
/// - Store watcher    → `StoreChanged`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // ── Master switch ─────────────────────────────────────────────────────────
    /// The power control was clicked; flips the master switch.
    PowerClicked,

    // ── Feature toggles ───────────────────────────────────────────────────────
    /// A toggle container was clicked (carries the registry slot).
    ToggleClicked(usize),

    // ── Theme stepper ─────────────────────────────────────────────────────────
    /// Previous / next arrow of the theme stepper.
    ThemeStep(Step),

    // ── Reload affordance ─────────────────────────────────────────────────────
    /// Reload the monitored tabs and close the popup.
    ReloadClicked,

    // ── Presentation ──────────────────────────────────────────────────────────
    /// A collapsible settings-group header was clicked (carries the group index).
    GroupHeaderClicked(usize),

    // ── Store ─────────────────────────────────────────────────────────────────
    /// The backing store was modified outside this popup instance.
    StoreChanged,
}
