use crate::error::Result;
use std::future::Future;

/// The popup's rendered controls, as seen by the synchronization engine.
///
/// Implementations only mutate presentation; they never touch the store.
/// Toggle controls and their containers are addressed by registry slot.
pub trait PopupView {
    /// Render toggle `slot` as "on" or "off".
    fn set_toggle_on(&mut self, slot: usize, on: bool);

    /// Allow or block input on toggle `slot`.
    fn set_toggle_enabled(&mut self, slot: usize, enabled: bool);

    /// Make the container of toggle `slot` pointer-interactive or not.
    fn set_container_interactive(&mut self, slot: usize, interactive: bool);

    /// Show or hide the "reload required" affordance.
    fn set_reload_visible(&mut self, visible: bool);

    /// Add a class to the document body.
    fn add_body_class(&mut self, class: &str);

    /// Remove a class from the document body.  Unknown classes are ignored.
    fn remove_body_class(&mut self, class: &str);

    /// Replace the theme label markup.
    fn set_theme_label(&mut self, markup: &str);

    /// Point the logo image at `path`.
    fn set_logo(&mut self, path: &str);

    /// Point the power control image at `path`.
    fn set_power_asset(&mut self, path: &str);

    /// Toggle the power control's hover affordance.
    fn set_power_hoverable(&mut self, hoverable: bool);

    /// Expand or collapse settings group `group`.
    fn set_group_open(&mut self, group: usize, open: bool);

    /// Close the popup window.
    fn close(&mut self);
}

/// The browser action icon / badge.
pub trait ActionIcon {
    /// Point the 48px action icon at `path`.
    fn set_icon(&self, path: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Opaque browser tab identifier.
pub type TabId = u32;

/// Tab query / reload capability.
pub trait TabHost {
    /// Tabs whose URL matches any of `patterns`.
    fn query(&self, patterns: &[String]) -> impl Future<Output = Result<Vec<TabId>>> + Send;

    /// Reload a single tab.
    fn reload(&self, tab: TabId) -> impl Future<Output = Result<()>> + Send;
}
