use prefsync_core::{ControlState, PopupView};
use serde::Serialize;

/// Headless [`PopupView`] that records the rendered state.
///
/// Starts the way freshly loaded popup markup does: every toggle off but
/// accepting input, every container interactive, reload hidden, no theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemoryView {
    pub toggles:         Vec<ControlState>,
    pub containers:      Vec<bool>,
    pub reload_visible:  bool,
    pub body_classes:    Vec<String>,
    pub theme_label:     String,
    pub logo:            String,
    pub power_asset:     String,
    pub power_hoverable: bool,
    pub open_groups:     Vec<bool>,
    pub closed:          bool,
}

impl MemoryView {
    pub fn new(toggles: usize, groups: usize) -> Self {
        Self {
            toggles: vec![ControlState { on: false, enabled: true }; toggles],
            containers: vec![true; toggles],
            open_groups: vec![false; groups],
            ..Self::default()
        }
    }

    /// Slots currently rendered "on".
    pub fn on_slots(&self) -> Vec<usize> {
        self.toggles
            .iter()
            .enumerate()
            .filter_map(|(slot, c)| c.on.then_some(slot))
            .collect()
    }
}

impl PopupView for MemoryView {
    fn set_toggle_on(&mut self, slot: usize, on: bool) {
        if let Some(control) = self.toggles.get_mut(slot) {
            control.on = on;
        }
    }

    fn set_toggle_enabled(&mut self, slot: usize, enabled: bool) {
        if let Some(control) = self.toggles.get_mut(slot) {
            control.enabled = enabled;
        }
    }

    fn set_container_interactive(&mut self, slot: usize, interactive: bool) {
        if let Some(container) = self.containers.get_mut(slot) {
            *container = interactive;
        }
    }

    fn set_reload_visible(&mut self, visible: bool) {
        self.reload_visible = visible;
    }

    fn add_body_class(&mut self, class: &str) {
        if !self.body_classes.iter().any(|c| c == class) {
            self.body_classes.push(class.to_string());
        }
    }

    fn remove_body_class(&mut self, class: &str) {
        self.body_classes.retain(|c| c != class);
    }

    fn set_theme_label(&mut self, markup: &str) {
        self.theme_label = markup.to_string();
    }

    fn set_logo(&mut self, path: &str) {
        self.logo = path.to_string();
    }

    fn set_power_asset(&mut self, path: &str) {
        self.power_asset = path.to_string();
    }

    fn set_power_hoverable(&mut self, hoverable: bool) {
        self.power_hoverable = hoverable;
    }

    fn set_group_open(&mut self, group: usize, open: bool) {
        if let Some(state) = self.open_groups.get_mut(group) {
            *state = open;
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
