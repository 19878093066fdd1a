use prefsync_config::ToggleBinding;
use prefsync_store::MASTER_KEY;

/// Ordered feature toggles of one popup.  A binding's position is its slot,
/// the index the view uses for both the control and its container.
#[derive(Debug, Clone, Default)]
pub struct ToggleRegistry {
    bindings: Vec<ToggleBinding>,
}

impl ToggleRegistry {
    pub fn new(bindings: Vec<ToggleBinding>) -> Self {
        Self { bindings }
    }

    /// Storage key of the master enable switch.
    pub fn master_key(&self) -> &'static str {
        MASTER_KEY
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn binding(&self, slot: usize) -> Option<&ToggleBinding> {
        self.bindings.get(slot)
    }

    /// Slot of the toggle stored under `key`.
    pub fn slot_of(&self, key: &str) -> Option<usize> {
        self.bindings.iter().position(|b| b.key == key)
    }

    /// Slots of the toggles listed under settings group `group`.
    pub fn slots_in_group(&self, group: usize) -> Vec<usize> {
        self.bindings
            .iter()
            .enumerate()
            .filter(|(_, b)| b.group == Some(group))
            .map(|(slot, _)| slot)
            .collect()
    }

    /// `(slot, key)` pairs in display order.
    pub fn keys(&self) -> impl Iterator<Item = (usize, &str)> {
        self.bindings.iter().enumerate().map(|(slot, b)| (slot, b.key.as_str()))
    }
}
