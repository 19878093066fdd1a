use prefsync_core::PopupView;
use tracing::warn;

/// Collapsible settings groups; at most one is open at a time.
#[derive(Debug, Clone, Default)]
pub struct Disclosure {
    count: usize,
    open:  Option<usize>,
}

impl Disclosure {
    pub fn new(count: usize) -> Self {
        Self { count, open: None }
    }

    pub fn open_group(&self) -> Option<usize> {
        self.open
    }

    /// Header click: closes the open group, then opens `group` unless it was
    /// the one just closed.
    pub fn click<V: PopupView>(&mut self, group: usize, view: &mut V) {
        if group >= self.count {
            warn!("Settings group {group} does not exist ({} groups)", self.count);
            return;
        }

        match self.open.take() {
            Some(open) if open == group => view.set_group_open(group, false),
            previous => {
                if let Some(open) = previous {
                    view.set_group_open(open, false);
                }
                view.set_group_open(group, true);
                self.open = Some(group);
            }
        }
    }
}
