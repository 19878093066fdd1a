use crate::registry::ToggleRegistry;
use prefsync_core::{MasterState, PopupView, Result};
use prefsync_store::{PreferenceStore, Preferences};
use tracing::debug;

/// What reconciliation did to one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The record was missing and has been created as enabled; no render.
    Created,
    /// Rendered "on" (record true, master enabled).
    On,
    /// Rendered "off" (record false).
    Off,
    /// Record true but master not enabled; rendering left as is.
    Unchanged,
}

/// Keeps one popup's toggle controls in line with their preference records.
///
/// The only writer of feature keys within a popup instance.
#[derive(Debug)]
pub struct ToggleSynchronizer<'a, S> {
    prefs: &'a Preferences<S>,
}

impl<'a, S: PreferenceStore> ToggleSynchronizer<'a, S> {
    pub fn new(prefs: &'a Preferences<S>) -> Self {
        Self { prefs }
    }

    /// Render toggle `slot` from its stored record under the popup's own
    /// `master` state.  Never rewrites an existing record; a missing one is
    /// created as `true`.
    ///
    /// `master` is what the popup rendered, not a fresh store read, so a
    /// rejected master write cannot turn toggles back on.
    pub async fn reconcile_on_load<V: PopupView>(
        &self,
        slot: usize,
        key: &str,
        master: MasterState,
        view: &mut V,
    ) -> Result<Reconciled> {
        let value = self.prefs.record(key).await?;

        let outcome = match value {
            None => {
                self.prefs.persist_record(key, true).await;
                Reconciled::Created
            }
            Some(true) if master.is_enabled() => {
                view.set_toggle_on(slot, true);
                Reconciled::On
            }
            Some(true) => Reconciled::Unchanged,
            Some(false) => {
                view.set_toggle_on(slot, false);
                Reconciled::Off
            }
        };

        debug!("Reconciled '{key}': {outcome:?}");
        Ok(outcome)
    }

    /// Reconcile every registered toggle, in slot order.
    pub async fn reconcile_all<V: PopupView>(
        &self,
        registry: &ToggleRegistry,
        master: MasterState,
        view: &mut V,
    ) -> Result<Vec<Reconciled>> {
        let mut outcomes = Vec::with_capacity(registry.len());
        for (slot, key) in registry.keys() {
            outcomes.push(self.reconcile_on_load(slot, key, master, view).await?);
        }
        Ok(outcomes)
    }

    /// Create missing records as `true` without touching the view.
    pub async fn ensure_records(&self, registry: &ToggleRegistry) -> Result<()> {
        for (_, key) in registry.keys() {
            if self.prefs.record(key).await?.is_none() {
                self.prefs.persist_record(key, true).await;
            }
        }
        Ok(())
    }

    /// Flip toggle `slot`: render the new value, reveal the reload
    /// affordance, then write.  Returns the new value.
    ///
    /// A missing record counts as `false`.  Rapid clicks are not serialized;
    /// the view always shows the latest click and the last write wins.
    pub async fn on_click<V: PopupView>(
        &self,
        slot: usize,
        key: &str,
        view: &mut V,
    ) -> Result<bool> {
        let next = !self.prefs.record(key).await?.unwrap_or(false);

        view.set_toggle_on(slot, next);
        view.set_reload_visible(true);
        self.prefs.persist_record(key, next).await;

        debug!("Toggled '{key}' to {next}");
        Ok(next)
    }
}
