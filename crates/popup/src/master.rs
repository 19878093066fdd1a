use crate::registry::ToggleRegistry;
use crate::sync::ToggleSynchronizer;
use prefsync_core::{ActionIcon, MasterState, PopupView, Result};
use prefsync_store::{PreferenceStore, Preferences};
use prefsync_theme::{set_action_icon, ThemeCycle};
use tracing::info;

/// The master enable switch of one popup instance.
///
/// Lifecycle: `Uninitialized → Enabled` once, on the first popup open ever;
/// afterwards `Enabled ⇄ Disabled` through the power control only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasterSwitch {
    state: MasterState,
}

impl MasterSwitch {
    pub fn state(&self) -> MasterState {
        self.state
    }

    /// Whether toggle containers currently accept clicks.
    pub fn interactive(&self) -> bool {
        self.state != MasterState::Disabled
    }

    /// Apply the stored master state on popup open.
    ///
    /// A never-initialized switch is enabled and persisted together with a
    /// reset theme index; every toggle renders "on" without consulting its
    /// record.  Steady states render the group and then reconcile each toggle.
    pub async fn load<S, V>(
        &mut self,
        stored: MasterState,
        theme: &ThemeCycle,
        registry: &ToggleRegistry,
        prefs: &Preferences<S>,
        view: &mut V,
    ) -> Result<()>
    where
        S: PreferenceStore,
        V: PopupView,
    {
        let sync = ToggleSynchronizer::new(prefs);

        match stored {
            MasterState::Uninitialized => {
                info!("First run: enabling with default theme");
                render_group(registry, view, MasterState::Enabled);
                view.set_power_hoverable(true);
                prefs.persist_first_run().await;
                self.state = MasterState::Enabled;
                sync.ensure_records(registry).await?;
            }
            MasterState::Enabled => {
                self.state = stored;
                view.set_power_hoverable(true);
                render_group(registry, view, stored);
                sync.reconcile_all(registry, stored, view).await?;
            }
            MasterState::Disabled => {
                self.state = stored;
                view.set_power_asset(theme.power_off_asset());
                view.set_power_hoverable(false);
                render_group(registry, view, stored);
                sync.reconcile_all(registry, stored, view).await?;
            }
        }
        Ok(())
    }

    /// Power control click: flip the stored switch and fan the new state out
    /// to the icon, the power control, the reload affordance and every toggle.
    ///
    /// Toggles are re-rendered to the group state first and then reconciled,
    /// so individually disabled features stay off after re-enabling.
    pub async fn toggle<S, V, I>(
        &mut self,
        theme: &ThemeCycle,
        registry: &ToggleRegistry,
        prefs: &Preferences<S>,
        view: &mut V,
        icon: &I,
    ) -> Result<MasterState>
    where
        S: PreferenceStore,
        V: PopupView,
        I: ActionIcon,
    {
        let target = prefs.master_state().await?.flipped();
        let enabling = target.is_enabled();

        if enabling {
            view.set_power_asset(&theme.power_asset());
        } else {
            view.set_power_asset(theme.power_off_asset());
        }
        view.set_reload_visible(!enabling);
        view.set_power_hoverable(enabling);
        render_group(registry, view, target);
        self.state = target;

        let icon_path = if enabling {
            theme.icon_path()
        } else {
            theme.disabled_icon_path().to_string()
        };
        set_action_icon(icon, &icon_path).await;

        prefs.persist_master(enabling).await;
        info!("Master switch {}", if enabling { "enabled" } else { "disabled" });

        ToggleSynchronizer::new(prefs)
            .reconcile_all(registry, target, view)
            .await?;
        Ok(target)
    }
}

/// Render every toggle and container for a master state: fully on and
/// interactive unless disabled, fully off, input-disabled and
/// non-interactive when disabled.
pub fn render_group<V: PopupView>(registry: &ToggleRegistry, view: &mut V, state: MasterState) {
    let enabled = state != MasterState::Disabled;
    for slot in 0..registry.len() {
        view.set_toggle_on(slot, enabled);
        view.set_toggle_enabled(slot, enabled);
        view.set_container_interactive(slot, enabled);
    }
}
