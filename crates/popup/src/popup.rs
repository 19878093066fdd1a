use crate::disclosure::Disclosure;
use crate::effects::reload_monitored_tabs;
use crate::master::MasterSwitch;
use crate::registry::ToggleRegistry;
use crate::sync::ToggleSynchronizer;
use prefsync_config::PopupConfig;
use prefsync_core::{ActionIcon, MasterState, Message, PopupView, PrefError, Result, Step, TabHost};
use prefsync_store::{PreferenceStore, Preferences};
use prefsync_theme::{ThemeCycle, ThemeTable};
use tracing::{debug, error, info};

/// One open popup.
///
/// Built from scratch on every open by re-reading the store; nothing is
/// shared with other popup instances except the store itself.
pub struct Popup<S, V, I, T> {
    prefs:        Preferences<S>,
    registry:     ToggleRegistry,
    master:       MasterSwitch,
    theme:        ThemeCycle,
    groups:       Disclosure,
    tab_patterns: Vec<String>,
    view:         V,
    icon:         I,
    tabs:         T,
}

impl<S, V, I, T> std::fmt::Debug for Popup<S, V, I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Popup")
            .field("master", &self.master.state())
            .field("theme_index", &self.theme.index())
            .field("toggles", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl<S, V, I, T> Popup<S, V, I, T>
where
    S: PreferenceStore,
    V: PopupView,
    I: ActionIcon,
    T: TabHost,
{
    /// Open a popup: read the theme index, then the master switch, and
    /// project both onto `view`.
    pub async fn open(
        config: &PopupConfig,
        table: ThemeTable,
        store: S,
        view: V,
        icon: I,
        tabs: T,
    ) -> Result<Self> {
        let mut popup = Self {
            prefs:        Preferences::new(store),
            registry:     ToggleRegistry::new(config.toggles.clone()),
            master:       MasterSwitch::default(),
            theme:        ThemeCycle::new(table, config.assets.clone(), None),
            groups:       Disclosure::new(config.groups.len()),
            tab_patterns: config.tabs.url_patterns.clone(),
            view,
            icon,
            tabs,
        };
        popup.rehydrate().await?;
        info!(
            "Popup opened ({:?}, theme '{}')",
            popup.master.state(),
            popup.theme.current().id
        );
        Ok(popup)
    }

    /// Re-read the store and re-project it, e.g. after another popup wrote.
    pub async fn refresh(&mut self) -> Result<()> {
        debug!("Store changed; refreshing popup");
        self.rehydrate().await
    }

    async fn rehydrate(&mut self) -> Result<()> {
        let stored_index = self.prefs.theme_index().await?;
        let stored_master = self.prefs.master_state().await?;

        // First run resets the theme together with enabling the switch.
        let index = match stored_master {
            MasterState::Uninitialized => Some(0),
            _ => stored_index,
        };
        let theme = ThemeCycle::new(*self.theme.table(), self.theme.assets().clone(), index);

        // Adopt the new index only once the master projection went through.
        self.master
            .load(stored_master, &theme, &self.registry, &self.prefs, &mut self.view)
            .await?;
        self.theme = theme;
        self.theme
            .render(self.master.state(), &mut self.view, &self.icon)
            .await;
        Ok(())
    }

    // ── Event handling ────────────────────────────────────────────────────────

    /// Route a UI or store event.  Errors are logged, never propagated: the
    /// popup keeps whatever it already rendered.
    pub async fn handle(&mut self, message: Message) {
        if let Err(e) = self.dispatch(message).await {
            error!("Handling {message:?} failed: {e}");
        }
    }

    pub async fn dispatch(&mut self, message: Message) -> Result<()> {
        match message {
            Message::PowerClicked => {
                self.click_power().await?;
            }
            Message::ToggleClicked(slot) => {
                if !self.master.interactive() {
                    debug!("Toggle {slot} clicked while disabled; ignored");
                    return Ok(());
                }
                self.click_toggle(slot).await?;
            }
            Message::ThemeStep(step) => {
                self.step_theme(step).await;
            }
            Message::ReloadClicked => {
                self.reload().await;
            }
            Message::GroupHeaderClicked(group) => {
                self.groups.click(group, &mut self.view);
            }
            Message::StoreChanged => self.refresh().await?,
        }
        Ok(())
    }

    /// Flip the master switch.
    pub async fn click_power(&mut self) -> Result<MasterState> {
        self.master
            .toggle(&self.theme, &self.registry, &self.prefs, &mut self.view, &self.icon)
            .await
    }

    /// Flip feature toggle `slot`; returns its new value.
    pub async fn click_toggle(&mut self, slot: usize) -> Result<bool> {
        let key = self
            .registry
            .binding(slot)
            .map(|b| b.key.clone())
            .ok_or_else(|| PrefError::Config(format!("no toggle in slot {slot}")))?;

        ToggleSynchronizer::new(&self.prefs)
            .on_click(slot, &key, &mut self.view)
            .await
    }

    /// Flip the feature toggle stored under `key`.
    pub async fn click_toggle_key(&mut self, key: &str) -> Result<bool> {
        let slot = self
            .registry
            .slot_of(key)
            .ok_or_else(|| PrefError::Config(format!("unknown toggle '{key}'")))?;
        self.click_toggle(slot).await
    }

    /// Move the theme stepper; returns the new theme index.
    pub async fn step_theme(&mut self, step: Step) -> usize {
        self.theme
            .step(step, self.master.state(), &mut self.view, &self.icon, &self.prefs)
            .await
    }

    /// Reload the monitored tabs and close the popup; returns the tab count.
    pub async fn reload(&mut self) -> usize {
        reload_monitored_tabs(&self.tabs, &self.tab_patterns, &mut self.view).await
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn master_state(&self) -> MasterState {
        self.master.state()
    }

    pub fn theme_index(&self) -> usize {
        self.theme.index()
    }

    pub fn registry(&self) -> &ToggleRegistry {
        &self.registry
    }

    pub fn open_group(&self) -> Option<usize> {
        self.groups.open_group()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        self.prefs.store()
    }

    /// Tear the popup down, handing back its view.
    pub fn into_view(self) -> V {
        self.view
    }
}
