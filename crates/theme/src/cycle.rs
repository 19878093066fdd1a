use crate::table::{ThemeDefinition, ThemeTable};
use prefsync_config::AssetConfig;
use prefsync_core::{ActionIcon, MasterState, PopupView, Step};
use prefsync_store::{PreferenceStore, Preferences};
use tracing::{debug, info};

/// Owns the popup's theme index and every artifact derived from it.
///
/// The index read at load (or computed by the last step) is authoritative for
/// the rest of the popup instance; the engine never reads back its own writes.
#[derive(Debug, Clone)]
pub struct ThemeCycle {
    table:  ThemeTable,
    assets: AssetConfig,
    index:  usize,
}

impl ThemeCycle {
    /// Engine positioned at the stored index (normalised onto `table`).
    pub fn new(table: ThemeTable, assets: AssetConfig, stored: Option<i64>) -> Self {
        let index = table.normalize(stored);
        Self { table, assets, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &ThemeDefinition {
        self.table.get(self.index)
    }

    pub fn table(&self) -> &ThemeTable {
        &self.table
    }

    pub fn assets(&self) -> &AssetConfig {
        &self.assets
    }

    // ── Derived artifacts ─────────────────────────────────────────────────────

    pub fn icon_path(&self) -> String {
        AssetConfig::expand(&self.assets.icon, self.current().id, self.index)
    }

    pub fn disabled_icon_path(&self) -> &str {
        &self.assets.disabled_icon
    }

    pub fn power_asset(&self) -> String {
        AssetConfig::expand(&self.assets.power_on, self.current().id, self.index)
    }

    pub fn power_off_asset(&self) -> &str {
        &self.assets.power_off
    }

    pub fn logo_path(&self) -> String {
        AssetConfig::expand(&self.assets.logo, self.current().id, self.index)
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Project the current index onto the popup: exactly one theme class on
    /// the body, label, logo, and while `master` is enabled the action icon
    /// and power control image.
    pub async fn render<V, I>(&self, master: MasterState, view: &mut V, icon: &I)
    where
        V: PopupView,
        I: ActionIcon,
    {
        let current = self.current().class();
        for theme in self.table.iter().filter(|t| t.class() != current) {
            view.remove_body_class(theme.class());
        }
        view.add_body_class(current);
        self.render_artifacts(master, view, icon).await;
    }

    /// Move one theme forward or back and persist the new index.
    pub async fn step<S, V, I>(
        &mut self,
        step: Step,
        master: MasterState,
        view: &mut V,
        icon: &I,
        prefs: &Preferences<S>,
    ) -> usize
    where
        S: PreferenceStore,
        V: PopupView,
        I: ActionIcon,
    {
        let old = self.current().class();
        self.index = self.table.step(self.index, step.delta());
        let new = self.current();

        view.remove_body_class(old);
        view.add_body_class(new.class());
        self.render_artifacts(master, view, icon).await;

        info!("Theme changed to '{}' ({})", new.id, self.index);
        prefs.persist_theme(self.index, new.id).await;
        self.index
    }

    async fn render_artifacts<V, I>(&self, master: MasterState, view: &mut V, icon: &I)
    where
        V: PopupView,
        I: ActionIcon,
    {
        view.set_theme_label(&self.current().label());
        view.set_logo(&self.logo_path());
        if master.is_enabled() {
            set_action_icon(icon, &self.icon_path()).await;
            view.set_power_asset(&self.power_asset());
        }
    }
}

/// Point the action icon at `path`; failures are dropped.
pub async fn set_action_icon<I: ActionIcon>(icon: &I, path: &str) {
    if let Err(e) = icon.set_icon(path).await {
        debug!("Action icon update to '{path}' ignored: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefsync_core::Result;
    use prefsync_store::{MemoryStore, THEME_INDEX_KEY};
    use std::sync::Mutex;

    #[derive(Default)]
    struct BodyView {
        classes: Vec<String>,
        label:   String,
        logo:    String,
        power:   Option<String>,
    }

    impl PopupView for BodyView {
        fn set_toggle_on(&mut self, _: usize, _: bool) {}
        fn set_toggle_enabled(&mut self, _: usize, _: bool) {}
        fn set_container_interactive(&mut self, _: usize, _: bool) {}
        fn set_reload_visible(&mut self, _: bool) {}
        fn add_body_class(&mut self, class: &str) {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        fn remove_body_class(&mut self, class: &str) {
            self.classes.retain(|c| c != class);
        }
        fn set_theme_label(&mut self, markup: &str) {
            self.label = markup.to_string();
        }
        fn set_logo(&mut self, path: &str) {
            self.logo = path.to_string();
        }
        fn set_power_asset(&mut self, path: &str) {
            self.power = Some(path.to_string());
        }
        fn set_power_hoverable(&mut self, _: bool) {}
        fn set_group_open(&mut self, _: usize, _: bool) {}
        fn close(&mut self) {}
    }

    #[derive(Default)]
    struct Icon(Mutex<Vec<String>>);

    impl ActionIcon for Icon {
        async fn set_icon(&self, path: &str) -> Result<()> {
            self.0.lock().unwrap().push(path.to_string());
            Ok(())
        }
    }

    fn engine(stored: Option<i64>) -> ThemeCycle {
        ThemeCycle::new(ThemeTable::builtin(), AssetConfig::default(), stored)
    }

    #[tokio::test]
    async fn render_applies_single_class() {
        let mut view = BodyView::default();
        view.add_body_class("eden");
        let icon = Icon::default();

        engine(Some(2)).render(MasterState::Enabled, &mut view, &icon).await;

        assert_eq!(view.classes, ["scarlet"]);
        assert_eq!(view.logo, "../assets/logo-scarlet.svg");
        assert_eq!(view.power.as_deref(), Some("../assets/power-button-on-2.svg"));
        assert_eq!(*icon.0.lock().unwrap(), ["/icons/icon48-scarlet.png"]);
    }

    #[tokio::test]
    async fn disabled_master_leaves_icon_alone() {
        let mut view = BodyView::default();
        let icon = Icon::default();
        let prefs = Preferences::new(MemoryStore::new());
        let mut cycle = engine(Some(0));

        cycle.render(MasterState::Disabled, &mut view, &icon).await;
        cycle.step(Step::Next, MasterState::Disabled, &mut view, &icon, &prefs).await;

        assert!(icon.0.lock().unwrap().is_empty());
        assert!(view.power.is_none());
        assert_eq!(view.classes, ["enigma"]);
    }

    #[tokio::test]
    async fn step_round_trip_keeps_one_class() {
        let store = MemoryStore::new();
        let prefs = Preferences::new(store.clone());
        let mut view = BodyView::default();
        let icon = Icon::default();
        let mut cycle = engine(Some(0));
        cycle.render(MasterState::Enabled, &mut view, &icon).await;

        assert_eq!(cycle.step(Step::Previous, MasterState::Enabled, &mut view, &icon, &prefs).await, 5);
        assert_eq!(view.classes, ["eden"]);
        assert_eq!(store.value(THEME_INDEX_KEY), Some(serde_json::json!(5)));

        assert_eq!(cycle.step(Step::Next, MasterState::Enabled, &mut view, &icon, &prefs).await, 0);
        assert_eq!(view.classes, ["luxury"]);
        assert_eq!(view.label, "<b style=\"color: #ffff9f;\">Luxury</b>Dark");
    }

    #[tokio::test]
    async fn failed_write_keeps_computed_index() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let prefs = Preferences::new(store.clone());
        let mut view = BodyView::default();
        let mut cycle = engine(Some(3));

        cycle.step(Step::Next, MasterState::Enabled, &mut view, &Icon::default(), &prefs).await;
        assert_eq!(cycle.index(), 4);
        assert_eq!(store.value(THEME_INDEX_KEY), None);
    }
}
