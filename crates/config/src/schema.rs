use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage keys owned by the popup itself; feature toggles may not reuse them.
pub const RESERVED_KEYS: &[&str] = &["toggleState", "themeIndex", "themeColor"];

/// Root configuration structure parsed from `prefsync.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Where the preference store lives.
    pub store: StoreConfig,
    /// Feature toggles in display order.  Position is the registry slot.
    pub toggles: Vec<ToggleBinding>,
    /// Titles of the collapsible settings groups, in display order.
    pub groups: Vec<String>,
    /// Tabs reloaded by the reload affordance.
    pub tabs: TabsConfig,
    /// Icon / image path templates.
    pub assets: AssetConfig,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            toggles: vec![
                ToggleBinding::new("nav", "toggleNavState").in_group(1),
                ToggleBinding::new("homefeed", "toggleHomeFeedState").in_group(0),
                ToggleBinding::new("subscriptionfeed", "toggleSubscriptionFeedState").in_group(0),
                ToggleBinding::new("trendingfeed", "toggleTrendingFeedState").in_group(0),
                ToggleBinding::new("search", "toggleSearchState").in_group(1),
                ToggleBinding::new("tab", "toggleTabState").in_group(1),
                ToggleBinding::new("notification", "toggleNotificationState").in_group(2),
                ToggleBinding::new("hometab", "toggleHomeTabState").in_group(1),
                ToggleBinding::new("turbo", "toggleTurboState").in_group(2),
            ],
            groups: vec!["Feeds".to_string(), "Navigation".to_string(), "Extras".to_string()],
            tabs: TabsConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

/// Preference store location.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file backing the store.  `None` = `$XDG_DATA_HOME/prefsync/store.json`.
    pub path: Option<PathBuf>,
}

/// Pairs a toggle control, its container and its storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleBinding {
    /// Storage key of the preference record, e.g. `"toggleNavState"`.
    pub key: String,
    /// Selector of the toggle control, e.g. `".nav-toggle"`.
    pub control: String,
    /// Selector of the clickable container, e.g. `".nav-container"`.
    pub container: String,
    /// Index into `groups` of the settings group listing this toggle.
    /// `None` = shown outside any group.
    #[serde(default)]
    pub group: Option<usize>,
}

impl ToggleBinding {
    /// Binding following the `.<name>-toggle` / `.<name>-container` convention.
    pub fn new(name: &str, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            control: format!(".{name}-toggle"),
            container: format!(".{name}-container"),
            group: None,
        }
    }

    #[must_use]
    pub fn in_group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }
}

/// Tab reload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// URL match patterns of the monitored site.
    pub url_patterns: Vec<String>,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            url_patterns: vec![
                "https://www.youtube.com/*".to_string(),
                "https://m.youtube.com/*".to_string(),
            ],
        }
    }
}

/// Path templates for theme-dependent images.
///
/// `{id}` expands to the theme id, `{index}` to the theme index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Action icon while enabled.
    pub icon: String,
    /// Action icon while disabled.
    pub disabled_icon: String,
    /// Power control image while enabled.
    pub power_on: String,
    /// Power control image while disabled.
    pub power_off: String,
    /// Popup logo.
    pub logo: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            icon:          "/icons/icon48-{id}.png".to_string(),
            disabled_icon: "/icons/icon48_disabled.png".to_string(),
            power_on:      "../assets/power-button-on-{index}.svg".to_string(),
            power_off:     "../assets/power-button-off.svg".to_string(),
            logo:          "../assets/logo-{id}.svg".to_string(),
        }
    }
}

impl AssetConfig {
    /// Expand `{id}` and `{index}` in `template`.
    pub fn expand(template: &str, id: &str, index: usize) -> String {
        template
            .replace("{id}", id)
            .replace("{index}", &index.to_string())
    }
}
