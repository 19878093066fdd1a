pub mod schema;

pub use schema::{AssetConfig, PopupConfig, StoreConfig, TabsConfig, ToggleBinding, RESERVED_KEYS};

use prefsync_core::{PrefError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `PopupConfig::default()` if
/// the file doesn't exist so the popup always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<PopupConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(PopupConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| PrefError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: PopupConfig =
        toml::from_str(&raw).map_err(|e| PrefError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

impl PopupConfig {
    /// Reject toggle bindings that would alias each other or a popup-owned
    /// key, or that name a settings group which does not exist.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for binding in &self.toggles {
            if binding.key.is_empty() {
                return Err(PrefError::Config("toggle with empty storage key".into()));
            }
            if RESERVED_KEYS.contains(&binding.key.as_str()) {
                return Err(PrefError::Config(format!(
                    "toggle key '{}' is reserved",
                    binding.key
                )));
            }
            if !seen.insert(binding.key.as_str()) {
                return Err(PrefError::Config(format!(
                    "duplicate toggle key '{}'",
                    binding.key
                )));
            }
            if let Some(group) = binding.group.filter(|g| *g >= self.groups.len()) {
                return Err(PrefError::Config(format!(
                    "toggle '{}' names group {group} but only {} exist",
                    binding.key,
                    self.groups.len()
                )));
            }
        }
        Ok(())
    }

    /// Resolved store file path.
    pub fn store_path(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(default_store_path)
    }
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
        .join("prefsync")
        .join("prefsync.toml")
}

/// Return the default store path, honouring `$XDG_DATA_HOME`.
pub fn default_store_path() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
        .join("prefsync")
        .join("store.json")
}

fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
    std::env::var(var).map(PathBuf::from).unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(fallback)
    })
}
