use prefsync_core::{ActionIcon, PopupView, PrefError, Result, TabHost, TabId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Reload every tab matching `patterns`, then close the popup.
///
/// Tab failures are logged; the popup closes regardless.  Returns the number
/// of tabs reloaded.
pub async fn reload_monitored_tabs<T, V>(tabs: &T, patterns: &[String], view: &mut V) -> usize
where
    T: TabHost,
    V: PopupView,
{
    let mut reloaded = 0;
    match tabs.query(patterns).await {
        Ok(ids) => {
            for id in ids {
                match tabs.reload(id).await {
                    Ok(()) => reloaded += 1,
                    Err(e) => warn!("[TABS] Could not reload tab {id}: {e}"),
                }
            }
        }
        Err(e) => warn!("[TABS] Could not query tabs: {e}"),
    }

    info!("Reloaded {reloaded} tab(s); closing popup");
    view.close();
    reloaded
}

/// [`ActionIcon`] that remembers every path it was pointed at.
#[derive(Debug, Clone, Default)]
pub struct RecordingIcon {
    paths: Arc<Mutex<Vec<String>>>,
    fail:  Arc<AtomicBool>,
}

impl RecordingIcon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every subsequent update (or accept again).
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.paths().pop()
    }
}

impl ActionIcon for RecordingIcon {
    async fn set_icon(&self, path: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PrefError::Icon(format!("cannot load '{path}'")));
        }
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_string());
        }
        Ok(())
    }
}

/// [`TabHost`] over a fixed tab list, remembering what was reloaded.
#[derive(Debug, Clone, Default)]
pub struct RecordingTabs {
    open:     Vec<(TabId, String)>,
    reloaded: Arc<Mutex<Vec<TabId>>>,
}

impl RecordingTabs {
    /// Host with the given `(id, url)` tabs open.
    pub fn new(open: Vec<(TabId, String)>) -> Self {
        Self {
            open,
            reloaded: Arc::default(),
        }
    }

    pub fn reloaded(&self) -> Vec<TabId> {
        self.reloaded.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl TabHost for RecordingTabs {
    async fn query(&self, patterns: &[String]) -> Result<Vec<TabId>> {
        Ok(self
            .open
            .iter()
            .filter(|(_, url)| patterns.iter().any(|p| url_matches(p, url)))
            .map(|(id, _)| *id)
            .collect())
    }

    async fn reload(&self, tab: TabId) -> Result<()> {
        if !self.open.iter().any(|(id, _)| *id == tab) {
            return Err(PrefError::Tabs(format!("no tab with id {tab}")));
        }
        if let Ok(mut reloaded) = self.reloaded.lock() {
            reloaded.push(tab);
        }
        Ok(())
    }
}

/// Match `url` against an extension match pattern with a trailing `*`
/// wildcard (`https://www.youtube.com/*`).
pub fn url_matches(pattern: &str, url: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => url.starts_with(prefix),
        None => url == pattern,
    }
}
