use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Watches the store file and sends a notification whenever another writer
/// replaces or modifies it.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// use prefsync_store::StoreWatcher;
/// let (_, mut rx) = StoreWatcher::spawn("/home/user/.local/share/prefsync/store.json");
/// while rx.recv().await.is_some() {
///     println!("store changed — refreshing");
/// }
/// # }
/// ```
pub struct StoreWatcher {
    path: PathBuf,
}

impl StoreWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires on every detected change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
    use std::time::Duration;

    // Writes land through a rename, so watch the directory and filter by name.
    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Store path '{}' has no parent directory", path.display());
        return;
    };
    let Some(name) = path.file_name().map(ToOwned::to_owned) else {
        error!("Store path '{}' has no file name", path.display());
        return;
    };

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        error!("Failed to create '{}': {e}", dir.display());
        return;
    }

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching store file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) => {
                use notify::EventKind::*;
                let ours = e.paths.iter().any(|p| p.file_name() == Some(name.as_os_str()));
                if ours && matches!(e.kind, Modify(_) | Create(_)) {
                    // A full channel already carries a pending notification.
                    if let Err(mpsc::error::TrySendError::Closed(())) = tx.try_send(()) {
                        break; // receiver dropped
                    }
                }
            }
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}
