use crate::capability::{Items, PreferenceStore};
use prefsync_core::{PrefError, Result};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Preference store persisted as a single JSON object on disk.
///
/// Every read goes back to the file so separate processes (separate popup
/// instances) see each other's writes.  Writes are read-merge-write, replaced
/// atomically through a uniquely named sibling temp file, so concurrent
/// writers never rename each other's contents into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path:  PathBuf,
    write: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:  path.into(),
            write: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Items> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Items::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Items::new());
        }

        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(items) => Ok(items),
            other => Err(PrefError::Store(format!(
                "'{}' holds {} instead of an object",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }
}

impl PreferenceStore for FileStore {
    async fn get(&self, keys: &[&str]) -> Result<Items> {
        let mut all = self.read_all().await?;
        Ok(keys
            .iter()
            .filter_map(|key| all.remove(*key).map(|v| ((*key).to_string(), v)))
            .collect())
    }

    async fn set(&self, items: Items) -> Result<()> {
        let _guard = self.write.lock().await;

        let mut all = self.read_all().await?;
        all.extend(items);

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        tokio::fs::create_dir_all(&dir).await?;

        let body = serde_json::to_vec_pretty(&Value::Object(all))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&body)?;
            tmp.persist(&path)?;
            Ok(())
        })
        .await
        .map_err(|e| PrefError::Store(format!("write task failed: {e}")))??;

        debug!("[STORAGE] wrote '{}'", self.path.display());
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items(value: Value) -> Items {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        assert!(store.get(&["toggleState"]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn writes_merge_into_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("store.json"));

        store.set(items(json!({ "toggleState": true, "themeIndex": 0 }))).await.unwrap();
        store.set(items(json!({ "themeIndex": 3 }))).await.unwrap();

        let got = store.get(&["toggleState", "themeIndex"]).await.unwrap();
        assert_eq!(got["toggleState"], json!(true));
        assert_eq!(got["themeIndex"], json!(3));
    }

    #[tokio::test]
    async fn separate_handles_see_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let first = FileStore::new(&path);
        let second = FileStore::new(&path);

        first.set(items(json!({ "toggleNavState": false }))).await.unwrap();
        let got = second.get(&["toggleNavState"]).await.unwrap();
        assert_eq!(got["toggleNavState"], json!(false));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn interleaved_handles_never_fail_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let writer = |name: &'static str| {
            let store = FileStore::new(&path);
            tokio::spawn(async move {
                for i in 0..25 {
                    store.set(items(json!({ name: i }))).await?;
                }
                Ok::<_, PrefError>(())
            })
        };
        let (a, b) = tokio::join!(writer("first"), writer("second"));
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        // The file is always a whole object and no temp files are left behind.
        FileStore::new(&path).get(&["first"]).await.unwrap();
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn non_object_contents_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = FileStore::new(&path).get(&["toggleState"]).await.unwrap_err();
        assert!(matches!(err, PrefError::Store(_)));
    }
}
