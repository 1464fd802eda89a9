// core/src/store/file.rs

//! Single-file JSON store.
//!
//! The whole key space lives in memory and is rewritten to disk after every
//! mutation: serialize, write `<path>.tmp`, then rename over `<path>`.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{event, instrument, Level};

use super::{RecordStore, StoreError, StoreResult};

#[derive(Debug)]
pub struct JsonFileStore {
  path: PathBuf,
  entries: RwLock<Map<String, Value>>,
  // Serializes copy + flush + swap so snapshots reach disk in order.
  flush_lock: Mutex<()>,
}

impl JsonFileStore {
  /// Opens `path`, loading existing contents. A missing file is an empty store.
  #[instrument(name = "JsonFileStore::open", skip(path), fields(path = %path.as_ref().display()), err(Display))]
  pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
    let path = path.as_ref().to_path_buf();
    let entries = match tokio::fs::read(&path).await {
      Ok(bytes) if bytes.is_empty() => Map::new(),
      Ok(bytes) => serde_json::from_slice::<Map<String, Value>>(&bytes).map_err(|source| StoreError::Serialization {
        key: path.display().to_string(),
        source,
      })?,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        event!(Level::INFO, "Store file absent, starting empty.");
        Map::new()
      }
      Err(e) => return Err(StoreError::Io(e)),
    };
    event!(Level::DEBUG, keys = entries.len(), "Loaded store file.");

    Ok(Self {
      path,
      entries: RwLock::new(entries),
      flush_lock: Mutex::new(()),
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  async fn apply<F>(&self, mutate: F) -> StoreResult<()>
  where
    F: FnOnce(&mut Map<String, Value>),
  {
    let _flush = self.flush_lock.lock().await;
    // Mutate a copy; `entries` only changes once the file is in place.
    let mut next = self.entries.read().clone();
    mutate(&mut next);
    let snapshot = serde_json::to_vec_pretty(&next).map_err(|source| StoreError::Serialization {
      key: self.path.display().to_string(),
      source,
    })?;

    let tmp_path = self.path.with_extension("tmp");
    let mut tmp = tokio::fs::File::create(&tmp_path).await?;
    tmp.write_all(&snapshot).await?;
    tmp.sync_all().await?;
    drop(tmp);
    tokio::fs::rename(&tmp_path, &self.path).await?;
    *self.entries.write() = next;
    event!(Level::TRACE, bytes = snapshot.len(), "Flushed store file.");
    Ok(())
  }
}

#[async_trait]
impl RecordStore for JsonFileStore {
  async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
    Ok(self.entries.read().get(key).cloned())
  }

  async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
    let key = key.to_string();
    self
      .apply(move |map| {
        map.insert(key, value);
      })
      .await
  }

  async fn delete(&self, key: &str) -> StoreResult<()> {
    self
      .apply(|map| {
        map.remove(key);
      })
      .await
  }
}
