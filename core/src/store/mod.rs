// core/src/store/mod.rs

//! Persisted key-value storage.
//!
//! A [`RecordStore`] maps string keys to JSON values and is the only
//! durability boundary of the crate. Repositories never talk to a backend
//! directly; they go through [`Records`], which adds typed load/save and the
//! write gate that serializes read-modify-write cycles.

pub mod file;
pub mod keys;
pub mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{event, Level};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("store io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("value under key '{key}' could not be (de)serialized: {source}")]
  Serialization {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("store backend error: {0}")]
  Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Backend contract: raw JSON values keyed by string.
///
/// Concurrent `set` calls on the same key race and the last write wins.
/// Callers that read-modify-write must hold the [`Records`] write gate.
#[async_trait]
pub trait RecordStore: Send + Sync {
  async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

  async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

  async fn delete(&self, key: &str) -> StoreResult<()>;
}

/// Typed, shareable handle over a [`RecordStore`].
#[derive(Clone)]
pub struct Records {
  store: Arc<dyn RecordStore>,
  write_gate: Arc<Mutex<()>>,
}

impl Records {
  pub fn new(store: Arc<dyn RecordStore>) -> Self {
    Self {
      store,
      write_gate: Arc::new(Mutex::new(())),
    }
  }

  pub fn in_memory() -> Self {
    Self::new(Arc::new(MemoryStore::new()))
  }

  /// Reads `key`, falling back to `T::default()` when it was never written.
  pub async fn load<T>(&self, key: &str) -> StoreResult<T>
  where
    T: DeserializeOwned + Default,
  {
    match self.store.get(key).await? {
      Some(Value::Null) | None => Ok(T::default()),
      Some(raw) => serde_json::from_value(raw).map_err(|source| StoreError::Serialization {
        key: key.to_string(),
        source,
      }),
    }
  }

  pub async fn save<T>(&self, key: &str, value: &T) -> StoreResult<()>
  where
    T: Serialize + ?Sized,
  {
    let raw = serde_json::to_value(value).map_err(|source| StoreError::Serialization {
      key: key.to_string(),
      source,
    })?;
    event!(Level::TRACE, key, "Writing record.");
    self.store.set(key, raw).await
  }

  pub async fn remove(&self, key: &str) -> StoreResult<()> {
    event!(Level::DEBUG, key, "Deleting record.");
    self.store.delete(key).await
  }

  /// Acquires the gate shared by every clone of this handle.
  ///
  /// Hold the guard across the whole load/modify/save sequence. The gate is
  /// not reentrant.
  pub async fn write_gate(&self) -> MutexGuard<'_, ()> {
    self.write_gate.lock().await
  }
}

impl std::fmt::Debug for Records {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Records").finish_non_exhaustive()
  }
}
