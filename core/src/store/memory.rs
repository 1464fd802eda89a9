// core/src/store/memory.rs
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

use super::{RecordStore, StoreResult};

/// Volatile store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.read().is_empty()
  }
}

#[async_trait]
impl RecordStore for MemoryStore {
  async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
    Ok(self.entries.read().get(key).cloned())
  }

  async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
    self.entries.write().insert(key.to_string(), value);
    Ok(())
  }

  async fn delete(&self, key: &str) -> StoreResult<()> {
    self.entries.write().remove(key);
    Ok(())
  }
}
