// server/src/pg_store.rs

//! `RecordStore` backed by a single Postgres table of JSONB values.

use agrofund::store::{RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{event, instrument, Level};

use crate::errors::Result;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv_records (
  key TEXT PRIMARY KEY,
  value JSONB NOT NULL,
  updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

fn backend(err: sqlx::Error) -> StoreError {
  StoreError::Backend(err.into())
}

#[derive(Debug, Clone)]
pub struct PgRecordStore {
  pool: PgPool,
}

impl PgRecordStore {
  /// Connects and creates the `kv_records` table if it is missing.
  #[instrument(name = "PgRecordStore::connect", skip(database_url), err(Display))]
  pub async fn connect(database_url: &str) -> Result<Self> {
    let pool = PgPool::connect(database_url).await?;
    sqlx::query(CREATE_TABLE).execute(&pool).await?;
    event!(Level::INFO, "Connected to Postgres record store.");
    Ok(Self { pool })
  }
}

#[async_trait]
impl RecordStore for PgRecordStore {
  async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
    sqlx::query_scalar::<_, Value>("SELECT value FROM kv_records WHERE key = $1")
      .bind(key)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)
  }

  async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
    sqlx::query(
      "INSERT INTO kv_records (key, value, updated_at) VALUES ($1, $2, now())
       ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
    )
    .bind(key)
    .bind(value)
    .execute(&self.pool)
    .await
    .map_err(backend)?;
    Ok(())
  }

  async fn delete(&self, key: &str) -> StoreResult<()> {
    sqlx::query("DELETE FROM kv_records WHERE key = $1")
      .bind(key)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(())
  }
}
