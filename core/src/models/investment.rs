// core/src/models/investment.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One funding commitment. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
  pub id: String,
  pub project_id: String,
  pub investor_id: String,
  pub amount: f64,
  pub created_at: DateTime<Utc>,
}
