// core/src/repos/investments.rs
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::clock::Clock;
use crate::error::AgroResult;
use crate::ids;
use crate::models::Investment;
use crate::store::{keys, Records};

/// Append-only log under `investments`. The only removal is the rollback
/// of a funding write that did not complete.
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
  records: Records,
  clock: Arc<dyn Clock>,
}

impl InvestmentRepository {
  pub fn new(records: Records, clock: Arc<dyn Clock>) -> Self {
    Self { records, clock }
  }

  pub async fn all(&self) -> AgroResult<Vec<Investment>> {
    Ok(self.records.load::<Vec<Investment>>(keys::INVESTMENTS).await?)
  }

  pub async fn by_project(&self, project_id: &str) -> AgroResult<Vec<Investment>> {
    let mut investments = self.all().await?;
    investments.retain(|inv| inv.project_id == project_id);
    Ok(investments)
  }

  pub async fn by_investor(&self, investor_id: &str) -> AgroResult<Vec<Investment>> {
    let mut investments = self.all().await?;
    investments.retain(|inv| inv.investor_id == investor_id);
    Ok(investments)
  }

  /// Appends a new investment stamped with the current time.
  pub async fn create(&self, project_id: &str, investor_id: &str, amount: f64) -> AgroResult<Investment> {
    let _gate = self.records.write_gate().await;
    self.append_gated(project_id, investor_id, amount).await
  }

  /// Same as [`create`](Self::create) for callers already holding the write gate.
  #[instrument(name = "InvestmentRepository::append", skip(self), err(Display))]
  pub(crate) async fn append_gated(&self, project_id: &str, investor_id: &str, amount: f64) -> AgroResult<Investment> {
    let now = self.clock.now();
    let investment = Investment {
      id: ids::generate("investment", now),
      project_id: project_id.to_string(),
      investor_id: investor_id.to_string(),
      amount,
      created_at: now,
    };

    let mut investments = self.records.load::<Vec<Investment>>(keys::INVESTMENTS).await?;
    investments.push(investment.clone());
    self.records.save(keys::INVESTMENTS, &investments).await?;
    event!(Level::DEBUG, investment_id = %investment.id, "Investment appended.");
    Ok(investment)
  }

  /// Drops a just-appended investment when the write that should accompany it
  /// failed. Caller holds the write gate.
  pub(crate) async fn withdraw_gated(&self, investment_id: &str) -> AgroResult<()> {
    let mut investments = self.records.load::<Vec<Investment>>(keys::INVESTMENTS).await?;
    investments.retain(|inv| inv.id != investment_id);
    self.records.save(keys::INVESTMENTS, &investments).await?;
    event!(Level::DEBUG, investment_id = %investment_id, "Investment withdrawn.");
    Ok(())
  }
}
