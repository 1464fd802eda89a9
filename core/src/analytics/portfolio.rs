// core/src/analytics/portfolio.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::valuation::{days_between, growth_factor, investment_risk, HoldingStatus};
use crate::models::{Investment, Project};

/// Read-only view over one investor's holdings at a fixed instant.
///
/// Built from a snapshot of the repositories; every report method derives its
/// figures from that snapshot and nothing is cached between reports.
#[derive(Debug, Clone)]
pub struct PortfolioAnalytics {
  investments: Vec<Investment>,
  projects: HashMap<String, Project>,
  as_of: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
  pub total_invested: f64,
  pub total_active_projects: usize,
  pub average_investment_size: f64,
  pub total_portfolio_value: f64,
  pub projected_returns: f64,
  pub risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRecord {
  pub investment: Investment,
  /// `None` when the investment points at a project that no longer exists.
  pub project: Option<Project>,
  pub status: HoldingStatus,
  pub current_value: f64,
  pub expected_return: f64,
  /// Whole days since the investment was made.
  pub time_in_market: i64,
}

impl PortfolioAnalytics {
  pub fn new(investor_id: &str, investments: Vec<Investment>, projects: Vec<Project>, as_of: DateTime<Utc>) -> Self {
    let investments = investments.into_iter().filter(|inv| inv.investor_id == investor_id).collect();
    let mut by_id = HashMap::with_capacity(projects.len());
    for project in projects {
      by_id.entry(project.id.clone()).or_insert(project);
    }
    Self {
      investments,
      projects: by_id,
      as_of,
    }
  }

  pub fn as_of(&self) -> DateTime<Utc> {
    self.as_of
  }

  /// The investor's investments in insertion order.
  pub fn investments(&self) -> &[Investment] {
    &self.investments
  }

  pub(crate) fn project_of(&self, investment: &Investment) -> Option<&Project> {
    self.projects.get(&investment.project_id)
  }

  /// Simulated current value; zero when the project is missing.
  pub(crate) fn value_of(&self, investment: &Investment) -> f64 {
    self
      .project_of(investment)
      .map_or(0.0, |project| investment.amount * growth_factor(investment, project, self.as_of))
  }

  pub(crate) fn total_invested(&self) -> f64 {
    // Folding from +0.0 keeps an empty portfolio at 0 rather than -0.
    self.investments.iter().fold(0.0, |acc, inv| acc + inv.amount)
  }

  pub fn metrics(&self) -> PortfolioMetrics {
    let total_invested = self.total_invested();
    let total_active_projects = self
      .investments
      .iter()
      .map(|inv| inv.project_id.as_str())
      .collect::<HashSet<_>>()
      .len();
    let average_investment_size = total_invested / self.investments.len().max(1) as f64;
    let total_portfolio_value = self.investments.iter().fold(0.0, |acc, inv| acc + self.value_of(inv));

    let risk_score = if self.investments.is_empty() {
      0.0
    } else {
      let total_risk: f64 = self
        .investments
        .iter()
        .map(|inv| investment_risk(self.project_of(inv), self.as_of))
        .sum();
      total_risk / self.investments.len() as f64
    };

    PortfolioMetrics {
      total_invested,
      total_active_projects,
      average_investment_size,
      total_portfolio_value,
      projected_returns: total_portfolio_value - total_invested,
      risk_score,
    }
  }

  /// One record per investment, newest first.
  pub fn history(&self) -> Vec<HoldingRecord> {
    let mut records: Vec<HoldingRecord> = self.investments.iter().map(|inv| self.holding(inv)).collect();
    records.sort_by(|a, b| b.investment.created_at.cmp(&a.investment.created_at));
    records
  }

  fn holding(&self, investment: &Investment) -> HoldingRecord {
    let Some(project) = self.project_of(investment) else {
      return HoldingRecord {
        investment: investment.clone(),
        project: None,
        status: HoldingStatus::AtRisk,
        current_value: 0.0,
        expected_return: 0.0,
        time_in_market: 0,
      };
    };

    let current_value = investment.amount * growth_factor(investment, project, self.as_of);
    HoldingRecord {
      investment: investment.clone(),
      project: Some(project.clone()),
      status: HoldingStatus::of(project, self.as_of),
      current_value,
      expected_return: current_value - investment.amount,
      time_in_market: days_between(investment.created_at, self.as_of),
    }
  }
}
