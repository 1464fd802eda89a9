// core/src/analytics/valuation.rs

//! The simulated appreciation model and the heuristics derived from a
//! project's funding progress and age.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Investment, Project};

pub const COMPLETION_BONUS: f64 = 0.15;
pub const ANNUAL_GROWTH: f64 = 0.08;
pub const DAYS_PER_YEAR: f64 = 365.0;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `since` to `as_of`, rounded down.
pub fn days_between(since: DateTime<Utc>, as_of: DateTime<Utc>) -> i64 {
  (as_of - since).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// `1 + completion × 0.15 + years held × 0.08`, with years held measured in
/// whole days.
pub fn growth_factor(investment: &Investment, project: &Project, as_of: DateTime<Utc>) -> f64 {
  let years_held = days_between(investment.created_at, as_of) as f64 / DAYS_PER_YEAR;
  1.0 + project.completion_rate() * COMPLETION_BONUS + years_held * ANNUAL_GROWTH
}

/// Risk in `[0, 1]` of holding a stake in `project`. Unknown projects are
/// maximally risky.
pub fn investment_risk(project: Option<&Project>, as_of: DateTime<Utc>) -> f64 {
  let Some(project) = project else {
    return 1.0;
  };

  let mut risk = 0.3;
  if project.completion_rate() < 0.3 {
    risk += 0.4;
  }
  if days_between(project.created_at, as_of) > 365 {
    risk += 0.2;
  }
  if project.goal_amount > 100_000.0 {
    risk += 0.1;
  }
  f64::min(risk, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
  Low,
  Medium,
  High,
}

impl RiskLevel {
  pub fn of(project: Option<&Project>, as_of: DateTime<Utc>) -> Self {
    let Some(project) = project else {
      return RiskLevel::High;
    };
    let rate = project.completion_rate();
    if rate >= 0.8 {
      RiskLevel::Low
    } else if rate >= 0.5 && days_between(project.created_at, as_of) < 180 {
      RiskLevel::Medium
    } else {
      RiskLevel::High
    }
  }

  pub const fn label(&self) -> &'static str {
    match self {
      RiskLevel::Low => "Low",
      RiskLevel::Medium => "Medium",
      RiskLevel::High => "High",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingStage {
  FullyFunded,
  NearlyComplete,
  HalfFunded,
  EarlyStage,
  JustStarted,
  Unknown,
}

impl FundingStage {
  pub fn of(project: Option<&Project>) -> Self {
    let Some(project) = project else {
      return FundingStage::Unknown;
    };
    let rate = project.completion_rate();
    if rate >= 1.0 {
      FundingStage::FullyFunded
    } else if rate >= 0.75 {
      FundingStage::NearlyComplete
    } else if rate >= 0.5 {
      FundingStage::HalfFunded
    } else if rate >= 0.25 {
      FundingStage::EarlyStage
    } else {
      FundingStage::JustStarted
    }
  }

  pub const fn label(&self) -> &'static str {
    match self {
      FundingStage::FullyFunded => "Fully Funded",
      FundingStage::NearlyComplete => "Nearly Complete",
      FundingStage::HalfFunded => "Half Funded",
      FundingStage::EarlyStage => "Early Stage",
      FundingStage::JustStarted => "Just Started",
      FundingStage::Unknown => "Unknown",
    }
  }
}

/// Status of a single holding in the investment history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingStatus {
  Active,
  Completed,
  AtRisk,
}

impl HoldingStatus {
  /// Checks run in order: fully funded, then well funded (≥ 0.8, always
  /// active regardless of age), then stale and under half funded.
  pub fn of(project: &Project, as_of: DateTime<Utc>) -> Self {
    let rate = project.completion_rate();
    if rate >= 1.0 {
      return HoldingStatus::Completed;
    }
    if rate >= 0.8 {
      return HoldingStatus::Active;
    }
    if days_between(project.created_at, as_of) > 180 && rate < 0.5 {
      return HoldingStatus::AtRisk;
    }
    HoldingStatus::Active
  }
}
