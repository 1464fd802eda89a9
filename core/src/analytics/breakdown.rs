// core/src/analytics/breakdown.rs
use serde::Serialize;

use super::portfolio::PortfolioAnalytics;
use super::valuation::{FundingStage, RiskLevel};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSlice {
  pub label: String,
  pub amount: f64,
  pub count: usize,
  /// Share of the investor's total invested amount, 0–100.
  pub percentage: f64,
}

/// Three independent groupings of the same holdings. Slices appear in the
/// order their label was first seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioBreakdown {
  pub by_category: Vec<BreakdownSlice>,
  pub by_risk_level: Vec<BreakdownSlice>,
  pub by_funding_stage: Vec<BreakdownSlice>,
}

impl PortfolioBreakdown {
  pub fn total_percentage(slices: &[BreakdownSlice]) -> f64 {
    slices.iter().fold(0.0, |acc, s| acc + s.percentage)
  }
}

fn group<'a, I>(entries: I, total_invested: f64) -> Vec<BreakdownSlice>
where
  I: IntoIterator<Item = (&'a str, f64)>,
{
  let mut slices: Vec<BreakdownSlice> = Vec::new();
  for (label, amount) in entries {
    match slices.iter_mut().find(|s| s.label == label) {
      Some(slice) => {
        slice.amount += amount;
        slice.count += 1;
      }
      None => slices.push(BreakdownSlice {
        label: label.to_string(),
        amount,
        count: 1,
        percentage: 0.0,
      }),
    }
  }
  for slice in &mut slices {
    slice.percentage = if total_invested > 0.0 {
      slice.amount / total_invested * 100.0
    } else {
      0.0
    };
  }
  slices
}

impl PortfolioAnalytics {
  pub fn breakdown(&self) -> PortfolioBreakdown {
    let total = self.total_invested();
    let as_of = self.as_of();

    let by_category = group(
      self.investments().iter().map(|inv| {
        let label = self
          .project_of(inv)
          .map(|p| p.category.as_str())
          .filter(|c| !c.is_empty())
          .unwrap_or("Unknown");
        (label, inv.amount)
      }),
      total,
    );
    let by_risk_level = group(
      self
        .investments()
        .iter()
        .map(|inv| (RiskLevel::of(self.project_of(inv), as_of).label(), inv.amount)),
      total,
    );
    let by_funding_stage = group(
      self
        .investments()
        .iter()
        .map(|inv| (FundingStage::of(self.project_of(inv)).label(), inv.amount)),
      total,
    );

    PortfolioBreakdown {
      by_category,
      by_risk_level,
      by_funding_stage,
    }
  }
}
