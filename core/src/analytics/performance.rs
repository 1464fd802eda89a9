// core/src/analytics/performance.rs
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;

use super::portfolio::PortfolioAnalytics;
use crate::models::{Investment, Project};

const TOP_PERFORMER_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
  /// Display label such as `"Mar 2026"`.
  pub month: String,
  pub year: i32,
  pub month_number: u32,
  pub amount: f64,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
  pub project: Project,
  pub investment: Investment,
  /// Expected return as a percentage of the amount invested.
  pub performance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
  pub date: NaiveDate,
  pub total_value: f64,
  pub total_invested: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
  pub monthly_investments: Vec<MonthlyTotal>,
  pub top_performing_projects: Vec<TopPerformer>,
  pub portfolio_growth: Vec<GrowthPoint>,
}

impl PortfolioAnalytics {
  pub fn performance(&self) -> PerformanceReport {
    PerformanceReport {
      monthly_investments: self.monthly_investments(),
      top_performing_projects: self.top_performers(),
      portfolio_growth: self.portfolio_growth(),
    }
  }

  fn monthly_investments(&self) -> Vec<MonthlyTotal> {
    let mut months: Vec<MonthlyTotal> = Vec::new();
    for inv in self.investments() {
      let (year, month_number) = (inv.created_at.year(), inv.created_at.month());
      match months.iter_mut().find(|m| m.year == year && m.month_number == month_number) {
        Some(bucket) => {
          bucket.amount += inv.amount;
          bucket.count += 1;
        }
        None => months.push(MonthlyTotal {
          month: inv.created_at.format("%b %Y").to_string(),
          year,
          month_number,
          amount: inv.amount,
          count: 1,
        }),
      }
    }
    months.sort_by_key(|m| (m.year, m.month_number));
    months
  }

  fn top_performers(&self) -> Vec<TopPerformer> {
    let mut gains: Vec<_> = self
      .history()
      .into_iter()
      .filter(|h| h.expected_return > 0.0)
      .collect();
    gains.sort_by(|a, b| b.expected_return.partial_cmp(&a.expected_return).unwrap_or(Ordering::Equal));

    gains
      .into_iter()
      .take(TOP_PERFORMER_LIMIT)
      .filter_map(|h| {
        let project = h.project?;
        Some(TopPerformer {
          performance: h.expected_return / h.investment.amount * 100.0,
          project,
          investment: h.investment,
        })
      })
      .collect()
  }

  /// Running totals in investment order. Each point values every investment
  /// made on or before it, so the series costs O(n²) in the investor's
  /// investment count.
  fn portfolio_growth(&self) -> Vec<GrowthPoint> {
    let mut ordered: Vec<&Investment> = self.investments().iter().collect();
    ordered.sort_by_key(|inv| inv.created_at);

    let mut running_invested = 0.0;
    ordered
      .iter()
      .map(|inv| {
        running_invested += inv.amount;
        let total_value = ordered
          .iter()
          .filter(|earlier| earlier.created_at <= inv.created_at)
          .map(|earlier| self.value_of(earlier))
          .sum();
        GrowthPoint {
          date: inv.created_at.date_naive(),
          total_value,
          total_invested: running_invested,
        }
      })
      .collect()
  }
}
