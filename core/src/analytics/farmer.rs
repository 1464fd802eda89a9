// core/src/analytics/farmer.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use super::valuation::days_between;
use crate::models::{Investment, Project};

const RECENT_INVESTMENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentInvestment {
  pub amount: f64,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalytics {
  pub project: Project,
  pub total_investors: usize,
  pub average_investment: f64,
  /// Amount raised per day since the project was created.
  pub funding_velocity: f64,
  /// Days until the goal at the current velocity; `None` if nothing was raised yet.
  pub days_to_goal: Option<i64>,
  pub largest_investment: f64,
  pub recent_investments: Vec<RecentInvestment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerOverview {
  pub farmer_id: String,
  pub total_raised: f64,
  pub total_goal: f64,
  pub total_investors: usize,
  /// Mean completion across the farmer's projects, as a percentage.
  pub average_project_progress: f64,
  pub projects: Vec<ProjectAnalytics>,
}

pub fn project_analytics(project: &Project, investments: &[Investment], as_of: DateTime<Utc>) -> ProjectAnalytics {
  let mut funding: Vec<&Investment> = investments.iter().filter(|inv| inv.project_id == project.id).collect();

  let total_investors = funding.iter().map(|inv| inv.investor_id.as_str()).collect::<HashSet<_>>().len();
  let average_investment = if funding.is_empty() {
    0.0
  } else {
    funding.iter().map(|inv| inv.amount).sum::<f64>() / funding.len() as f64
  };
  let largest_investment = funding.iter().map(|inv| inv.amount).fold(0.0, f64::max);

  let age_days = days_between(project.created_at, as_of).max(1);
  let funding_velocity = project.raised_amount / age_days as f64;
  let days_to_goal = if funding_velocity > 0.0 {
    Some(((project.remaining_amount() / funding_velocity).ceil() as i64).max(0))
  } else {
    None
  };

  funding.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  let recent_investments = funding
    .iter()
    .take(RECENT_INVESTMENT_LIMIT)
    .map(|inv| RecentInvestment {
      amount: inv.amount,
      created_at: inv.created_at,
    })
    .collect();

  ProjectAnalytics {
    project: project.clone(),
    total_investors,
    average_investment,
    funding_velocity,
    days_to_goal,
    largest_investment,
    recent_investments,
  }
}

/// Funding analytics across everything `farmer_id` has submitted.
pub fn farmer_overview(
  farmer_id: &str,
  projects: &[Project],
  investments: &[Investment],
  as_of: DateTime<Utc>,
) -> FarmerOverview {
  let own: Vec<&Project> = projects.iter().filter(|p| p.farmer_id == farmer_id).collect();
  let own_ids: HashSet<&str> = own.iter().map(|p| p.id.as_str()).collect();

  let total_raised = own.iter().fold(0.0, |acc, p| acc + p.raised_amount);
  let total_goal = own.iter().fold(0.0, |acc, p| acc + p.goal_amount);
  let total_investors = investments
    .iter()
    .filter(|inv| own_ids.contains(inv.project_id.as_str()))
    .map(|inv| inv.investor_id.as_str())
    .collect::<HashSet<_>>()
    .len();
  let average_project_progress = if own.is_empty() {
    0.0
  } else {
    own.iter().map(|p| p.completion_rate()).sum::<f64>() / own.len() as f64 * 100.0
  };

  FarmerOverview {
    farmer_id: farmer_id.to_string(),
    total_raised,
    total_goal,
    total_investors,
    average_project_progress,
    projects: own.iter().map(|p| project_analytics(p, investments, as_of)).collect(),
  }
}
