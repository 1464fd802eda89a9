// core/src/analytics/platform.rs
use serde::Serialize;

use crate::models::{Investment, Project, ProjectStatus, Role, User};

/// Platform-wide counters for administrators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOverview {
  pub total_projects: usize,
  pub pending_projects: usize,
  pub approved_projects: usize,
  pub rejected_projects: usize,
  pub total_funding: f64,
  pub total_investments: usize,
  pub average_investment: f64,
  pub total_users: usize,
  pub farmers: usize,
  pub investors: usize,
  pub admins: usize,
}

pub fn platform_overview(users: &[User], projects: &[Project], investments: &[Investment]) -> PlatformOverview {
  let with_status = |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();
  let with_role = |role: Role| users.iter().filter(|u| u.role == role).count();

  let total_funding = investments.iter().fold(0.0, |acc, inv| acc + inv.amount);
  let average_investment = if investments.is_empty() {
    0.0
  } else {
    total_funding / investments.len() as f64
  };

  PlatformOverview {
    total_projects: projects.len(),
    pending_projects: with_status(ProjectStatus::Pending),
    approved_projects: with_status(ProjectStatus::Approved),
    rejected_projects: with_status(ProjectStatus::Rejected),
    total_funding,
    total_investments: investments.len(),
    average_investment,
    total_users: users.len(),
    farmers: with_role(Role::Farmer),
    investors: with_role(Role::Investor),
    admins: with_role(Role::Admin),
  }
}
