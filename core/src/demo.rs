// core/src/demo.rs

//! Sample projects and investments for trying out the portfolio views.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

use crate::error::AgroResult;
use crate::models::{Investment, Project, ProjectStatus};
use crate::store::{keys, Records};

struct DemoProject {
  id: &'static str,
  title: &'static str,
  description: &'static str,
  goal_amount: f64,
  raised_amount: f64,
  farmer_id: &'static str,
  farmer_name: &'static str,
  category: &'static str,
  age_days: i64,
}

const DEMO_PROJECTS: [DemoProject; 3] = [
  DemoProject {
    id: "demo_project_1",
    title: "Organic Vegetable Farm Expansion",
    description: "Expanding our organic vegetable farm to include greenhouse facilities for year-round production.",
    goal_amount: 50_000.0,
    raised_amount: 35_000.0,
    farmer_id: "demo_farmer_1",
    farmer_name: "Sarah Thompson",
    category: "Organic",
    age_days: 120,
  },
  DemoProject {
    id: "demo_project_2",
    title: "Smart Irrigation System",
    description: "Installing IoT-based smart irrigation system to optimize water usage and crop yields.",
    goal_amount: 25_000.0,
    raised_amount: 18_000.0,
    farmer_id: "demo_farmer_2",
    farmer_name: "Mike Rodriguez",
    category: "Technology",
    age_days: 90,
  },
  DemoProject {
    id: "demo_project_3",
    title: "Heritage Breed Cattle Ranch",
    description: "Starting a heritage breed cattle ranch focused on sustainable and ethical livestock farming.",
    goal_amount: 75_000.0,
    raised_amount: 45_000.0,
    farmer_id: "demo_farmer_3",
    farmer_name: "Emma Johnson",
    category: "Livestock",
    age_days: 60,
  },
];

const DEMO_PROJECT_PREFIX: &str = "demo_project_";
const DEMO_INVESTMENT_PREFIX: &str = "demo_inv_";

// (id, project, amount, age in days)
const DEMO_INVESTMENTS: [(&str, &str, f64, i64); 5] = [
  ("demo_inv_1", "demo_project_1", 5_000.0, 120),
  ("demo_inv_2", "demo_project_2", 3_000.0, 90),
  ("demo_inv_3", "demo_project_3", 7_500.0, 60),
  ("demo_inv_4", "demo_project_1", 2_500.0, 30),
  ("demo_inv_5", "demo_project_2", 1_500.0, 14),
];

fn demo_projects(now: DateTime<Utc>) -> Vec<Project> {
  DEMO_PROJECTS
    .iter()
    .map(|d| Project {
      id: d.id.to_string(),
      title: d.title.to_string(),
      description: d.description.to_string(),
      goal_amount: d.goal_amount,
      raised_amount: d.raised_amount,
      farmer_id: d.farmer_id.to_string(),
      farmer_name: d.farmer_name.to_string(),
      status: ProjectStatus::Approved,
      category: d.category.to_string(),
      image_url: None,
      created_at: now - Duration::days(d.age_days),
      updated_at: now,
    })
    .collect()
}

fn demo_investments(investor_id: &str, now: DateTime<Utc>) -> Vec<Investment> {
  DEMO_INVESTMENTS
    .iter()
    .map(|(id, project_id, amount, age_days)| Investment {
      id: id.to_string(),
      project_id: project_id.to_string(),
      investor_id: investor_id.to_string(),
      amount: *amount,
      created_at: now - Duration::days(*age_days),
    })
    .collect()
}

/// Writes the demo investments for `investor_id`, plus the demo projects when
/// there are no projects at all. Does nothing if any investment exists.
/// Returns whether data was written.
#[instrument(name = "demo::seed", skip(records), err(Display))]
pub async fn seed(records: &Records, investor_id: &str, now: DateTime<Utc>) -> AgroResult<bool> {
  let _gate = records.write_gate().await;
  seed_gated(records, investor_id, now).await
}

/// Replaces the demo records with a fresh copy owned by `investor_id`.
/// Projects and investments outside the demo id ranges are kept.
#[instrument(name = "demo::reset", skip(records), err(Display))]
pub async fn reset(records: &Records, investor_id: &str, now: DateTime<Utc>) -> AgroResult<bool> {
  let _gate = records.write_gate().await;

  let mut projects = records.load::<Vec<Project>>(keys::PROJECTS).await?;
  projects.retain(|p| !p.id.starts_with(DEMO_PROJECT_PREFIX));
  let kept_projects = projects.len();
  projects.extend(demo_projects(now));
  records.save(keys::PROJECTS, &projects).await?;

  let mut investments = records.load::<Vec<Investment>>(keys::INVESTMENTS).await?;
  investments.retain(|inv| !inv.id.starts_with(DEMO_INVESTMENT_PREFIX));
  let kept_investments = investments.len();
  investments.extend(demo_investments(investor_id, now));
  records.save(keys::INVESTMENTS, &investments).await?;

  info!(kept_projects, kept_investments, "Demo data reset for investor {}.", investor_id);
  Ok(true)
}

async fn seed_gated(records: &Records, investor_id: &str, now: DateTime<Utc>) -> AgroResult<bool> {
  let investments = records.load::<Vec<Investment>>(keys::INVESTMENTS).await?;
  if !investments.is_empty() {
    return Ok(false);
  }

  let projects = records.load::<Vec<Project>>(keys::PROJECTS).await?;
  if projects.is_empty() {
    records.save(keys::PROJECTS, &demo_projects(now)).await?;
  }
  records.save(keys::INVESTMENTS, &demo_investments(investor_id, now)).await?;

  info!("Demo data seeded for investor {}.", investor_id);
  Ok(true)
}
