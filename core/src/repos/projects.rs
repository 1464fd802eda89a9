// core/src/repos/projects.rs
use std::sync::Arc;
use tracing::{error, event, info, instrument, warn, Level};

use crate::clock::Clock;
use crate::error::{AgroError, AgroResult};
use crate::ids;
use crate::models::{Investment, NewProject, Project, ProjectPatch, ProjectStatus, User};
use crate::repos::InvestmentRepository;
use crate::store::{keys, Records};

/// Projects under `projects`, plus the funding flow that ties them to the
/// investment log.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
  records: Records,
  clock: Arc<dyn Clock>,
  investments: InvestmentRepository,
  enforce_funding_cap: bool,
}

fn require_text(field: &str, value: &str) -> AgroResult<()> {
  if value.trim().is_empty() {
    return Err(AgroError::Validation(format!("{} is required", field)));
  }
  Ok(())
}

fn require_positive(field: &str, value: f64) -> AgroResult<()> {
  if !value.is_finite() || value <= 0.0 {
    return Err(AgroError::Validation(format!("{} must be a positive amount", field)));
  }
  Ok(())
}

impl ProjectRepository {
  pub fn new(records: Records, clock: Arc<dyn Clock>, investments: InvestmentRepository, enforce_funding_cap: bool) -> Self {
    Self {
      records,
      clock,
      investments,
      enforce_funding_cap,
    }
  }

  pub async fn all(&self) -> AgroResult<Vec<Project>> {
    Ok(self.records.load::<Vec<Project>>(keys::PROJECTS).await?)
  }

  pub async fn get(&self, project_id: &str) -> AgroResult<Option<Project>> {
    Ok(self.all().await?.into_iter().find(|p| p.id == project_id))
  }

  pub async fn by_farmer(&self, farmer_id: &str) -> AgroResult<Vec<Project>> {
    let mut projects = self.all().await?;
    projects.retain(|p| p.farmer_id == farmer_id);
    Ok(projects)
  }

  pub async fn approved(&self) -> AgroResult<Vec<Project>> {
    let mut projects = self.all().await?;
    projects.retain(|p| p.status == ProjectStatus::Approved);
    Ok(projects)
  }

  /// Approved projects matching a free-text search over title and description
  /// and an optional category (`"all"` matches every category).
  pub async fn discover(&self, search: Option<&str>, category: Option<&str>) -> AgroResult<Vec<Project>> {
    let needle = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
    let category = category.filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));

    let mut projects = self.approved().await?;
    projects.retain(|p| {
      let matches_search = needle.as_deref().map_or(true, |n| {
        p.title.to_lowercase().contains(n) || p.description.to_lowercase().contains(n)
      });
      let matches_category = category.map_or(true, |c| p.category == c);
      matches_search && matches_category
    });
    Ok(projects)
  }

  #[instrument(name = "ProjectRepository::create", skip(self, farmer, data), fields(farmer_id = %farmer.id, title = %data.title), err(Display))]
  pub async fn create(&self, farmer: &User, data: NewProject) -> AgroResult<Project> {
    require_text("Title", &data.title)?;
    require_text("Description", &data.description)?;
    require_text("Category", &data.category)?;
    require_positive("Goal amount", data.goal_amount)?;

    let now = self.clock.now();
    let project = Project {
      id: ids::generate("project", now),
      title: data.title,
      description: data.description,
      goal_amount: data.goal_amount,
      raised_amount: 0.0,
      farmer_id: farmer.id.clone(),
      farmer_name: farmer.display_name().to_string(),
      status: ProjectStatus::Pending,
      category: data.category,
      image_url: data.image_url.filter(|url| !url.is_empty()),
      created_at: now,
      updated_at: now,
    };

    let _gate = self.records.write_gate().await;
    let mut projects = self.records.load::<Vec<Project>>(keys::PROJECTS).await?;
    projects.push(project.clone());
    self.records.save(keys::PROJECTS, &projects).await?;

    info!("Project {} created by farmer {}.", project.id, project.farmer_id);
    Ok(project)
  }

  /// Merges `patch` into the project and refreshes `updated_at`.
  #[instrument(name = "ProjectRepository::update", skip(self, patch), err(Display))]
  pub async fn update(&self, project_id: &str, patch: ProjectPatch) -> AgroResult<Project> {
    if let Some(goal) = patch.goal_amount {
      require_positive("Goal amount", goal)?;
    }
    let _gate = self.records.write_gate().await;
    self
      .modify_gated(project_id, |project| {
        patch.apply(project);
        Ok(())
      })
      .await
  }

  pub async fn approve(&self, project_id: &str) -> AgroResult<Project> {
    self.update(project_id, ProjectPatch::status(ProjectStatus::Approved)).await
  }

  pub async fn reject(&self, project_id: &str) -> AgroResult<Project> {
    self.update(project_id, ProjectPatch::status(ProjectStatus::Rejected)).await
  }

  /// Records an investment and credits it to the project.
  ///
  /// Nothing is written when the project is unknown, closed, or (with the cap
  /// enforced) would be overfunded.
  #[instrument(name = "ProjectRepository::fund", skip(self), err(Display))]
  pub async fn fund(&self, project_id: &str, investor_id: &str, amount: f64) -> AgroResult<Investment> {
    require_positive("Amount", amount)?;

    let _gate = self.records.write_gate().await;
    let projects = self.records.load::<Vec<Project>>(keys::PROJECTS).await?;
    let project = projects
      .iter()
      .find(|p| p.id == project_id)
      .ok_or_else(|| AgroError::ProjectNotFound {
        project_id: project_id.to_string(),
      })?;

    if project.status != ProjectStatus::Approved {
      warn!("Funding attempt on {} project {}.", project.status, project_id);
      return Err(AgroError::ProjectNotOpen {
        project_id: project_id.to_string(),
        status: project.status.to_string(),
      });
    }
    let remaining = project.remaining_amount();
    if self.enforce_funding_cap && amount > remaining {
      return Err(AgroError::FundingCapExceeded {
        project_id: project_id.to_string(),
        requested: amount,
        remaining: remaining.max(0.0),
      });
    }

    // Log first, then raise; a failed raise takes the log entry back out.
    let investment = self.investments.append_gated(project_id, investor_id, amount).await?;
    let raised = self
      .modify_gated(project_id, |project| {
        project.raised_amount += amount;
        Ok(())
      })
      .await;
    let project = match raised {
      Ok(project) => project,
      Err(e) => {
        if let Err(rollback) = self.investments.withdraw_gated(&investment.id).await {
          error!(investment_id = %investment.id, "Rollback of unfunded investment failed: {}", rollback);
        }
        return Err(e);
      }
    };

    event!(
      Level::INFO,
      project_id = %project.id,
      investment_id = %investment.id,
      raised = project.raised_amount,
      "Project funded."
    );
    Ok(investment)
  }

  // Caller holds the write gate.
  async fn modify_gated<F>(&self, project_id: &str, change: F) -> AgroResult<Project>
  where
    F: FnOnce(&mut Project) -> AgroResult<()>,
  {
    let mut projects = self.records.load::<Vec<Project>>(keys::PROJECTS).await?;
    let project = projects
      .iter_mut()
      .find(|p| p.id == project_id)
      .ok_or_else(|| AgroError::ProjectNotFound {
        project_id: project_id.to_string(),
      })?;

    change(project)?;
    project.updated_at = self.clock.now();
    let updated = project.clone();

    self.records.save(keys::PROJECTS, &projects).await?;
    Ok(updated)
  }
}
