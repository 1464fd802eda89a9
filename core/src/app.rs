// core/src/app.rs

//! The `Agrofund` facade: one store, one clock, one configuration, and the
//! role-gated operations each dashboard needs.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::analytics::{
  farmer_overview, platform_overview, FarmerOverview, HoldingRecord, PlatformOverview, PortfolioAnalytics,
  PortfolioMetrics,
};
use crate::auth::{AuthService, Session};
use crate::clock::{Clock, SystemClock};
use crate::config::AgrofundConfig;
use crate::demo;
use crate::error::{AgroError, AgroResult};
use crate::models::{Investment, NewProject, Project, ProjectPatch, ProjectStatus, Role, User};
use crate::repos::{InvestmentRepository, ProjectRepository};
use crate::store::{RecordStore, Records};

/// What a signed-in user sees first, chosen by role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role")]
pub enum Dashboard {
  Farmer(FarmerOverview),
  Investor {
    metrics: PortfolioMetrics,
    history: Vec<HoldingRecord>,
  },
  Admin(PlatformOverview),
}

#[derive(Debug, Clone)]
pub struct Agrofund {
  records: Records,
  clock: Arc<dyn Clock>,
  auth: AuthService,
  projects: ProjectRepository,
  investments: InvestmentRepository,
}

impl Agrofund {
  pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>, config: AgrofundConfig) -> AgroResult<Self> {
    let records = Records::new(store);
    let investments = InvestmentRepository::new(records.clone(), clock.clone());
    let projects = ProjectRepository::new(
      records.clone(),
      clock.clone(),
      investments.clone(),
      config.enforce_funding_cap,
    );
    let auth = AuthService::new(records.clone(), clock.clone(), &config)?;

    Ok(Self {
      records,
      clock,
      auth,
      projects,
      investments,
    })
  }

  /// Volatile instance on the system clock.
  pub fn in_memory(config: AgrofundConfig) -> AgroResult<Self> {
    Self::new(Arc::new(crate::store::MemoryStore::new()), Arc::new(SystemClock), config)
  }

  /// Startup work that must finish before the first login.
  pub async fn bootstrap(&self) -> AgroResult<()> {
    self.auth.initialize_default_admin().await?;
    Ok(())
  }

  pub fn records(&self) -> &Records {
    &self.records
  }

  pub fn clock(&self) -> &Arc<dyn Clock> {
    &self.clock
  }

  pub fn auth(&self) -> &AuthService {
    &self.auth
  }

  pub fn projects(&self) -> &ProjectRepository {
    &self.projects
  }

  pub fn investments(&self) -> &InvestmentRepository {
    &self.investments
  }

  // --- Farmer ---

  pub async fn submit_project(&self, session: &Session, data: NewProject) -> AgroResult<Project> {
    session.require(Role::Farmer, "submit projects")?;
    self.projects.create(&session.user, data).await
  }

  /// Farmer edit of their own project. Approved projects are locked, and the
  /// status can only be changed by an admin.
  #[instrument(name = "Agrofund::edit_project", skip(self, session, patch), fields(user_id = %session.user_id()), err(Display))]
  pub async fn edit_project(&self, session: &Session, project_id: &str, patch: ProjectPatch) -> AgroResult<Project> {
    session.require(Role::Farmer, "edit projects")?;
    if patch.status.is_some() {
      return Err(AgroError::Validation("Project status is set by administrators.".to_string()));
    }

    let project = self.require_project(project_id).await?;
    if project.farmer_id != session.user_id() {
      warn!("Farmer {} tried to edit project {} owned by {}.", session.user_id(), project.id, project.farmer_id);
      return Err(AgroError::Forbidden {
        role: session.role(),
        action: "edit another farmer's project",
      });
    }
    if project.status == ProjectStatus::Approved {
      return Err(AgroError::ProjectLocked {
        project_id: project.id,
        status: project.status.to_string(),
      });
    }
    self.projects.update(project_id, patch).await
  }

  pub async fn my_projects(&self, session: &Session) -> AgroResult<Vec<Project>> {
    session.require(Role::Farmer, "list own projects")?;
    self.projects.by_farmer(session.user_id()).await
  }

  pub async fn farmer_overview(&self, session: &Session) -> AgroResult<FarmerOverview> {
    session.require(Role::Farmer, "view farmer analytics")?;
    let projects = self.projects.all().await?;
    let investments = self.investments.all().await?;
    Ok(farmer_overview(session.user_id(), &projects, &investments, self.clock.now()))
  }

  /// Investments into one project, visible to its farmer and to admins.
  pub async fn project_investments(&self, session: &Session, project_id: &str) -> AgroResult<Vec<Investment>> {
    let project = self.require_project(project_id).await?;
    match session.role() {
      Role::Admin => {}
      Role::Farmer if project.farmer_id == session.user_id() => {}
      role => {
        return Err(AgroError::Forbidden {
          role,
          action: "view investments of this project",
        })
      }
    }
    self.investments.by_project(project_id).await
  }

  // --- Admin ---

  pub async fn approve_project(&self, session: &Session, project_id: &str) -> AgroResult<Project> {
    session.require(Role::Admin, "approve projects")?;
    let project = self.projects.approve(project_id).await?;
    info!("Project {} approved by {}.", project.id, session.user_id());
    Ok(project)
  }

  pub async fn reject_project(&self, session: &Session, project_id: &str) -> AgroResult<Project> {
    session.require(Role::Admin, "reject projects")?;
    let project = self.projects.reject(project_id).await?;
    info!("Project {} rejected by {}.", project.id, session.user_id());
    Ok(project)
  }

  pub async fn list_users(&self, session: &Session) -> AgroResult<Vec<User>> {
    session.require(Role::Admin, "list users")?;
    self.auth.users().all().await
  }

  pub async fn platform_overview(&self, session: &Session) -> AgroResult<PlatformOverview> {
    session.require(Role::Admin, "view platform statistics")?;
    let users = self.auth.users().all().await?;
    let projects = self.projects.all().await?;
    let investments = self.investments.all().await?;
    Ok(platform_overview(&users, &projects, &investments))
  }

  // --- Investor ---

  pub async fn fund_project(&self, session: &Session, project_id: &str, amount: f64) -> AgroResult<Investment> {
    session.require(Role::Investor, "fund projects")?;
    self.projects.fund(project_id, session.user_id(), amount).await
  }

  pub async fn portfolio(&self, session: &Session) -> AgroResult<PortfolioAnalytics> {
    session.require(Role::Investor, "view a portfolio")?;
    self.portfolio_for(session.user_id()).await
  }

  /// Fresh snapshot of `investor_id`'s holdings, evaluated now.
  pub async fn portfolio_for(&self, investor_id: &str) -> AgroResult<PortfolioAnalytics> {
    let investments = self.investments.by_investor(investor_id).await?;
    let projects = self.projects.all().await?;
    Ok(PortfolioAnalytics::new(investor_id, investments, projects, self.clock.now()))
  }

  pub async fn seed_demo(&self, session: &Session) -> AgroResult<bool> {
    session.require(Role::Investor, "load demo data")?;
    demo::seed(&self.records, session.user_id(), self.clock.now()).await
  }

  pub async fn reset_demo(&self, session: &Session) -> AgroResult<bool> {
    session.require(Role::Investor, "reset demo data")?;
    demo::reset(&self.records, session.user_id(), self.clock.now()).await
  }

  // --- Any role ---

  pub async fn discover_projects(&self, search: Option<&str>, category: Option<&str>) -> AgroResult<Vec<Project>> {
    self.projects.discover(search, category).await
  }

  pub async fn dashboard(&self, session: &Session) -> AgroResult<Dashboard> {
    match session.role() {
      Role::Farmer => Ok(Dashboard::Farmer(self.farmer_overview(session).await?)),
      Role::Investor => {
        let portfolio = self.portfolio(session).await?;
        Ok(Dashboard::Investor {
          metrics: portfolio.metrics(),
          history: portfolio.history(),
        })
      }
      Role::Admin => Ok(Dashboard::Admin(self.platform_overview(session).await?)),
    }
  }

  async fn require_project(&self, project_id: &str) -> AgroResult<Project> {
    self.projects.get(project_id).await?.ok_or_else(|| AgroError::ProjectNotFound {
      project_id: project_id.to_string(),
    })
  }
}
