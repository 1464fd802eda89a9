// server/src/web/handlers/project_handlers.rs

use actix_web::{web, HttpResponse};
use agrofund::{NewProject, ProjectPatch};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::Authenticated;

#[derive(Deserialize, Debug, Default)]
pub struct DiscoverQuery {
  pub search: Option<String>,
  pub category: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct FundRequestPayload {
  pub amount: f64,
}

/// Approved projects, optionally filtered. Open to every signed-in role.
#[instrument(name = "handler::list_projects", skip(app_state, _auth, query))]
pub async fn list_projects_handler(
  app_state: web::Data<AppState>,
  _auth: Authenticated,
  query: web::Query<DiscoverQuery>,
) -> Result<HttpResponse, AppError> {
  let projects = app_state
    .app
    .discover_projects(query.search.as_deref(), query.category.as_deref())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "projects": projects })))
}

#[instrument(name = "handler::create_project", skip(app_state, auth, req_payload), fields(user_id = %auth.session.user_id()))]
pub async fn create_project_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
  req_payload: web::Json<NewProject>,
) -> Result<HttpResponse, AppError> {
  let project = app_state
    .app
    .submit_project(&auth.session, req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Created().json(project))
}

#[instrument(name = "handler::update_project", skip(app_state, auth, path, req_payload), fields(project_id = %path.as_ref()))]
pub async fn update_project_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
  path: web::Path<String>,
  req_payload: web::Json<ProjectPatch>,
) -> Result<HttpResponse, AppError> {
  let project = app_state
    .app
    .edit_project(&auth.session, &path, req_payload.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(project))
}

pub async fn my_projects_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
) -> Result<HttpResponse, AppError> {
  let projects = app_state.app.my_projects(&auth.session).await?;
  Ok(HttpResponse::Ok().json(json!({ "projects": projects })))
}

#[instrument(name = "handler::approve_project", skip(app_state, auth, path), fields(project_id = %path.as_ref()))]
pub async fn approve_project_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let project = app_state.app.approve_project(&auth.session, &path).await?;
  Ok(HttpResponse::Ok().json(project))
}

#[instrument(name = "handler::reject_project", skip(app_state, auth, path), fields(project_id = %path.as_ref()))]
pub async fn reject_project_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let project = app_state.app.reject_project(&auth.session, &path).await?;
  Ok(HttpResponse::Ok().json(project))
}

#[instrument(
    name = "handler::fund_project",
    skip(app_state, auth, path, req_payload),
    fields(project_id = %path.as_ref(), amount = req_payload.amount)
)]
pub async fn fund_project_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
  path: web::Path<String>,
  req_payload: web::Json<FundRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let investment = app_state
    .app
    .fund_project(&auth.session, &path, req_payload.amount)
    .await?;
  info!("Investment {} recorded.", investment.id);
  Ok(HttpResponse::Created().json(investment))
}

pub async fn project_investments_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let investments = app_state.app.project_investments(&auth.session, &path).await?;
  Ok(HttpResponse::Ok().json(json!({ "investments": investments })))
}
