// server/src/web/handlers/dashboard_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::Authenticated;

pub async fn dashboard_handler(app_state: web::Data<AppState>, auth: Authenticated) -> Result<HttpResponse, AppError> {
  let dashboard = app_state.app.dashboard(&auth.session).await?;
  Ok(HttpResponse::Ok().json(dashboard))
}

pub async fn farmer_analytics_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
) -> Result<HttpResponse, AppError> {
  let overview = app_state.app.farmer_overview(&auth.session).await?;
  Ok(HttpResponse::Ok().json(overview))
}

pub async fn admin_overview_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
) -> Result<HttpResponse, AppError> {
  let overview = app_state.app.platform_overview(&auth.session).await?;
  Ok(HttpResponse::Ok().json(overview))
}

pub async fn admin_users_handler(app_state: web::Data<AppState>, auth: Authenticated) -> Result<HttpResponse, AppError> {
  let users = app_state.app.list_users(&auth.session).await?;
  Ok(HttpResponse::Ok().json(json!({ "users": users })))
}

#[instrument(name = "handler::seed_demo", skip(app_state, auth), fields(user_id = %auth.session.user_id()))]
pub async fn seed_demo_handler(app_state: web::Data<AppState>, auth: Authenticated) -> Result<HttpResponse, AppError> {
  let seeded = app_state.app.seed_demo(&auth.session).await?;
  info!("Demo seed requested, seeded: {}.", seeded);
  Ok(HttpResponse::Ok().json(json!({ "seeded": seeded })))
}

#[instrument(name = "handler::reset_demo", skip(app_state, auth), fields(user_id = %auth.session.user_id()))]
pub async fn reset_demo_handler(app_state: web::Data<AppState>, auth: Authenticated) -> Result<HttpResponse, AppError> {
  let seeded = app_state.app.reset_demo(&auth.session).await?;
  Ok(HttpResponse::Ok().json(json!({ "seeded": seeded })))
}
