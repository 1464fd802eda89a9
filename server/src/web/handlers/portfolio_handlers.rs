// server/src/web/handlers/portfolio_handlers.rs

//! Investor portfolio reports. Each request builds a fresh snapshot, so a
//! report always reflects the latest funding.

use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::Authenticated;

pub async fn metrics_handler(app_state: web::Data<AppState>, auth: Authenticated) -> Result<HttpResponse, AppError> {
  let portfolio = app_state.app.portfolio(&auth.session).await?;
  Ok(HttpResponse::Ok().json(portfolio.metrics()))
}

pub async fn history_handler(app_state: web::Data<AppState>, auth: Authenticated) -> Result<HttpResponse, AppError> {
  let portfolio = app_state.app.portfolio(&auth.session).await?;
  Ok(HttpResponse::Ok().json(portfolio.history()))
}

pub async fn breakdown_handler(app_state: web::Data<AppState>, auth: Authenticated) -> Result<HttpResponse, AppError> {
  let portfolio = app_state.app.portfolio(&auth.session).await?;
  Ok(HttpResponse::Ok().json(portfolio.breakdown()))
}

pub async fn performance_handler(
  app_state: web::Data<AppState>,
  auth: Authenticated,
) -> Result<HttpResponse, AppError> {
  let portfolio = app_state.app.portfolio(&auth.session).await?;
  Ok(HttpResponse::Ok().json(portfolio.performance()))
}
