// server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use agrofund::{Role, Session};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::Authenticated;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct RegisterRequestPayload {
  pub email: String,
  pub password: String,
  pub role: Role,
  #[serde(default)]
  pub name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub email: String,
  pub password: String,
}

fn session_response(app_state: &AppState, session: Session) -> serde_json::Value {
  let user = session.user.clone();
  let token = app_state.sessions.issue(session);
  json!({ "token": token, "user": user })
}

#[instrument(
    name = "handler::register",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email, role = %req_payload.role)
)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RegisterRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let session = app_state
    .app
    .auth()
    .register(&payload.email, &payload.password, payload.role, payload.name)
    .await?;
  info!("Registered user {}.", session.user_id());
  Ok(HttpResponse::Created().json(session_response(&app_state, session)))
}

#[instrument(name = "handler::login", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let session = app_state
    .app
    .auth()
    .login(&req_payload.email, &req_payload.password)
    .await?;
  Ok(HttpResponse::Ok().json(session_response(&app_state, session)))
}

#[instrument(name = "handler::logout", skip(app_state, auth), fields(user_id = %auth.session.user_id()))]
pub async fn logout_handler(app_state: web::Data<AppState>, auth: Authenticated) -> Result<HttpResponse, AppError> {
  app_state.sessions.revoke(&auth.token);
  app_state.app.auth().logout().await?;
  Ok(HttpResponse::NoContent().finish())
}

pub async fn me_handler(auth: Authenticated) -> HttpResponse {
  HttpResponse::Ok().json(&auth.session)
}
