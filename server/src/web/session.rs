// server/src/web/session.rs

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use agrofund::Session;
use futures_util::future::{ready, Ready};

use crate::errors::AppError;
use crate::state::AppState;

/// The caller's session, resolved from an `Authorization: Bearer <token>`
/// header. Extraction fails with 401 when the token is missing or unknown.
#[derive(Debug, Clone)]
pub struct Authenticated {
  pub session: Session,
  pub token: String,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  req
    .headers()
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|t| !t.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))?;
  let token = bearer_token(req).ok_or_else(|| AppError::Unauthenticated("Missing bearer token".to_string()))?;
  let session = state
    .sessions
    .resolve(token)
    .ok_or_else(|| AppError::Unauthenticated("Session expired or unknown".to_string()))?;
  Ok(Authenticated {
    session,
    token: token.to_string(),
  })
}

impl FromRequest for Authenticated {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authenticate(req))
  }
}
