// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use agrofund::{AgroError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Domain(#[from] AgroError),

  #[error("Authentication required: {0}")]
  Unauthenticated(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    AppError::Domain(AgroError::OperationFailed(err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Domain(err) => match err {
        AgroError::Validation(_) => StatusCode::BAD_REQUEST,
        AgroError::UserNotFound { .. } | AgroError::InvalidPassword => StatusCode::UNAUTHORIZED,
        AgroError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AgroError::ProjectNotFound { .. } => StatusCode::NOT_FOUND,
        AgroError::DuplicateEmail { .. }
        | AgroError::ProjectNotOpen { .. }
        | AgroError::ProjectLocked { .. }
        | AgroError::FundingCapExceeded { .. } => StatusCode::CONFLICT,
        AgroError::OperationFailed(_) | AgroError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Request rejected");
    }

    let message = match self {
      AppError::Domain(err) => err.user_message(),
      AppError::Unauthenticated(m) => m.clone(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Sqlx(_) => "Database operation failed".to_string(),
      AppError::Internal(_) => "An internal error occurred".to_string(),
    };
    HttpResponse::build(status).json(json!({ "error": message }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
