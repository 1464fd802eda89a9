// core/src/error.rs
use thiserror::Error;

use crate::models::Role;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AgroError {
  #[error("No user registered with email '{email}'")]
  UserNotFound { email: String },

  #[error("Invalid password")]
  InvalidPassword,

  #[error("Email '{email}' is already registered")]
  DuplicateEmail { email: String },

  #[error("Project not found: {project_id}")]
  ProjectNotFound { project_id: String },

  #[error("Project '{project_id}' is not open for funding (status: {status})")]
  ProjectNotOpen { project_id: String, status: String },

  #[error("Project '{project_id}' can no longer be edited (status: {status})")]
  ProjectLocked { project_id: String, status: String },

  #[error("Funding of {requested} exceeds the {remaining} still needed by project '{project_id}'")]
  FundingCapExceeded {
    project_id: String,
    requested: f64,
    remaining: f64,
  },

  #[error("Role {role} may not {action}")]
  Forbidden { role: Role, action: &'static str },

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Operation failed: {0}")]
  OperationFailed(#[from] StoreError),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl AgroError {
  /// Short message suitable for showing to the person who triggered the error.
  pub fn user_message(&self) -> String {
    match self {
      AgroError::UserNotFound { .. } => "User not found".to_string(),
      AgroError::InvalidPassword => "Invalid password".to_string(),
      AgroError::DuplicateEmail { .. } => "Email already registered".to_string(),
      AgroError::ProjectNotFound { .. } => "Project not found".to_string(),
      AgroError::ProjectNotOpen { .. } => "Project is not accepting funding".to_string(),
      AgroError::ProjectLocked { .. } => "Approved projects cannot be edited".to_string(),
      AgroError::FundingCapExceeded { .. } => "Amount exceeds remaining funding needed".to_string(),
      AgroError::Forbidden { .. } => "You are not allowed to do that".to_string(),
      AgroError::Validation(msg) => msg.clone(),
      AgroError::OperationFailed(_) | AgroError::Internal(_) => "Operation failed".to_string(),
    }
  }
}

pub type AgroResult<T, E = AgroError> = std::result::Result<T, E>;
