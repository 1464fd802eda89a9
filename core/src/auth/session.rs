// core/src/auth/session.rs
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AgroError, AgroResult};
use crate::models::{Role, User};

/// An authenticated identity, handed to every role-gated operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub user: User,
  pub started_at: DateTime<Utc>,
}

impl Session {
  pub fn new(user: User, started_at: DateTime<Utc>) -> Self {
    Self { user, started_at }
  }

  pub fn user_id(&self) -> &str {
    &self.user.id
  }

  pub fn role(&self) -> Role {
    self.user.role
  }

  /// Fails with `Forbidden` unless the session holds `role`.
  pub fn require(&self, role: Role, action: &'static str) -> AgroResult<()> {
    if self.user.role == role {
      Ok(())
    } else {
      Err(AgroError::Forbidden {
        role: self.user.role,
        action,
      })
    }
  }
}

/// Opaque bearer tokens mapped to live sessions. One entry per login, so
/// several clients can be signed in at once.
#[derive(Debug, Default)]
pub struct SessionRegistry {
  sessions: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn issue(&self, session: Session) -> String {
    let token = Uuid::new_v4().simple().to_string();
    self.sessions.write().insert(token.clone(), session);
    token
  }

  pub fn resolve(&self, token: &str) -> Option<Session> {
    self.sessions.read().get(token).cloned()
  }

  pub fn revoke(&self, token: &str) -> bool {
    self.sessions.write().remove(token).is_some()
  }

  pub fn len(&self) -> usize {
    self.sessions.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.sessions.read().is_empty()
  }
}
