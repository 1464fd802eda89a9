// core/src/models/user.rs
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
  Farmer,
  Investor,
  Admin,
}

impl Role {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Role::Farmer => "Farmer",
      Role::Investor => "Investor",
      Role::Admin => "Admin",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: String,
  pub email: String,
  pub role: Role,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

impl User {
  /// Name shown on projects; falls back to the email.
  pub fn display_name(&self) -> &str {
    match self.name.as_deref() {
      Some(name) if !name.trim().is_empty() => name,
      _ => &self.email,
    }
  }
}
