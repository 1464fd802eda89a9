// core/src/models/project.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
  Pending,
  Approved,
  Rejected,
}

impl ProjectStatus {
  pub const fn as_str(&self) -> &'static str {
    match self {
      ProjectStatus::Pending => "pending",
      ProjectStatus::Approved => "approved",
      ProjectStatus::Rejected => "rejected",
    }
  }
}

impl fmt::Display for ProjectStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id: String,
  pub title: String,
  pub description: String,
  pub goal_amount: f64,
  pub raised_amount: f64,
  pub farmer_id: String,
  pub farmer_name: String,
  pub status: ProjectStatus,
  pub category: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Project {
  /// `raised / goal`, not capped at 1.
  pub fn completion_rate(&self) -> f64 {
    if self.goal_amount > 0.0 {
      self.raised_amount / self.goal_amount
    } else {
      0.0
    }
  }

  pub fn remaining_amount(&self) -> f64 {
    self.goal_amount - self.raised_amount
  }
}

/// Farmer-supplied fields for a new project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
  pub title: String,
  pub description: String,
  pub goal_amount: f64,
  pub category: String,
  #[serde(default)]
  pub image_url: Option<String>,
}

/// Partial update merged into an existing project. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub goal_amount: Option<f64>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
  pub fn status(status: ProjectStatus) -> Self {
    Self {
      status: Some(status),
      ..Default::default()
    }
  }

  pub(crate) fn apply(self, project: &mut Project) {
    if let Some(title) = self.title {
      project.title = title;
    }
    if let Some(description) = self.description {
      project.description = description;
    }
    if let Some(goal_amount) = self.goal_amount {
      project.goal_amount = goal_amount;
    }
    if let Some(category) = self.category {
      project.category = category;
    }
    if let Some(image_url) = self.image_url {
      // An empty string clears the image.
      project.image_url = if image_url.is_empty() { None } else { Some(image_url) };
    }
    if let Some(status) = self.status {
      project.status = status;
    }
  }
}
