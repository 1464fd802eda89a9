// core/src/models/mod.rs

//! Records persisted through the record store.

pub mod investment;
pub mod project;
pub mod user;

pub use investment::Investment;
pub use project::{NewProject, Project, ProjectPatch, ProjectStatus};
pub use user::{Role, User};
