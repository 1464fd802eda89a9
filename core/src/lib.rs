// core/src/lib.rs

//! AgroFund: crowdfunding for agricultural projects.
//!
//! Farmers submit projects, admins approve or reject them, investors fund
//! approved ones, and everyone gets analytics derived from the same records:
//!  - A pluggable key-value [`RecordStore`](store::RecordStore) holding JSON
//!    collections (`users`, `passwords`, `projects`, `investments`).
//!  - Repositories whose mutations are serialized read-modify-write cycles.
//!  - Argon2-backed registration and login returning explicit [`Session`]s.
//!  - A portfolio analytics engine (metrics, history, breakdowns,
//!    performance) plus farmer and platform overviews.

pub mod app;
pub mod analytics;
pub mod auth;
pub mod clock;
pub mod config;
pub mod demo;
pub mod error;
pub mod ids;
pub mod models;
pub mod repos;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::app::{Agrofund, Dashboard};
pub use crate::auth::{AuthService, Session, SessionRegistry};
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::{AgrofundConfig, DefaultAdmin, HashingConfig};
pub use crate::error::{AgroError, AgroResult};
pub use crate::models::{Investment, NewProject, Project, ProjectPatch, ProjectStatus, Role, User};
pub use crate::store::{JsonFileStore, MemoryStore, RecordStore, Records, StoreError};
