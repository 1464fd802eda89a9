// core/src/auth/mod.rs

//! Registration, login and explicit sessions.

pub mod password;
pub mod service;
pub mod session;

pub use password::CredentialHasher;
pub use service::AuthService;
pub use session::{Session, SessionRegistry};
