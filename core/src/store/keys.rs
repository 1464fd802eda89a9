// core/src/store/keys.rs

pub const USERS: &str = "users";
pub const PASSWORDS: &str = "passwords";
pub const PROJECTS: &str = "projects";
pub const INVESTMENTS: &str = "investments";
/// Most recent session, restored by `AuthService::current_session`.
pub const CURRENT_USER: &str = "current-user";
