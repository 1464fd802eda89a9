// server/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod dashboard_handlers;
pub mod portfolio_handlers;
pub mod project_handlers;
