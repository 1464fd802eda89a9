// server/src/state.rs
use crate::config::AppConfig;
use agrofund::{Agrofund, SessionRegistry};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub app: Arc<Agrofund>,
  pub sessions: Arc<SessionRegistry>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(app: Agrofund, config: AppConfig) -> Self {
    Self {
      app: Arc::new(app),
      sessions: Arc::new(SessionRegistry::new()),
      config: Arc::new(config),
    }
  }
}
