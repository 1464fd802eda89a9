// server/src/main.rs

mod config;
mod errors;
mod pg_store;
mod state;
mod web;

use crate::config::{AppConfig, StoreBackend};
use crate::errors::{AppError, Result as AppResult};
use crate::pg_store::PgRecordStore;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use agrofund::{Agrofund, JsonFileStore, MemoryStore, RecordStore, Role, Session, SystemClock};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

async fn open_store(backend: &StoreBackend) -> AppResult<Arc<dyn RecordStore>> {
  let store: Arc<dyn RecordStore> = match backend {
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory store; records are lost on shutdown.");
      Arc::new(MemoryStore::new())
    }
    StoreBackend::File(path) => Arc::new(JsonFileStore::open(path).await?),
    StoreBackend::Postgres(url) => Arc::new(PgRecordStore::connect(url).await?),
  };
  Ok(store)
}

/// Seeds the demo portfolio for the configured investor, if they exist.
async fn seed_demo_for(app: &Agrofund, email: &str) -> AppResult<()> {
  let Some(user) = app.auth().users().find_by_email(email).await? else {
    tracing::warn!(email, "SEED_DEMO_FOR names an unknown user, skipping demo data.");
    return Ok(());
  };
  if user.role != Role::Investor {
    tracing::warn!(email, role = %user.role, "Demo data can only be seeded for investors.");
    return Ok(());
  }
  let session = Session::new(user, app.clock().now());
  let seeded = app.seed_demo(&session).await?;
  tracing::info!(email, seeded, "Demo data check finished.");
  Ok(())
}

async fn build_state(app_config: AppConfig) -> AppResult<AppState> {
  let store = open_store(&app_config.store).await?;
  let app = Agrofund::new(store, Arc::new(SystemClock), app_config.platform.clone())?;
  app.bootstrap().await?;

  if let Some(email) = app_config.seed_demo_for.as_deref() {
    seed_demo_for(&app, email).await?;
  }
  Ok(AppState::new(app, app_config))
}

fn startup_error(e: AppError) -> std::io::Error {
  tracing::error!(error = %e, "Server startup failed.");
  std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting AgroFund server...");

  let app_config = AppConfig::from_env().map_err(startup_error)?;
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  let app_state = build_state(app_config).await.map_err(startup_error)?;

  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
