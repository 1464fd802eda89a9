// server/src/config.rs

use crate::errors::{AppError, Result};
use agrofund::{AgrofundConfig, HashingConfig};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Where the platform keeps its records.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
  Memory,
  File(PathBuf),
  Postgres(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store: StoreBackend,
  pub platform: AgrofundConfig,

  // Email of an investor whose portfolio gets the demo data on startup.
  pub seed_demo_for: Option<String>,
}

fn get_env(var_name: &str) -> Option<String> {
  env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match get_env(var_name) {
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
    None => Ok(default),
  }
}

impl StoreBackend {
  pub fn kind(&self) -> &'static str {
    match self {
      StoreBackend::Memory => "memory",
      StoreBackend::File(_) => "file",
      StoreBackend::Postgres(_) => "postgres",
    }
  }

  fn from_env() -> Result<Self> {
    let kind = get_env("STORE_BACKEND").unwrap_or_else(|| "file".to_string());
    match kind.to_ascii_lowercase().as_str() {
      "memory" => Ok(StoreBackend::Memory),
      "file" => {
        let path = get_env("STORE_PATH").unwrap_or_else(|| "agrofund-data.json".to_string());
        Ok(StoreBackend::File(PathBuf::from(path)))
      }
      "postgres" => {
        let url = get_env("DATABASE_URL")
          .ok_or_else(|| AppError::Config("DATABASE_URL is required when STORE_BACKEND=postgres".to_string()))?;
        Ok(StoreBackend::Postgres(url))
      }
      other => Err(AppError::Config(format!(
        "Unknown STORE_BACKEND '{}', expected memory, file or postgres",
        other
      ))),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = parse_env("SERVER_PORT", 8080u16)?;
    let store = StoreBackend::from_env()?;

    let defaults = AgrofundConfig::default();
    let hashing = HashingConfig {
      memory_kib: parse_env("ARGON2_MEMORY_KIB", defaults.hashing.memory_kib)?,
      iterations: parse_env("ARGON2_ITERATIONS", defaults.hashing.iterations)?,
      parallelism: parse_env("ARGON2_PARALLELISM", defaults.hashing.parallelism)?,
    };
    let mut default_admin = defaults.default_admin.clone();
    if let Some(password) = get_env("DEFAULT_ADMIN_PASSWORD") {
      default_admin.password = password;
    }
    let platform = AgrofundConfig {
      enforce_funding_cap: parse_env("ENFORCE_FUNDING_CAP", defaults.enforce_funding_cap)?,
      min_password_length: parse_env("MIN_PASSWORD_LENGTH", defaults.min_password_length)?,
      hashing,
      default_admin,
    };

    let seed_demo_for = get_env("SEED_DEMO_FOR");

    tracing::info!(backend = ?store, "Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      store,
      platform,
      seed_demo_for,
    })
  }
}
