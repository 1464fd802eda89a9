// core/src/config.rs

//! Tunables for the platform. Loading them from the environment is the
//! embedding application's job; everything here has a working default.

#[derive(Debug, Clone)]
pub struct AgrofundConfig {
  /// Reject funding that would push `raised` past `goal`.
  pub enforce_funding_cap: bool,
  pub min_password_length: usize,
  pub hashing: HashingConfig,
  pub default_admin: DefaultAdmin,
}

impl Default for AgrofundConfig {
  fn default() -> Self {
    Self {
      enforce_funding_cap: true,
      min_password_length: 6,
      hashing: HashingConfig::default(),
      default_admin: DefaultAdmin::default(),
    }
  }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
  pub memory_kib: u32,
  pub iterations: u32,
  pub parallelism: u32,
}

impl HashingConfig {
  /// Smallest parameters argon2 accepts. Only for tests.
  pub const fn minimal() -> Self {
    Self {
      memory_kib: 8,
      iterations: 1,
      parallelism: 1,
    }
  }
}

impl Default for HashingConfig {
  fn default() -> Self {
    Self {
      memory_kib: argon2::Params::DEFAULT_M_COST,
      iterations: argon2::Params::DEFAULT_T_COST,
      parallelism: argon2::Params::DEFAULT_P_COST,
    }
  }
}

/// Account created by `AuthService::initialize_default_admin`.
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
  pub id: String,
  pub email: String,
  pub name: String,
  pub password: String,
}

impl Default for DefaultAdmin {
  fn default() -> Self {
    Self {
      id: "admin_default".to_string(),
      email: "admin@agrofund.com".to_string(),
      name: "System Administrator".to_string(),
      password: "admin123".to_string(),
    }
  }
}
