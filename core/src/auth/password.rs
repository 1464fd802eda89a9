// core/src/auth/password.rs

//! Salted password hashing with Argon2id.

use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Algorithm, Argon2, Params, Version,
};
use tracing::{debug, error, instrument};

use crate::config::HashingConfig;
use crate::error::AgroError;

/// Hashes and verifies credentials with fixed cost parameters.
///
/// Verification reads the parameters embedded in the stored PHC string, so
/// changing the configured costs does not invalidate existing hashes.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
  params: Params,
}

impl CredentialHasher {
  pub fn new(config: HashingConfig) -> Result<Self, AgroError> {
    let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
      .map_err(|e| AgroError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;
    Ok(Self { params })
  }

  fn argon2(&self) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
  }

  /// Returns the PHC string for `password`.
  #[instrument(name = "CredentialHasher::hash", skip_all, err(Display))]
  pub fn hash(&self, password: &str) -> Result<String, AgroError> {
    if password.is_empty() {
      return Err(AgroError::Validation("Password cannot be empty.".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    match self.argon2().hash_password(password.as_bytes(), &salt) {
      Ok(hash) => {
        debug!("Password hashed.");
        Ok(hash.to_string())
      }
      Err(argon_err) => {
        error!(error = %argon_err, "Argon2 password hashing failed.");
        Err(AgroError::Internal(format!("Password hashing failed: {}", argon_err)))
      }
    }
  }

  /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
  #[instrument(name = "CredentialHasher::verify", skip_all, err(Display), fields(hash_len = stored_hash.len()))]
  pub fn verify(&self, stored_hash: &str, provided_password: &str) -> Result<bool, AgroError> {
    let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
      error!(error = %parse_err, "Stored password hash is malformed.");
      AgroError::Internal(format!("Invalid stored password hash: {}", parse_err))
    })?;

    match self.argon2().verify_password(provided_password.as_bytes(), &parsed_hash) {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => {
        debug!("Password mismatch.");
        Ok(false)
      }
      Err(other) => {
        error!(error = %other, "Argon2 verification failed.");
        Err(AgroError::Internal(format!("Password verification failed: {}", other)))
      }
    }
  }
}
