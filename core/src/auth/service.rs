// core/src/auth/service.rs
use std::sync::Arc;
use tracing::{event, info, instrument, warn, Level};

use crate::auth::{CredentialHasher, Session};
use crate::clock::Clock;
use crate::config::{AgrofundConfig, DefaultAdmin};
use crate::error::{AgroError, AgroResult};
use crate::ids;
use crate::models::{Role, User};
use crate::repos::UserRepository;
use crate::store::{keys, Records};

#[derive(Debug, Clone)]
pub struct AuthService {
  users: UserRepository,
  records: Records,
  clock: Arc<dyn Clock>,
  hasher: CredentialHasher,
  min_password_length: usize,
  default_admin: DefaultAdmin,
}

impl AuthService {
  pub fn new(records: Records, clock: Arc<dyn Clock>, config: &AgrofundConfig) -> AgroResult<Self> {
    Ok(Self {
      users: UserRepository::new(records.clone()),
      records,
      clock,
      hasher: CredentialHasher::new(config.hashing)?,
      min_password_length: config.min_password_length,
      default_admin: config.default_admin.clone(),
    })
  }

  pub fn users(&self) -> &UserRepository {
    &self.users
  }

  fn validate_registration(&self, email: &str, password: &str) -> AgroResult<()> {
    if email.is_empty() || !email.contains('@') {
      return Err(AgroError::Validation("A valid email is required.".to_string()));
    }
    if password.chars().count() < self.min_password_length {
      return Err(AgroError::Validation(format!(
        "Password must be at least {} characters",
        self.min_password_length
      )));
    }
    Ok(())
  }

  /// Creates an account and signs it in.
  #[instrument(name = "AuthService::register", skip(self, password, name), err(Display))]
  pub async fn register(&self, email: &str, password: &str, role: Role, name: Option<String>) -> AgroResult<Session> {
    let email = email.trim();
    self.validate_registration(email, password)?;

    // Cheap pre-check so duplicates skip the hashing cost; insert re-checks under the gate.
    if self.users.find_by_email(email).await?.is_some() {
      warn!("Registration attempt with existing email.");
      return Err(AgroError::DuplicateEmail { email: email.to_string() });
    }

    let now = self.clock.now();
    let user = User {
      id: ids::generate("user", now),
      email: email.to_string(),
      role,
      name: name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
    };
    let credential = self.hasher.hash(password)?;
    let user = self.users.insert(user, credential).await?;

    info!("User {} registered as {}.", user.id, user.role);
    self.start_session(user).await
  }

  #[instrument(name = "AuthService::login", skip(self, password), err(Display))]
  pub async fn login(&self, email: &str, password: &str) -> AgroResult<Session> {
    let user = self
      .users
      .find_by_email(email)
      .await?
      .ok_or_else(|| AgroError::UserNotFound {
        email: email.trim().to_string(),
      })?;

    let stored = match self.users.credential(&user.id).await? {
      Some(stored) => stored,
      None => {
        warn!("User {} has no stored credential.", user.id);
        return Err(AgroError::InvalidPassword);
      }
    };
    if !self.hasher.verify(&stored, password)? {
      event!(Level::DEBUG, user_id = %user.id, "Password mismatch.");
      return Err(AgroError::InvalidPassword);
    }

    info!("User {} logged in.", user.id);
    self.start_session(user).await
  }

  /// Forgets the persisted current user.
  pub async fn logout(&self) -> AgroResult<()> {
    self.records.save(keys::CURRENT_USER, &Option::<User>::None).await?;
    event!(Level::DEBUG, "Current user cleared.");
    Ok(())
  }

  /// Session of the most recent login or registration, if not logged out.
  pub async fn current_session(&self) -> AgroResult<Option<Session>> {
    let user = self.records.load::<Option<User>>(keys::CURRENT_USER).await?;
    Ok(user.map(|u| Session::new(u, self.clock.now())))
  }

  /// Creates the configured admin account unless an Admin already exists.
  /// Returns whether an account was created.
  #[instrument(name = "AuthService::initialize_default_admin", skip(self), err(Display))]
  pub async fn initialize_default_admin(&self) -> AgroResult<bool> {
    if self.users.count_by_role(Role::Admin).await? > 0 {
      return Ok(false);
    }

    let admin = User {
      id: self.default_admin.id.clone(),
      email: self.default_admin.email.clone(),
      role: Role::Admin,
      name: Some(self.default_admin.name.clone()),
    };
    let credential = self.hasher.hash(&self.default_admin.password)?;
    let created = self.users.insert_if_role_absent(admin, credential).await?;
    if created {
      info!("Default admin account created.");
    }
    Ok(created)
  }

  async fn start_session(&self, user: User) -> AgroResult<Session> {
    self.records.save(keys::CURRENT_USER, &Some(user.clone())).await?;
    Ok(Session::new(user, self.clock.now()))
  }
}
