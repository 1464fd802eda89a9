// core/src/repos/users.rs
use std::collections::HashMap;
use tracing::{event, instrument, Level};

use crate::error::{AgroError, AgroResult};
use crate::models::{Role, User};
use crate::store::{keys, Records};

/// Emails compare trimmed and ASCII case-insensitive.
pub(crate) fn same_email(a: &str, b: &str) -> bool {
  a.trim().eq_ignore_ascii_case(b.trim())
}

/// Users live under `users`, credentials under `passwords` (user id → hash).
#[derive(Debug, Clone)]
pub struct UserRepository {
  records: Records,
}

impl UserRepository {
  pub fn new(records: Records) -> Self {
    Self { records }
  }

  pub async fn all(&self) -> AgroResult<Vec<User>> {
    Ok(self.records.load::<Vec<User>>(keys::USERS).await?)
  }

  pub async fn find_by_email(&self, email: &str) -> AgroResult<Option<User>> {
    let users = self.all().await?;
    Ok(users.into_iter().find(|u| same_email(&u.email, email)))
  }

  pub async fn find_by_id(&self, user_id: &str) -> AgroResult<Option<User>> {
    let users = self.all().await?;
    Ok(users.into_iter().find(|u| u.id == user_id))
  }

  pub async fn credential(&self, user_id: &str) -> AgroResult<Option<String>> {
    let mut passwords = self.records.load::<HashMap<String, String>>(keys::PASSWORDS).await?;
    Ok(passwords.remove(user_id))
  }

  pub async fn count_by_role(&self, role: Role) -> AgroResult<usize> {
    Ok(self.all().await?.iter().filter(|u| u.role == role).count())
  }

  /// Stores `user` and its credential. Fails with `DuplicateEmail` when the
  /// email is taken, leaving the existing account untouched.
  #[instrument(name = "UserRepository::insert", skip(self, user, credential), fields(user_id = %user.id), err(Display))]
  pub async fn insert(&self, user: User, credential: String) -> AgroResult<User> {
    let _gate = self.records.write_gate().await;

    let mut users = self.records.load::<Vec<User>>(keys::USERS).await?;
    if users.iter().any(|u| same_email(&u.email, &user.email)) {
      event!(Level::DEBUG, email = %user.email, "Email already registered.");
      return Err(AgroError::DuplicateEmail { email: user.email });
    }
    self.write_user(&mut users, &user, credential).await?;
    Ok(user)
  }

  /// Inserts `user` only when no user with `user.role` exists yet.
  /// Returns whether the user was written.
  #[instrument(name = "UserRepository::insert_if_role_absent", skip(self, user, credential), fields(role = %user.role), err(Display))]
  pub async fn insert_if_role_absent(&self, user: User, credential: String) -> AgroResult<bool> {
    let _gate = self.records.write_gate().await;

    let mut users = self.records.load::<Vec<User>>(keys::USERS).await?;
    if users.iter().any(|u| u.role == user.role) {
      return Ok(false);
    }
    self.write_user(&mut users, &user, credential).await?;
    Ok(true)
  }

  // Caller holds the write gate. The credential lands first: a stray
  // credential is unreachable, a user without one can never sign in.
  async fn write_user(&self, users: &mut Vec<User>, user: &User, credential: String) -> AgroResult<()> {
    let mut passwords = self.records.load::<HashMap<String, String>>(keys::PASSWORDS).await?;
    passwords.insert(user.id.clone(), credential);
    self.records.save(keys::PASSWORDS, &passwords).await?;

    users.push(user.clone());
    self.records.save(keys::USERS, &*users).await?;
    event!(Level::DEBUG, user_id = %user.id, "User stored.");
    Ok(())
  }
}
