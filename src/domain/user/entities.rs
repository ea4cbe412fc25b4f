use uuid::Uuid;

use super::value_objects::{PasswordHash, Username};
use crate::domain::common::EmailAddress;

/// User entity representing an account in the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  /// Unique identifier, assigned once at creation
  pub id: Uuid,
  /// Unique login name
  pub username: Username,
  /// Unique e-mail address
  pub email: EmailAddress,
  /// Argon2id hash of the user's password
  pub password_hash: PasswordHash,
}

impl User {
  /// Creates a new user with a freshly generated id
  pub fn new(username: Username, email: EmailAddress, password_hash: PasswordHash) -> Self {
    Self {
      id: Uuid::new_v4(),
      username,
      email,
      password_hash,
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
  ) -> Self {
    Self {
      id,
      username,
      email,
      password_hash,
    }
  }

  pub fn rename(&mut self, username: Username) {
    self.username = username;
  }

  pub fn change_email(&mut self, email: EmailAddress) {
    self.email = email;
  }

  pub fn change_password_hash(&mut self, password_hash: PasswordHash) {
    self.password_hash = password_hash;
  }
}
