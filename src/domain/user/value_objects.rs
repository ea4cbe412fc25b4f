use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::common::ValueObjectError;

// ============================================================================
// Username Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
  const MAX_LENGTH: usize = 100;

  /// Creates a new Username, trimming surrounding whitespace
  pub fn new(username: impl Into<String>) -> Result<Self, ValueObjectError> {
    let username = username.into();
    let trimmed = username.trim();

    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidUsername(
        "Username cannot be empty".to_string(),
      ));
    }

    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidUsername(format!(
        "Username cannot exceed {} characters",
        Self::MAX_LENGTH
      )));
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl TryFrom<String> for Username {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Username> for String {
  fn from(username: Username) -> Self {
    username.0
  }
}

impl fmt::Display for Username {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain text password, wiped from memory on drop
///
/// Strength rules are enforced at the HTTP boundary; any string can be hashed
/// or verified here.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  pub fn new(password: impl Into<String>) -> Self {
    Self(password.into())
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_blank(&self) -> bool {
    self.0.trim().is_empty()
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id PHC string)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing PHC hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PasswordHash(***)")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_username_is_trimmed() {
    let username = Username::new("  alice  ").unwrap();
    assert_eq!(username.as_str(), "alice");
  }

  #[test]
  fn test_username_rejects_blank() {
    assert!(Username::new("").is_err());
    assert!(Username::new("   ").is_err());
  }

  #[test]
  fn test_username_rejects_too_long() {
    let long = "a".repeat(101);
    assert!(Username::new(long).is_err());
    assert!(Username::new("a".repeat(100)).is_ok());
  }

  #[test]
  fn test_password_debug_is_masked() {
    let password = Password::new("super-secret");
    assert_eq!(format!("{:?}", password), "Password(***)");
    assert_eq!(format!("{}", password), "***");
  }

  #[test]
  fn test_password_blank_detection() {
    assert!(Password::new("").is_blank());
    assert!(Password::new("   ").is_blank());
    assert!(!Password::new("x").is_blank());
  }

  #[test]
  fn test_password_hash_rejects_non_phc_strings() {
    assert!(PasswordHash::from_hash("invalid_hash").is_err());
  }

  #[test]
  fn test_password_hash_accepts_phc_string() {
    use argon2::password_hash::{PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    let phc = argon2::Argon2::default()
      .hash_password(b"pw", &salt)
      .unwrap()
      .to_string();

    let hash = PasswordHash::from_hash(phc.clone()).unwrap();
    assert_eq!(hash.as_str(), phc);
    assert_eq!(format!("{:?}", hash), "PasswordHash(***)");
  }
}
