use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;

use super::errors::ValueObjectError;

/// E-mail address value object
///
/// Two addresses are equal when their (trimmed) strings are equal. Case is
/// preserved exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
  /// Creates a new EmailAddress after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();
    let trimmed = email.trim().to_string();

    if !trimmed.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    Ok(Self(trimmed))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl TryFrom<String> for EmailAddress {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<EmailAddress> for String {
  fn from(email: EmailAddress) -> Self {
    email.0
  }
}

impl fmt::Display for EmailAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for EmailAddress {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
