use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::common::ValueObjectError;

/// First or last name of a contact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
  const MAX_LENGTH: usize = 100;

  pub fn new(name: impl Into<String>) -> Result<Self, ValueObjectError> {
    let name = name.into();
    let trimmed = name.trim();

    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidName("Name cannot be empty".to_string()));
    }

    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidName(format!(
        "Name cannot exceed {} characters",
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

impl TryFrom<String> for PersonName {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<PersonName> for String {
  fn from(name: PersonName) -> Self {
    name.0
  }
}

impl fmt::Display for PersonName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_name_trimmed() {
    assert_eq!(PersonName::new("  Ada ").unwrap().as_str(), "Ada");
  }

  #[test]
  fn test_name_rejects_blank_and_too_long() {
    assert!(matches!(
      PersonName::new("  "),
      Err(ValueObjectError::InvalidName(_))
    ));
    assert!(PersonName::new("x".repeat(101)).is_err());
    assert!(PersonName::new("x".repeat(100)).is_ok());
  }

  #[test]
  fn test_name_deserialize_validates() {
    let name: PersonName = serde_json::from_str("\" Grace \"").unwrap();
    assert_eq!(name.as_str(), "Grace");
    assert!(serde_json::from_str::<PersonName>("\"\"").is_err());
  }
}
