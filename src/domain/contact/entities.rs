use uuid::Uuid;

use super::value_objects::PersonName;
use crate::domain::common::EmailAddress;

/// Editable fields of a contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
  pub first_name: PersonName,
  pub last_name: PersonName,
  pub email: Option<EmailAddress>,
  pub phone: Option<String>,
  pub notes: Option<String>,
}

/// Address book entry, unique by first and last name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
  pub id: Uuid,
  pub first_name: PersonName,
  pub last_name: PersonName,
  pub email: Option<EmailAddress>,
  pub phone: Option<String>,
  pub notes: Option<String>,
}

impl Contact {
  pub fn new(details: ContactDetails) -> Self {
    Self::from_db(Uuid::new_v4(), details)
  }

  /// Rebuilds a contact from a stored row
  pub fn from_db(id: Uuid, details: ContactDetails) -> Self {
    Self {
      id,
      first_name: details.first_name,
      last_name: details.last_name,
      email: details.email,
      phone: normalize(details.phone),
      notes: normalize(details.notes),
    }
  }

  /// Overwrites every field; `None` clears the optional ones
  pub fn update(&mut self, details: ContactDetails) {
    self.first_name = details.first_name;
    self.last_name = details.last_name;
    self.email = details.email;
    self.phone = normalize(details.phone);
    self.notes = normalize(details.notes);
  }
}

// Blank strings are stored as missing
fn normalize(value: Option<String>) -> Option<String> {
  value.and_then(|v| {
    let trimmed = v.trim();
    if trimmed.is_empty() {
      None
    } else {
      Some(trimmed.to_string())
    }
  })
}
