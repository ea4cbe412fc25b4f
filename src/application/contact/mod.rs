//! Contact use cases

mod create_contact;
mod delete_contact;
mod list_contacts;
mod read_contact;
mod update_contact;

use uuid::Uuid;

use crate::domain::common::EmailAddress;
use crate::domain::contact::{Contact, ContactDetails, ContactError, PersonName};

pub use create_contact::{CreateContactCommand, CreateContactUseCase};
pub use delete_contact::DeleteContactUseCase;
pub use list_contacts::ListContactsUseCase;
pub use read_contact::ReadContactUseCase;
pub use update_contact::{UpdateContactCommand, UpdateContactUseCase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactResponse {
  pub id: Uuid,
  pub first_name: String,
  pub last_name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub notes: Option<String>,
}

impl From<Contact> for ContactResponse {
  fn from(contact: Contact) -> Self {
    Self {
      id: contact.id,
      first_name: contact.first_name.into_inner(),
      last_name: contact.last_name.into_inner(),
      email: contact.email.map(EmailAddress::into_inner),
      phone: contact.phone,
      notes: contact.notes,
    }
  }
}

// Shared by create and update
fn parse_details(
  first_name: String,
  last_name: String,
  email: Option<String>,
  phone: Option<String>,
  notes: Option<String>,
) -> Result<ContactDetails, ContactError> {
  let email = match email {
    Some(email) if !email.trim().is_empty() => Some(EmailAddress::new(email)?),
    _ => None,
  };

  Ok(ContactDetails {
    first_name: PersonName::new(first_name)?,
    last_name: PersonName::new(last_name)?,
    email,
    phone,
    notes,
  })
}
