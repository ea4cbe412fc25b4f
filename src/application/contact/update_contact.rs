use std::sync::Arc;
use uuid::Uuid;

use super::{parse_details, ContactResponse};
use crate::domain::contact::{ContactError, ContactService};

/// Full replacement of a contact; omitted optionals are cleared
#[derive(Debug, Clone)]
pub struct UpdateContactCommand {
  pub id: Uuid,
  pub first_name: String,
  pub last_name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub notes: Option<String>,
}

pub struct UpdateContactUseCase {
  contact_service: Arc<ContactService>,
}

impl UpdateContactUseCase {
  pub fn new(contact_service: Arc<ContactService>) -> Self {
    Self { contact_service }
  }

  pub async fn execute(
    &self,
    command: UpdateContactCommand,
  ) -> Result<ContactResponse, ContactError> {
    let details = parse_details(
      command.first_name,
      command.last_name,
      command.email,
      command.phone,
      command.notes,
    )?;

    let contact = self
      .contact_service
      .update_contact(command.id, details)
      .await?;

    Ok(contact.into())
  }
}
