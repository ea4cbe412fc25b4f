use std::sync::Arc;

use super::{parse_details, ContactResponse};
use crate::domain::contact::{ContactError, ContactService};

#[derive(Debug, Clone)]
pub struct CreateContactCommand {
  pub first_name: String,
  pub last_name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub notes: Option<String>,
}

pub struct CreateContactUseCase {
  contact_service: Arc<ContactService>,
}

impl CreateContactUseCase {
  pub fn new(contact_service: Arc<ContactService>) -> Self {
    Self { contact_service }
  }

  /// Executes the create contact use case
  ///
  /// # Errors
  /// Returns `ContactError::ContactAlreadyExists` when the name pair is taken
  pub async fn execute(
    &self,
    command: CreateContactCommand,
  ) -> Result<ContactResponse, ContactError> {
    let details = parse_details(
      command.first_name,
      command.last_name,
      command.email,
      command.phone,
      command.notes,
    )?;

    let contact = self.contact_service.create_contact(details).await?;

    Ok(contact.into())
  }
}
