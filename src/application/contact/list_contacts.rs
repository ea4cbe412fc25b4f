use std::sync::Arc;

use super::ContactResponse;
use crate::domain::contact::{ContactError, ContactService};

/// Lists every contact, ordered by last name then first name
pub struct ListContactsUseCase {
  contact_service: Arc<ContactService>,
}

impl ListContactsUseCase {
  pub fn new(contact_service: Arc<ContactService>) -> Self {
    Self { contact_service }
  }

  pub async fn execute(&self) -> Result<Vec<ContactResponse>, ContactError> {
    let contacts = self.contact_service.list_contacts().await?;
    Ok(contacts.into_iter().map(ContactResponse::from).collect())
  }
}
