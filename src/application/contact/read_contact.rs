use std::sync::Arc;
use uuid::Uuid;

use super::ContactResponse;
use crate::domain::contact::{ContactError, ContactService};

pub struct ReadContactUseCase {
  contact_service: Arc<ContactService>,
}

impl ReadContactUseCase {
  pub fn new(contact_service: Arc<ContactService>) -> Self {
    Self { contact_service }
  }

  pub async fn execute(&self, id: Uuid) -> Result<ContactResponse, ContactError> {
    let contact = self.contact_service.get_contact(id).await?;
    Ok(contact.into())
  }
}
