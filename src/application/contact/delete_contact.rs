use std::sync::Arc;
use uuid::Uuid;

use crate::domain::contact::{ContactError, ContactService};

pub struct DeleteContactUseCase {
  contact_service: Arc<ContactService>,
}

impl DeleteContactUseCase {
  pub fn new(contact_service: Arc<ContactService>) -> Self {
    Self { contact_service }
  }

  pub async fn execute(&self, id: Uuid) -> Result<(), ContactError> {
    self.contact_service.delete_contact(id).await
  }
}
