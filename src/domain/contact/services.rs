use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Contact, ContactDetails};
use super::errors::ContactError;
use super::ports::ContactRepository;
use crate::domain::common::{ChangeSet, RepositoryError, UnitOfWork};

pub struct ContactService {
  contact_repo: Arc<dyn ContactRepository>,
  unit_of_work: Arc<dyn UnitOfWork>,
}

impl ContactService {
  pub fn new(contact_repo: Arc<dyn ContactRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
    Self {
      contact_repo,
      unit_of_work,
    }
  }

  pub async fn create_contact(&self, details: ContactDetails) -> Result<Contact, ContactError> {
    if self
      .contact_repo
      .name_exists(&details.first_name, &details.last_name, None)
      .await?
    {
      tracing::warn!(
        first_name = %details.first_name,
        last_name = %details.last_name,
        "Contact already exists"
      );
      return Err(ContactError::ContactAlreadyExists);
    }

    let contact = Contact::new(details);

    let mut changes = ChangeSet::new();
    changes.insert_contact(contact.clone());
    self.commit(changes).await?;

    tracing::info!(contact_id = %contact.id, "Contact created");
    Ok(contact)
  }

  pub async fn get_contact(&self, id: Uuid) -> Result<Contact, ContactError> {
    self
      .contact_repo
      .find_by_id(id)
      .await?
      .ok_or(ContactError::ContactNotFound)
  }

  /// Overwrites every field of an existing contact
  pub async fn update_contact(
    &self,
    id: Uuid,
    details: ContactDetails,
  ) -> Result<Contact, ContactError> {
    let mut contact = self.get_contact(id).await?;

    if self
      .contact_repo
      .name_exists(&details.first_name, &details.last_name, Some(id))
      .await?
    {
      tracing::warn!(contact_id = %id, "Contact rename rejected: name pair taken");
      return Err(ContactError::ContactAlreadyExists);
    }

    contact.update(details);

    let mut changes = ChangeSet::new();
    changes.update_contact(contact.clone());
    self.commit(changes).await?;

    tracing::info!(contact_id = %contact.id, "Contact updated");
    Ok(contact)
  }

  pub async fn delete_contact(&self, id: Uuid) -> Result<(), ContactError> {
    let contact = self.get_contact(id).await?;

    let mut changes = ChangeSet::new();
    changes.delete_contact(contact.id);
    self.commit(changes).await?;

    tracing::info!(contact_id = %id, "Contact deleted");
    Ok(())
  }

  pub async fn list_contacts(&self) -> Result<Vec<Contact>, ContactError> {
    self.contact_repo.list_all().await
  }

  async fn commit(&self, changes: ChangeSet) -> Result<(), ContactError> {
    match self.unit_of_work.save_changes(changes).await {
      Ok(_) => Ok(()),
      Err(RepositoryError::DuplicateKey(_)) => Err(ContactError::ContactAlreadyExists),
      Err(RepositoryError::NotFound) => Err(ContactError::ContactNotFound),
      Err(e) => Err(e.into()),
    }
  }
}
