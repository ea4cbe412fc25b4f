use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Contact;
use super::errors::ContactError;
use super::value_objects::PersonName;

/// Read-side repository for contacts; writes go through `UnitOfWork`
#[async_trait]
pub trait ContactRepository: Send + Sync {
  /// Checks whether the name pair is taken, optionally ignoring one contact
  async fn name_exists(
    &self,
    first_name: &PersonName,
    last_name: &PersonName,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, ContactError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, ContactError>;

  /// All contacts ordered by last name, then first name
  async fn list_all(&self) -> Result<Vec<Contact>, ContactError>;
}
