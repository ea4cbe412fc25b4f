use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::domain::contact::entities::Contact;
use crate::domain::user::entities::User;

/// A single pending write
#[derive(Debug, Clone)]
pub enum Change {
  InsertUser(User),
  UpdateUser(User),
  DeleteUser(Uuid),
  InsertContact(Contact),
  UpdateContact(Contact),
  DeleteContact(Uuid),
}

/// Ordered collection of pending writes committed together
#[derive(Debug, Default, Clone)]
pub struct ChangeSet {
  changes: Vec<Change>,
}

impl ChangeSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert_user(&mut self, user: User) -> &mut Self {
    self.changes.push(Change::InsertUser(user));
    self
  }

  pub fn update_user(&mut self, user: User) -> &mut Self {
    self.changes.push(Change::UpdateUser(user));
    self
  }

  pub fn delete_user(&mut self, id: Uuid) -> &mut Self {
    self.changes.push(Change::DeleteUser(id));
    self
  }

  pub fn insert_contact(&mut self, contact: Contact) -> &mut Self {
    self.changes.push(Change::InsertContact(contact));
    self
  }

  pub fn update_contact(&mut self, contact: Contact) -> &mut Self {
    self.changes.push(Change::UpdateContact(contact));
    self
  }

  pub fn delete_contact(&mut self, id: Uuid) -> &mut Self {
    self.changes.push(Change::DeleteContact(id));
    self
  }

  pub fn is_empty(&self) -> bool {
    self.changes.is_empty()
  }

  pub fn len(&self) -> usize {
    self.changes.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Change> {
    self.changes.iter()
  }
}

impl IntoIterator for ChangeSet {
  type Item = Change;
  type IntoIter = std::vec::IntoIter<Change>;

  fn into_iter(self) -> Self::IntoIter {
    self.changes.into_iter()
  }
}

/// Commits a change set atomically
///
/// Implementations must apply either every change or none of them. Updates and
/// deletes that match no row fail with `RepositoryError::NotFound`, unique
/// constraint violations with `RepositoryError::DuplicateKey`.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
  /// Applies all changes in one transaction and returns the number of affected rows
  async fn save_changes(&self, changes: ChangeSet) -> Result<u64, RepositoryError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_change_set_keeps_order() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let mut changes = ChangeSet::new();
    changes.delete_user(first).delete_contact(second);

    assert_eq!(changes.len(), 2);
    let collected: Vec<Change> = changes.into_iter().collect();
    assert!(matches!(collected[0], Change::DeleteUser(id) if id == first));
    assert!(matches!(collected[1], Change::DeleteContact(id) if id == second));
  }

  #[test]
  fn test_empty_change_set() {
    let changes = ChangeSet::new();
    assert!(changes.is_empty());
    assert_eq!(changes.iter().count(), 0);
  }
}
