use thiserror::Error;

use crate::domain::common::{RepositoryError, ValueObjectError};

#[derive(Debug, Error)]
pub enum ContactError {
  #[error("Contact already exists.")]
  ContactAlreadyExists,

  #[error("Contact not found.")]
  ContactNotFound,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

impl From<sqlx::Error> for ContactError {
  fn from(error: sqlx::Error) -> Self {
    ContactError::Repository(RepositoryError::from(error))
  }
}
