use thiserror::Error;

/// Errors raised while constructing value objects from raw input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Invalid username: {0}")]
  InvalidUsername(String),

  #[error("Invalid name: {0}")]
  InvalidName(String),

  #[error("Invalid password hash format")]
  InvalidPasswordHash,
}

/// Repository-related errors shared by every persistence port
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Transaction failed: {0}")]
  TransactionFailed(String),

  #[error("Record not found")]
  NotFound,

  /// Unique constraint violation; carries the constraint name when the driver reports one
  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Stored row could not be mapped: {0}")]
  CorruptRow(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

impl RepositoryError {
  /// Returns the violated constraint name for duplicate key errors
  pub fn duplicate_constraint(&self) -> Option<&str> {
    match self {
      RepositoryError::DuplicateKey(constraint) => Some(constraint.as_str()),
      _ => None,
    }
  }
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          let constraint = db_err
            .constraint()
            .map(str::to_string)
            .unwrap_or_else(|| db_err.message().to_string());
          RepositoryError::DuplicateKey(constraint)
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      sqlx::Error::Io(e) => RepositoryError::ConnectionFailed(e.to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<ValueObjectError> for RepositoryError {
  fn from(error: ValueObjectError) -> Self {
    RepositoryError::CorruptRow(error.to_string())
  }
}
