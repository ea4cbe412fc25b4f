use thiserror::Error;

use crate::domain::common::{RepositoryError, ValueObjectError};

/// Main user/authentication error type
#[derive(Debug, Error)]
pub enum UserError {
  #[error("Invalid credentials.")]
  InvalidCredentials,

  /// Generic conflict used by the administrative create flow
  #[error("User already exists.")]
  UserAlreadyExists,

  #[error("Email already in use.")]
  EmailAlreadyInUse,

  #[error("Username already in use.")]
  UsernameAlreadyInUse,

  #[error("User not found.")]
  UserNotFound,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Token error: {0}")]
  Token(#[from] TokenError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

impl UserError {
  /// True for the uniqueness violations surfaced to callers as conflicts
  pub fn is_conflict(&self) -> bool {
    matches!(
      self,
      UserError::UserAlreadyExists | UserError::EmailAlreadyInUse | UserError::UsernameAlreadyInUse
    )
  }
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

/// Access/refresh token errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
  #[error("Signing key must be at least {min} bytes")]
  InvalidSigningKey { min: usize },

  #[error("{0} must be a positive duration")]
  InvalidLifetime(&'static str),

  #[error("Failed to encode token: {0}")]
  Encoding(String),

  #[error("Malformed token")]
  Malformed,

  #[error("Unsupported token algorithm: {0}")]
  UnsupportedAlgorithm(String),

  #[error("Invalid token signature")]
  InvalidSignature,

  #[error("Unexpected token issuer")]
  InvalidIssuer,

  #[error("Unexpected token audience")]
  InvalidAudience,

  #[error("Token is not valid yet")]
  NotYetValid,

  #[error("Token has expired")]
  Expired,
}

impl From<sqlx::Error> for UserError {
  fn from(error: sqlx::Error) -> Self {
    UserError::Repository(RepositoryError::from(error))
  }
}
