use async_trait::async_trait;
use uuid::Uuid;

use super::entities::User;
use super::errors::{TokenError, UserError};
use super::tokens::{AccessTokenClaims, RefreshTokenDescriptor, TokenPair, TokenUser};
use super::value_objects::{Password, PasswordHash, Username};
use crate::domain::common::EmailAddress;

/// Read-side repository for users; writes go through `UnitOfWork`
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Checks whether an email is registered, optionally ignoring one user
  async fn email_exists(
    &self,
    email: &EmailAddress,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, UserError>;

  /// Checks whether a username is taken, optionally ignoring one user
  async fn username_exists(
    &self,
    username: &Username,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, UserError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError>;

  /// Finds a user by username, or by username or email when the identifier contains `@`
  async fn find_by_email_or_username(&self, identifier: &str) -> Result<Option<User>, UserError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password with a fresh random salt
  async fn hash(&self, password: &Password) -> Result<PasswordHash, UserError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, UserError>;
}

/// Issues and validates signed access tokens and random refresh tokens
pub trait TokenService: Send + Sync {
  /// Issues an access token for `user` plus a new refresh token
  fn issue_tokens(&self, user: &TokenUser, roles: &[String]) -> Result<TokenPair, TokenError>;

  /// Creates a random refresh token together with its storage hash
  fn create_refresh_token(&self) -> RefreshTokenDescriptor;

  /// Verifies signature, issuer, audience and validity window of an access token
  ///
  /// No route checks bearer tokens yet; every endpoint is served unauthenticated.
  fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims, TokenError>;
}
