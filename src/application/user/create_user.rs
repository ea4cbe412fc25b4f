use std::sync::Arc;

use super::UserResponse;
use crate::domain::common::EmailAddress;
use crate::domain::user::{Password, UserError, UserService, Username};

/// Command for creating a user from the administrative endpoint
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
  pub username: String,
  /// Plain text, hashed before storage
  pub password: String,
  pub email: String,
}

pub struct CreateUserUseCase {
  user_service: Arc<UserService>,
}

impl CreateUserUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  /// Executes the create user use case
  ///
  /// # Errors
  /// Returns `UserError::UserAlreadyExists` when the email or username is taken,
  /// `UserError::ValueObject` when a field fails validation
  pub async fn execute(&self, command: CreateUserCommand) -> Result<UserResponse, UserError> {
    let username = Username::new(command.username)?;
    let email = EmailAddress::new(command.email)?;
    let password = Password::new(command.password);

    let user = self
      .user_service
      .create_user(username, email, password)
      .await?;

    Ok(user.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::common::ValueObjectError;
  use crate::test_support::{user_service, InMemoryStore};

  fn command(username: &str, email: &str) -> CreateUserCommand {
    CreateUserCommand {
      username: username.to_string(),
      password: "Secret123!".to_string(),
      email: email.to_string(),
    }
  }

  #[tokio::test]
  async fn test_create_returns_trimmed_projection() {
    let use_case = CreateUserUseCase::new(user_service(Arc::new(InMemoryStore::new())));

    let response = use_case
      .execute(command("  alice ", "alice@example.com"))
      .await
      .unwrap();

    assert_eq!(response.username, "alice");
    assert_eq!(response.email, "alice@example.com");
  }

  #[tokio::test]
  async fn test_create_rejects_malformed_email() {
    let store = Arc::new(InMemoryStore::new());
    let use_case = CreateUserUseCase::new(user_service(store.clone()));

    let result = use_case.execute(command("alice", "not-an-email")).await;

    assert!(matches!(
      result,
      Err(UserError::ValueObject(ValueObjectError::InvalidEmail(_)))
    ));
    assert_eq!(store.user_count(), 0);
  }
}
