use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::UserResponse;
use crate::domain::user::{Password, UserError, UserService};

/// Command for logging in with a username or email
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// Username, or an email address when it contains `@`
  pub identifier: String,
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub access_token: String,
  pub access_token_expires_at: DateTime<Utc>,
  pub refresh_token: String,
  pub refresh_token_expires_at: DateTime<Utc>,
  pub user: UserResponse,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  user_service: Arc<UserService>,
}

impl LoginUserUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  /// Executes the login use case
  ///
  /// # Errors
  /// Returns `UserError::InvalidCredentials` for any authentication failure
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, UserError> {
    let password = Password::new(command.password);

    let (user, tokens) = self
      .user_service
      .login(&command.identifier, &password)
      .await?;

    // The refresh token hash stays server-side
    Ok(LoginUserResponse {
      access_token: tokens.access_token,
      access_token_expires_at: tokens.access_token_expires_at,
      refresh_token: tokens.refresh_token,
      refresh_token_expires_at: tokens.refresh_token_expires_at,
      user: user.into(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::user::{RegisterUserCommand, RegisterUserUseCase};
  use crate::test_support::{user_service, InMemoryStore};

  #[tokio::test]
  async fn test_login_returns_tokens_and_user_projection() {
    let store = Arc::new(InMemoryStore::new());
    let service = user_service(store);
    let register = RegisterUserUseCase::new(service.clone());
    let login = LoginUserUseCase::new(service);

    let registered = register
      .execute(RegisterUserCommand {
        username: "alice".to_string(),
        password: "Secret123!".to_string(),
        email: "alice@example.com".to_string(),
      })
      .await
      .unwrap();

    let response = login
      .execute(LoginUserCommand {
        identifier: " alice@example.com ".to_string(),
        password: "Secret123!".to_string(),
      })
      .await
      .unwrap();

    assert_eq!(response.user, registered);
    assert!(response.access_token_expires_at < response.refresh_token_expires_at);
  }
}
