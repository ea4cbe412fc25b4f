use std::sync::Arc;

use super::UserResponse;
use crate::domain::common::EmailAddress;
use crate::domain::user::{Password, UserError, UserService, Username};

/// Command for self-service registration
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub username: String,
  pub password: String,
  pub email: String,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  user_service: Arc<UserService>,
}

impl RegisterUserUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  /// Executes the registration use case
  ///
  /// # Errors
  /// Returns `UserError::EmailAlreadyInUse` or `UserError::UsernameAlreadyInUse`
  /// when the respective field is taken
  pub async fn execute(&self, command: RegisterUserCommand) -> Result<UserResponse, UserError> {
    let username = Username::new(command.username)?;
    let email = EmailAddress::new(command.email)?;
    let password = Password::new(command.password);

    let user = self
      .user_service
      .register_user(username, email, password)
      .await?;

    Ok(user.into())
  }
}
