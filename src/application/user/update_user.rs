use std::sync::Arc;
use uuid::Uuid;

use super::UserResponse;
use crate::domain::common::EmailAddress;
use crate::domain::user::{Password, UserChanges, UserError, UserService, Username};

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
  pub id: Uuid,
  pub username: String,
  /// New password; `None` or blank keeps the current one
  pub password: Option<String>,
  pub email: String,
}

pub struct UpdateUserUseCase {
  user_service: Arc<UserService>,
}

impl UpdateUserUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  pub async fn execute(&self, command: UpdateUserCommand) -> Result<UserResponse, UserError> {
    let changes = UserChanges {
      username: Username::new(command.username)?,
      email: EmailAddress::new(command.email)?,
      password: command.password.map(Password::new),
    };

    let user = self.user_service.update_user(command.id, changes).await?;

    Ok(user.into())
  }
}
