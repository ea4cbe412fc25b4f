//! User account use cases
//!
//! Each use case parses raw command input into domain value objects, delegates
//! to `UserService` and flattens the result into a plain response.

mod create_user;
mod delete_user;
mod login_user;
mod read_user;
mod register_user;
mod update_user;

use uuid::Uuid;

use crate::domain::user::User;

pub use create_user::{CreateUserCommand, CreateUserUseCase};
pub use delete_user::DeleteUserUseCase;
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use read_user::ReadUserUseCase;
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};
pub use update_user::{UpdateUserCommand, UpdateUserUseCase};

/// Public projection of a user; never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
  pub id: Uuid,
  pub username: String,
  pub email: String,
}

impl From<User> for UserResponse {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      username: user.username.into_inner(),
      email: user.email.into_inner(),
    }
  }
}
