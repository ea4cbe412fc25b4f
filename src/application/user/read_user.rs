use std::sync::Arc;
use uuid::Uuid;

use super::UserResponse;
use crate::domain::user::{UserError, UserService};

pub struct ReadUserUseCase {
  user_service: Arc<UserService>,
}

impl ReadUserUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  pub async fn execute(&self, id: Uuid) -> Result<UserResponse, UserError> {
    let user = self.user_service.get_user(id).await?;
    Ok(user.into())
  }
}
