use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{UserError, UserService};

pub struct DeleteUserUseCase {
  user_service: Arc<UserService>,
}

impl DeleteUserUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  pub async fn execute(&self, id: Uuid) -> Result<(), UserError> {
    self.user_service.delete_user(id).await
  }
}
