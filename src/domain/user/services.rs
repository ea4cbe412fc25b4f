use std::sync::Arc;
use uuid::Uuid;

use super::entities::User;
use super::errors::UserError;
use super::ports::{PasswordHasher, TokenService, UserRepository};
use super::tokens::{TokenPair, TokenUser};
use super::value_objects::{Password, Username};
use crate::domain::common::{ChangeSet, EmailAddress, RepositoryError, UnitOfWork};

/// How uniqueness violations are reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConflictReporting {
  /// One message for both fields
  Generic,
  /// Separate messages for email and username
  Specific,
}

impl ConflictReporting {
  fn email_conflict(self) -> UserError {
    match self {
      ConflictReporting::Generic => UserError::UserAlreadyExists,
      ConflictReporting::Specific => UserError::EmailAlreadyInUse,
    }
  }

  fn username_conflict(self) -> UserError {
    match self {
      ConflictReporting::Generic => UserError::UserAlreadyExists,
      ConflictReporting::Specific => UserError::UsernameAlreadyInUse,
    }
  }
}

/// New field values for an existing user
#[derive(Debug, Clone)]
pub struct UserChanges {
  pub username: Username,
  pub email: EmailAddress,
  /// Replaces the stored hash when present and not blank
  pub password: Option<Password>,
}

/// User account service implementing the core rules
pub struct UserService {
  user_repo: Arc<dyn UserRepository>,
  unit_of_work: Arc<dyn UnitOfWork>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_service: Arc<dyn TokenService>,
}

impl UserService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
  ) -> Self {
    Self {
      user_repo,
      unit_of_work,
      password_hasher,
      token_service,
    }
  }

  /// Creates a user on behalf of an operator
  ///
  /// # Errors
  /// Returns `UserError::UserAlreadyExists` if the email or username is taken
  pub async fn create_user(
    &self,
    username: Username,
    email: EmailAddress,
    password: Password,
  ) -> Result<User, UserError> {
    self
      .add_user(username, email, password, ConflictReporting::Generic)
      .await
  }

  /// Self-service sign up
  ///
  /// # Errors
  /// Returns `UserError::EmailAlreadyInUse` or `UserError::UsernameAlreadyInUse`
  pub async fn register_user(
    &self,
    username: Username,
    email: EmailAddress,
    password: Password,
  ) -> Result<User, UserError> {
    self
      .add_user(username, email, password, ConflictReporting::Specific)
      .await
  }

  /// Loads a user by id
  ///
  /// # Errors
  /// Returns `UserError::UserNotFound` if no such user exists
  pub async fn get_user(&self, id: Uuid) -> Result<User, UserError> {
    self
      .user_repo
      .find_by_id(id)
      .await?
      .ok_or(UserError::UserNotFound)
  }

  /// Replaces username and email, and the password when one is supplied
  ///
  /// # Errors
  /// Returns `UserError::UserNotFound` for unknown ids and a conflict when the
  /// new email or username belongs to another user
  pub async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, UserError> {
    let mut user = self.get_user(id).await?;

    self
      .ensure_unique(
        &changes.email,
        &changes.username,
        Some(id),
        ConflictReporting::Specific,
      )
      .await?;

    if let Some(password) = changes.password.as_ref().filter(|p| !p.is_blank()) {
      let password_hash = self.password_hasher.hash(password).await?;
      user.change_password_hash(password_hash);
    }
    user.rename(changes.username);
    user.change_email(changes.email);

    let mut change_set = ChangeSet::new();
    change_set.update_user(user.clone());
    self
      .commit(change_set, ConflictReporting::Specific)
      .await?;

    tracing::info!(user_id = %user.id, "User updated");
    Ok(user)
  }

  /// Removes a user
  ///
  /// # Errors
  /// Returns `UserError::UserNotFound` if no such user exists
  pub async fn delete_user(&self, id: Uuid) -> Result<(), UserError> {
    let user = self.get_user(id).await?;

    let mut changes = ChangeSet::new();
    changes.delete_user(user.id);
    self.commit(changes, ConflictReporting::Generic).await?;

    tracing::info!(user_id = %user.id, "User deleted");
    Ok(())
  }

  /// Authenticates by username or email and issues a token pair
  ///
  /// Unknown identifiers, wrong passwords and unreadable stored hashes all
  /// produce the same `UserError::InvalidCredentials`.
  pub async fn login(
    &self,
    identifier: &str,
    password: &Password,
  ) -> Result<(User, TokenPair), UserError> {
    let identifier = identifier.trim();

    let Some(user) = self.user_repo.find_by_email_or_username(identifier).await? else {
      tracing::info!("Login rejected: unknown identifier");
      return Err(UserError::InvalidCredentials);
    };

    let verified = match self.password_hasher.verify(password, &user.password_hash).await {
      Ok(verified) => verified,
      Err(e) => {
        tracing::warn!(user_id = %user.id, error = %e, "Stored password hash could not be verified");
        false
      }
    };

    if !verified {
      tracing::info!(user_id = %user.id, "Login rejected: password mismatch");
      return Err(UserError::InvalidCredentials);
    }

    let tokens = self
      .token_service
      .issue_tokens(&TokenUser::from(&user), &[])?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok((user, tokens))
  }

  async fn add_user(
    &self,
    username: Username,
    email: EmailAddress,
    password: Password,
    reporting: ConflictReporting,
  ) -> Result<User, UserError> {
    self
      .ensure_unique(&email, &username, None, reporting)
      .await?;

    let password_hash = self.password_hasher.hash(&password).await?;
    let user = User::new(username, email, password_hash);

    let mut changes = ChangeSet::new();
    changes.insert_user(user.clone());
    self.commit(changes, reporting).await?;

    tracing::info!(user_id = %user.id, "User created");
    Ok(user)
  }

  async fn ensure_unique(
    &self,
    email: &EmailAddress,
    username: &Username,
    exclude_id: Option<Uuid>,
    reporting: ConflictReporting,
  ) -> Result<(), UserError> {
    if self.user_repo.email_exists(email, exclude_id).await? {
      tracing::warn!("User write rejected: email already in use");
      return Err(reporting.email_conflict());
    }

    if self.user_repo.username_exists(username, exclude_id).await? {
      tracing::warn!(username = %username, "User write rejected: username already in use");
      return Err(reporting.username_conflict());
    }

    Ok(())
  }

  async fn commit(
    &self,
    changes: ChangeSet,
    reporting: ConflictReporting,
  ) -> Result<(), UserError> {
    match self.unit_of_work.save_changes(changes).await {
      Ok(_) => Ok(()),
      // Lost a race against a concurrent writer after the pre-insert check
      Err(RepositoryError::DuplicateKey(constraint)) => {
        if constraint.contains("email") {
          Err(reporting.email_conflict())
        } else {
          Err(reporting.username_conflict())
        }
      }
      Err(RepositoryError::NotFound) => Err(UserError::UserNotFound),
      Err(e) => Err(e.into()),
    }
  }
}
