use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::common::{EmailAddress, RepositoryError};
use crate::domain::user::{
  entities::User,
  errors::UserError,
  ports::UserRepository,
  value_objects::{PasswordHash, Username},
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  username: String,
  email: String,
  password_hash: String,
}

impl TryFrom<UserRow> for User {
  type Error = RepositoryError;

  fn try_from(row: UserRow) -> Result<Self, Self::Error> {
    Ok(User::from_db(
      row.id,
      Username::new(row.username)?,
      EmailAddress::new(row.email)?,
      PasswordHash::from_hash(row.password_hash)?,
    ))
  }
}

fn into_user(row: Option<UserRow>) -> Result<Option<User>, UserError> {
  Ok(row.map(User::try_from).transpose()?)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn email_exists(
    &self,
    email: &EmailAddress,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, UserError> {
    let exists = sqlx::query_scalar::<_, bool>(
      r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
    )
    .bind(email.as_str())
    .bind(exclude_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(exists)
  }

  async fn username_exists(
    &self,
    username: &Username,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, UserError> {
    let exists = sqlx::query_scalar::<_, bool>(
      r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE username = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
    )
    .bind(username.as_str())
    .bind(exclude_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(exists)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    into_user(row)
  }

  async fn find_by_email_or_username(&self, identifier: &str) -> Result<Option<User>, UserError> {
    // Email matching only applies to identifiers that look like an address
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE username = $1 OR ($2 AND email = $1)
            ORDER BY (username = $1) DESC
            LIMIT 1
            "#,
    )
    .bind(identifier)
    .bind(identifier.contains('@'))
    .fetch_optional(&self.pool)
    .await?;

    into_user(row)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::common::{ChangeSet, UnitOfWork};
  use crate::domain::user::ports::PasswordHasher;
  use crate::domain::user::Password;
  use crate::infrastructure::persistence::postgres::{PostgresUnitOfWork, test_db::setup_test_db};
  use crate::test_support::FastPasswordHasher;

  async fn seed(pool: &PgPool, username: &str, email: &str) -> User {
    let hash = FastPasswordHasher
      .hash(&Password::new("Secret123!"))
      .await
      .unwrap();
    let user = User::new(
      Username::new(username).unwrap(),
      EmailAddress::new(email).unwrap(),
      hash,
    );
    let mut changes = ChangeSet::new();
    changes.insert_user(user.clone());
    PostgresUnitOfWork::new(pool.clone())
      .save_changes(changes)
      .await
      .unwrap();
    user
  }

  #[tokio::test]
  #[ignore = "requires a running Docker daemon"]
  async fn test_find_by_id_round_trips_user() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool.clone());
    let user = seed(&pool, "alice", "alice@example.com").await;

    let found = repo.find_by_id(user.id).await.unwrap();

    assert_eq!(found, Some(user));
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  #[ignore = "requires a running Docker daemon"]
  async fn test_exists_checks_honour_exclusion() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool.clone());
    let user = seed(&pool, "alice", "alice@example.com").await;

    assert!(repo.email_exists(&user.email, None).await.unwrap());
    assert!(!repo.email_exists(&user.email, Some(user.id)).await.unwrap());
    assert!(repo.username_exists(&user.username, None).await.unwrap());
    assert!(!repo.username_exists(&user.username, Some(user.id)).await.unwrap());
    let other = Username::new("bob").unwrap();
    assert!(!repo.username_exists(&other, None).await.unwrap());
  }

  #[tokio::test]
  #[ignore = "requires a running Docker daemon"]
  async fn test_identifier_lookup_rules() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool.clone());
    let alice = seed(&pool, "alice", "alice@example.com").await;

    let by_name = repo.find_by_email_or_username("alice").await.unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(alice.id));

    let by_email = repo
      .find_by_email_or_username("alice@example.com")
      .await
      .unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(alice.id));

    assert!(repo.find_by_email_or_username("nobody").await.unwrap().is_none());
  }
}
