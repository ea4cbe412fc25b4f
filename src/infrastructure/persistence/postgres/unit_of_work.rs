use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::common::{Change, ChangeSet, RepositoryError, UnitOfWork};
use crate::domain::contact::Contact;
use crate::domain::user::User;

/// Applies a change set inside one Postgres transaction
///
/// Dropping the future before commit rolls the transaction back.
pub struct PostgresUnitOfWork {
  pool: PgPool,
}

impl PostgresUnitOfWork {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
  async fn save_changes(&self, changes: ChangeSet) -> Result<u64, RepositoryError> {
    if changes.is_empty() {
      return Ok(0);
    }

    let mut tx = self
      .pool
      .begin()
      .await
      .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;

    let mut affected = 0;
    for change in changes {
      affected += apply(&mut tx, change).await?;
    }

    tx.commit()
      .await
      .map_err(|e| RepositoryError::TransactionFailed(e.to_string()))?;

    tracing::debug!(rows = affected, "Committed change set");
    Ok(affected)
  }
}

async fn apply(tx: &mut Transaction<'_, Postgres>, change: Change) -> Result<u64, RepositoryError> {
  let rows = match change {
    Change::InsertUser(user) => insert_user(tx, &user).await?,
    Change::UpdateUser(user) => update_user(tx, &user).await?,
    Change::DeleteUser(id) => {
      sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?
        .rows_affected()
    }
    Change::InsertContact(contact) => insert_contact(tx, &contact).await?,
    Change::UpdateContact(contact) => update_contact(tx, &contact).await?,
    Change::DeleteContact(id) => {
      sqlx::query("DELETE FROM contacts WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?
        .rows_affected()
    }
  };

  if rows == 0 {
    return Err(RepositoryError::NotFound);
  }
  Ok(rows)
}

async fn insert_user(tx: &mut Transaction<'_, Postgres>, user: &User) -> Result<u64, sqlx::Error> {
  let result = sqlx::query(
    r#"
        INSERT INTO users (id, username, email, password_hash)
        VALUES ($1, $2, $3, $4)
        "#,
  )
  .bind(user.id)
  .bind(user.username.as_str())
  .bind(user.email.as_str())
  .bind(user.password_hash.as_str())
  .execute(&mut **tx)
  .await?;

  Ok(result.rows_affected())
}

async fn update_user(tx: &mut Transaction<'_, Postgres>, user: &User) -> Result<u64, sqlx::Error> {
  let result = sqlx::query(
    r#"
        UPDATE users
        SET username = $2, email = $3, password_hash = $4
        WHERE id = $1
        "#,
  )
  .bind(user.id)
  .bind(user.username.as_str())
  .bind(user.email.as_str())
  .bind(user.password_hash.as_str())
  .execute(&mut **tx)
  .await?;

  Ok(result.rows_affected())
}

async fn insert_contact(
  tx: &mut Transaction<'_, Postgres>,
  contact: &Contact,
) -> Result<u64, sqlx::Error> {
  let result = sqlx::query(
    r#"
        INSERT INTO contacts (id, first_name, last_name, email, phone, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
  )
  .bind(contact.id)
  .bind(contact.first_name.as_str())
  .bind(contact.last_name.as_str())
  .bind(contact.email.as_ref().map(|e| e.as_str()))
  .bind(contact.phone.as_deref())
  .bind(contact.notes.as_deref())
  .execute(&mut **tx)
  .await?;

  Ok(result.rows_affected())
}

async fn update_contact(
  tx: &mut Transaction<'_, Postgres>,
  contact: &Contact,
) -> Result<u64, sqlx::Error> {
  let result = sqlx::query(
    r#"
        UPDATE contacts
        SET first_name = $2, last_name = $3, email = $4, phone = $5, notes = $6
        WHERE id = $1
        "#,
  )
  .bind(contact.id)
  .bind(contact.first_name.as_str())
  .bind(contact.last_name.as_str())
  .bind(contact.email.as_ref().map(|e| e.as_str()))
  .bind(contact.phone.as_deref())
  .bind(contact.notes.as_deref())
  .execute(&mut **tx)
  .await?;

  Ok(result.rows_affected())
}
