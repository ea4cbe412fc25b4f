use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::common::{EmailAddress, RepositoryError};
use crate::domain::contact::{
  Contact, ContactDetails, PersonName, errors::ContactError, ports::ContactRepository,
};

#[derive(Debug, FromRow)]
struct ContactRow {
  id: Uuid,
  first_name: String,
  last_name: String,
  email: Option<String>,
  phone: Option<String>,
  notes: Option<String>,
}

impl TryFrom<ContactRow> for Contact {
  type Error = RepositoryError;

  fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
    let details = ContactDetails {
      first_name: PersonName::new(row.first_name)?,
      last_name: PersonName::new(row.last_name)?,
      email: row.email.map(EmailAddress::new).transpose()?,
      phone: row.phone,
      notes: row.notes,
    };
    Ok(Contact::from_db(row.id, details))
  }
}

pub struct PostgresContactRepository {
  pool: PgPool,
}

impl PostgresContactRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
  async fn name_exists(
    &self,
    first_name: &PersonName,
    last_name: &PersonName,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, ContactError> {
    let result = if let Some(exclude_id) = exclude_id {
      sqlx::query_scalar::<_, bool>(
        r#"
                SELECT EXISTS(
                    SELECT 1 FROM contacts
                    WHERE first_name = $1 AND last_name = $2 AND id != $3
                )
                "#,
      )
      .bind(first_name.as_str())
      .bind(last_name.as_str())
      .bind(exclude_id)
      .fetch_one(&self.pool)
      .await?
    } else {
      sqlx::query_scalar::<_, bool>(
        r#"
                SELECT EXISTS(
                    SELECT 1 FROM contacts
                    WHERE first_name = $1 AND last_name = $2
                )
                "#,
      )
      .bind(first_name.as_str())
      .bind(last_name.as_str())
      .fetch_one(&self.pool)
      .await?
    };

    Ok(result)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, ContactError> {
    let row = sqlx::query_as::<_, ContactRow>(
      r#"
            SELECT id, first_name, last_name, email, phone, notes
            FROM contacts
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Contact::try_from).transpose()?)
  }

  async fn list_all(&self) -> Result<Vec<Contact>, ContactError> {
    let rows = sqlx::query_as::<_, ContactRow>(
      r#"
            SELECT id, first_name, last_name, email, phone, notes
            FROM contacts
            ORDER BY last_name, first_name
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows
      .into_iter()
      .map(|r| Contact::try_from(r).map_err(ContactError::from))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::common::{ChangeSet, UnitOfWork};
  use crate::infrastructure::persistence::postgres::{PostgresUnitOfWork, test_db::setup_test_db};

  fn contact(first: &str, last: &str, email: Option<&str>) -> Contact {
    Contact::new(ContactDetails {
      first_name: PersonName::new(first).unwrap(),
      last_name: PersonName::new(last).unwrap(),
      email: email.map(|e| EmailAddress::new(e).unwrap()),
      phone: None,
      notes: None,
    })
  }

  async fn insert(pool: &PgPool, contacts: &[Contact]) {
    let mut changes = ChangeSet::new();
    for c in contacts {
      changes.insert_contact(c.clone());
    }
    PostgresUnitOfWork::new(pool.clone())
      .save_changes(changes)
      .await
      .unwrap();
  }

  #[tokio::test]
  #[ignore = "requires a running Docker daemon"]
  async fn test_find_by_id_maps_optional_columns() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresContactRepository::new(pool.clone());
    let ada = contact("Ada", "Lovelace", Some("ada@example.com"));
    let grace = contact("Grace", "Hopper", None);
    insert(&pool, &[ada.clone(), grace.clone()]).await;

    assert_eq!(repo.find_by_id(ada.id).await.unwrap(), Some(ada));
    assert_eq!(repo.find_by_id(grace.id).await.unwrap(), Some(grace));
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  #[ignore = "requires a running Docker daemon"]
  async fn test_name_exists_and_listing_order() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresContactRepository::new(pool.clone());
    let grace = contact("Grace", "Hopper", None);
    insert(
      &pool,
      &[
        grace.clone(),
        contact("Ada", "Lovelace", None),
        contact("Alan", "Hopper", None),
      ],
    )
    .await;

    assert!(
      repo
        .name_exists(&grace.first_name, &grace.last_name, None)
        .await
        .unwrap()
    );
    assert!(
      !repo
        .name_exists(&grace.first_name, &grace.last_name, Some(grace.id))
        .await
        .unwrap()
    );

    let names: Vec<String> = repo
      .list_all()
      .await
      .unwrap()
      .into_iter()
      .map(|c| format!("{} {}", c.first_name, c.last_name))
      .collect();
    assert_eq!(names, vec!["Alan Hopper", "Grace Hopper", "Ada Lovelace"]);
  }
}
