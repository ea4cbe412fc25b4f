//! In-memory port implementations for service, use case and handler tests

use argon2::password_hash::{PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::common::{Change, ChangeSet, EmailAddress, RepositoryError, UnitOfWork};
use crate::domain::contact::ports::ContactRepository;
use crate::domain::contact::{Contact, ContactError, ContactService, PersonName};
use crate::domain::user::ports::{PasswordHasher, TokenService, UserRepository};
use crate::domain::user::{
  AccessTokenClaims, HashError, Password, PasswordHash, RefreshTokenDescriptor, TokenError,
  TokenPair, TokenUser, User, UserError, UserService, Username,
};

/// Users and contacts behind mutexes; commits are all or nothing
#[derive(Default)]
pub struct InMemoryStore {
  users: Mutex<Vec<User>>,
  contacts: Mutex<Vec<Contact>>,
  fail_next_commit: Mutex<Option<String>>,
  commits: AtomicUsize,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn user_count(&self) -> usize {
    self.users.lock().unwrap().len()
  }

  pub fn contact_count(&self) -> usize {
    self.contacts.lock().unwrap().len()
  }

  pub fn commit_count(&self) -> usize {
    self.commits.load(Ordering::SeqCst)
  }

  /// Makes the next commit fail as if `constraint` had been violated
  pub fn fail_next_commit_with_duplicate(&self, constraint: &str) {
    *self.fail_next_commit.lock().unwrap() = Some(constraint.to_string());
  }
}

fn check_user_unique(users: &[User], candidate: &User) -> Result<(), RepositoryError> {
  let others = users.iter().filter(|u| u.id != candidate.id);
  for other in others {
    if other.email == candidate.email {
      return Err(RepositoryError::DuplicateKey("users_email_key".to_string()));
    }
    if other.username == candidate.username {
      return Err(RepositoryError::DuplicateKey("users_username_key".to_string()));
    }
  }
  Ok(())
}

fn check_contact_unique(contacts: &[Contact], candidate: &Contact) -> Result<(), RepositoryError> {
  let taken = contacts.iter().any(|c| {
    c.id != candidate.id
      && c.first_name == candidate.first_name
      && c.last_name == candidate.last_name
  });
  if taken {
    return Err(RepositoryError::DuplicateKey(
      "contacts_first_name_last_name_key".to_string(),
    ));
  }
  Ok(())
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
  async fn save_changes(&self, changes: ChangeSet) -> Result<u64, RepositoryError> {
    if let Some(constraint) = self.fail_next_commit.lock().unwrap().take() {
      return Err(RepositoryError::DuplicateKey(constraint));
    }

    let mut users_guard = self.users.lock().unwrap();
    let mut contacts_guard = self.contacts.lock().unwrap();
    let mut users = users_guard.clone();
    let mut contacts = contacts_guard.clone();
    let mut affected = 0;

    for change in changes {
      match change {
        Change::InsertUser(user) => {
          if users.iter().any(|u| u.id == user.id) {
            return Err(RepositoryError::DuplicateKey("users_pkey".to_string()));
          }
          check_user_unique(&users, &user)?;
          users.push(user);
        }
        Change::UpdateUser(user) => {
          check_user_unique(&users, &user)?;
          let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepositoryError::NotFound)?;
          *slot = user;
        }
        Change::DeleteUser(id) => {
          let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
          users.remove(index);
        }
        Change::InsertContact(contact) => {
          check_contact_unique(&contacts, &contact)?;
          contacts.push(contact);
        }
        Change::UpdateContact(contact) => {
          check_contact_unique(&contacts, &contact)?;
          let slot = contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or(RepositoryError::NotFound)?;
          *slot = contact;
        }
        Change::DeleteContact(id) => {
          let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
          contacts.remove(index);
        }
      }
      affected += 1;
    }

    *users_guard = users;
    *contacts_guard = contacts;
    self.commits.fetch_add(1, Ordering::SeqCst);
    Ok(affected)
  }
}

#[async_trait]
impl UserRepository for InMemoryStore {
  async fn email_exists(
    &self,
    email: &EmailAddress,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, UserError> {
    let users = self.users.lock().unwrap();
    Ok(
      users
        .iter()
        .any(|u| &u.email == email && Some(u.id) != exclude_id),
    )
  }

  async fn username_exists(
    &self,
    username: &Username,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, UserError> {
    let users = self.users.lock().unwrap();
    Ok(
      users
        .iter()
        .any(|u| &u.username == username && Some(u.id) != exclude_id),
    )
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
    let users = self.users.lock().unwrap();
    Ok(users.iter().find(|u| u.id == id).cloned())
  }

  async fn find_by_email_or_username(&self, identifier: &str) -> Result<Option<User>, UserError> {
    let by_email = identifier.contains('@');
    let users = self.users.lock().unwrap();
    Ok(
      users
        .iter()
        .find(|u| u.username.as_str() == identifier || (by_email && u.email.as_str() == identifier))
        .cloned(),
    )
  }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
  async fn name_exists(
    &self,
    first_name: &PersonName,
    last_name: &PersonName,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, ContactError> {
    let contacts = self.contacts.lock().unwrap();
    Ok(contacts.iter().any(|c| {
      &c.first_name == first_name && &c.last_name == last_name && Some(c.id) != exclude_id
    }))
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, ContactError> {
    let contacts = self.contacts.lock().unwrap();
    Ok(contacts.iter().find(|c| c.id == id).cloned())
  }

  async fn list_all(&self) -> Result<Vec<Contact>, ContactError> {
    let mut contacts = self.contacts.lock().unwrap().clone();
    contacts.sort_by(|a, b| {
      (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
    });
    Ok(contacts)
  }
}

/// Argon2id with the smallest allowed cost so tests stay fast
pub struct FastPasswordHasher;

#[async_trait]
impl PasswordHasher for FastPasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, UserError> {
    let params = Params::new(8, 1, 1, None).map_err(|e| HashError::HashingFailed(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let phc = argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| HashError::HashingFailed(e.to_string()))?;
    Ok(PasswordHash::from_hash(phc.to_string())?)
  }

  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, UserError> {
    let parsed = argon2::PasswordHash::new(hashed_password.as_str())
      .map_err(|_| HashError::InvalidFormat)?;
    Ok(
      Argon2::default()
        .verify_password(password.as_str().as_bytes(), &parsed)
        .is_ok(),
    )
  }
}

/// Hands out predictable tokens and counts how many were issued
#[derive(Default)]
pub struct StaticTokenService {
  issued: AtomicUsize,
}

impl StaticTokenService {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn issued_count(&self) -> usize {
    self.issued.load(Ordering::SeqCst)
  }
}

impl TokenService for StaticTokenService {
  fn issue_tokens(&self, user: &TokenUser, _roles: &[String]) -> Result<TokenPair, TokenError> {
    let n = self.issued.fetch_add(1, Ordering::SeqCst);
    let refresh = self.create_refresh_token();
    Ok(TokenPair {
      access_token: format!("access-{}-{}", user.id, n),
      access_token_expires_at: Utc::now() + Duration::minutes(15),
      refresh_token: refresh.token,
      refresh_token_expires_at: refresh.expires_at,
      refresh_token_hash: refresh.token_hash,
    })
  }

  fn create_refresh_token(&self) -> RefreshTokenDescriptor {
    RefreshTokenDescriptor {
      token: format!("refresh-{}", Uuid::new_v4().simple()),
      token_hash: "hash".to_string(),
      expires_at: Utc::now() + Duration::days(30),
    }
  }

  fn validate_access_token(&self, _token: &str) -> Result<AccessTokenClaims, TokenError> {
    Err(TokenError::Malformed)
  }
}

pub fn user_service(store: Arc<InMemoryStore>) -> Arc<UserService> {
  Arc::new(UserService::new(
    store.clone(),
    store,
    Arc::new(FastPasswordHasher),
    Arc::new(StaticTokenService::new()),
  ))
}

pub fn contact_service(store: Arc<InMemoryStore>) -> Arc<ContactService> {
  Arc::new(ContactService::new(store.clone(), store))
}
