use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::contact::ContactResponse;
use crate::application::user::{LoginUserResponse, UserResponse};

/// Request for creating a user (administrative) or registering (self-service)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
  #[validate(length(
    min = 1,
    max = 100,
    message = "Username must be between 1 and 100 characters"
  ))]
  pub username: String,

  /// Any string is accepted; there is no strength policy
  pub password: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,
}

/// Registration shares the create payload
pub type RegisterRequest = CreateUserRequest;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
  /// Must match the id in the route
  pub id: Uuid,

  #[validate(length(
    min = 1,
    max = 100,
    message = "Username must be between 1 and 100 characters"
  ))]
  pub username: String,

  /// Omitted or blank keeps the current password
  #[serde(default)]
  pub password: Option<String>,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,
}

impl UpdateUserRequest {
  pub fn without_blank_password(mut self) -> Self {
    self.password = self.password.filter(|p| !p.trim().is_empty());
    self
  }
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
  /// Username, or email address
  #[validate(length(min = 1, message = "Username or email is required"))]
  pub identifier: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
  pub id: Uuid,
  pub username: String,
  pub email: String,
}

impl From<UserResponse> for UserDto {
  fn from(user: UserResponse) -> Self {
    Self {
      id: user.id,
      username: user.username,
      email: user.email,
    }
  }
}

/// Response after successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
  pub access_token: String,
  pub access_token_expires_at: DateTime<Utc>,
  pub refresh_token: String,
  pub refresh_token_expires_at: DateTime<Utc>,
  pub user: UserDto,
}

impl From<LoginUserResponse> for LoginResponse {
  fn from(response: LoginUserResponse) -> Self {
    Self {
      access_token: response.access_token,
      access_token_expires_at: response.access_token_expires_at,
      refresh_token: response.refresh_token,
      refresh_token_expires_at: response.refresh_token_expires_at,
      user: response.user.into(),
    }
  }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
  #[validate(length(
    min = 1,
    max = 100,
    message = "First name must be between 1 and 100 characters"
  ))]
  pub first_name: String,

  #[validate(length(
    min = 1,
    max = 100,
    message = "Last name must be between 1 and 100 characters"
  ))]
  pub last_name: String,

  #[serde(default)]
  #[validate(email(message = "Invalid email format"))]
  pub email: Option<String>,

  #[serde(default)]
  #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
  pub phone: Option<String>,

  #[serde(default)]
  #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
  pub notes: Option<String>,
}

impl CreateContactRequest {
  pub fn without_blank_email(mut self) -> Self {
    self.email = self.email.filter(|e| !e.trim().is_empty());
    self
  }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
  /// Must match the id in the route
  pub id: Uuid,

  #[validate(length(
    min = 1,
    max = 100,
    message = "First name must be between 1 and 100 characters"
  ))]
  pub first_name: String,

  #[validate(length(
    min = 1,
    max = 100,
    message = "Last name must be between 1 and 100 characters"
  ))]
  pub last_name: String,

  #[serde(default)]
  #[validate(email(message = "Invalid email format"))]
  pub email: Option<String>,

  #[serde(default)]
  #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
  pub phone: Option<String>,

  #[serde(default)]
  #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
  pub notes: Option<String>,
}

impl UpdateContactRequest {
  pub fn without_blank_email(mut self) -> Self {
    self.email = self.email.filter(|e| !e.trim().is_empty());
    self
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
  pub id: Uuid,
  pub first_name: String,
  pub last_name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub notes: Option<String>,
}

impl From<ContactResponse> for ContactDto {
  fn from(contact: ContactResponse) -> Self {
    Self {
      id: contact.id,
      first_name: contact.first_name,
      last_name: contact.last_name,
      email: contact.email,
      phone: contact.phone,
      notes: contact.notes,
    }
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
