use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::contact::ContactError;
use crate::domain::user::UserError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Malformed or invalid input (400)
  Validation(String),

  /// Uniqueness violation (400)
  Conflict(String),

  /// Missing entity (404)
  NotFound(String),

  /// Failed login (401)
  Unauthorized(String),

  /// Anything unexpected (500); the detail is logged, never returned
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Unauthorized(msg) => ("invalid_credentials", msg.clone()),
      ApiError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: error_type.to_string(),
        message,
        details: None,
      })
  }
}

impl From<UserError> for ApiError {
  fn from(error: UserError) -> Self {
    match error {
      UserError::InvalidCredentials => ApiError::Unauthorized(error.to_string()),
      UserError::UserAlreadyExists
      | UserError::EmailAlreadyInUse
      | UserError::UsernameAlreadyInUse => ApiError::Conflict(error.to_string()),
      UserError::UserNotFound => ApiError::NotFound(error.to_string()),
      UserError::ValueObject(err) => ApiError::Validation(err.to_string()),
      UserError::Repository(_) | UserError::Hash(_) | UserError::Token(_) => {
        ApiError::Internal(error.to_string())
      }
    }
  }
}

impl From<ContactError> for ApiError {
  fn from(error: ContactError) -> Self {
    match error {
      ContactError::ContactAlreadyExists => ApiError::Conflict(error.to_string()),
      ContactError::ContactNotFound => ApiError::NotFound(error.to_string()),
      ContactError::ValueObject(err) => ApiError::Validation(err.to_string()),
      ContactError::Repository(_) => ApiError::Internal(error.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    // HashMap order is unstable
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::common::RepositoryError;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Conflict("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("test".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Unauthorized("test".to_string()).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_user_error_conversion() {
    let api_error: ApiError = UserError::InvalidCredentials.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = UserError::EmailAlreadyInUse.into();
    assert!(matches!(api_error, ApiError::Conflict(ref m) if m == "Email already in use."));

    let api_error: ApiError = UserError::UserNotFound.into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = UserError::Repository(RepositoryError::NotFound).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_contact_error_conversion() {
    let api_error: ApiError = ContactError::ContactAlreadyExists.into();
    assert!(matches!(api_error, ApiError::Conflict(ref m) if m == "Contact already exists."));

    let api_error: ApiError = ContactError::ContactNotFound.into();
    assert!(matches!(api_error, ApiError::NotFound(ref m) if m == "Contact not found."));
  }

  #[actix_web::test]
  async fn test_internal_error_body_hides_detail() {
    let response = ApiError::Internal("connection refused".to_string()).error_response();
    let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
    let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(body.error, "internal_error");
    assert!(!body.message.contains("connection refused"));
  }
}
