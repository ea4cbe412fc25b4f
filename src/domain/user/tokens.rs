use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::User;
use super::value_objects::Username;
use crate::domain::common::EmailAddress;

/// Identity projection handed to the token service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUser {
  pub id: Uuid,
  pub username: Username,
  pub email: EmailAddress,
}

impl From<&User> for TokenUser {
  fn from(user: &User) -> Self {
    Self {
      id: user.id,
      username: user.username.clone(),
      email: user.email.clone(),
    }
  }
}

/// Freshly minted refresh token
///
/// Only `token_hash` is meant to be kept server-side; `token` goes to the client.
#[derive(Debug, Clone)]
pub struct RefreshTokenDescriptor {
  pub token: String,
  pub token_hash: String,
  pub expires_at: DateTime<Utc>,
}

/// Access token and refresh token issued together on login
#[derive(Debug, Clone)]
pub struct TokenPair {
  pub access_token: String,
  pub access_token_expires_at: DateTime<Utc>,
  pub refresh_token: String,
  pub refresh_token_expires_at: DateTime<Utc>,
  pub refresh_token_hash: String,
}

/// Claims carried by a signed access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
  /// Subject: the user id
  pub sub: String,
  pub unique_name: String,
  pub email: String,
  /// Unique token id
  pub jti: String,
  pub iss: String,
  pub aud: String,
  /// Not-before, seconds since the epoch
  pub nbf: i64,
  /// Issued-at, seconds since the epoch
  pub iat: i64,
  /// Expiry, seconds since the epoch
  pub exp: i64,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub role: Vec<String>,
}

impl AccessTokenClaims {
  /// Parses the subject back into a user id, for a future bearer-token guard
  pub fn user_id(&self) -> Option<Uuid> {
    Uuid::parse_str(&self.sub).ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_claims_without_roles_omit_role_field() {
    let claims = AccessTokenClaims {
      sub: Uuid::nil().to_string(),
      unique_name: "alice".to_string(),
      email: "alice@example.com".to_string(),
      jti: "abc".to_string(),
      iss: "issuer".to_string(),
      aud: "audience".to_string(),
      nbf: 1,
      iat: 1,
      exp: 2,
      role: Vec::new(),
    };

    let json = serde_json::to_value(&claims).unwrap();
    assert!(json.get("role").is_none());
    assert_eq!(claims.user_id(), Some(Uuid::nil()));
  }
}
