use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{TimeDelta, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::user::errors::TokenError;
use crate::domain::user::ports::TokenService;
use crate::domain::user::tokens::{AccessTokenClaims, RefreshTokenDescriptor, TokenPair, TokenUser};
use crate::infrastructure::config::TokenConfig;

type HmacSha256 = Hmac<Sha256>;

const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;
const MIN_SIGNING_KEY_BYTES: usize = 32;
const REFRESH_TOKEN_BYTES: usize = 32;

#[derive(Deserialize)]
struct JwtHeader {
  alg: String,
}

/// HS256 JSON Web Token issuer and validator
pub struct JwtTokenService {
  issuer: String,
  audience: String,
  signing_key: Zeroizing<Vec<u8>>,
  access_token_lifetime: TimeDelta,
  refresh_token_lifetime: TimeDelta,
}

impl JwtTokenService {
  /// Fails when the signing key is blank or shorter than 32 bytes, or when a
  /// token lifetime is not a positive, representable duration
  pub fn new(config: &TokenConfig) -> Result<Self, TokenError> {
    let key = config.signing_key.trim();
    if key.len() < MIN_SIGNING_KEY_BYTES {
      return Err(TokenError::InvalidSigningKey {
        min: MIN_SIGNING_KEY_BYTES,
      });
    }

    Ok(Self {
      issuer: config.issuer.clone(),
      audience: config.audience.clone(),
      signing_key: Zeroizing::new(config.signing_key.as_bytes().to_vec()),
      access_token_lifetime: lifetime(
        "access_token_minutes",
        config.access_token_minutes,
        TimeDelta::try_minutes,
      )?,
      refresh_token_lifetime: lifetime(
        "refresh_token_days",
        config.refresh_token_days,
        TimeDelta::try_days,
      )?,
    })
  }

  fn mac(&self) -> Result<HmacSha256, TokenError> {
    HmacSha256::new_from_slice(&self.signing_key).map_err(|e| TokenError::Encoding(e.to_string()))
  }

  fn sign(&self, claims: &AccessTokenClaims) -> Result<String, TokenError> {
    let payload = serde_json::to_vec(claims).map_err(|e| TokenError::Encoding(e.to_string()))?;
    let signing_input = format!(
      "{}.{}",
      URL_SAFE_NO_PAD.encode(JWT_HEADER),
      URL_SAFE_NO_PAD.encode(payload)
    );

    let mut mac = self.mac()?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
  }
}

impl TokenService for JwtTokenService {
  fn issue_tokens(&self, user: &TokenUser, roles: &[String]) -> Result<TokenPair, TokenError> {
    let now = Utc::now();
    let expires_at = now + self.access_token_lifetime;

    let claims = AccessTokenClaims {
      sub: user.id.to_string(),
      unique_name: user.username.to_string(),
      email: user.email.to_string(),
      jti: Uuid::new_v4().simple().to_string(),
      iss: self.issuer.clone(),
      aud: self.audience.clone(),
      nbf: now.timestamp(),
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
      role: roles.to_vec(),
    };

    let access_token = self.sign(&claims)?;
    let refresh = self.create_refresh_token();

    tracing::debug!(user_id = %user.id, jti = %claims.jti, "Issued access token");

    Ok(TokenPair {
      access_token,
      access_token_expires_at: expires_at,
      refresh_token: refresh.token,
      refresh_token_expires_at: refresh.expires_at,
      refresh_token_hash: refresh.token_hash,
    })
  }

  fn create_refresh_token(&self) -> RefreshTokenDescriptor {
    let mut bytes = Zeroizing::new([0u8; REFRESH_TOKEN_BYTES]);
    rand::rngs::OsRng.fill_bytes(&mut *bytes);

    let token = URL_SAFE_NO_PAD.encode(&*bytes);
    let token_hash = URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()));

    RefreshTokenDescriptor {
      token,
      token_hash,
      expires_at: Utc::now() + self.refresh_token_lifetime,
    }
  }

  fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) =
      (parts.next(), parts.next(), parts.next(), parts.next())
    else {
      return Err(TokenError::Malformed);
    };

    let header_json = URL_SAFE_NO_PAD
      .decode(header)
      .map_err(|_| TokenError::Malformed)?;
    let header: JwtHeader =
      serde_json::from_slice(&header_json).map_err(|_| TokenError::Malformed)?;
    if header.alg != "HS256" {
      return Err(TokenError::UnsupportedAlgorithm(header.alg));
    }

    let signature = URL_SAFE_NO_PAD
      .decode(signature)
      .map_err(|_| TokenError::Malformed)?;
    let mut mac = self.mac()?;
    mac.update(header_and_payload(token).as_bytes());
    mac
      .verify_slice(&signature)
      .map_err(|_| TokenError::InvalidSignature)?;

    let payload = URL_SAFE_NO_PAD
      .decode(payload)
      .map_err(|_| TokenError::Malformed)?;
    let claims: AccessTokenClaims =
      serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

    if claims.iss != self.issuer {
      return Err(TokenError::InvalidIssuer);
    }
    if claims.aud != self.audience {
      return Err(TokenError::InvalidAudience);
    }

    let now = Utc::now().timestamp();
    if now < claims.nbf {
      return Err(TokenError::NotYetValid);
    }
    if now >= claims.exp {
      return Err(TokenError::Expired);
    }

    Ok(claims)
  }
}

// Everything before the last dot
fn lifetime(
  setting: &'static str,
  value: i64,
  to_delta: fn(i64) -> Option<TimeDelta>,
) -> Result<TimeDelta, TokenError> {
  if value <= 0 {
    return Err(TokenError::InvalidLifetime(setting));
  }
  to_delta(value)
    .filter(|delta| Utc::now().checked_add_signed(*delta).is_some())
    .ok_or(TokenError::InvalidLifetime(setting))
}

fn header_and_payload(token: &str) -> &str {
  token.rsplit_once('.').map_or(token, |(signed, _)| signed)
}
