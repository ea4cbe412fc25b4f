use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_access_token_minutes() -> i64 {
  15
}

fn default_refresh_token_days() -> i64 {
  30
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub tokens: TokenConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Access and refresh token settings
#[derive(Clone, Deserialize)]
pub struct TokenConfig {
  pub issuer: String,
  pub audience: String,
  /// HMAC-SHA256 key, at least 32 bytes
  pub signing_key: String,
  #[serde(default = "default_access_token_minutes")]
  pub access_token_minutes: i64,
  #[serde(default = "default_refresh_token_days")]
  pub refresh_token_days: i64,
}

// Keeps the signing key out of logs
impl std::fmt::Debug for TokenConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TokenConfig")
      .field("issuer", &self.issuer)
      .field("audience", &self.audience)
      .field("signing_key", &"***")
      .field("access_token_minutes", &self.access_token_minutes)
      .field("refresh_token_days", &self.refresh_token_days)
      .finish()
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists, RUN_MODE defaults to `development`)
  /// 4. Environment variables with the ROLODEX_ prefix, `__` between sections:
  ///    `ROLODEX_SERVER__PORT=8080`, `ROLODEX_DATABASE__URL=postgres://...`,
  ///    `ROLODEX_TOKENS__SIGNING_KEY=...`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if config/default.toml is missing, a file is not
  /// valid TOML, or a required value is missing or mistyped.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("ROLODEX")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://localhost/rolodex"
            max_connections = 5

            [tokens]
            issuer = "rolodex"
            audience = "rolodex-clients"
            signing_key = "0123456789abcdef0123456789abcdef"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.url, "postgres://localhost/rolodex");
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.database.connect_timeout_seconds, 5); // default
    assert_eq!(config.database.acquire_timeout_seconds, 3); // default
    assert_eq!(config.tokens.issuer, "rolodex");
    assert_eq!(config.tokens.access_token_minutes, 15); // default
    assert_eq!(config.tokens.refresh_token_days, 30); // default
  }

  #[test]
  fn test_token_config_debug_hides_signing_key() {
    let config = TokenConfig {
      issuer: "rolodex".to_string(),
      audience: "rolodex-clients".to_string(),
      signing_key: "super-secret-signing-key-material".to_string(),
      access_token_minutes: 15,
      refresh_token_days: 30,
    };

    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("super-secret"));
  }

  #[test]
  fn test_shipped_default_file_parses() {
    let raw = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml"))
      .expect("config/default.toml present");
    let config: Config = toml::from_str(&raw).expect("default config parses");
    assert!(config.tokens.signing_key.len() >= 32);
  }
}
