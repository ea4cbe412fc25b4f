use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolodex::{
  adapters::http::{
    ContactUseCases, RequestIdMiddleware, UserUseCases, configure_contact_routes,
    configure_user_routes,
  },
  domain::contact::ContactService,
  domain::user::UserService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresContactRepository, PostgresUnitOfWork, PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, JwtTokenService},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rolodex=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Rolodex");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!(tokens = ?config.tokens, "Configuration loaded");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    anyhow::anyhow!(
      "Database connection timed out after {} seconds",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Could not connect to database")?;

  tracing::info!("Database connection pool created");

  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  // Ports
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let contact_repo = Arc::new(PostgresContactRepository::new(db_pool.clone()));
  let unit_of_work = Arc::new(PostgresUnitOfWork::new(db_pool.clone()));
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().context("Failed to create password hasher")?);
  let token_service =
    Arc::new(JwtTokenService::new(&config.tokens).context("Invalid token configuration")?);

  // Domain services
  let user_service = Arc::new(UserService::new(
    user_repo,
    unit_of_work.clone(),
    password_hasher,
    token_service,
  ));
  let contact_service = Arc::new(ContactService::new(contact_repo, unit_of_work));

  let user_use_cases = UserUseCases::new(user_service);
  let contact_use_cases = ContactUseCases::new(contact_service);

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      // Outermost, so the request span covers the access log line
      .wrap(RequestIdMiddleware::new())
      .service(
        web::scope("/api/user")
          .configure(|cfg| configure_user_routes(cfg, user_use_cases.clone())),
      )
      .service(
        web::scope("/api/contact")
          .configure(|cfg| configure_contact_routes(cfg, contact_use_cases.clone())),
      )
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
