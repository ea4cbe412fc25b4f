use actix_web::web;
use std::sync::Arc;

use super::errors::ApiError;
use super::handlers::{
  contact::{
    create_contact_handler, delete_contact_handler, list_contacts_handler, read_contact_handler,
    update_contact_handler,
  },
  user::{
    create_user_handler, delete_user_handler, login_handler, read_user_handler, register_handler,
    update_user_handler,
  },
};
use crate::application::contact::{
  CreateContactUseCase, DeleteContactUseCase, ListContactsUseCase, ReadContactUseCase,
  UpdateContactUseCase,
};
use crate::application::user::{
  CreateUserUseCase, DeleteUserUseCase, LoginUserUseCase, ReadUserUseCase, RegisterUserUseCase,
  UpdateUserUseCase,
};
use crate::domain::contact::ContactService;
use crate::domain::user::UserService;

/// Use cases served under the user scope
#[derive(Clone)]
pub struct UserUseCases {
  pub create: Arc<CreateUserUseCase>,
  pub read: Arc<ReadUserUseCase>,
  pub update: Arc<UpdateUserUseCase>,
  pub delete: Arc<DeleteUserUseCase>,
  pub login: Arc<LoginUserUseCase>,
  pub register: Arc<RegisterUserUseCase>,
}

impl UserUseCases {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self {
      create: Arc::new(CreateUserUseCase::new(user_service.clone())),
      read: Arc::new(ReadUserUseCase::new(user_service.clone())),
      update: Arc::new(UpdateUserUseCase::new(user_service.clone())),
      delete: Arc::new(DeleteUserUseCase::new(user_service.clone())),
      login: Arc::new(LoginUserUseCase::new(user_service.clone())),
      register: Arc::new(RegisterUserUseCase::new(user_service)),
    }
  }
}

/// Use cases served under the contact scope
#[derive(Clone)]
pub struct ContactUseCases {
  pub create: Arc<CreateContactUseCase>,
  pub read: Arc<ReadContactUseCase>,
  pub update: Arc<UpdateContactUseCase>,
  pub delete: Arc<DeleteContactUseCase>,
  pub list: Arc<ListContactsUseCase>,
}

impl ContactUseCases {
  pub fn new(contact_service: Arc<ContactService>) -> Self {
    Self {
      create: Arc::new(CreateContactUseCase::new(contact_service.clone())),
      read: Arc::new(ReadContactUseCase::new(contact_service.clone())),
      update: Arc::new(UpdateContactUseCase::new(contact_service.clone())),
      delete: Arc::new(DeleteContactUseCase::new(contact_service.clone())),
      list: Arc::new(ListContactsUseCase::new(contact_service)),
    }
  }
}

/// Bodies the JSON extractor rejects answer with the regular error body
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    ApiError::Validation(format!("Invalid request body: {}", err)).into()
  })
}

/// A login body that cannot be read is just another failed login
fn login_json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    tracing::debug!(error = %err, "Login body rejected");
    ApiError::Unauthorized("Invalid credentials.".to_string()).into()
  })
}

/// Configure user routes, mounted under `/api/user`
pub fn configure_user_routes(cfg: &mut web::ServiceConfig, use_cases: UserUseCases) {
  cfg
    .app_data(web::Data::new(use_cases.create))
    .app_data(web::Data::new(use_cases.read))
    .app_data(web::Data::new(use_cases.update))
    .app_data(web::Data::new(use_cases.delete))
    .app_data(web::Data::new(use_cases.login))
    .app_data(web::Data::new(use_cases.register))
    .app_data(json_config())
    // Literal segments first so they never reach the `{id}` resource
    .service(
      web::resource("/login")
        .app_data(login_json_config())
        .route(web::post().to(login_handler)),
    )
    .route("/register", web::post().to(register_handler))
    .route("", web::post().to(create_user_handler))
    .service(
      web::resource("/{id}")
        .route(web::get().to(read_user_handler))
        .route(web::put().to(update_user_handler))
        .route(web::delete().to(delete_user_handler)),
    );
}

/// Configure contact routes, mounted under `/api/contact`
pub fn configure_contact_routes(cfg: &mut web::ServiceConfig, use_cases: ContactUseCases) {
  cfg
    .app_data(web::Data::new(use_cases.create))
    .app_data(web::Data::new(use_cases.read))
    .app_data(web::Data::new(use_cases.update))
    .app_data(web::Data::new(use_cases.delete))
    .app_data(web::Data::new(use_cases.list))
    .app_data(json_config())
    .service(
      web::resource("")
        .route(web::post().to(create_contact_handler))
        .route(web::get().to(list_contacts_handler)),
    )
    .service(
      web::resource("/{id}")
        .route(web::get().to(read_contact_handler))
        .route(web::put().to(update_contact_handler))
        .route(web::delete().to(delete_contact_handler)),
    );
}
