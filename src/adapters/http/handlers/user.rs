use actix_web::{HttpRequest, HttpResponse, http::header, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{created_location, ensure_ids_match};
use crate::adapters::http::{
  dtos::{CreateUserRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, UserDto},
  errors::ApiError,
};
use crate::application::user::{
  CreateUserCommand, CreateUserUseCase, DeleteUserUseCase, LoginUserCommand, LoginUserUseCase,
  ReadUserUseCase, RegisterUserCommand, RegisterUserUseCase, UpdateUserCommand, UpdateUserUseCase,
};

/// POST /api/user
/// Response: UserDto with status 201 and a Location header
pub async fn create_user_handler(
  req: HttpRequest,
  request: web::Json<CreateUserRequest>,
  use_case: web::Data<Arc<CreateUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = CreateUserCommand {
    username: request.username,
    password: request.password,
    email: request.email,
  };

  let user = use_case.execute(command).await?;

  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, created_location(&req, user.id)))
      .json(UserDto::from(user)),
  )
}

/// GET /api/user/{id}
pub async fn read_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ReadUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

/// PUT /api/user/{id}
/// The body id must equal the route id
pub async fn update_user_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateUserRequest>,
  use_case: web::Data<Arc<UpdateUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let id = path.into_inner();
  let request = request.into_inner().without_blank_password();
  ensure_ids_match(request.id, id)?;
  request.validate()?;

  let command = UpdateUserCommand {
    id,
    username: request.username,
    password: request.password,
    email: request.email,
  };

  let user = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

/// DELETE /api/user/{id}
pub async fn delete_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::NoContent().finish())
}

/// POST /api/user/login
/// Response: LoginResponse, or 401 for any credential failure
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // Blank fields are reported as a failed login, not a validation error
  if request.validate().is_err() {
    return Err(ApiError::Unauthorized("Invalid credentials.".to_string()));
  }

  let request = request.into_inner();
  let command = LoginUserCommand {
    identifier: request.identifier,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(LoginResponse::from(response)))
}

/// POST /api/user/register
/// Response: UserDto with status 200
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterUserCommand {
    username: request.username,
    password: request.password,
    email: request.email,
  };

  let user = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(UserDto::from(user)))
}
