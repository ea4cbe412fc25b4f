use actix_web::{HttpRequest, HttpResponse, http::header, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{created_location, ensure_ids_match};
use crate::adapters::http::{
  dtos::{ContactDto, CreateContactRequest, UpdateContactRequest},
  errors::ApiError,
};
use crate::application::contact::{
  CreateContactCommand, CreateContactUseCase, DeleteContactUseCase, ListContactsUseCase,
  ReadContactUseCase, UpdateContactCommand, UpdateContactUseCase,
};

/// POST /api/contact
pub async fn create_contact_handler(
  req: HttpRequest,
  request: web::Json<CreateContactRequest>,
  use_case: web::Data<Arc<CreateContactUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner().without_blank_email();
  request.validate()?;

  let command = CreateContactCommand {
    first_name: request.first_name,
    last_name: request.last_name,
    email: request.email,
    phone: request.phone,
    notes: request.notes,
  };

  let contact = use_case.execute(command).await?;

  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, created_location(&req, contact.id)))
      .json(ContactDto::from(contact)),
  )
}

/// GET /api/contact
pub async fn list_contacts_handler(
  use_case: web::Data<Arc<ListContactsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let contacts = use_case.execute().await?;

  Ok(
    HttpResponse::Ok().json(
      contacts
        .into_iter()
        .map(ContactDto::from)
        .collect::<Vec<_>>(),
    ),
  )
}

/// GET /api/contact/{id}
pub async fn read_contact_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ReadContactUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let contact = use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ContactDto::from(contact)))
}

/// PUT /api/contact/{id}
pub async fn update_contact_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateContactRequest>,
  use_case: web::Data<Arc<UpdateContactUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let id = path.into_inner();
  let request = request.into_inner().without_blank_email();
  ensure_ids_match(request.id, id)?;
  request.validate()?;

  let command = UpdateContactCommand {
    id,
    first_name: request.first_name,
    last_name: request.last_name,
    email: request.email,
    phone: request.phone,
    notes: request.notes,
  };

  let contact = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ContactDto::from(contact)))
}

/// DELETE /api/contact/{id}
pub async fn delete_contact_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteContactUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::NoContent().finish())
}
