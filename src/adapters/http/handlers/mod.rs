pub mod contact;
pub mod user;

use actix_web::HttpRequest;
use uuid::Uuid;

use crate::adapters::http::errors::ApiError;

/// Path of a newly created resource, relative to the collection that was posted to
fn created_location(req: &HttpRequest, id: Uuid) -> String {
  format!("{}/{}", req.path().trim_end_matches('/'), id)
}

/// PUT bodies carry the id again; it must agree with the route
fn ensure_ids_match(body_id: Uuid, route_id: Uuid) -> Result<(), ApiError> {
  if body_id != route_id {
    return Err(ApiError::Validation(
      "Body id and route id do not match.".to_string(),
    ));
  }
  Ok(())
}

