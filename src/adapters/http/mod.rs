pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ContactDto, ErrorResponse, LoginResponse, UserDto};
pub use errors::ApiError;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{ContactUseCases, UserUseCases, configure_contact_routes, configure_user_routes};
