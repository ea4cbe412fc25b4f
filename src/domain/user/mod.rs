pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod tokens;
pub mod value_objects;

// Re-export commonly used types
pub use entities::User;
pub use errors::{HashError, TokenError, UserError};
pub use services::{UserChanges, UserService};
pub use tokens::{AccessTokenClaims, RefreshTokenDescriptor, TokenPair, TokenUser};
pub use value_objects::{Password, PasswordHash, Username};
