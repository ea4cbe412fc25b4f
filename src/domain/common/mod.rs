//! Building blocks shared by the user and contact domains

pub mod email;
pub mod errors;
pub mod unit_of_work;

pub use email::EmailAddress;
pub use errors::{RepositoryError, ValueObjectError};
pub use unit_of_work::{Change, ChangeSet, UnitOfWork};
