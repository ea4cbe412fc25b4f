pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Contact, ContactDetails};
pub use errors::ContactError;
pub use services::ContactService;
pub use value_objects::PersonName;
