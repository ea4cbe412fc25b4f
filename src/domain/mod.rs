pub mod common;
pub mod contact;
pub mod user;
