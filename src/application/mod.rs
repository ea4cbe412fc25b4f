//! Application layer
//!
//! Use cases that orchestrate domain services into the operations exposed over
//! HTTP. They accept raw command input and return plain response structs.

pub mod contact;
pub mod user;
