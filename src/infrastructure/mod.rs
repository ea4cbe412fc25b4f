//! Infrastructure layer: Postgres persistence, password hashing, token signing and configuration

pub mod config;
pub mod persistence;
pub mod security;
