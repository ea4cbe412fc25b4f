//! Rolodex: user accounts with token login, and an address book of contacts,
//! served over HTTP from a Postgres store.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;
