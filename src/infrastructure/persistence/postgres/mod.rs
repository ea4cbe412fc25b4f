mod contact_repository;
mod unit_of_work;
mod user_repository;

pub use contact_repository::PostgresContactRepository;
pub use unit_of_work::PostgresUnitOfWork;
pub use user_repository::PostgresUserRepository;
