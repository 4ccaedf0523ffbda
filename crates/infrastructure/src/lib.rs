//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod postgres_activity_log_repository;
mod postgres_admin_user_repository;
mod postgres_authorization_repository;
mod postgres_content_repository;
mod postgres_end_user_repository;
mod postgres_task_repository;

#[cfg(test)]
mod test_database;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use postgres_activity_log_repository::PostgresActivityLogRepository;
pub use postgres_admin_user_repository::PostgresAdminUserRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_content_repository::PostgresContentRepository;
pub use postgres_end_user_repository::PostgresEndUserRepository;
pub use postgres_task_repository::PostgresTaskRepository;
