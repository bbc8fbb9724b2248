//! Database connection management.

use sqlx::{
    PgPool,
    migrate::{MigrateError, Migrator},
};

/// Embedded migrations from `crates/app/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply any pending embedded migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
