//! Schema migrations
//!
//! Migrations live in the workspace `migrations/` directory and are embedded
//! into the binary at compile time.

use sqlx::migrate::Migrator;
use tracing::info;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// Embedded workspace migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies every pending migration
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if a migration cannot be applied
/// or a previously applied one was modified.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations...");
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
