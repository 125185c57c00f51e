/// Schema migrations
///
/// The SQL files live in `migrations/` at the workspace root and are embedded
/// at compile time by `sqlx::migrate!`. They are applied on every start;
/// already-applied versions are skipped by sqlx.

use sqlx::postgres::PgPool;
use tracing::{error, info};

/// Applies all pending migrations
///
/// # Errors
///
/// Returns the sqlx migration error if any file fails to apply or if a
/// previously applied file has changed on disk.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Migration failed");
            Err(e)
        }
    }
}
