//! # Schema Migrations
//!
//! Schema management for the partner inventory store. The SQL lives in
//! `migrations/sqlite/` at the workspace root and is embedded into the binary
//! at compile time, so the seed tool and the booking API carry their own
//! schema and never ship loose `.sql` files.
//!
//! ## Conventions
//! - `NNN_description.sql`, applied in filename order
//! - applied migrations are recorded in `_sqlx_migrations`; recorded files
//!   are skipped, so running at every startup is safe
//! - shipped migrations are append-only: fixing a mistake means a new file,
//!   never editing an old one

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migration set.
///
/// ```text
/// migrations/sqlite/
/// ├── 001_initial_schema.sql   # partner_hotels, partner_rooms
/// └── 002_rate_windows.sql     # partner_rate_windows (seasonal overrides)
/// ```
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration, in order.
///
/// Called from [`Database::new`](crate::pool::Database::new) unless the
/// config opts out; each migration runs inside its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;

    info!(
        embedded = MIGRATOR.migrations.len(),
        "Schema migrations up to date"
    );
    Ok(())
}

/// Reports `(embedded, applied)` migration counts for health checks.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let embedded = MIGRATOR.migrations.len();

    // The tracking table does not exist until the first migration has run.
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((embedded, applied as usize))
}
