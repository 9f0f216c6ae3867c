//! # Store Errors
//!
//! [`DbError`] is the single error surface of the inventory store. Repository
//! methods bubble raw [`sqlx::Error`]s through the [`From`] conversion below,
//! which folds SQLite's constraint chatter into typed variants the booking
//! API can turn into HTTP responses without string matching of its own.
//!
//! ## sqlx Mapping
//! ```text
//! RowNotFound                       → NotFound
//! Database("UNIQUE constraint…")    → UniqueViolation (constraint name kept)
//! Database("FOREIGN KEY…")          → ForeignKeyViolation
//! Database(anything else)           → QueryFailed
//! PoolTimedOut                      → PoolExhausted
//! PoolClosed                        → ConnectionFailed
//! ColumnNotFound                    → Internal (struct/schema drift)
//! Migrate                           → MigrationFailed
//! everything else                   → Internal
//! ```

use thiserror::Error;

/// Errors raised by the partner inventory store.
#[derive(Debug, Error)]
pub enum DbError {
    /// A lookup matched nothing, or an update/delete touched zero rows.
    #[error("{entity} not found ({id})")]
    NotFound { entity: String, id: String },

    /// A UNIQUE index rejected the write.
    ///
    /// `constraint` is the `table.column` list exactly as SQLite reports it,
    /// e.g. `partner_rooms.rate_key` when a booking token is reused.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A write referenced a missing parent row: a room without its hotel, or
    /// a rate window without its room.
    #[error("Foreign key violation: {detail}")]
    ForeignKeyViolation { detail: String },

    /// Opening the database file or pinging the pool failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Embedded migrations could not be applied.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// The statement itself failed (bad SQL, type affinity, CHECK constraint).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A multi-statement write did not commit; no partial state was kept.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Every pooled connection is busy.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that has no mapping above.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// NotFound for a named entity, used on update/delete paths that check
    /// `rows_affected` instead of fetching first.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Classifies a SQLite error message into a constraint variant.
///
/// SQLite reports constraint failures as plain text; these prefixes are
/// stable across versions, and keeping the reported constraint name makes
/// the eventual API response say *which* uniqueness rule was hit.
fn classify_constraint(msg: &str) -> Option<DbError> {
    if let Some(constraint) = msg.strip_prefix("UNIQUE constraint failed: ") {
        return Some(DbError::UniqueViolation {
            constraint: constraint.to_string(),
        });
    }
    if msg.contains("FOREIGN KEY constraint failed") {
        return Some(DbError::ForeignKeyViolation {
            detail: msg.to_string(),
        });
    }
    None
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                classify_constraint(&msg).unwrap_or(DbError::QueryFailed(msg))
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            // Row mapping happens at runtime here; a struct field without a
            // matching column surfaces as ColumnNotFound.
            sqlx::Error::ColumnNotFound(column) => {
                DbError::Internal(format!("Row mapping failed, missing column: {}", column))
            }

            sqlx::Error::Migrate(e) => DbError::MigrationFailed(e.to_string()),

            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Shorthand for fallible store operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
