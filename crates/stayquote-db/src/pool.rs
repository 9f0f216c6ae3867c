//! # SQLite Pool
//!
//! Opens the inventory store and hands out repository handles.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path)          builder: pool sizes, timeouts         │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  Database::new(config)        opens pool, applies migrations        │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  db.hotels() / db.rates()     per-request repository handles,       │
//! │                               each holding a clone of the pool      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is read-heavy: hotel search and stay pricing far outnumber
//! inventory edits. WAL journaling keeps those reads concurrent with the
//! occasional rate-sheet write.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::hotel::HotelRepository;
use crate::repository::rate::RateRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Pool and startup settings, builder style.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./data/inventory.db").max_connections(8);
/// let db = Database::new(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file location; created on first open.
    pub database_path: PathBuf,

    /// Pool ceiling. Inventory queries are short, the default of 5 covers a
    /// busy search page.
    pub max_connections: u32,

    /// Connections kept warm between requests.
    pub min_connections: u32,

    /// How long an acquire may wait before failing with pool exhaustion.
    pub connect_timeout: Duration,

    /// Idle period after which a surplus connection is dropped.
    pub idle_timeout: Duration,

    /// Apply embedded migrations during [`Database::new`].
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration with defaults for an on-disk store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the pool ceiling.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the number of connections kept warm.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether migrations run on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Configuration for an isolated in-memory database, the fixture every
    /// repository test starts from.
    ///
    /// Each `:memory:` connection opens its own separate database, so the
    /// pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared handle to the inventory store.
///
/// Cheap to clone (wraps a pooled handle); the booking API keeps one and
/// hands out repositories per request.
///
/// ## Usage
/// ```rust,ignore
/// let hotels = db.hotels().search("palma", 20).await?;
/// let rooms = db.rates().rooms_for_hotel(&hotel.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless the config opts out, applies migrations.
    ///
    /// SQLite is configured for the read-heavy inventory workload: WAL
    /// journaling, NORMAL synchronous, foreign keys on.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing partner inventory database"
        );

        // mode=rwc: read-write, create the file when missing
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // readers and the rate-sheet writer proceed without blocking
            // each other
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // off by default in SQLite; the room→hotel and window→room
            // references depend on it
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations; idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// The raw connection pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the hotel repository.
    pub fn hotels(&self) -> HotelRepository {
        HotelRepository::new(self.pool.clone())
    }

    /// Returns the room/rate repository.
    pub fn rates(&self) -> RateRepository {
        RateRepository::new(self.pool.clone())
    }

    /// Closes the pool; repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Whether the database currently answers queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
