//! # Hotel Repository
//!
//! Database operations for partner hotels.
//!
//! ## Key Operations
//! - City/name search with `LIKE` (inventory is hundreds of rows, not
//!   hundreds of thousands; an index-assisted scan is plenty)
//! - CRUD operations with soft delete
//!
//! ## Search Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Hotel Search Works                               │
//! │                                                                         │
//! │  Guest types: "palma"                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LIKE '%palma%' across: name, city, hotel_code                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ partner_hotels                          │                           │
//! │  │                                         │                           │
//! │  │ H-201 | Seaview Resort  | Palma   | ES │ ← MATCH (city)            │
//! │  │ H-202 | Palma Grand     | Palma   | ES │ ← MATCH (name + city)     │
//! │  │ H-305 | Harbor Suites   | Lisbon  | PT │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Active hotels only, ordered by name                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stayquote_core::PartnerHotel;

/// Repository for partner hotel database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = HotelRepository::new(pool);
///
/// // Guest-facing search
/// let results = repo.search("palma", 20).await?;
///
/// // Direct lookup once an id is known
/// let hotel = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HotelRepository {
    pool: SqlitePool,
}

impl HotelRepository {
    /// Creates a new HotelRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HotelRepository { pool }
    }

    /// Searches active hotels by name, city, or hotel code.
    ///
    /// Empty queries list all active hotels. Matching is substring,
    /// case-insensitive for ASCII (SQLite `LIKE` semantics).
    ///
    /// ## Arguments
    /// * `query` - Guest-typed search text, matched as a substring
    /// * `limit` - Result cap, applied after filtering
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<PartnerHotel>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching hotels");

        if query.is_empty() {
            return self.list_active(limit).await;
        }

        let pattern = format!("%{}%", query);

        let hotels = sqlx::query_as::<_, PartnerHotel>(
            r#"
            SELECT
                id, hotel_code, name, city, country_code, currency,
                stars, description, is_active, created_at, updated_at
            FROM partner_hotels
            WHERE is_active = 1
              AND (name LIKE ?1 OR city LIKE ?1 OR hotel_code LIKE ?1)
            ORDER BY name
            LIMIT ?2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = hotels.len(), "Search returned hotels");
        Ok(hotels)
    }

    /// Lists active hotels (no search filter).
    async fn list_active(&self, limit: u32) -> DbResult<Vec<PartnerHotel>> {
        let hotels = sqlx::query_as::<_, PartnerHotel>(
            r#"
            SELECT
                id, hotel_code, name, city, country_code, currency,
                stars, description, is_active, created_at, updated_at
            FROM partner_hotels
            WHERE is_active = 1
            ORDER BY name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(hotels)
    }

    /// Gets a hotel by its ID.
    ///
    /// Does not filter on `is_active`; historical bookings still reference
    /// soft-deleted hotels.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PartnerHotel>> {
        let hotel = sqlx::query_as::<_, PartnerHotel>(
            r#"
            SELECT
                id, hotel_code, name, city, country_code, currency,
                stars, description, is_active, created_at, updated_at
            FROM partner_hotels
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hotel)
    }

    /// Gets a hotel by its business code (e.g., "H-201").
    pub async fn get_by_code(&self, hotel_code: &str) -> DbResult<Option<PartnerHotel>> {
        let hotel = sqlx::query_as::<_, PartnerHotel>(
            r#"
            SELECT
                id, hotel_code, name, city, country_code, currency,
                stars, description, is_active, created_at, updated_at
            FROM partner_hotels
            WHERE hotel_code = ?1
            "#,
        )
        .bind(hotel_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hotel)
    }

    /// Inserts a new hotel.
    ///
    /// ## Returns
    /// * `Ok(PartnerHotel)` - Inserted hotel
    /// * `Err(DbError::UniqueViolation)` - hotel_code already exists
    pub async fn insert(&self, hotel: &PartnerHotel) -> DbResult<PartnerHotel> {
        debug!(hotel_code = %hotel.hotel_code, "Inserting hotel");

        sqlx::query(
            r#"
            INSERT INTO partner_hotels (
                id, hotel_code, name, city, country_code, currency,
                stars, description, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&hotel.id)
        .bind(&hotel.hotel_code)
        .bind(&hotel.name)
        .bind(&hotel.city)
        .bind(&hotel.country_code)
        .bind(&hotel.currency)
        .bind(hotel.stars)
        .bind(&hotel.description)
        .bind(hotel.is_active)
        .bind(hotel.created_at)
        .bind(hotel.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(hotel.clone())
    }

    /// Updates an existing hotel.
    ///
    /// ## Returns
    /// * `Ok(())` - Row written, `updated_at` refreshed
    /// * `Err(DbError::NotFound)` - No hotel with that id
    pub async fn update(&self, hotel: &PartnerHotel) -> DbResult<()> {
        debug!(id = %hotel.id, "Updating hotel");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE partner_hotels SET
                hotel_code = ?2,
                name = ?3,
                city = ?4,
                country_code = ?5,
                currency = ?6,
                stars = ?7,
                description = ?8,
                is_active = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&hotel.id)
        .bind(&hotel.hotel_code)
        .bind(&hotel.name)
        .bind(&hotel.city)
        .bind(&hotel.country_code)
        .bind(&hotel.currency)
        .bind(hotel.stars)
        .bind(&hotel.description)
        .bind(hotel.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Hotel", &hotel.id));
        }

        Ok(())
    }

    /// Soft-deletes a hotel by setting is_active = false.
    ///
    /// ## Why Soft Delete?
    /// - Historical bookings still reference this hotel
    /// - Can be restored when a contract resumes
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting hotel");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE partner_hotels
            SET is_active = 0, updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Hotel", id));
        }

        Ok(())
    }

    /// Counts active hotels (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM partner_hotels WHERE is_active = 1")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

/// Helper to generate a new hotel ID.
pub fn generate_hotel_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
