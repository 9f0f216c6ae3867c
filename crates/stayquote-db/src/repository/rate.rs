//! # Rate Repository
//!
//! Database operations for partner rooms and their dated rate windows.
//!
//! ## Window-vs-Base Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 How a Stay Gets Its Nightly Price                       │
//! │                                                                         │
//! │  Room "Double room"  base: 100.00/night                                │
//! │  Window Jul 01 - Aug 31: 130.00/night (high season)                    │
//! │                                                                         │
//! │  Stay Jul 10 → Jul 13 (nights 10, 11, 12)                              │
//! │       └── every night inside the window → 130.00                      │
//! │                                                                         │
//! │  Stay Aug 30 → Sep 02 (nights 30, 31, 01)                              │
//! │       └── Sep 01 falls outside → window ignored → 100.00               │
//! │                                                                         │
//! │  A window prices a stay only when it covers EVERY night; partially     │
//! │  covered stays fall back to the base rate rather than mixing prices.   │
//! │  When overlapping windows both cover, the one starting latest wins     │
//! │  (the more specific seasonal override).                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Bridge
//! [`RateRepository::supplier_rate_for_stay`] converts the resolved cents
//! into a [`SupplierRate`], after which partner rooms flow through exactly
//! the same markup/discount/quote chain as supplier feed rooms.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stayquote_core::money::cents_to_amount;
use stayquote_core::{PartnerRoom, RateWindow, Stay, SupplierRate};

/// Repository for room and rate window operations.
#[derive(Debug, Clone)]
pub struct RateRepository {
    pool: SqlitePool,
}

impl RateRepository {
    /// Creates a new RateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RateRepository { pool }
    }

    // =========================================================================
    // Rooms
    // =========================================================================

    /// Lists active rooms for a hotel, cheapest base rate first.
    pub async fn rooms_for_hotel(&self, hotel_id: &str) -> DbResult<Vec<PartnerRoom>> {
        debug!(hotel_id = %hotel_id, "Listing rooms");

        let rooms = sqlx::query_as::<_, PartnerRoom>(
            r#"
            SELECT
                id, hotel_id, room_code, name, rate_key, nightly_cents,
                refundable, payment_type, max_occupancy, is_active,
                created_at, updated_at
            FROM partner_rooms
            WHERE hotel_id = ?1 AND is_active = 1
            ORDER BY nightly_cents, name
            "#,
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Gets a room by its booking token.
    ///
    /// This is the lookup behind room selection: the SPA sends back the
    /// rate_key from a card and the API resolves it here.
    pub async fn get_room_by_rate_key(&self, rate_key: &str) -> DbResult<Option<PartnerRoom>> {
        let room = sqlx::query_as::<_, PartnerRoom>(
            r#"
            SELECT
                id, hotel_id, room_code, name, rate_key, nightly_cents,
                refundable, payment_type, max_occupancy, is_active,
                created_at, updated_at
            FROM partner_rooms
            WHERE rate_key = ?1
            "#,
        )
        .bind(rate_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Inserts a new room.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - rate_key already exists
    /// * `Err(DbError::ForeignKeyViolation)` - hotel_id doesn't exist
    pub async fn insert_room(&self, room: &PartnerRoom) -> DbResult<()> {
        debug!(rate_key = %room.rate_key, "Inserting room");

        sqlx::query(
            r#"
            INSERT INTO partner_rooms (
                id, hotel_id, room_code, name, rate_key, nightly_cents,
                refundable, payment_type, max_occupancy, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&room.id)
        .bind(&room.hotel_id)
        .bind(&room.room_code)
        .bind(&room.name)
        .bind(&room.rate_key)
        .bind(room.nightly_cents)
        .bind(room.refundable)
        .bind(room.payment_type)
        .bind(room.max_occupancy)
        .bind(room.is_active)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Soft-deletes a room by setting is_active = false.
    pub async fn soft_delete_room(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting room");

        let now = chrono::Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE partner_rooms
            SET is_active = 0, updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Room", id));
        }

        Ok(())
    }

    // =========================================================================
    // Rate Windows
    // =========================================================================

    /// Lists a room's rate windows, earliest first.
    pub async fn windows_for_room(&self, room_id: &str) -> DbResult<Vec<RateWindow>> {
        let windows = sqlx::query_as::<_, RateWindow>(
            r#"
            SELECT id, room_id, start_date, end_date, nightly_cents, created_at
            FROM partner_rate_windows
            WHERE room_id = ?1
            ORDER BY start_date
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(windows)
    }

    /// Inserts a single rate window.
    pub async fn insert_window(&self, window: &RateWindow) -> DbResult<()> {
        debug!(
            room_id = %window.room_id,
            start = %window.start_date,
            end = %window.end_date,
            "Inserting rate window"
        );

        sqlx::query(
            r#"
            INSERT INTO partner_rate_windows (
                id, room_id, start_date, end_date, nightly_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&window.id)
        .bind(&window.room_id)
        .bind(window.start_date)
        .bind(window.end_date)
        .bind(window.nightly_cents)
        .bind(window.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replaces all of a room's windows with a new set, atomically.
    ///
    /// Partner rate sheets arrive as complete calendars; swapping the whole
    /// set in one transaction means a reader never sees a half-applied sheet.
    pub async fn replace_windows(&self, room_id: &str, windows: &[RateWindow]) -> DbResult<()> {
        debug!(room_id = %room_id, count = windows.len(), "Replacing rate windows");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM partner_rate_windows WHERE room_id = ?1")
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        for window in windows {
            sqlx::query(
                r#"
                INSERT INTO partner_rate_windows (
                    id, room_id, start_date, end_date, nightly_cents, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&window.id)
            .bind(room_id)
            .bind(window.start_date)
            .bind(window.end_date)
            .bind(window.nightly_cents)
            .bind(window.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    // =========================================================================
    // Stay Pricing
    // =========================================================================

    /// Resolves the nightly price (in cents) for a room over a stay.
    ///
    /// A window applies only when it covers every night of the stay; the
    /// latest-starting covering window wins, otherwise the room's base rate
    /// is used.
    pub async fn nightly_cents_for_stay(&self, room: &PartnerRoom, stay: &Stay) -> DbResult<i64> {
        let window_cents: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT nightly_cents
            FROM partner_rate_windows
            WHERE room_id = ?1
              AND start_date <= ?2
              AND end_date >= ?3
            ORDER BY start_date DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(&room.id)
        .bind(stay.check_in)
        .bind(stay.last_night())
        .fetch_optional(&self.pool)
        .await?;

        match window_cents {
            Some(cents) => {
                debug!(room_id = %room.id, cents = cents, "Stay priced from rate window");
                Ok(cents)
            }
            None => Ok(room.nightly_cents),
        }
    }

    /// Bridges a room's stay price into the core pricing chain.
    ///
    /// The returned [`SupplierRate`] goes through the same markup/discount
    /// path as supplier feed rooms; partner inventory gets no special
    /// treatment downstream.
    pub async fn supplier_rate_for_stay(
        &self,
        room: &PartnerRoom,
        stay: &Stay,
    ) -> DbResult<SupplierRate> {
        let cents = self.nightly_cents_for_stay(room, stay).await?;
        Ok(SupplierRate::from_amount(cents_to_amount(cents)))
    }
}

/// Helper to generate a new room ID.
pub fn generate_room_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a booking token for a partner room.
///
/// Prefixed so partner tokens are recognizable next to supplier ones in
/// logs and baskets.
pub fn generate_rate_key() -> String {
    format!("PK-{}", Uuid::new_v4().simple())
}

// =============================================================================
// Unit Tests
// =============================================================================
