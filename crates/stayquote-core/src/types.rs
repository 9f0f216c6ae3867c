//! # Partner Inventory Types
//!
//! Typed inventory records for directly contracted partner hotels.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Partner Inventory                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PartnerHotel   │   │  PartnerRoom    │   │   RateWindow    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  hotel_code     │   │  hotel_id (FK)  │   │  room_id (FK)   │       │
//! │  │  name, city     │   │  rate_key       │   │  start/end date │       │
//! │  │  currency       │   │  nightly_cents  │   │  nightly_cents  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │  PaymentType    │                                                    │
//! │  │  ─────────────  │                                                    │
//! │  │  AtWeb          │                                                    │
//! │  │  AtHotel        │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Each record carries two identities:
//! - `id` - a UUID v4 that never changes; foreign keys point at this
//! - a business code (`hotel_code`, `room_code`, `rate_key`) - what staff and
//!   suppliers quote, renameable without breaking relations
//!
//! ## Two Price Worlds
//! Partner rows store integer cents; the pricing chain speaks decimal major
//! units. The bridge is [`PartnerRoom::supplier_rate`] /
//! [`RateWindow::supplier_rate`], which convert exactly once.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::cents_to_amount;
use crate::rate::SupplierRate;
use crate::stay::Stay;

// =============================================================================
// Payment Type
// =============================================================================

/// When the guest pays for the room.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Paid online at booking time.
    AtWeb,
    /// Paid at the property on arrival.
    AtHotel,
}

impl PaymentType {
    /// Wire label, as supplier feeds spell it.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::AtWeb => "at_web",
            PaymentType::AtHotel => "at_hotel",
        }
    }
}

impl Default for PaymentType {
    fn default() -> Self {
        PaymentType::AtWeb
    }
}

// =============================================================================
// Partner Hotel
// =============================================================================

/// A directly contracted hotel.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PartnerHotel {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business code shown in supplier-style payloads.
    pub hotel_code: String,

    /// Display name.
    pub name: String,

    /// City for search filtering.
    pub city: Option<String>,

    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,

    /// Currency all of this hotel's rates are quoted in.
    pub currency: String,

    /// Star rating, when the partner declares one.
    pub stars: Option<i64>,

    /// Optional marketing description.
    pub description: Option<String>,

    /// Whether hotel is bookable (soft delete).
    pub is_active: bool,

    /// When the hotel was onboarded.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the hotel was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Partner Room
// =============================================================================

/// A bookable room rate inside a partner hotel.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PartnerRoom {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning hotel.
    pub hotel_id: String,

    /// Room type code ("DBL", "TWIN-SEA", ...).
    pub room_code: String,

    /// Display name shown on room cards.
    pub name: String,

    /// Booking token, unique across the partner inventory.
    pub rate_key: String,

    /// Base nightly price in cents (smallest currency unit).
    pub nightly_cents: i64,

    /// Whether the rate can be cancelled without charge.
    pub refundable: bool,

    /// When the guest pays.
    pub payment_type: PaymentType,

    /// Sleeps up to this many guests, when declared.
    pub max_occupancy: Option<i64>,

    /// Whether room is bookable (soft delete).
    pub is_active: bool,

    /// When the room was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the room was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl PartnerRoom {
    /// Base nightly price in decimal major units.
    #[inline]
    pub fn nightly_amount(&self) -> f64 {
        cents_to_amount(self.nightly_cents)
    }

    /// Bridges this room's base price into the pricing chain.
    #[inline]
    pub fn supplier_rate(&self) -> SupplierRate {
        SupplierRate::from_amount(self.nightly_amount())
    }
}

// =============================================================================
// Rate Window
// =============================================================================

/// A dated price override for a room.
///
/// Both bounds are night dates, inclusive: a window covers a stay when every
/// night from check-in through the last night falls inside it. The checkout
/// morning is nobody's night and does not count.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateWindow {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning room.
    pub room_id: String,

    /// First night the window prices.
    #[ts(as = "String")]
    pub start_date: NaiveDate,

    /// Last night the window prices (inclusive).
    #[ts(as = "String")]
    pub end_date: NaiveDate,

    /// Nightly price in cents while the window applies.
    pub nightly_cents: i64,

    /// When the window was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl RateWindow {
    /// Checks whether every night of the stay falls inside this window.
    pub fn covers(&self, stay: &Stay) -> bool {
        self.start_date <= stay.check_in && stay.last_night() <= self.end_date
    }

    /// Window nightly price in decimal major units.
    #[inline]
    pub fn nightly_amount(&self) -> f64 {
        cents_to_amount(self.nightly_cents)
    }

    /// Bridges this window's price into the pricing chain.
    #[inline]
    pub fn supplier_rate(&self) -> SupplierRate {
        SupplierRate::from_amount(self.nightly_amount())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> RateWindow {
        RateWindow {
            id: "w-1".to_string(),
            room_id: "r-1".to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            nightly_cents: 9900,
            created_at: Utc::now(),
        }
    }

    fn stay(check_in: (i32, u32, u32), check_out: (i32, u32, u32)) -> Stay {
        Stay::new(
            NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2).unwrap(),
            NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2).unwrap(),
        )
    }

    #[test]
    fn test_payment_type_default_and_label() {
        assert_eq!(PaymentType::default(), PaymentType::AtWeb);
        assert_eq!(PaymentType::AtHotel.label(), "at_hotel");
    }

    #[test]
    fn test_window_covers_every_night() {
        let w = window((2026, 7, 1), (2026, 7, 31));
        assert!(w.covers(&stay((2026, 7, 1), (2026, 7, 4))));
        // checkout on Aug 1 is fine: the last night is Jul 31
        assert!(w.covers(&stay((2026, 7, 29), (2026, 8, 1))));
    }

    #[test]
    fn test_window_misses_a_night() {
        let w = window((2026, 7, 1), (2026, 7, 31));
        // last night Aug 1 falls outside
        assert!(!w.covers(&stay((2026, 7, 30), (2026, 8, 2))));
        // first night before the window opens
        assert!(!w.covers(&stay((2026, 6, 30), (2026, 7, 2))));
    }

    #[test]
    fn test_room_price_bridges_to_decimal() {
        let room = PartnerRoom {
            id: "r-1".to_string(),
            hotel_id: "h-1".to_string(),
            room_code: "DBL".to_string(),
            name: "Double room".to_string(),
            rate_key: "PK-r-1".to_string(),
            nightly_cents: 12550,
            refundable: true,
            payment_type: PaymentType::AtWeb,
            max_occupancy: Some(2),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(room.nightly_amount(), 125.5);
        let rate = room.supplier_rate();
        assert_eq!(rate.price, Some(serde_json::json!(125.5)));
        assert!(rate.price_user.is_none());
    }
}
