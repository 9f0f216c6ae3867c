//! # stayquote-db: Partner Inventory Store for StayQuote
//!
//! SQLite persistence for directly contracted partner hotels: the hotels
//! themselves, their bookable rooms, and dated rate windows. Rows come out
//! as `stayquote_core` types, and a room's resolved stay price is bridged
//! into a [`SupplierRate`](stayquote_core::SupplierRate), so partner
//! inventory prices through exactly the same chain as supplier feed
//! inventory.
//!
//! ## Pipeline
//! ```text
//!   Booking API handler
//!        │  db.hotels() / db.rates()
//!        ▼
//!   repositories            SQL over SqlitePool (WAL, pooled,
//!        │                  migrated at startup)
//!        │  PartnerHotel / PartnerRoom / RateWindow
//!        ▼
//!   supplier_rate_for_stay  window-vs-base already resolved
//!        │  SupplierRate
//!        ▼
//!   stayquote-core          markup → discount → quote
//! ```
//!
//! ## Quick Start
//! ```rust,ignore
//! use stayquote_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./inventory.db")).await?;
//! let hotels = db.hotels().search("palma", 20).await?;
//! let rate = db.rates().supplier_rate_for_stay(&room, &stay).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repositories, so callers can name them without the module path
pub use repository::hotel::HotelRepository;
pub use repository::rate::RateRepository;
