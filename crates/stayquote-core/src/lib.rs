//! # stayquote-core: Pure Pricing Logic for StayQuote
//!
//! This crate is the **heart** of StayQuote. It contains the whole pricing
//! chain as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       StayQuote Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Booking SPA                                │   │
//! │  │    Search UI ──► Room Cards ──► Basket UI ──► Checkout UI      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                      Booking API                                │   │
//! │  │    search_hotels, select_room, redeem_code, checkout, etc.     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stayquote-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   role    │  │   rate    │  │ discount  │  │   rooms   │  │   │
//! │  │   │  resolve  │  │  markup   │  │  resolve  │  │ normalize │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   quote   │  │  basket   │  │   money   │  │ validation│  │   │
//! │  │   │   stays   │  │ checkout  │  │  round2   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   pure computation only: nothing here touches disk or network   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stayquote-db (Partner Inventory)               │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`role`] - Customer role resolution (session > query > header > guest)
//! - [`markup`] - Role-to-markup table and its environment loader
//! - [`rate`] - Supplier rate payloads and markup application
//! - [`discount`] - Discount descriptors and their precedence chain
//! - [`stay`] - Check-in/check-out date pairs and night counting
//! - [`quote`] - Display quotes for a stay (the only place that rounds)
//! - [`resolver`] - One facade over the whole chain
//! - [`rooms`] - Supplier room-tree normalization with inheritance
//! - [`basket`] - Per-session selection state and checkout summaries
//! - [`types`] - Typed partner inventory records
//! - [`money`] - Rounding, parsing, and the cents bridge
//! - [`error`] - Pricing failures and input rejections
//! - [`validation`] - Request-boundary input checks
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same request always prices to the same quote
//! 2. **I/O-free**: nothing in this crate opens a socket, file, or database
//! 3. **Late rounding**: prices stay unrounded through the chain; only quotes round
//! 4. **Typed failures**: fallible paths return [`PricingError`], never a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stayquote_core::discount::DiscountDescriptor;
//! use stayquote_core::markup::MarkupTable;
//! use stayquote_core::rate::SupplierRate;
//! use stayquote_core::resolver::PriceResolver;
//! use stayquote_core::role::Role;
//! use stayquote_core::stay::Stay;
//!
//! // Tier 3 customers pay a 10% markup over supplier cost
//! let resolver = PriceResolver::new(
//!     MarkupTable::new().with_markup(Role::from_tier(3), 0.10),
//! );
//!
//! let rate = SupplierRate::new(200.0);
//! let discount = DiscountDescriptor::percentage_off(15.0);
//! let stay = Stay::new(
//!     NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
//! );
//!
//! // 200 → 220 marked up → 187 after the discount, for 3 nights
//! let quote = resolver
//!     .quote(&rate, Role::from_tier(3), &discount, &stay, 0.0, "EUR")
//!     .unwrap();
//! assert_eq!(quote.nightly_final, 187.0);
//! assert_eq!(quote.total_final, 561.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod discount;
pub mod error;
pub mod markup;
pub mod money;
pub mod quote;
pub mod rate;
pub mod resolver;
pub mod role;
pub mod rooms;
pub mod stay;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stayquote_core::Role` instead of
// `use stayquote_core::role::Role`

pub use basket::{BookingBasket, CheckoutSummary};
pub use discount::{apply_discount, DiscountDescriptor};
pub use error::{PricingError, PricingResult, ValidationError};
pub use markup::MarkupTable;
pub use quote::{quote_stay, StayQuote};
pub use rate::{apply_markup, SupplierRate};
pub use resolver::PriceResolver;
pub use role::{resolve_role, Role};
pub use rooms::{normalize_hotel, NormalizedHotel, RoomOffer};
pub use stay::Stay;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency assumed when a supplier payload does not declare one.
///
/// ## Why a constant?
/// The upstream feeds quote almost exclusively in euros and omit the currency
/// field when they do. Partner inventory always declares its currency, so
/// this default only ever fills supplier gaps.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Maximum distinct extras in a single basket
///
/// ## Business Reason
/// Prevents runaway baskets and keeps checkout pages renderable.
/// Can be made configurable per brand in future versions.
pub const MAX_BASKET_EXTRAS: usize = 20;

/// Maximum quantity of a single extra
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 transfers instead
/// of 1). Configurable per brand in future versions.
pub const MAX_EXTRA_QUANTITY: i64 = 10;

/// Maximum nights a single quote may span
///
/// ## Business Reason
/// Supplier rate keys expire long before a 30-night stay would, and longer
/// stays are contracted by hand. Keeps totals inside sane display ranges.
pub const MAX_STAY_NIGHTS: i64 = 30;
