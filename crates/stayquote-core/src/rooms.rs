//! # Room Normalization
//!
//! Flattens supplier hotel search payloads into bookable room offers.
//!
//! ## Payload Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Supplier Payload → RoomOffers                         │
//! │                                                                         │
//! │  hotel                                                                  │
//! │   └── rooms[]                    (parent rows)                          │
//! │        ├── "Double room"  rateKey=A  price=120      ──► offer A        │
//! │        └── "Suite"        price=300  refundable=false                   │
//! │             └── rooms[]          (child combinations)                   │
//! │                  ├── rateKey=B  (inherits price 300)  ──► offer B      │
//! │                  ├── rateKey=C  price=340             ──► offer C      │
//! │                  └── (no rateKey)                     ──► SKIPPED      │
//! │                                                                         │
//! │  One offer per bookable combination. A parent with children is only    │
//! │  a grouping row; a childless parent is itself the combination.         │
//! │                                                                         │
//! │  Skips are RECORDED and logged, never silently zero-priced: a room     │
//! │  that cannot be keyed or priced does not exist for sale.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Refundability Precedence
//! explicit row boolean > inherited parent boolean > `NON_REFUNDABLE`
//! rate-rule marker > refundable by default.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use ts_rs::TS;

use crate::discount::DiscountDescriptor;
use crate::quote::StayQuote;
use crate::rate::SupplierRate;
use crate::resolver::PriceResolver;
use crate::role::Role;
use crate::stay::Stay;
use crate::DEFAULT_CURRENCY;

/// Rate-rule marker the supplier uses to flag non-refundable rates.
pub const NON_REFUNDABLE_RULE: &str = "NON_REFUNDABLE";

// =============================================================================
// Supplier Payload (input)
// =============================================================================

/// A hotel as it arrives from the supplier search endpoint.
///
/// Everything is optional and loosely typed; the supplier omits fields
/// freely and prices arrive as numbers or strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierHotelPayload {
    /// Supplier's hotel identifier.
    #[serde(default)]
    pub hotel_code: Option<String>,

    /// Hotel display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Currency of every price in the payload.
    #[serde(default)]
    pub currency: Option<String>,

    /// Parent room rows.
    #[serde(default)]
    pub rooms: Vec<SupplierRoomPayload>,
}

/// One room row: either a bookable combination or a grouping parent with
/// nested combinations under `rooms`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRoomPayload {
    /// Supplier's room type code.
    #[serde(default)]
    pub room_code: Option<String>,

    /// Room display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Booking token for this exact combination. Rows without one cannot
    /// be booked and are dropped.
    #[serde(default)]
    pub rate_key: Option<String>,

    /// Raw nightly price (number or numeric string).
    #[serde(default)]
    pub price: Option<Value>,

    /// Pre-marked-up nightly price for the current role.
    #[serde(default)]
    pub price_user: Option<Value>,

    /// Explicit refundability flag.
    #[serde(default)]
    pub refundable: Option<bool>,

    /// Payment channel label (e.g. "AT_WEB", "AT_HOTEL"), passed through.
    #[serde(default)]
    pub payment_type: Option<String>,

    /// Rate-rule markers; `NON_REFUNDABLE` is the one we interpret.
    #[serde(default)]
    pub rate_rules: Option<Vec<String>>,

    /// Nested child combinations (empty for bookable rows).
    #[serde(default)]
    pub rooms: Vec<SupplierRoomPayload>,
}

// =============================================================================
// Normalized Output
// =============================================================================

/// A bookable, fully priced room combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RoomOffer {
    /// Supplier room type code, if any.
    pub room_code: Option<String>,

    /// Display name (row's own, else inherited from the parent).
    pub name: Option<String>,

    /// Booking token for this combination.
    pub rate_key: String,

    /// Whether the rate can be cancelled without charge.
    pub refundable: bool,

    /// Payment channel label, row's own else the parent's.
    pub payment_type: Option<String>,

    /// Priced stay for this combination.
    pub quote: StayQuote,
}

/// Why a row was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SkipReason {
    /// The row carries no rate key, so it cannot be booked.
    MissingRateKey,

    /// The rate failed the pricing guard (junk or negative price).
    UnpricedRate,
}

/// Record of a dropped row, kept so callers can count lost inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SkippedRoom {
    /// Supplier room type code, if the row had one.
    pub room_code: Option<String>,

    /// Rate key, when the drop was for pricing rather than keying.
    pub rate_key: Option<String>,

    /// Why the row was dropped.
    pub reason: SkipReason,
}

/// A supplier hotel after flattening and pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NormalizedHotel {
    /// Supplier's hotel identifier.
    pub hotel_code: Option<String>,

    /// Hotel display name.
    pub name: Option<String>,

    /// Currency all offers are denominated in.
    pub currency: String,

    /// Bookable, priced offers.
    pub rooms: Vec<RoomOffer>,

    /// Rows dropped during normalization.
    pub skipped: Vec<SkippedRoom>,
}

// =============================================================================
// Normalization
// =============================================================================

/// Flattens and prices a supplier hotel payload.
///
/// Total function: rows that cannot be keyed or priced end up in
/// [`NormalizedHotel::skipped`] with a warn diagnostic, and the rest of the
/// payload still normalizes.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use stayquote_core::discount::DiscountDescriptor;
/// use stayquote_core::resolver::PriceResolver;
/// use stayquote_core::role::Role;
/// use stayquote_core::rooms::{normalize_hotel, SupplierHotelPayload};
/// use stayquote_core::stay::Stay;
///
/// let payload: SupplierHotelPayload = serde_json::from_str(
///     r#"{
///         "hotelCode": "H-193",
///         "currency": "EUR",
///         "rooms": [{ "name": "Double", "rateKey": "RK-1", "price": 120 }]
///     }"#,
/// )
/// .unwrap();
///
/// let stay = Stay::new(
///     NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 7, 3).unwrap(),
/// );
/// let hotel = normalize_hotel(
///     &payload,
///     &PriceResolver::default(),
///     Role::GUEST,
///     &DiscountDescriptor::none(),
///     &stay,
/// );
///
/// assert_eq!(hotel.rooms.len(), 1);
/// assert_eq!(hotel.rooms[0].quote.total_final, 240.0);
/// ```
pub fn normalize_hotel(
    payload: &SupplierHotelPayload,
    resolver: &PriceResolver,
    role: Role,
    discount: &DiscountDescriptor,
    stay: &Stay,
) -> NormalizedHotel {
    let currency = payload
        .currency
        .clone()
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let mut rooms = Vec::new();
    let mut skipped = Vec::new();

    for parent in &payload.rooms {
        if parent.rooms.is_empty() {
            flatten_row(
                parent, None, resolver, role, discount, stay, &currency, &mut rooms, &mut skipped,
            );
        } else {
            for child in &parent.rooms {
                flatten_row(
                    child,
                    Some(parent),
                    resolver,
                    role,
                    discount,
                    stay,
                    &currency,
                    &mut rooms,
                    &mut skipped,
                );
            }
        }
    }

    NormalizedHotel {
        hotel_code: payload.hotel_code.clone(),
        name: payload.name.clone(),
        currency,
        rooms,
        skipped,
    }
}

/// Turns one bookable row into an offer, inheriting absent fields from the
/// parent, or records why it was dropped.
#[allow(clippy::too_many_arguments)]
fn flatten_row(
    row: &SupplierRoomPayload,
    parent: Option<&SupplierRoomPayload>,
    resolver: &PriceResolver,
    role: Role,
    discount: &DiscountDescriptor,
    stay: &Stay,
    currency: &str,
    rooms: &mut Vec<RoomOffer>,
    skipped: &mut Vec<SkippedRoom>,
) {
    let room_code = inherit(row, parent, |r| r.room_code.clone());

    // The rate key is the booking token for this exact combination; it is
    // never inherited (a parent's key books the parent, not the child).
    let rate_key = match row.rate_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => {
            warn!(room_code = ?room_code, "Dropping room row without rate key");
            skipped.push(SkippedRoom {
                room_code,
                rate_key: None,
                reason: SkipReason::MissingRateKey,
            });
            return;
        }
    };

    let rate = SupplierRate {
        price: inherit(row, parent, |r| r.price.clone()),
        price_user: inherit(row, parent, |r| r.price_user.clone()),
    };

    let quote = match resolver.quote(&rate, role, discount, stay, 0.0, currency) {
        Ok(quote) => quote,
        Err(e) => {
            warn!(rate_key = %rate_key, error = %e, "Dropping room row that cannot be priced");
            skipped.push(SkippedRoom {
                room_code,
                rate_key: Some(rate_key),
                reason: SkipReason::UnpricedRate,
            });
            return;
        }
    };

    rooms.push(RoomOffer {
        room_code,
        name: inherit(row, parent, |r| r.name.clone()),
        rate_key,
        refundable: resolve_refundable(row, parent),
        payment_type: inherit(row, parent, |r| r.payment_type.clone()),
        quote,
    });
}

/// Field-wise inheritance: the row's own value wins, absent fields fall
/// back to the parent.
fn inherit<T>(
    row: &SupplierRoomPayload,
    parent: Option<&SupplierRoomPayload>,
    field: impl Fn(&SupplierRoomPayload) -> Option<T>,
) -> Option<T> {
    field(row).or_else(|| parent.and_then(field))
}

/// Applies the refundability precedence chain.
fn resolve_refundable(row: &SupplierRoomPayload, parent: Option<&SupplierRoomPayload>) -> bool {
    if let Some(explicit) = row.refundable.or_else(|| parent.and_then(|p| p.refundable)) {
        return explicit;
    }

    let rules = row
        .rate_rules
        .as_deref()
        .or_else(|| parent.and_then(|p| p.rate_rules.as_deref()));
    if let Some(rules) = rules {
        if rules.iter().any(|rule| rule == NON_REFUNDABLE_RULE) {
            return false;
        }
    }

    true
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupTable;
    use chrono::NaiveDate;
    use serde_json::json;

    fn two_night_stay() -> Stay {
        Stay::new(
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 3).unwrap(),
        )
    }

    fn payload(raw: serde_json::Value) -> SupplierHotelPayload {
        serde_json::from_value(raw).unwrap()
    }

    fn normalize(payload: &SupplierHotelPayload) -> NormalizedHotel {
        normalize_hotel(
            payload,
            &PriceResolver::default(),
            Role::GUEST,
            &DiscountDescriptor::none(),
            &two_night_stay(),
        )
    }

    #[test]
    fn test_childless_parent_is_an_offer() {
        let hotel = normalize(&payload(json!({
            "hotelCode": "H-193",
            "currency": "EUR",
            "rooms": [{ "name": "Double", "rateKey": "RK-1", "price": 120 }]
        })));

        assert_eq!(hotel.rooms.len(), 1);
        assert!(hotel.skipped.is_empty());

        let offer = &hotel.rooms[0];
        assert_eq!(offer.rate_key, "RK-1");
        assert_eq!(offer.name.as_deref(), Some("Double"));
        assert_eq!(offer.quote.nightly_final, 120.0);
        assert_eq!(offer.quote.total_final, 240.0);
    }

    #[test]
    fn test_children_inherit_from_parent() {
        let hotel = normalize(&payload(json!({
            "rooms": [{
                "roomCode": "SUI",
                "name": "Suite",
                "price": 300,
                "paymentType": "AT_WEB",
                "rooms": [
                    { "rateKey": "RK-B" },
                    { "rateKey": "RK-C", "price": 340, "name": "Suite sea view" }
                ]
            }]
        })));

        assert_eq!(hotel.rooms.len(), 2);

        let b = &hotel.rooms[0];
        assert_eq!(b.rate_key, "RK-B");
        assert_eq!(b.name.as_deref(), Some("Suite"));
        assert_eq!(b.room_code.as_deref(), Some("SUI"));
        assert_eq!(b.payment_type.as_deref(), Some("AT_WEB"));
        assert_eq!(b.quote.nightly_final, 300.0);

        let c = &hotel.rooms[1];
        assert_eq!(c.name.as_deref(), Some("Suite sea view"));
        assert_eq!(c.quote.nightly_final, 340.0);
    }

    /// The grouping parent's own rate key never leaks into children, and a
    /// child without a key is dropped while its siblings survive.
    #[test]
    fn test_row_without_rate_key_is_skipped_not_the_payload() {
        let hotel = normalize(&payload(json!({
            "rooms": [{
                "roomCode": "SUI",
                "rateKey": "RK-PARENT",
                "price": 300,
                "rooms": [
                    { "rateKey": "RK-B" },
                    { "name": "Unkeyed combo" },
                    { "rateKey": "   " }
                ]
            }]
        })));

        assert_eq!(hotel.rooms.len(), 1);
        assert_eq!(hotel.rooms[0].rate_key, "RK-B");

        assert_eq!(hotel.skipped.len(), 2);
        assert!(hotel
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::MissingRateKey));
    }

    /// A junk price becomes a recorded skip, never a zero-priced offer.
    #[test]
    fn test_unpriceable_row_is_skipped_not_zeroed() {
        let hotel = normalize(&payload(json!({
            "rooms": [
                { "rateKey": "RK-OK", "price": 99.5 },
                { "rateKey": "RK-BAD", "price": "abc" },
                { "rateKey": "RK-NEG", "price": -10 }
            ]
        })));

        assert_eq!(hotel.rooms.len(), 1);
        assert_eq!(hotel.rooms[0].rate_key, "RK-OK");

        assert_eq!(hotel.skipped.len(), 2);
        for skip in &hotel.skipped {
            assert_eq!(skip.reason, SkipReason::UnpricedRate);
        }
        assert_eq!(hotel.skipped[0].rate_key.as_deref(), Some("RK-BAD"));
    }

    #[test]
    fn test_refundability_precedence() {
        let hotel = normalize(&payload(json!({
            "rooms": [{
                "refundable": true,
                "rateRules": [NON_REFUNDABLE_RULE],
                "price": 100,
                "rooms": [
                    // explicit row flag wins over everything
                    { "rateKey": "RK-1", "refundable": false },
                    // inherited parent flag beats the marker
                    { "rateKey": "RK-2" },
                    { "rateKey": "RK-3" }
                ]
            },
            {
                "rateKey": "RK-4",
                "price": 100,
                "rateRules": [NON_REFUNDABLE_RULE]
            },
            {
                "rateKey": "RK-5",
                "price": 100
            }]
        })));

        let by_key = |key: &str| {
            hotel
                .rooms
                .iter()
                .find(|offer| offer.rate_key == key)
                .unwrap()
        };

        assert!(!by_key("RK-1").refundable); // explicit false
        assert!(by_key("RK-2").refundable); // parent's explicit true beats marker
        assert!(by_key("RK-3").refundable); // same inheritance as RK-2
        assert!(!by_key("RK-4").refundable); // marker with no flags
        assert!(by_key("RK-5").refundable); // default
    }

    #[test]
    fn test_marker_only_row_is_non_refundable() {
        let hotel = normalize(&payload(json!({
            "rooms": [{
                "price": 100,
                "rateRules": ["BREAKFAST_INCLUDED", NON_REFUNDABLE_RULE],
                "rooms": [{ "rateKey": "RK-1" }]
            }]
        })));
        assert!(!hotel.rooms[0].refundable);
    }

    #[test]
    fn test_offers_are_priced_with_role_and_discount() {
        let resolver =
            PriceResolver::new(MarkupTable::new().with_markup(Role::from_tier(2), 0.10));
        let hotel = normalize_hotel(
            &payload(json!({
                "currency": "USD",
                "rooms": [{ "rateKey": "RK-1", "price": 200 }]
            })),
            &resolver,
            Role::from_tier(2),
            &DiscountDescriptor::percentage_off(15.0),
            &two_night_stay(),
        );

        let quote = &hotel.rooms[0].quote;
        assert_eq!(quote.nightly_base, 220.0);
        assert_eq!(quote.nightly_final, 187.0);
        assert_eq!(quote.total_final, 374.0);
        assert_eq!(quote.currency, "USD");
        assert_eq!(hotel.currency, "USD");
    }

    #[test]
    fn test_currency_defaults_when_payload_omits_it() {
        let hotel = normalize(&payload(json!({
            "rooms": [{ "rateKey": "RK-1", "price": 50 }]
        })));
        assert_eq!(hotel.currency, DEFAULT_CURRENCY);
        assert_eq!(hotel.rooms[0].quote.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_empty_payload_normalizes_to_nothing() {
        let hotel = normalize(&payload(json!({ "hotelCode": "H-0" })));
        assert!(hotel.rooms.is_empty());
        assert!(hotel.skipped.is_empty());
    }

    #[test]
    fn test_string_prices_flow_through() {
        let hotel = normalize(&payload(json!({
            "rooms": [{ "rateKey": "RK-1", "price": "89.99" }]
        })));
        assert_eq!(hotel.rooms[0].quote.nightly_final, 89.99);
    }
}
