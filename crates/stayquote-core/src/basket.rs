//! # Booking Basket
//!
//! Per-session selection state: the chosen room, add-on extras, and the
//! redeemed discount.
//!
//! ## Ownership
//! The booking API keeps one basket per shopping session and threads it
//! through explicitly; there is no global basket state. The basket is a
//! plain value type, so session stores can serialize it as-is.
//!
//! ## Basket Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Operations                                    │
//! │                                                                         │
//! │  SPA Action               API Handler             Basket Change         │
//! │  ──────────               ───────────             ─────────────         │
//! │                                                                         │
//! │  Pick Room ──────────────► select_room() ───────► room = snapshot      │
//! │                                                                         │
//! │  Add Transfer ───────────► add_extra() ─────────► extras.push / merge  │
//! │                                                                         │
//! │  Change Quantity ────────► update_extra_quantity()                      │
//! │                                                                         │
//! │  Redeem Code ────────────► set_discount() ──────► discount = desc      │
//! │                                                                         │
//! │  View Checkout ──────────► summary(stay) ───────► (recomputed, read    │
//! │                                                    only, never cached) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Freezing
//! Selecting a room freezes its marked-up nightly base. A markup change
//! between selection and checkout does not move the guest's price; the
//! discount, by contrast, is applied fresh on every summary so a code
//! redeemed after selection still counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::{apply_discount, DiscountDescriptor};
use crate::error::{PricingError, PricingResult};
use crate::money::round2;
use crate::quote::{quote_stay, StayQuote};
use crate::rooms::RoomOffer;
use crate::stay::Stay;
use crate::validation::{
    validate_currency_code, validate_extra_amount, validate_extra_code, validate_extra_quantity,
    validate_rate_key,
};
use crate::{MAX_BASKET_EXTRAS, MAX_EXTRA_QUANTITY};

// =============================================================================
// Room Selection
// =============================================================================

/// Frozen snapshot of the room the guest picked.
///
/// ## Design Notes
/// - `rate_key`: the supplier booking token (or partner room id) to book
/// - `nightly_base`: marked-up nightly price captured at selection time;
///   kept pre-discount so a later code redemption still applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSelection {
    /// Booking token for the selected combination.
    pub rate_key: String,

    /// Supplier hotel code or partner hotel id, when known.
    pub hotel_code: Option<String>,

    /// Display name at time of selection (frozen).
    pub room_name: Option<String>,

    /// Refundability at time of selection (frozen).
    pub refundable: bool,

    /// Marked-up nightly price at time of selection (frozen).
    pub nightly_base: f64,

    /// Currency of `nightly_base`.
    pub currency: String,

    /// When the room was selected.
    pub selected_at: DateTime<Utc>,
}

// =============================================================================
// Extras
// =============================================================================

/// An add-on line in the basket (transfer, breakfast upgrade, ...).
///
/// `amount` is per unit for the whole stay, not per night; extras fold into
/// the quote total exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketExtra {
    /// Stable add-on code, unique within the basket.
    pub code: String,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Unit amount at time of adding (frozen).
    pub amount: f64,

    /// Units requested.
    pub quantity: i64,

    /// When this extra was first added.
    pub added_at: DateTime<Utc>,
}

impl BasketExtra {
    /// Line total (unit amount × quantity), unrounded.
    pub fn line_total(&self) -> f64 {
        self.amount * self.quantity as f64
    }
}

// =============================================================================
// Booking Basket
// =============================================================================

/// The shopping session's selection state.
///
/// ## Invariants
/// - At most one selected room; re-selection replaces the snapshot
/// - Extras are unique by `code` (re-adding merges quantities)
/// - At most MAX_BASKET_EXTRAS distinct extras, MAX_EXTRA_QUANTITY per code
/// - At most one discount descriptor; inert by default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBasket {
    /// The selected room, if any.
    pub room: Option<RoomSelection>,

    /// Add-on extras.
    pub extras: Vec<BasketExtra>,

    /// The session discount (inert unless a code was redeemed).
    pub discount: DiscountDescriptor,

    /// When the basket was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl BookingBasket {
    /// Creates a new empty basket.
    pub fn new() -> Self {
        BookingBasket {
            room: None,
            extras: Vec::new(),
            discount: DiscountDescriptor::none(),
            created_at: Utc::now(),
        }
    }

    /// Selects a room from an explicit snapshot, replacing any previous
    /// selection. Extras and discount survive a re-selection.
    pub fn select_room(&mut self, selection: RoomSelection) -> PricingResult<()> {
        validate_rate_key(&selection.rate_key)?;
        validate_currency_code(&selection.currency)?;
        self.room = Some(selection);
        Ok(())
    }

    /// Selects a room straight from a normalized search offer.
    ///
    /// The offer's rounded nightly base becomes the frozen price: what the
    /// guest saw on the card is what checkout prices from.
    pub fn select_offer(&mut self, hotel_code: Option<&str>, offer: &RoomOffer) -> PricingResult<()> {
        self.select_room(RoomSelection {
            rate_key: offer.rate_key.clone(),
            hotel_code: hotel_code.map(str::to_string),
            room_name: offer.name.clone(),
            refundable: offer.refundable,
            nightly_base: offer.quote.nightly_base,
            currency: offer.quote.currency.clone(),
            selected_at: Utc::now(),
        })
    }

    /// The current selection, if any.
    pub fn room(&self) -> Option<&RoomSelection> {
        self.room.as_ref()
    }

    /// Adds an extra or merges quantity into an existing one.
    ///
    /// ## Behavior
    /// - Same code already present: quantities merge; the frozen name and
    ///   amount are kept (snapshot rule, same as the room price)
    /// - New code: appended, subject to the basket size limit
    pub fn add_extra(
        &mut self,
        code: &str,
        name: &str,
        amount: f64,
        quantity: i64,
    ) -> PricingResult<()> {
        validate_extra_code(code)?;
        validate_extra_amount(amount)?;
        validate_extra_quantity(quantity)?;
        let code = code.trim();

        if let Some(extra) = self.extras.iter_mut().find(|e| e.code == code) {
            let merged = extra.quantity + quantity;
            if merged > MAX_EXTRA_QUANTITY {
                return Err(PricingError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_EXTRA_QUANTITY,
                });
            }
            extra.quantity = merged;
            return Ok(());
        }

        if self.extras.len() >= MAX_BASKET_EXTRAS {
            return Err(PricingError::BasketFull {
                max: MAX_BASKET_EXTRAS,
            });
        }

        self.extras.push(BasketExtra {
            code: code.to_string(),
            name: name.to_string(),
            amount,
            quantity,
            added_at: Utc::now(),
        });
        Ok(())
    }

    /// Sets an extra's quantity; zero removes it.
    pub fn update_extra_quantity(&mut self, code: &str, quantity: i64) -> PricingResult<()> {
        if quantity == 0 {
            return self.remove_extra(code);
        }

        validate_extra_quantity(quantity)?;
        let code = code.trim();

        match self.extras.iter_mut().find(|e| e.code == code) {
            Some(extra) => {
                extra.quantity = quantity;
                Ok(())
            }
            None => Err(PricingError::ExtraNotFound(code.to_string())),
        }
    }

    /// Removes an extra by code.
    pub fn remove_extra(&mut self, code: &str) -> PricingResult<()> {
        let code = code.trim();
        let initial_len = self.extras.len();
        self.extras.retain(|e| e.code != code);

        if self.extras.len() == initial_len {
            Err(PricingError::ExtraNotFound(code.to_string()))
        } else {
            Ok(())
        }
    }

    /// Attaches the session discount (replacing any previous one).
    pub fn set_discount(&mut self, discount: DiscountDescriptor) {
        self.discount = discount;
    }

    /// Detaches the session discount.
    pub fn clear_discount(&mut self) {
        self.discount = DiscountDescriptor::none();
    }

    /// Empties the basket completely.
    pub fn clear(&mut self) {
        self.room = None;
        self.extras.clear();
        self.discount = DiscountDescriptor::none();
        self.created_at = Utc::now();
    }

    /// Number of distinct extras.
    pub fn extra_count(&self) -> usize {
        self.extras.len()
    }

    /// Sum of all extra lines for the stay, unrounded.
    pub fn extras_total(&self) -> f64 {
        self.extras.iter().map(BasketExtra::line_total).sum()
    }

    /// Checks if nothing has been selected or added.
    pub fn is_empty(&self) -> bool {
        self.room.is_none() && self.extras.is_empty()
    }

    /// Builds the checkout summary for a stay.
    ///
    /// Recomputed from current basket state on every call; nothing is
    /// cached, so a discount redeemed a second ago is already in here.
    ///
    /// ## Errors
    /// [`PricingError::RoomNotSelected`] when no room was picked yet.
    pub fn summary(&self, stay: &Stay) -> PricingResult<CheckoutSummary> {
        let room = self.room.as_ref().ok_or(PricingError::RoomNotSelected)?;

        let nightly_final = apply_discount(room.nightly_base, &self.discount);
        let extras_total = self.extras_total();
        let quote = quote_stay(
            room.nightly_base,
            nightly_final,
            stay.nights(),
            extras_total,
            &room.currency,
        );

        Ok(CheckoutSummary {
            rate_key: room.rate_key.clone(),
            room_name: room.room_name.clone(),
            refundable: room.refundable,
            quote,
            extras: self
                .extras
                .iter()
                .map(|e| ExtraLine {
                    code: e.code.clone(),
                    name: e.name.clone(),
                    quantity: e.quantity,
                    line_total: round2(e.line_total()),
                })
                .collect(),
            extras_total: round2(extras_total),
            discount_code: self.discount.code.clone(),
        })
    }
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// One extra rendered on the checkout page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExtraLine {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub line_total: f64,
}

/// Everything the checkout page shows; `quote.total_final` is the amount
/// handed to payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    /// Booking token of the selected room.
    pub rate_key: String,

    /// Room display name.
    pub room_name: Option<String>,

    /// Refundability of the selected rate.
    pub refundable: bool,

    /// The priced stay, extras included in `total_final`.
    pub quote: StayQuote,

    /// Per-extra lines.
    pub extras: Vec<ExtraLine>,

    /// Rounded sum of all extra lines.
    pub extras_total: f64,

    /// The redeemed discount code, if any.
    pub discount_code: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn selection(nightly_base: f64) -> RoomSelection {
        RoomSelection {
            rate_key: "RK-193-DBL".to_string(),
            hotel_code: Some("H-193".to_string()),
            room_name: Some("Double room".to_string()),
            refundable: true,
            nightly_base,
            currency: "EUR".to_string(),
            selected_at: Utc::now(),
        }
    }

    fn three_night_stay() -> Stay {
        Stay::new(
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
        )
    }

    #[test]
    fn test_summary_requires_a_room() {
        let basket = BookingBasket::new();
        let err = basket.summary(&three_night_stay()).unwrap_err();
        assert!(matches!(err, PricingError::RoomNotSelected));
    }

    #[test]
    fn test_summary_prices_the_stay() {
        let mut basket = BookingBasket::new();
        basket.select_room(selection(220.0)).unwrap();
        basket.set_discount(DiscountDescriptor::percentage_off(15.0).with_code("SUMMER24"));

        let summary = basket.summary(&three_night_stay()).unwrap();
        assert_eq!(summary.rate_key, "RK-193-DBL");
        assert_eq!(summary.quote.nightly_base, 220.0);
        assert_eq!(summary.quote.nightly_final, 187.0);
        assert_eq!(summary.quote.total_final, 561.0);
        assert_eq!(summary.quote.savings_total, 99.0);
        assert_eq!(summary.discount_code.as_deref(), Some("SUMMER24"));
    }

    /// The discount is applied at summary time, not frozen at selection.
    #[test]
    fn test_discount_redeemed_after_selection_still_applies() {
        let mut basket = BookingBasket::new();
        basket.select_room(selection(200.0)).unwrap();

        let before = basket.summary(&three_night_stay()).unwrap();
        assert_eq!(before.quote.nightly_final, 200.0);

        basket.set_discount(DiscountDescriptor::special_price(80.0));
        let after = basket.summary(&three_night_stay()).unwrap();
        assert_eq!(after.quote.nightly_final, 80.0);
        assert_eq!(after.quote.total_final, 240.0);
    }

    #[test]
    fn test_extras_fold_into_the_total() {
        let mut basket = BookingBasket::new();
        basket.select_room(selection(100.0)).unwrap();
        basket.add_extra("TRANSFER", "Airport transfer", 30.0, 1).unwrap();
        basket.add_extra("LATE-CHECKOUT", "Late checkout", 10.5, 2).unwrap();

        let summary = basket.summary(&three_night_stay()).unwrap();
        assert_eq!(summary.extras.len(), 2);
        assert_eq!(summary.extras_total, 51.0);
        // 100 × 3 nights + 51 in extras
        assert_eq!(summary.quote.total_final, 351.0);
        // extras never touch the nightly figures
        assert_eq!(summary.quote.nightly_final, 100.0);
    }

    #[test]
    fn test_add_same_extra_merges_quantity() {
        let mut basket = BookingBasket::new();
        basket.add_extra("TRANSFER", "Airport transfer", 30.0, 1).unwrap();
        basket.add_extra("TRANSFER", "Airport transfer", 30.0, 2).unwrap();

        assert_eq!(basket.extra_count(), 1);
        assert_eq!(basket.extras[0].quantity, 3);
        assert_eq!(basket.extras_total(), 90.0);
    }

    /// The first snapshot wins: re-adding with a different amount keeps the
    /// frozen one.
    #[test]
    fn test_merge_keeps_frozen_amount() {
        let mut basket = BookingBasket::new();
        basket.add_extra("TRANSFER", "Airport transfer", 30.0, 1).unwrap();
        basket.add_extra("TRANSFER", "Airport transfer", 99.0, 1).unwrap();

        assert_eq!(basket.extras[0].amount, 30.0);
        assert_eq!(basket.extras_total(), 60.0);
    }

    #[test]
    fn test_merge_respects_quantity_limit() {
        let mut basket = BookingBasket::new();
        basket.add_extra("TRANSFER", "Airport transfer", 30.0, 8).unwrap();

        let err = basket
            .add_extra("TRANSFER", "Airport transfer", 30.0, 5)
            .unwrap_err();
        assert!(matches!(err, PricingError::QuantityTooLarge { .. }));
        assert_eq!(basket.extras[0].quantity, 8);
    }

    #[test]
    fn test_basket_size_limit() {
        let mut basket = BookingBasket::new();
        for i in 0..MAX_BASKET_EXTRAS {
            basket
                .add_extra(&format!("EXTRA-{}", i), "Extra", 5.0, 1)
                .unwrap();
        }

        let err = basket.add_extra("ONE-MORE", "Extra", 5.0, 1).unwrap_err();
        assert!(matches!(err, PricingError::BasketFull { .. }));
    }

    #[test]
    fn test_update_and_remove_extra() {
        let mut basket = BookingBasket::new();
        basket.add_extra("TRANSFER", "Airport transfer", 30.0, 1).unwrap();

        basket.update_extra_quantity("TRANSFER", 4).unwrap();
        assert_eq!(basket.extras[0].quantity, 4);

        // zero removes
        basket.update_extra_quantity("TRANSFER", 0).unwrap();
        assert!(basket.is_empty());

        let err = basket.update_extra_quantity("TRANSFER", 1).unwrap_err();
        assert!(matches!(err, PricingError::ExtraNotFound(_)));
        let err = basket.remove_extra("TRANSFER").unwrap_err();
        assert!(matches!(err, PricingError::ExtraNotFound(_)));
    }

    #[test]
    fn test_invalid_extra_inputs_are_rejected() {
        let mut basket = BookingBasket::new();

        assert!(basket.add_extra("", "No code", 5.0, 1).is_err());
        assert!(basket.add_extra("SPA", "Spa", -5.0, 1).is_err());
        assert!(basket.add_extra("SPA", "Spa", f64::NAN, 1).is_err());
        assert!(basket.add_extra("SPA", "Spa", 5.0, 0).is_err());
        assert!(basket.add_extra("SPA", "Spa", 5.0, 99).is_err());
        assert!(basket.is_empty());
    }

    #[test]
    fn test_reselection_replaces_room_keeps_extras() {
        let mut basket = BookingBasket::new();
        basket.select_room(selection(100.0)).unwrap();
        basket.add_extra("TRANSFER", "Airport transfer", 30.0, 1).unwrap();

        let mut better = selection(90.0);
        better.rate_key = "RK-193-TWIN".to_string();
        basket.select_room(better).unwrap();

        assert_eq!(basket.room().unwrap().rate_key, "RK-193-TWIN");
        assert_eq!(basket.extra_count(), 1);
    }

    #[test]
    fn test_select_room_validates_snapshot() {
        let mut basket = BookingBasket::new();

        let mut bad_key = selection(100.0);
        bad_key.rate_key = "  ".to_string();
        assert!(basket.select_room(bad_key).is_err());

        let mut bad_currency = selection(100.0);
        bad_currency.currency = "euros".to_string();
        assert!(basket.select_room(bad_currency).is_err());

        assert!(basket.room().is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut basket = BookingBasket::new();
        basket.select_room(selection(100.0)).unwrap();
        basket.add_extra("TRANSFER", "Airport transfer", 30.0, 1).unwrap();
        basket.set_discount(DiscountDescriptor::percentage_off(10.0));

        basket.clear();
        assert!(basket.is_empty());
        assert_eq!(basket.discount, DiscountDescriptor::none());
    }

    #[test]
    fn test_select_offer_freezes_card_price() {
        use crate::quote::quote_stay;

        let offer = RoomOffer {
            room_code: Some("DBL".to_string()),
            name: Some("Double room".to_string()),
            rate_key: "RK-1".to_string(),
            refundable: false,
            payment_type: Some("AT_WEB".to_string()),
            quote: quote_stay(220.000000000003, 220.000000000003, 2, 0.0, "EUR"),
        };

        let mut basket = BookingBasket::new();
        basket.select_offer(Some("H-193"), &offer).unwrap();

        let room = basket.room().unwrap();
        // the rounded card price is what got frozen
        assert_eq!(room.nightly_base, 220.0);
        assert_eq!(room.hotel_code.as_deref(), Some("H-193"));
        assert!(!room.refundable);
    }
}
