//! # Supplier Rates
//!
//! The supplier's nightly rate payload and the markup step that turns it
//! into a nightly base price.
//!
//! ## Markup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       apply_markup (per rate)                           │
//! │                                                                         │
//! │  SupplierRate { price, priceUser }                                      │
//! │       │                                                                 │
//! │       ├─ priceUser present & parseable?                                 │
//! │       │        │ yes: markup was already applied upstream              │
//! │       │        ▼                                                        │
//! │       │   use it as-is ────────────────────────────┐                   │
//! │       │ no                                          │                   │
//! │       ▼                                             ▼                   │
//! │  price × (1 + markup_table[role])  ──►  finite and >= 0?               │
//! │                                              │           │              │
//! │                                          yes ▼        no ▼              │
//! │                                      nightly base   InvalidPrice       │
//! │                                                     ("unavailable",    │
//! │                                                      NEVER $0.00)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The upstream serializes prices as numbers or numeric strings depending on
//! the rate source, so both fields stay loosely typed until parsed here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::markup::MarkupTable;
use crate::money::parse_amount;
use crate::role::Role;

// =============================================================================
// Supplier Rate
// =============================================================================

/// A nightly rate as returned by the inventory supplier.
///
/// ## Field Semantics
/// - `price`: the raw nightly price before any markup.
/// - `priceUser`: a role-specific nightly price the supplier integration
///   already marked up for this caller. When present and parseable it wins,
///   so markup is never applied twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SupplierRate {
    /// Raw nightly price (number or numeric string upstream).
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub price: Option<Value>,

    /// Pre-marked-up nightly price for the current role, if supplied.
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub price_user: Option<Value>,
}

impl SupplierRate {
    /// Creates a rate from a raw price value.
    pub fn new(price: impl Into<Value>) -> Self {
        SupplierRate {
            price: Some(price.into()),
            price_user: None,
        }
    }

    /// Sets the pre-marked-up role price (builder style).
    pub fn with_price_user(mut self, price_user: impl Into<Value>) -> Self {
        self.price_user = Some(price_user.into());
        self
    }

    /// Creates a rate from a clean decimal amount.
    ///
    /// Used at the partner-inventory bridge, where prices come out of our
    /// own store instead of a supplier payload.
    pub fn from_amount(amount: f64) -> Self {
        SupplierRate {
            price: Some(Value::from(amount)),
            price_user: None,
        }
    }
}

// =============================================================================
// Markup Application
// =============================================================================

/// Derives the nightly base price for a role from a supplier rate.
///
/// ## Example
/// ```rust
/// use stayquote_core::markup::MarkupTable;
/// use stayquote_core::money::round2;
/// use stayquote_core::rate::{apply_markup, SupplierRate};
/// use stayquote_core::role::Role;
///
/// let table = MarkupTable::new().with_markup(Role::from_tier(2), 0.10);
///
/// let rate = SupplierRate::new(200);
/// let nightly = apply_markup(&rate, Role::from_tier(2), &table).unwrap();
/// assert_eq!(round2(nightly), 220.0);
///
/// // Unconfigured roles pay the supplier price unchanged
/// let nightly = apply_markup(&rate, Role::from_tier(9), &table).unwrap();
/// assert_eq!(nightly, 200.0);
/// ```
///
/// ## Rules
/// - `priceUser` parseable → returned as-is (upstream already applied the
///   role markup; applying ours on top would double-charge).
/// - otherwise `price × (1 + table[role])`, markup `0.0` for missing roles.
/// - any result that is not a finite, non-negative number is
///   [`PricingError::InvalidPrice`]. Callers render "price unavailable" and
///   drop the room; a zero or negative fallback would sell rooms for free.
pub fn apply_markup(
    rate: &SupplierRate,
    role: Role,
    table: &MarkupTable,
) -> PricingResult<f64> {
    if let Some(raw) = &rate.price_user {
        if let Some(amount) = parse_amount(raw) {
            return ensure_sellable(amount, raw, role);
        }
        debug!(raw = %raw, "priceUser is unparseable, recomputing from price");
    }

    let raw = rate
        .price
        .as_ref()
        .ok_or_else(|| PricingError::InvalidPrice {
            raw: "missing".to_string(),
            role: role.tier(),
        })?;

    let base = parse_amount(raw).ok_or_else(|| PricingError::InvalidPrice {
        raw: raw.to_string(),
        role: role.tier(),
    })?;

    let marked_up = base * (1.0 + table.fraction_for(role));
    ensure_sellable(marked_up, raw, role)
}

/// Accepts only finite, non-negative nightly amounts.
fn ensure_sellable(amount: f64, raw: &Value, role: Role) -> PricingResult<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(PricingError::InvalidPrice {
            raw: raw.to_string(),
            role: role.tier(),
        });
    }
    Ok(amount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::round2;
    use serde_json::json;

    fn table() -> MarkupTable {
        MarkupTable::new()
            .with_markup(Role::from_tier(2), 0.10)
            .with_markup(Role::from_tier(3), 0.12)
    }

    #[test]
    fn test_markup_applied_from_table() {
        let rate = SupplierRate::new(100);
        let nightly = apply_markup(&rate, Role::from_tier(3), &table()).unwrap();
        assert_eq!(round2(nightly), 112.0);
    }

    #[test]
    fn test_missing_role_means_zero_markup() {
        let rate = SupplierRate::new(80);
        let nightly = apply_markup(&rate, Role::from_tier(9), &table()).unwrap();
        assert_eq!(nightly, 80.0);
    }

    /// priceUser already carries the role markup, so it must be returned
    /// exactly, not re-marked-up.
    #[test]
    fn test_price_user_short_circuits() {
        let rate = SupplierRate::new(100).with_price_user(117.5);
        let nightly = apply_markup(&rate, Role::from_tier(3), &table()).unwrap();
        assert_eq!(nightly, 117.5);
    }

    #[test]
    fn test_price_user_accepts_numeric_string() {
        let rate = SupplierRate::new(100).with_price_user("117.50");
        let nightly = apply_markup(&rate, Role::from_tier(3), &table()).unwrap();
        assert_eq!(nightly, 117.5);
    }

    #[test]
    fn test_unparseable_price_user_falls_back_to_price() {
        let rate = SupplierRate::new(100).with_price_user("n/a");
        let nightly = apply_markup(&rate, Role::from_tier(2), &table()).unwrap();
        assert_eq!(round2(nightly), 110.0);

        // non-finite strings parse in Rust but are not prices
        let rate = SupplierRate::new(100).with_price_user("NaN");
        let nightly = apply_markup(&rate, Role::from_tier(2), &table()).unwrap();
        assert_eq!(round2(nightly), 110.0);
    }

    #[test]
    fn test_string_price_parses() {
        let rate = SupplierRate::new(json!("95.5"));
        let nightly = apply_markup(&rate, Role::GUEST, &MarkupTable::new()).unwrap();
        assert_eq!(nightly, 95.5);
    }

    #[test]
    fn test_zero_price_is_sellable() {
        // complimentary rates exist (package deals); zero is not an error
        let rate = SupplierRate::new(0);
        let nightly = apply_markup(&rate, Role::GUEST, &table()).unwrap();
        assert_eq!(nightly, 0.0);
    }

    #[test]
    fn test_junk_price_is_rejected() {
        let rate = SupplierRate::new(json!("abc"));
        let err = apply_markup(&rate, Role::GUEST, &table()).unwrap_err();
        assert!(matches!(err, PricingError::InvalidPrice { .. }));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let rate = SupplierRate::default();
        let err = apply_markup(&rate, Role::from_tier(2), &table()).unwrap_err();
        assert!(matches!(err, PricingError::InvalidPrice { .. }));
    }

    #[test]
    fn test_negative_prices_are_rejected() {
        let rate = SupplierRate::new(json!(-50.0));
        assert!(apply_markup(&rate, Role::GUEST, &table()).is_err());

        let rate = SupplierRate::new(100).with_price_user(json!(-1.0));
        assert!(apply_markup(&rate, Role::from_tier(2), &table()).is_err());
    }

    #[test]
    fn test_null_price_is_rejected() {
        let rate = SupplierRate::new(json!(null));
        assert!(apply_markup(&rate, Role::GUEST, &table()).is_err());
    }

    #[test]
    fn test_from_amount_bridge() {
        let rate = SupplierRate::from_amount(125.5);
        let nightly = apply_markup(&rate, Role::from_tier(2), &table()).unwrap();
        assert_eq!(round2(nightly), 138.05);
    }

    #[test]
    fn test_deserializes_camel_case_payload() {
        let rate: SupplierRate =
            serde_json::from_str(r#"{"price":"200","priceUser":220.5}"#).unwrap();
        let nightly = apply_markup(&rate, Role::from_tier(3), &table()).unwrap();
        assert_eq!(nightly, 220.5);
    }
}
