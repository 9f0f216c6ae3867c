//! # Stay Quotes
//!
//! Aggregates the per-night pricing chain into the figures the SPA renders.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Construction                               │
//! │                                                                         │
//! │  apply_markup ──► apply_discount ──► quote_stay                         │
//! │   (unrounded)      (unrounded)          │                               │
//! │                                         ▼                               │
//! │                              round2 EVERY displayed figure:             │
//! │                              nightly base/final, total, savings         │
//! │                                                                         │
//! │  200 → ×1.1 → 220.00000000000003 → ×0.85 → 187.000000000000…           │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                              nightlyFinal 187.00, total (3n) 561.00    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quotes are ephemeral: recomputed per request, never persisted, so a
//! markup or discount change is live on the next search.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::round2;

// =============================================================================
// Stay Quote
// =============================================================================

/// The priced stay handed to the SPA and, at confirmation, to payment.
///
/// All amounts are display-rounded to 2 decimals and denominated in
/// `currency`. `savings_per_night` and `savings_total` go negative when a
/// special discount price exceeds the nightly base; the UI decides whether
/// to render that, the engine never hides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StayQuote {
    /// Marked-up nightly price before any discount.
    pub nightly_base: f64,

    /// Nightly price after the session discount.
    pub nightly_final: f64,

    /// Chargeable nights (floored to 1).
    pub nights: i64,

    /// `nightly_final × nights + extras`, the amount payment captures.
    pub total_final: f64,

    /// `nightly_base − nightly_final` per night.
    pub savings_per_night: f64,

    /// Savings across the whole stay.
    pub savings_total: f64,

    /// ISO 4217 currency code for every amount above.
    pub currency: String,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Builds the display quote from the unrounded chain outputs.
///
/// ## Arguments
/// * `nightly_base` - marked-up nightly price (before discount), unrounded.
/// * `nightly_final` - discounted nightly price, unrounded.
/// * `nights` - chargeable nights; values below 1 are priced as 1.
/// * `extras_total` - already-summed add-on cost for the stay.
/// * `currency` - ISO code the amounts are denominated in.
///
/// ## Example
/// ```rust
/// use stayquote_core::quote::quote_stay;
///
/// let quote = quote_stay(220.0, 187.0, 3, 0.0, "EUR");
/// assert_eq!(quote.total_final, 561.0);
/// assert_eq!(quote.savings_per_night, 33.0);
/// assert_eq!(quote.savings_total, 99.0);
/// ```
///
/// ## Rules
/// - the total is computed from the *unrounded* nightly final, then rounded
///   once, so three nights never drift a cent from the nightly price.
/// - savings_total is `round2(savings_per_night) × nights` re-rounded, so
///   the per-night figure times the night count matches what the UI shows.
pub fn quote_stay(
    nightly_base: f64,
    nightly_final: f64,
    nights: i64,
    extras_total: f64,
    currency: &str,
) -> StayQuote {
    let nights = nights.max(1);
    let savings_per_night = round2(nightly_base - nightly_final);

    StayQuote {
        nightly_base: round2(nightly_base),
        nightly_final: round2(nightly_final),
        nights,
        total_final: round2(nightly_final * nights as f64 + extras_total),
        savings_per_night,
        savings_total: round2(savings_per_night * nights as f64),
        currency: currency.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_without_discount() {
        let quote = quote_stay(120.0, 120.0, 2, 0.0, "EUR");
        assert_eq!(quote.nightly_base, 120.0);
        assert_eq!(quote.nightly_final, 120.0);
        assert_eq!(quote.total_final, 240.0);
        assert_eq!(quote.savings_per_night, 0.0);
        assert_eq!(quote.savings_total, 0.0);
        assert_eq!(quote.currency, "EUR");
    }

    #[test]
    fn test_quote_with_discount() {
        let quote = quote_stay(200.0, 170.0, 3, 0.0, "EUR");
        assert_eq!(quote.total_final, 510.0);
        assert_eq!(quote.savings_per_night, 30.0);
        assert_eq!(quote.savings_total, 90.0);
    }

    /// Chain drift like 220.00000000000003 must collapse in the quote.
    #[test]
    fn test_quote_rounds_chain_drift() {
        let nightly_base = 200.0_f64 * 1.1;
        let nightly_final = nightly_base * (1.0 - 15.0 / 100.0);

        let quote = quote_stay(nightly_base, nightly_final, 3, 0.0, "EUR");
        assert_eq!(quote.nightly_base, 220.0);
        assert_eq!(quote.nightly_final, 187.0);
        assert_eq!(quote.total_final, 561.0);
        assert_eq!(quote.savings_per_night, 33.0);
        assert_eq!(quote.savings_total, 99.0);
    }

    #[test]
    fn test_nights_floor_to_one() {
        let quote = quote_stay(100.0, 90.0, 0, 0.0, "EUR");
        assert_eq!(quote.nights, 1);
        assert_eq!(quote.total_final, 90.0);

        let quote = quote_stay(100.0, 90.0, -4, 0.0, "EUR");
        assert_eq!(quote.nights, 1);
    }

    /// A special price above the base shows up as negative savings.
    #[test]
    fn test_negative_savings_are_surfaced() {
        let quote = quote_stay(200.0, 250.0, 3, 0.0, "EUR");
        assert_eq!(quote.savings_per_night, -50.0);
        assert_eq!(quote.savings_total, -150.0);
        assert_eq!(quote.total_final, 750.0);
    }

    #[test]
    fn test_extras_fold_into_total_only() {
        let quote = quote_stay(100.0, 100.0, 2, 51.5, "EUR");
        assert_eq!(quote.total_final, 251.5);
        // extras never touch the nightly figures
        assert_eq!(quote.nightly_final, 100.0);
        assert_eq!(quote.savings_total, 0.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let quote = quote_stay(220.0, 187.0, 3, 0.0, "EUR");
        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"nightlyBase\":220.0"));
        assert!(json.contains("\"nightlyFinal\":187.0"));
        assert!(json.contains("\"totalFinal\":561.0"));
        assert!(json.contains("\"savingsPerNight\":33.0"));
    }
}
