//! # Money Helpers
//!
//! Display rounding, supplier payload parsing, and the bridge from the
//! partner store's integer cents to the chain's decimal amounts.
//!
//! ## Why Two Representations?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TWO WORLDS, ONE BOUNDARY                                               │
//! │                                                                         │
//! │  Supplier payloads (JavaScript upstream):                               │
//! │    { "price": 125.5 }  or  { "price": "125.50" }                        │
//! │    Decimal major units, sometimes stringly-typed. The markup and       │
//! │    discount chain is specified over these decimals, so it runs on f64. │
//! │                                                                         │
//! │  Partner inventory store (ours):                                        │
//! │    nightly_cents = 12550 (i64). Integer minor units, no float drift.   │
//! │    Converted to a decimal amount exactly once, at the pricing boundary.│
//! │                                                                         │
//! │  RULE: round to 2 decimals ONLY at quote/display points, never inside  │
//! │  the markup → discount chain. Intermediate drift like 220.00000000003  │
//! │  is expected and collapses at the boundary.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stayquote_core::money::{parse_amount, round2};
//! use serde_json::json;
//!
//! let raw = json!("125.50");
//! let amount = parse_amount(&raw).unwrap();
//! assert_eq!(round2(amount * 1.1), 138.05);
//! ```

use serde_json::Value;

// =============================================================================
// Display Rounding
// =============================================================================

/// Rounds an amount to 2 decimal places, half away from zero.
///
/// ## Example
/// ```rust
/// use stayquote_core::money::round2;
///
/// assert_eq!(round2(186.9999999999999), 187.0);
/// assert_eq!(round2(0.125), 0.13);
/// assert_eq!(round2(33.000000000000014), 33.0);
/// ```
///
/// ## Where To Round
/// Only at quote construction and display formatting. The markup and
/// discount steps stay unrounded so chained percentages do not accumulate
/// rounding error (e.g. 200 → ×1.1 → ×0.85 rounds once, to 187.00).
#[inline]
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Formats an amount with exactly two decimals for logs and summaries.
///
/// ## Note
/// This is for debugging and text summaries. The SPA formats quotes itself
/// to handle locale-specific separators.
///
/// ## Example
/// ```rust
/// use stayquote_core::money::format_amount;
///
/// assert_eq!(format_amount(187.0), "187.00");
/// assert_eq!(format_amount(-16.5), "-16.50");
/// ```
#[inline]
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", round2(amount))
}

// =============================================================================
// Supplier Payload Parsing
// =============================================================================

/// Extracts a finite, non-NaN amount from a loosely-typed JSON value.
///
/// The inventory supplier serializes prices as JSON numbers *or* numeric
/// strings depending on the rate source, so both must parse to the same
/// amount. Anything else (null, booleans, objects, junk strings, NaN,
/// infinities) yields `None` and the caller decides how to fail.
///
/// ## Example
/// ```rust
/// use stayquote_core::money::parse_amount;
/// use serde_json::json;
///
/// assert_eq!(parse_amount(&json!(125.5)), Some(125.5));
/// assert_eq!(parse_amount(&json!("89.99")), Some(89.99));
/// assert_eq!(parse_amount(&json!(" 120 ")), Some(120.0));
/// assert_eq!(parse_amount(&json!("abc")), None);
/// assert_eq!(parse_amount(&json!(null)), None);
/// ```
///
/// ## Why Filter Infinities?
/// `f64::from_str` happily parses "inf", "Infinity" and "NaN". A supplier
/// bug must surface as "price unavailable", not as an infinite total.
pub fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|a| a.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|a| a.is_finite()),
        _ => None,
    }
}

// =============================================================================
// Partner Store Bridge
// =============================================================================

/// Converts the partner store's integer minor units to a decimal amount.
///
/// ## Example
/// ```rust
/// use stayquote_core::money::cents_to_amount;
///
/// assert_eq!(cents_to_amount(12550), 125.5);
/// assert_eq!(cents_to_amount(0), 0.0);
/// ```
///
/// ## Why Here And Not In The Store?
/// The store never does pricing math; it hands cents over and this is the
/// single place where cents become chain amounts. One conversion, one
/// direction, no drift.
#[inline]
pub fn cents_to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
