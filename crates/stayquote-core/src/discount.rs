//! # Discounts
//!
//! The session discount descriptor and the discount step of the pricing
//! chain.
//!
//! ## Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     apply_discount (per night)                          │
//! │                                                                         │
//! │  active == false ─────────────────────────► nightly base unchanged     │
//! │       │ active                                                          │
//! │       ▼                                                                 │
//! │  specialDiscountPrice finite & >= 0? ─────► it IS the nightly price    │
//! │       │ no                                  (percentage is ignored)    │
//! │       ▼                                                                 │
//! │  percentage finite & > 0? ────────────────► base × (1 − pct/100)       │
//! │       │ no                                  floored at 0               │
//! │       ▼                                                                 │
//! │  nightly base unchanged                                                 │
//! │                                                                         │
//! │  Total function: junk fields degrade to "no discount", never an error. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! At most one descriptor is active per shopping session; the code
//! validation service owns issuing them, this module only applies them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

// =============================================================================
// Discount Descriptor
// =============================================================================

/// A discount attached to the current shopping session.
///
/// Descriptors are platform-owned (unlike supplier payloads), so the numeric
/// fields are typed. `validatedBy` is the exception: older records store the
/// validating operator as a bare string, newer ones as an object, and both
/// still exist in production sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountDescriptor {
    /// Whether the discount applies at all. Inactive descriptors are inert
    /// regardless of every other field.
    #[serde(default)]
    pub active: bool,

    /// Percentage off the nightly base (15 means 15%).
    #[serde(default)]
    pub percentage: Option<f64>,

    /// Fixed nightly price that replaces the computed one entirely.
    #[serde(default)]
    pub special_discount_price: Option<f64>,

    /// The discount code the guest redeemed.
    #[serde(default)]
    pub code: Option<String>,

    /// Who validated the code (normalized to a display string).
    #[serde(default, deserialize_with = "de_validated_by")]
    pub validated_by: Option<String>,
}

impl DiscountDescriptor {
    /// An inert descriptor (no discount).
    pub fn none() -> Self {
        Self::default()
    }

    /// An active percentage discount.
    pub fn percentage_off(percentage: f64) -> Self {
        DiscountDescriptor {
            active: true,
            percentage: Some(percentage),
            ..Self::default()
        }
    }

    /// An active fixed nightly price.
    pub fn special_price(price: f64) -> Self {
        DiscountDescriptor {
            active: true,
            special_discount_price: Some(price),
            ..Self::default()
        }
    }

    /// Attaches the redeemed code (builder style).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Accepts `validatedBy` as a string or an object.
///
/// Objects normalize to their `name` field when present, otherwise to
/// compact JSON so nothing is lost from the audit trail.
fn de_validated_by<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Object(map) => {
            if let Some(name) = map.get("name").and_then(Value::as_str) {
                Some(name.to_string())
            } else {
                Some(Value::Object(map).to_string())
            }
        }
        other => Some(other.to_string()),
    }))
}

// =============================================================================
// Discount Application
// =============================================================================

/// Applies the session discount to a nightly base price.
///
/// ## Example
/// ```rust
/// use stayquote_core::discount::{apply_discount, DiscountDescriptor};
///
/// let fifteen_off = DiscountDescriptor::percentage_off(15.0);
/// assert_eq!(apply_discount(220.0, &fifteen_off), 187.0);
///
/// // A special price replaces the nightly figure outright
/// let promo = DiscountDescriptor::special_price(80.0);
/// assert_eq!(apply_discount(220.0, &promo), 80.0);
/// ```
///
/// ## Rules
/// - inactive → identity, whatever the other fields say.
/// - a finite `special_discount_price >= 0` wins over `percentage` and
///   becomes the nightly price (it may exceed the base; the quote then
///   shows negative savings rather than hiding the difference).
/// - else a finite `percentage > 0` discounts the base, floored at 0 so
///   over-100% promotions never produce a negative price.
/// - anything else is inert.
///
/// The result stays unrounded; rounding happens once, at quote time.
pub fn apply_discount(nightly_base: f64, discount: &DiscountDescriptor) -> f64 {
    if !discount.active {
        return nightly_base;
    }

    if let Some(special) = discount.special_discount_price {
        if special.is_finite() && special >= 0.0 {
            return special;
        }
    }

    if let Some(percentage) = discount.percentage {
        if percentage.is_finite() && percentage > 0.0 {
            return (nightly_base * (1.0 - percentage / 100.0)).max(0.0);
        }
    }

    nightly_base
}

// =============================================================================
// Unit Tests
// =============================================================================
