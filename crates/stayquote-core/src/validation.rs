//! # Input Validation
//!
//! Request-boundary checks for booking inputs. Everything here runs before a
//! value reaches the pricing chain or the database.
//!
//! The validators fall into three groups:
//!
//! - Identifier shape: [`validate_rate_key`], [`validate_extra_code`],
//!   [`validate_currency_code`], [`validate_uuid`]
//! - Numeric bands: [`validate_extra_amount`], [`validate_extra_quantity`],
//!   [`validate_nights`], [`validate_role_tier`], [`validate_markup_fraction`]
//! - Basket occupancy: [`validate_basket_size`]
//!
//! These checks are not the only guards in the system. Deserialization rejects
//! type errors before a handler sees the value, and the pricing chain keeps its
//! own finiteness checks ([`apply_markup`](crate::markup::apply_markup) refuses
//! NaN and negative prices even when a caller skips this module).
//!
//! ## Usage
//! ```rust,no_run
//! use stayquote_core::validation::{validate_rate_key, validate_extra_quantity};
//!
//! // Validate the supplier rate key before snapshotting a selection
//! validate_rate_key("RK-193-DBL-BB").unwrap();
//!
//! // Validate quantity before a basket operation
//! validate_extra_quantity(2).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_BASKET_EXTRAS, MAX_EXTRA_QUANTITY, MAX_STAY_NIGHTS};

/// Shorthand for fallible input checks.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a supplier rate key.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 64 characters
///
/// Rate keys are opaque supplier tokens, so no character-set rule beyond
/// length applies.
///
/// ## Example
/// ```rust
/// use stayquote_core::validation::validate_rate_key;
///
/// assert!(validate_rate_key("RK-193-DBL-BB").is_ok());
/// assert!(validate_rate_key("").is_err());
/// assert!(validate_rate_key("K".repeat(100).as_str()).is_err());
/// ```
pub fn validate_rate_key(key: &str) -> ValidationResult<()> {
    let key = key.trim();

    if key.is_empty() {
        return Err(ValidationError::Required {
            field: "rate key".to_string(),
        });
    }

    if key.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "rate key".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a currency code.
///
/// ## Rules
/// - Must not be empty
/// - Must be a 3-letter uppercase ISO 4217 code (EUR, USD, ...)
///
/// ## Example
/// ```rust
/// use stayquote_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("EUR").is_ok());
/// assert!(validate_currency_code("eur").is_err());
/// assert!(validate_currency_code("EURO").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a 3-letter uppercase ISO code".to_string(),
        });
    }

    Ok(())
}

/// Validates an extra (add-on) code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 32 characters
pub fn validate_extra_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "extra code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "extra code".to_string(),
            max: 32,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an extra's unit amount.
///
/// ## Rules
/// - Must be finite (rejects NaN and infinities)
/// - Must be non-negative (zero is allowed: complimentary add-ons)
pub fn validate_extra_amount(amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "extra amount".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::Negative {
            field: "extra amount".to_string(),
        });
    }

    Ok(())
}

/// Validates an extra quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_EXTRA_QUANTITY (10)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Basket: Add Extra                                                      │
/// │                                                                         │
/// │  User picks "Airport transfer" × 2                                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_extra_quantity(2) ← THIS FUNCTION                            │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 10? → Error: "quantity must be between 1 and 10"       │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_extra                                  │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_extra_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_EXTRA_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_EXTRA_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a stay length in nights.
///
/// ## Rules
/// - Must be between 1 and MAX_STAY_NIGHTS (30)
///
/// The quote chain itself floors invalid stays to one night; this validator
/// is for the booking API to reject absurd date ranges up front.
pub fn validate_nights(nights: i64) -> ValidationResult<()> {
    if !(1..=MAX_STAY_NIGHTS).contains(&nights) {
        return Err(ValidationError::OutOfRange {
            field: "nights".to_string(),
            min: 1,
            max: MAX_STAY_NIGHTS,
        });
    }

    Ok(())
}

/// Validates a role tier.
///
/// ## Rules
/// - Must be at least 1 (tier 0 is not a role)
pub fn validate_role_tier(tier: u32) -> ValidationResult<()> {
    if tier == 0 {
        return Err(ValidationError::MustBePositive {
            field: "role".to_string(),
        });
    }

    Ok(())
}

/// Validates a markup fraction.
///
/// ## Rules
/// - Must be finite
/// - Must be between 0 and 10 (+0% to +1000%)
///
/// ## Example
/// ```rust
/// use stayquote_core::validation::validate_markup_fraction;
///
/// assert!(validate_markup_fraction(0.12).is_ok());
/// assert!(validate_markup_fraction(0.0).is_ok());
/// assert!(validate_markup_fraction(-0.05).is_err());
/// ```
pub fn validate_markup_fraction(fraction: f64) -> ValidationResult<()> {
    if !fraction.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "markup fraction".to_string(),
        });
    }

    if !(0.0..=10.0).contains(&fraction) {
        return Err(ValidationError::OutOfRange {
            field: "markup fraction".to_string(),
            min: 0,
            max: 10,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates basket size (number of distinct extras).
///
/// ## Rules
/// - Must not exceed MAX_BASKET_EXTRAS (20)
pub fn validate_basket_size(current_extras: usize) -> ValidationResult<()> {
    if current_extras >= MAX_BASKET_EXTRAS {
        return Err(ValidationError::OutOfRange {
            field: "basket extras".to_string(),
            min: 0,
            max: MAX_BASKET_EXTRAS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates that a string parses as a UUID.
///
/// ## Rules
/// - Must parse with [`uuid::Uuid::parse_str`] (hyphenated 36-char form)
///
/// Partner hotel and room ids are UUID v4; supplier keys are not and must
/// not be passed through this check.
///
/// ## Example
/// ```rust
/// use stayquote_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rate_key() {
        assert!(validate_rate_key("RK-193-DBL-BB").is_ok());
        assert!(validate_rate_key("17319|double|bb").is_ok());

        assert!(validate_rate_key("").is_err());
        assert!(validate_rate_key("   ").is_err());
        assert!(validate_rate_key(&"K".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("EUR").is_ok());
        assert!(validate_currency_code("USD").is_ok());

        assert!(validate_currency_code("").is_err());
        assert!(validate_currency_code("eur").is_err());
        assert!(validate_currency_code("EURO").is_err());
        assert!(validate_currency_code("E1R").is_err());
    }

    #[test]
    fn test_validate_extra_code() {
        assert!(validate_extra_code("TRANSFER").is_ok());
        assert!(validate_extra_code("").is_err());
        assert!(validate_extra_code(&"X".repeat(50)).is_err());
    }

    #[test]
    fn test_validate_extra_amount() {
        assert!(validate_extra_amount(15.0).is_ok());
        assert!(validate_extra_amount(0.0).is_ok()); // complimentary

        assert!(validate_extra_amount(-1.0).is_err());
        assert!(validate_extra_amount(f64::NAN).is_err());
        assert!(validate_extra_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_extra_quantity() {
        assert!(validate_extra_quantity(1).is_ok());
        assert!(validate_extra_quantity(10).is_ok());

        assert!(validate_extra_quantity(0).is_err());
        assert!(validate_extra_quantity(-1).is_err());
        assert!(validate_extra_quantity(11).is_err());
    }

    #[test]
    fn test_validate_nights() {
        assert!(validate_nights(1).is_ok());
        assert!(validate_nights(30).is_ok());

        assert!(validate_nights(0).is_err());
        assert!(validate_nights(-3).is_err());
        assert!(validate_nights(31).is_err());
    }

    #[test]
    fn test_validate_role_tier() {
        assert!(validate_role_tier(1).is_ok());
        assert!(validate_role_tier(7).is_ok());
        assert!(validate_role_tier(0).is_err());
    }

    #[test]
    fn test_validate_markup_fraction() {
        assert!(validate_markup_fraction(0.0).is_ok());
        assert!(validate_markup_fraction(0.12).is_ok());
        assert!(validate_markup_fraction(10.0).is_ok());

        assert!(validate_markup_fraction(-0.05).is_err());
        assert!(validate_markup_fraction(10.5).is_err());
        assert!(validate_markup_fraction(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_basket_size() {
        assert!(validate_basket_size(0).is_ok());
        assert!(validate_basket_size(19).is_ok());
        assert!(validate_basket_size(20).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("RK-193-DBL-BB").is_err());
    }
}
