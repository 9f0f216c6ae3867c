//! # Pricing and Validation Errors
//!
//! Failure types shared by the whole pricing pipeline.
//!
//! ## Where Errors Live
//! ```text
//! stayquote-core   PricingError      rates that cannot be priced,
//!                                    basket rule violations
//!                  ValidationError   caller input rejected early
//! stayquote-db     DbError           storage failures (separate crate)
//! booking API      HTTP responses    what the SPA eventually sees
//! ```
//!
//! A [`ValidationError`] folds into [`PricingError`] via `#[from]`; the API
//! layer maps both onto problem responses. Nothing here panics, and no
//! failure prices a room at zero: an unpriceable rate surfaces as
//! [`PricingError::InvalidPrice`] and the room is withheld from results.

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing and basket errors.
///
/// These errors represent rates that cannot be priced and basket operations
/// that violate booking rules. They should be caught and translated to
/// user-friendly messages ("Price unavailable", never "$0.00").
#[derive(Debug, Error)]
pub enum PricingError {
    /// The supplier rate could not be turned into a valid nightly price.
    ///
    /// ## When This Occurs
    /// - `price`/`priceUser` is missing, non-numeric, or a junk string
    /// - The marked-up result is NaN, infinite, or negative
    ///
    /// ## User Workflow
    /// ```text
    /// Supplier payload: { "price": "abc" }
    ///      │
    ///      ▼
    /// apply_markup(rate, role, table)
    ///      │
    ///      ▼
    /// InvalidPrice { raw: "\"abc\"", role: 1 }
    ///      │
    ///      ▼
    /// UI shows: "Price unavailable" (the room is hidden, never free)
    /// ```
    #[error("Cannot derive a valid nightly price from {raw} (role {role})")]
    InvalidPrice { raw: String, role: u32 },

    /// Basket operation requires a selected room.
    ///
    /// ## When This Occurs
    /// - Requesting a checkout summary before any room was selected
    /// - Attaching a discount to an empty basket
    #[error("No room selected in this basket")]
    RoomNotSelected,

    /// Basket already holds the maximum number of extras.
    #[error("Basket cannot have more than {max} extras")]
    BasketFull { max: usize },

    /// Requested extra quantity is above the per-line cap.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The named extra is not in the basket.
    #[error("Extra not found in basket: {0}")]
    ExtraNotFound(String),

    /// Early input validation failure, carried through the pricing API.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input rejection.
///
/// Raised by the validators in [`crate::validation`] before any pricing math
/// runs. The `field` name inside each variant feeds the API's per-field
/// error display.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Empty or whitespace-only input for a mandatory field.
    #[error("{field} is required")]
    Required { field: String },

    /// Input exceeds the field's storage bound.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Integer outside its allowed band.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be a finite number (rejects NaN and infinities).
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value must be positive (> 0).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (>= 0).
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Shorthand for fallible pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::InvalidPrice {
            raw: "\"abc\"".to_string(),
            role: 3,
        };
        assert_eq!(
            err.to_string(),
            "Cannot derive a valid nightly price from \"abc\" (role 3)"
        );

        let err = PricingError::QuantityTooLarge {
            requested: 50,
            max: 10,
        };
        assert_eq!(err.to_string(), "Quantity 50 exceeds maximum allowed (10)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "rate key".to_string(),
        };
        assert_eq!(err.to_string(), "rate key is required");

        let err = ValidationError::OutOfRange {
            field: "markup fraction".to_string(),
            min: 0,
            max: 10,
        };
        assert_eq!(err.to_string(), "markup fraction must be between 0 and 10");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let validation_err = ValidationError::NotFinite {
            field: "amount".to_string(),
        };
        let pricing_err: PricingError = validation_err.into();
        assert!(matches!(pricing_err, PricingError::Validation(_)));
    }
}
