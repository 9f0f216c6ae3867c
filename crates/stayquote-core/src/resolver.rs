//! # Price Resolver
//!
//! The facade every pricing call site goes through.
//!
//! ## One Code Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PriceResolver                                   │
//! │                                                                         │
//! │   hotel search results ──┐                                              │
//! │   room selection ────────┤                                              │
//! │   partner booking flow ──┼──► nightly_base / nightly_final / quote      │
//! │   add-on pricing ────────┤         (markup → discount → aggregate)      │
//! │   checkout summary ──────┘                                              │
//! │                                                                         │
//! │   Five surfaces, one chain: the number on the search card, the room    │
//! │   page, and the payment capture can never disagree.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver owns the read-only markup table; everything else arrives
//! per call. It is cheap to clone and safe to share across request tasks.

use crate::discount::{apply_discount, DiscountDescriptor};
use crate::error::PricingResult;
use crate::markup::MarkupTable;
use crate::quote::{quote_stay, StayQuote};
use crate::rate::{apply_markup, SupplierRate};
use crate::role::Role;
use crate::stay::Stay;

// =============================================================================
// Price Resolver
// =============================================================================

/// Resolves supplier rates into user-facing prices and quotes.
#[derive(Debug, Clone, Default)]
pub struct PriceResolver {
    table: MarkupTable,
}

impl PriceResolver {
    /// Creates a resolver over a markup table.
    pub fn new(table: MarkupTable) -> Self {
        PriceResolver { table }
    }

    /// Creates a resolver from the process environment
    /// (`STAYQUOTE_MARKUP_TABLE`), falling back to an empty table.
    pub fn from_env() -> Self {
        Self::new(MarkupTable::from_env())
    }

    /// The markup table this resolver prices with.
    pub fn markup_table(&self) -> &MarkupTable {
        &self.table
    }

    /// Marked-up nightly price for a role, before any discount.
    pub fn nightly_base(&self, rate: &SupplierRate, role: Role) -> PricingResult<f64> {
        apply_markup(rate, role, &self.table)
    }

    /// Nightly price after the session discount.
    pub fn nightly_final(
        &self,
        rate: &SupplierRate,
        role: Role,
        discount: &DiscountDescriptor,
    ) -> PricingResult<f64> {
        let base = self.nightly_base(rate, role)?;
        Ok(apply_discount(base, discount))
    }

    /// Full display quote for a stay.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use stayquote_core::discount::DiscountDescriptor;
    /// use stayquote_core::markup::MarkupTable;
    /// use stayquote_core::rate::SupplierRate;
    /// use stayquote_core::resolver::PriceResolver;
    /// use stayquote_core::role::Role;
    /// use stayquote_core::stay::Stay;
    ///
    /// let resolver = PriceResolver::new(
    ///     MarkupTable::new().with_markup(Role::from_tier(2), 0.10),
    /// );
    /// let stay = Stay::new(
    ///     NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
    /// );
    ///
    /// let quote = resolver
    ///     .quote(
    ///         &SupplierRate::new(200),
    ///         Role::from_tier(2),
    ///         &DiscountDescriptor::percentage_off(15.0),
    ///         &stay,
    ///         0.0,
    ///         "EUR",
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(quote.nightly_base, 220.0);
    /// assert_eq!(quote.nightly_final, 187.0);
    /// assert_eq!(quote.total_final, 561.0);
    /// assert_eq!(quote.savings_total, 99.0);
    /// ```
    pub fn quote(
        &self,
        rate: &SupplierRate,
        role: Role,
        discount: &DiscountDescriptor,
        stay: &Stay,
        extras_total: f64,
        currency: &str,
    ) -> PricingResult<StayQuote> {
        let nightly_base = self.nightly_base(rate, role)?;
        let nightly_final = apply_discount(nightly_base, discount);
        Ok(quote_stay(
            nightly_base,
            nightly_final,
            stay.nights(),
            extras_total,
            currency,
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use chrono::NaiveDate;
    use serde_json::json;

    fn resolver() -> PriceResolver {
        PriceResolver::new(
            MarkupTable::new()
                .with_markup(Role::from_tier(2), 0.10)
                .with_markup(Role::from_tier(3), 0.12),
        )
    }

    fn july_stay(nights: u32) -> Stay {
        Stay::new(
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 1 + nights).unwrap(),
        )
    }

    /// The end-to-end chain the SPA relies on: 200 marked up 10%, 15% off,
    /// three nights.
    #[test]
    fn test_full_chain_quote() {
        let quote = resolver()
            .quote(
                &SupplierRate::new(200),
                Role::from_tier(2),
                &DiscountDescriptor::percentage_off(15.0),
                &july_stay(3),
                0.0,
                "EUR",
            )
            .unwrap();

        assert_eq!(quote.nightly_base, 220.0);
        assert_eq!(quote.nightly_final, 187.0);
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.total_final, 561.0);
        assert_eq!(quote.savings_per_night, 33.0);
        assert_eq!(quote.savings_total, 99.0);
        assert_eq!(quote.currency, "EUR");
    }

    #[test]
    fn test_quote_without_discount() {
        let quote = resolver()
            .quote(
                &SupplierRate::new(150),
                Role::from_tier(3),
                &DiscountDescriptor::none(),
                &july_stay(2),
                0.0,
                "EUR",
            )
            .unwrap();

        assert_eq!(quote.nightly_base, 168.0);
        assert_eq!(quote.nightly_final, 168.0);
        assert_eq!(quote.total_final, 336.0);
        assert_eq!(quote.savings_total, 0.0);
    }

    #[test]
    fn test_special_price_quote_shows_negative_savings() {
        let quote = resolver()
            .quote(
                &SupplierRate::new(200),
                Role::from_tier(2),
                &DiscountDescriptor::special_price(250.0),
                &july_stay(2),
                0.0,
                "EUR",
            )
            .unwrap();

        assert_eq!(quote.nightly_final, 250.0);
        assert_eq!(quote.savings_per_night, -30.0);
        assert_eq!(quote.savings_total, -60.0);
    }

    #[test]
    fn test_price_user_flows_through_untouched() {
        let rate = SupplierRate::new(200).with_price_user(215.0);
        let nightly = resolver()
            .nightly_final(&rate, Role::from_tier(2), &DiscountDescriptor::none())
            .unwrap();
        assert_eq!(nightly, 215.0);
    }

    #[test]
    fn test_invalid_price_propagates() {
        let err = resolver()
            .quote(
                &SupplierRate::new(json!("abc")),
                Role::GUEST,
                &DiscountDescriptor::none(),
                &july_stay(1),
                0.0,
                "EUR",
            )
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidPrice { .. }));
    }

    #[test]
    fn test_default_resolver_prices_at_supplier_cost() {
        let resolver = PriceResolver::default();
        let nightly = resolver
            .nightly_base(&SupplierRate::new(99.5), Role::from_tier(7))
            .unwrap();
        assert_eq!(nightly, 99.5);
    }
}
