//! # Markup Table
//!
//! Role-keyed markup configuration applied on top of supplier rates.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Markup Table Priority                                │
//! │                                                                         │
//! │  1. Environment Variable (highest priority)                            │
//! │     STAYQUOTE_MARKUP_TABLE='{"1":0.0,"2":0.08,"3":0.12}'               │
//! │                                                                         │
//! │  2. JSON document handed over by the booking API                       │
//! │     (the deployment bundle ships markup.json, the API calls            │
//! │      MarkupTable::from_json_str at startup)                            │
//! │                                                                         │
//! │  3. Default: empty table                                               │
//! │     Every role prices with +0% markup until configured                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is loaded once at process start and shared read-only; request
//! handling never mutates it.
//!
//! ## Document Format
//! ```json
//! { "1": 0.0, "2": 0.08, "3": 0.12 }
//! ```
//! Keys are role tiers, values are fractional markups (0.12 = +12%).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::role::Role;
use crate::validation::{validate_markup_fraction, validate_role_tier, ValidationResult};

/// Environment variable holding an inline markup table JSON document.
pub const MARKUP_TABLE_ENV: &str = "STAYQUOTE_MARKUP_TABLE";

// =============================================================================
// Markup Table
// =============================================================================

/// Role tier → fractional markup.
///
/// ## Lookup Rule
/// A missing tier means markup `0.0`, never an error. New partner tiers can
/// therefore go live before the table catches up, pricing at supplier cost.
///
/// ## Example
/// ```rust
/// use stayquote_core::markup::MarkupTable;
/// use stayquote_core::role::Role;
///
/// let table = MarkupTable::new()
///     .with_markup(Role::from_tier(2), 0.08)
///     .with_markup(Role::from_tier(3), 0.12);
///
/// assert_eq!(table.fraction_for(Role::from_tier(3)), 0.12);
/// assert_eq!(table.fraction_for(Role::from_tier(99)), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkupTable {
    entries: HashMap<u32, f64>,
}

impl MarkupTable {
    /// Creates an empty table (all roles price at +0%).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the markup fraction for a role (builder style).
    pub fn with_markup(mut self, role: Role, fraction: f64) -> Self {
        self.entries.insert(role.tier(), fraction);
        self
    }

    /// Returns the markup fraction for a role, `0.0` when unconfigured.
    #[inline]
    pub fn fraction_for(&self, role: Role) -> f64 {
        self.entries.get(&role.tier()).copied().unwrap_or(0.0)
    }

    /// Number of configured tiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether any tier is configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses and validates a table from a JSON document.
    ///
    /// ## Example
    /// ```rust
    /// use stayquote_core::markup::MarkupTable;
    /// use stayquote_core::role::Role;
    ///
    /// let table = MarkupTable::from_json_str(r#"{"2":0.08,"3":0.12}"#).unwrap();
    /// assert_eq!(table.fraction_for(Role::from_tier(2)), 0.08);
    /// ```
    pub fn from_json_str(raw: &str) -> ValidationResult<Self> {
        let table: MarkupTable =
            serde_json::from_str(raw).map_err(|e| ValidationError::InvalidFormat {
                field: "markup table".to_string(),
                reason: e.to_string(),
            })?;
        table.validate()?;
        Ok(table)
    }

    /// Loads the table from the environment, or returns the default.
    ///
    /// ## Load Order
    /// 1. `STAYQUOTE_MARKUP_TABLE` (inline JSON)
    /// 2. Empty table
    ///
    /// A malformed document is logged and ignored rather than failing the
    /// process; pricing then runs at +0% until the config is fixed.
    pub fn from_env() -> Self {
        match std::env::var(MARKUP_TABLE_ENV) {
            Ok(raw) => match Self::from_json_str(&raw) {
                Ok(table) => {
                    info!(tiers = table.len(), "Loaded markup table from environment");
                    table
                }
                Err(e) => {
                    warn!(error = %e, "Invalid markup table in environment, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No markup table in environment, using defaults");
                Self::default()
            }
        }
    }

    /// Validates every configured entry.
    ///
    /// ## Rules
    /// - tiers start at 1 (tier 0 is not a role)
    /// - fractions must be finite and within 0..=10 (+0% to +1000%)
    pub fn validate(&self) -> ValidationResult<()> {
        for (&tier, &fraction) in &self.entries {
            validate_role_tier(tier)?;
            validate_markup_fraction(fraction)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
