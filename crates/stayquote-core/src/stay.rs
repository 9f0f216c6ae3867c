//! # Stays
//!
//! The requested stay window. Nights drive every total in a quote, so the
//! one normalization rule lives here: a stay is never shorter than one
//! night, whatever dates the caller managed to send.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Stay
// =============================================================================

/// A requested stay: check-in and check-out dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Stay {
    /// Arrival date.
    #[ts(as = "String")]
    pub check_in: NaiveDate,

    /// Departure date (the night before is the last night charged).
    #[ts(as = "String")]
    pub check_out: NaiveDate,
}

impl Stay {
    /// Creates a stay from arrival and departure dates.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Stay {
            check_in,
            check_out,
        }
    }

    /// Number of chargeable nights, never less than 1.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use stayquote_core::stay::Stay;
    ///
    /// let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    ///
    /// assert_eq!(Stay::new(d("2026-07-01"), d("2026-07-04")).nights(), 3);
    ///
    /// // same-day and inverted ranges floor to one night
    /// assert_eq!(Stay::new(d("2026-07-01"), d("2026-07-01")).nights(), 1);
    /// assert_eq!(Stay::new(d("2026-07-04"), d("2026-07-01")).nights(), 1);
    /// ```
    ///
    /// ## Why Floor Instead Of Error?
    /// Date pickers occasionally submit equal or swapped dates mid-edit.
    /// Charging one night keeps the quote pipeline total; the booking API
    /// rejects bad ranges separately before confirmation.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(1)
    }

    /// The last charged night of the stay.
    ///
    /// Used by rate-window resolution: a seasonal window applies only when
    /// it covers every night from `check_in` through this date.
    pub fn last_night(&self) -> NaiveDate {
        self.check_in + Duration::days(self.nights() - 1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
