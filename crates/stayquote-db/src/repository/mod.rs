//! # Repository Layer
//!
//! Data access grouped by aggregate, one repository per aggregate root:
//!
//! - [`hotel::HotelRepository`] - partner hotel search and CRUD
//! - [`rate::RateRepository`] - rooms, seasonal rate windows, and the
//!   window-vs-base resolution that prices a stay
//!
//! Repositories are handed out by [`Database`](crate::pool::Database) and
//! hold their own clone of the pool, so a handler can grab one, run a few
//! queries, and drop it. All SQL lives here; callers see typed rows from
//! `stayquote_core` and [`DbError`](crate::error::DbError), never raw sqlx.

pub mod hotel;
pub mod rate;
