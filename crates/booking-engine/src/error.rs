//! Error types for booking-engine operations.
//!
//! User-facing rejections (bad range, past date, conflict) are not errors; they
//! are returned as [`crate::Decision`] values. These variants cover caller bugs
//! and malformed input at the crate boundary.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Unknown booking: {0}")]
    UnknownBooking(String),

    #[error("Invalid date range: check-in {check_in} is not before check-out {check_out}")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Booking JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Price overflow: {nights} nights at {nightly_price} per night")]
    PriceOverflow { nights: i64, nightly_price: u64 },
}

pub type Result<T> = std::result::Result<T, BookingError>;
