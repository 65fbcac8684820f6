//! Stay pricing and confirmation numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::model::{Room, ToDay};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayQuote {
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub nightly_price: u64,
    pub total_price: u64,
}

/// Whole nights between check-in and check-out. Negative when the range is reversed.
pub fn nights(check_in: impl ToDay, check_out: impl ToDay) -> i64 {
    (check_out.to_day() - check_in.to_day()).num_days()
}

/// Price a stay in `room` at its nightly rate.
pub fn quote_stay(room: &Room, check_in: impl ToDay, check_out: impl ToDay) -> Result<StayQuote> {
    let (check_in, check_out) = (check_in.to_day(), check_out.to_day());
    let n = nights(check_in, check_out);
    if n <= 0 {
        return Err(BookingError::InvalidRange {
            check_in,
            check_out,
        });
    }
    let total_price = room
        .price
        .checked_mul(n as u64)
        .ok_or(BookingError::PriceOverflow {
            nights: n,
            nightly_price: room.price,
        })?;

    Ok(StayQuote {
        room_id: room.id.clone(),
        check_in,
        check_out,
        nights: n,
        nightly_price: room.price,
        total_price,
    })
}

/// Confirmation number of the form `GG-YYYYMMDD-NNNN`.
///
/// Only the last four decimal digits of `serial` are used.
pub fn booking_number(issued_on: impl ToDay, serial: u32) -> String {
    format!(
        "GG-{}-{:04}",
        issued_on.to_day().format("%Y%m%d"),
        serial % 10_000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(price: u64) -> Room {
        Room {
            id: "101".to_string(),
            name: "Ocean Suite".to_string(),
            capacity: 2,
            price,
            amenities: vec![],
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn quote_multiplies_nightly_price() {
        let q = quote_stay(&room(120_000), d(2026, 2, 1), d(2026, 2, 4)).unwrap();
        assert_eq!(q.nights, 3);
        assert_eq!(q.total_price, 360_000);
    }

    #[test]
    fn quote_spans_month_boundary() {
        let q = quote_stay(&room(100), d(2026, 1, 30), d(2026, 2, 2)).unwrap();
        assert_eq!(q.nights, 3);
    }

    #[test]
    fn quote_rejects_empty_stay() {
        let err = quote_stay(&room(100), d(2026, 2, 1), d(2026, 2, 1)).unwrap_err();
        assert!(matches!(err, BookingError::InvalidRange { .. }));
    }

    #[test]
    fn quote_reports_overflow() {
        let err = quote_stay(&room(u64::MAX), d(2026, 2, 1), d(2026, 2, 3)).unwrap_err();
        assert!(matches!(err, BookingError::PriceOverflow { nights: 2, .. }));
    }

    #[test]
    fn booking_number_is_zero_padded() {
        assert_eq!(booking_number(d(2026, 1, 30), 42), "GG-20260130-0042");
        assert_eq!(booking_number(d(2026, 1, 30), 123_456), "GG-20260130-3456");
    }
}
