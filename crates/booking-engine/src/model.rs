//! Rooms, bookings, and day-granularity date handling.
//!
//! Every comparison in this crate happens on calendar days. Inputs that carry a
//! time of day are truncated to their date through [`ToDay`], so a check-in
//! recorded at 15:00 and a query at 09:00 on the same day see the same day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, Result};

/// Conversion of a date or timestamp to the calendar day it falls on.
pub trait ToDay {
    fn to_day(&self) -> NaiveDate;
}

impl ToDay for NaiveDate {
    fn to_day(&self) -> NaiveDate {
        *self
    }
}

impl ToDay for NaiveDateTime {
    fn to_day(&self) -> NaiveDate {
        self.date()
    }
}

/// Uses the wall-clock date in the timestamp's own zone.
impl<Tz: TimeZone> ToDay for DateTime<Tz> {
    fn to_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Parse a date string into a calendar day.
///
/// Accepts a plain date (`2026-02-01`), RFC 3339 (`2026-02-01T15:00:00+09:00`),
/// or a naive ISO 8601 datetime (`2026-02-01T15:00:00`). Any time component is
/// discarded.
pub fn parse_day(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.to_day());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ndt| ndt.to_day())
        .map_err(|e| BookingError::InvalidDate(format!("'{}': {}", s, e)))
}

fn deserialize_day<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).map_err(serde::de::Error::custom)
}

/// A half-open range of days `[start, end)`.
///
/// Deserialization goes through [`DateRange::new`], so an empty or reversed
/// range is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct RawRange {
    #[serde(deserialize_with = "deserialize_day")]
    start: NaiveDate,
    #[serde(deserialize_with = "deserialize_day")]
    end: NaiveDate,
}

impl TryFrom<RawRange> for DateRange {
    type Error = BookingError;

    fn try_from(raw: RawRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range, truncating both bounds to their day.
    ///
    /// Returns [`BookingError::InvalidRange`] unless `start < end`.
    pub fn new(start: impl ToDay, end: impl ToDay) -> Result<Self> {
        let (start, end) = (start.to_day(), end.to_day());
        if start >= end {
            return Err(BookingError::InvalidRange {
                check_in: start,
                check_out: end,
            });
        }
        Ok(Self { start, end })
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    /// Half-open overlap. Ranges that merely touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Iterate over every night in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }
}

/// A bookable unit from the room catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
    /// Nightly price in minor currency units.
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// A reservation of one room for the half-open interval `[check_in, check_out)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    #[serde(default)]
    pub room_name: String,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_in: NaiveDate,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_out: NaiveDate,
    #[serde(default)]
    pub guest_name: String,
    #[serde(default)]
    pub contact: String,
}

impl Booking {
    /// A fresh, globally unique booking id.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// The stay as a [`DateRange`]. Not validated; stored bookings are assumed well-formed.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.check_in,
            end: self.check_out,
        }
    }

    pub fn nights(&self) -> i64 {
        self.range().nights()
    }
}

/// A proposed booking, before it has been accepted and given an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: String,
    #[serde(default)]
    pub room_name: String,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_in: NaiveDate,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_out: NaiveDate,
    #[serde(default)]
    pub guest_name: String,
    #[serde(default)]
    pub contact: String,
}

impl BookingRequest {
    pub fn for_room(room: &Room, check_in: impl ToDay, check_out: impl ToDay) -> Self {
        Self {
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            check_in: check_in.to_day(),
            check_out: check_out.to_day(),
            guest_name: String::new(),
            contact: String::new(),
        }
    }

    pub fn guest(mut self, guest_name: impl Into<String>, contact: impl Into<String>) -> Self {
        self.guest_name = guest_name.into();
        self.contact = contact.into();
        self
    }

    pub fn into_booking(self, id: impl Into<String>) -> Booking {
        Booking {
            id: id.into(),
            room_id: self.room_id,
            room_name: self.room_name,
            check_in: self.check_in,
            check_out: self.check_out,
            guest_name: self.guest_name,
            contact: self.contact,
        }
    }
}

/// Changes applied by the edit flow. Dates are re-validated before they land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEdit {
    pub guest_name: String,
    pub contact: String,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_in: NaiveDate,
    #[serde(deserialize_with = "deserialize_day")]
    pub check_out: NaiveDate,
}

/// Parse a JSON array of bookings.
///
/// Every booking must cover at least one night. The first one whose check-in
/// is not before its check-out fails the whole parse with
/// [`BookingError::InvalidRange`].
pub fn parse_bookings_json(json: &str) -> Result<Vec<Booking>> {
    let bookings: Vec<Booking> = serde_json::from_str(json)?;
    if let Some(bad) = bookings.iter().find(|b| b.check_in >= b.check_out) {
        return Err(BookingError::InvalidRange {
            check_in: bad.check_in,
            check_out: bad.check_out,
        });
    }
    Ok(bookings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_day_accepts_plain_and_timestamped_dates() {
        assert_eq!(parse_day("2026-02-01").unwrap(), d(2026, 2, 1));
        assert_eq!(parse_day("2026-02-01T23:59:59").unwrap(), d(2026, 2, 1));
        assert_eq!(parse_day("2026-02-01T15:00:00.250").unwrap(), d(2026, 2, 1));
        assert_eq!(
            parse_day("2026-02-01T15:00:00+09:00").unwrap(),
            d(2026, 2, 1)
        );
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(matches!(
            parse_day("next tuesday"),
            Err(BookingError::InvalidDate(_))
        ));
    }

    #[test]
    fn to_day_uses_local_wall_date() {
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let late = seoul.with_ymd_and_hms(2026, 2, 1, 23, 30, 0).unwrap();
        assert_eq!(late.to_day(), d(2026, 2, 1));
        assert_eq!(late.with_timezone(&Utc).to_day(), d(2026, 2, 1));
    }

    #[test]
    fn date_range_requires_at_least_one_night() {
        assert!(DateRange::new(d(2026, 2, 1), d(2026, 2, 1)).is_err());
        assert!(DateRange::new(d(2026, 2, 2), d(2026, 2, 1)).is_err());
        let r = DateRange::new(d(2026, 2, 1), d(2026, 2, 3)).unwrap();
        assert_eq!(r.nights(), 2);
        assert_eq!(r.days().collect::<Vec<_>>(), vec![d(2026, 2, 1), d(2026, 2, 2)]);
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let a = DateRange::new(d(2026, 2, 1), d(2026, 2, 10)).unwrap();
        let b = DateRange::new(d(2026, 2, 10), d(2026, 2, 12)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(!a.contains(d(2026, 2, 10)));
    }

    #[test]
    fn booking_json_uses_camel_case_and_truncates_times() {
        let json = r#"[{
            "id": "b1",
            "roomId": "101",
            "checkIn": "2026-02-01T15:00:00",
            "checkOut": "2026-02-03T11:00:00+09:00",
            "guestName": "Kim"
        }]"#;
        let bookings = parse_bookings_json(json).unwrap();
        assert_eq!(bookings[0].check_in, d(2026, 2, 1));
        assert_eq!(bookings[0].check_out, d(2026, 2, 3));
        assert_eq!(bookings[0].contact, "");

        let out = serde_json::to_value(&bookings[0]).unwrap();
        assert_eq!(out["checkIn"], "2026-02-01");
        assert_eq!(out["roomId"], "101");
    }

    #[test]
    fn booking_json_with_reversed_or_empty_stay_is_rejected() {
        let reversed = r#"[{"id":"bad","roomId":"101","checkIn":"2026-02-05","checkOut":"2026-02-03"}]"#;
        assert!(matches!(
            parse_bookings_json(reversed),
            Err(BookingError::InvalidRange { check_in, check_out })
                if check_in == d(2026, 2, 5) && check_out == d(2026, 2, 3)
        ));

        let zero_nights = r#"[
            {"id":"ok","roomId":"101","checkIn":"2026-02-01","checkOut":"2026-02-02"},
            {"id":"empty","roomId":"101","checkIn":"2026-02-04T09:00:00","checkOut":"2026-02-04T18:00:00"}
        ]"#;
        assert!(matches!(
            parse_bookings_json(zero_nights),
            Err(BookingError::InvalidRange { .. })
        ));
    }

    #[test]
    fn date_range_json_goes_through_new() {
        let r: DateRange =
            serde_json::from_str(r#"{"start":"2026-02-01T10:00:00","end":"2026-02-03"}"#).unwrap();
        assert_eq!(r, DateRange::new(d(2026, 2, 1), d(2026, 2, 3)).unwrap());

        let err = serde_json::from_str::<DateRange>(r#"{"start":"2026-02-03","end":"2026-02-03"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid date range"));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(Booking::generate_id(), Booking::generate_id());
    }
}
