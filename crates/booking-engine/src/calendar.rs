//! Calendar views derived from a flat booking list.
//!
//! Occupied intervals for a room are merged (sorted, then joined where they
//! overlap or touch) before gaps are computed, the same way busy periods are
//! merged for free/busy lookups.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::model::{Booking, DateRange};
use crate::occupancy::bookings_for_date;

/// One day cell of a month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Column in a Sunday-first week, 0 (Sunday) through 6 (Saturday).
    pub weekday: u32,
    /// Ids of the bookings occupying this day, in input order.
    pub booking_ids: Vec<String>,
}

impl CalendarDay {
    pub fn is_occupied(&self) -> bool {
        !self.booking_ids.is_empty()
    }
}

/// Every day of one month with the bookings that occupy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first grid.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// A run of consecutive unoccupied nights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nights: i64,
}

/// Build the month view for `year`-`month`, optionally for a single room.
pub fn month_view(
    bookings: &[Booking],
    year: i32,
    month: u32,
    room_filter: Option<&str>,
) -> Result<MonthView> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(BookingError::InvalidMonth { year, month })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(BookingError::InvalidMonth { year, month })?;

    let days = DateRange {
        start: first,
        end: next_first,
    }
    .days()
    .map(|date| CalendarDay {
        date,
        weekday: date.weekday().num_days_from_sunday(),
        booking_ids: bookings_for_date(bookings, date, room_filter)
            .into_iter()
            .map(|b| b.id.clone())
            .collect(),
    })
    .collect();

    Ok(MonthView {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Sorted, non-overlapping occupied intervals for `room_id`, clipped to `window`.
fn merge_occupied(bookings: &[Booking], room_id: &str, window: DateRange) -> Vec<DateRange> {
    let mut intervals: Vec<DateRange> = bookings
        .iter()
        .filter(|b| b.room_id == room_id)
        .map(Booking::range)
        .filter(|r| r.overlaps(&window))
        .map(|r| DateRange {
            start: r.start.max(window.start),
            end: r.end.min(window.end),
        })
        .collect();

    intervals.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<DateRange> = Vec::new();
    for r in intervals {
        if let Some(last) = merged.last_mut() {
            if r.start <= last.end {
                last.end = last.end.max(r.end);
                continue;
            }
        }
        merged.push(r);
    }
    merged
}

/// Every occupied day of `room_id` inside `window`.
pub fn occupied_dates(bookings: &[Booking], room_id: &str, window: DateRange) -> BTreeSet<NaiveDate> {
    merge_occupied(bookings, room_id, window)
        .iter()
        .flat_map(DateRange::days)
        .collect()
}

/// Free runs of nights for `room_id` inside `window`, sorted by start.
pub fn find_free_ranges(bookings: &[Booking], room_id: &str, window: DateRange) -> Vec<FreeRange> {
    let mut free = Vec::new();
    let mut cursor = window.start;

    for busy in merge_occupied(bookings, room_id, window) {
        if cursor < busy.start {
            free.push(FreeRange {
                start: cursor,
                end: busy.start,
                nights: (busy.start - cursor).num_days(),
            });
        }
        cursor = cursor.max(busy.end);
    }

    if cursor < window.end {
        free.push(FreeRange {
            start: cursor,
            end: window.end,
            nights: (window.end - cursor).num_days(),
        });
    }

    free
}

/// The earliest free run inside `window` that is at least `min_nights` long.
pub fn find_first_free_range(
    bookings: &[Booking],
    room_id: &str,
    window: DateRange,
    min_nights: i64,
) -> Option<FreeRange> {
    find_free_ranges(bookings, room_id, window)
        .into_iter()
        .find(|r| r.nights >= min_nights)
}
