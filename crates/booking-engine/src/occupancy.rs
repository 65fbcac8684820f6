//! Per-day occupancy queries used to render calendar cells.

use tracing::trace;

use crate::model::{Booking, ToDay};

/// Whether `room_id` is occupied on `date`.
///
/// A day is occupied when some booking for the room has
/// `check_in <= date < check_out`. The check-out day itself is free.
pub fn is_date_occupied(bookings: &[Booking], room_id: &str, date: impl ToDay) -> bool {
    let day = date.to_day();
    let occupied = bookings
        .iter()
        .any(|b| b.room_id == room_id && b.range().contains(day));
    trace!(room_id, %day, occupied, "occupancy query");
    occupied
}

/// Bookings occupying `date`, optionally restricted to one room.
///
/// Preserves input order. A room filter that matches nothing yields an empty list.
pub fn bookings_for_date<'a>(
    bookings: &'a [Booking],
    date: impl ToDay,
    room_filter: Option<&str>,
) -> Vec<&'a Booking> {
    let day = date.to_day();
    bookings
        .iter()
        .filter(|b| room_filter.is_none_or(|room| b.room_id == room))
        .filter(|b| b.range().contains(day))
        .collect()
}
