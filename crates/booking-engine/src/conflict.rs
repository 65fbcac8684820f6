//! Detect overlapping bookings for a room.
//!
//! Stays are half-open `[check_in, check_out)`. A booking that ends on the day
//! another begins is NOT a conflict, which allows same-day turnover.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Booking, DateRange, ToDay};

/// An existing booking that collides with a proposed stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetail {
    pub booking_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub overlap_nights: i64,
}

/// Three-case overlap test between a proposed stay and an existing one.
///
/// The proposed start falls inside the existing stay, the proposed end falls
/// inside it, or the proposed stay fully contains it. For well-ordered ranges
/// this is exactly `proposed.start < existing.end && existing.start < proposed.end`.
fn collides(proposed: &DateRange, existing: &DateRange) -> bool {
    let start_inside = proposed.start >= existing.start && proposed.start < existing.end;
    let end_inside = proposed.end > existing.start && proposed.end <= existing.end;
    let contains = proposed.start <= existing.start && proposed.end >= existing.end;
    start_inside || end_inside || contains
}

fn detail(booking: &Booking, proposed: &DateRange) -> ConflictDetail {
    let overlap_start = proposed.start.max(booking.check_in);
    let overlap_end = proposed.end.min(booking.check_out);
    ConflictDetail {
        booking_id: booking.id.clone(),
        room_id: booking.room_id.clone(),
        check_in: booking.check_in,
        check_out: booking.check_out,
        overlap_nights: (overlap_end - overlap_start).num_days(),
    }
}

/// Find every booking for `room_id` that overlaps `[check_in, check_out)`,
/// skipping the booking whose id is `exclude_id` (the one being moved or edited).
///
/// Results follow input order.
pub fn find_conflicts_excluding(
    bookings: &[Booking],
    room_id: &str,
    check_in: impl ToDay,
    check_out: impl ToDay,
    exclude_id: Option<&str>,
) -> Vec<ConflictDetail> {
    let proposed = DateRange {
        start: check_in.to_day(),
        end: check_out.to_day(),
    };
    debug_assert!(
        proposed.start < proposed.end,
        "overlap check requires check-in before check-out"
    );

    bookings
        .iter()
        .filter(|b| b.room_id == room_id)
        .filter(|b| exclude_id != Some(b.id.as_str()))
        .filter(|b| collides(&proposed, &b.range()))
        .map(|b| detail(b, &proposed))
        .collect()
}

/// Find every booking for `room_id` that overlaps `[check_in, check_out)`.
pub fn find_conflicts(
    bookings: &[Booking],
    room_id: &str,
    check_in: impl ToDay,
    check_out: impl ToDay,
) -> Vec<ConflictDetail> {
    find_conflicts_excluding(bookings, room_id, check_in, check_out, None)
}

/// Whether `[check_in, check_out)` overlaps any booking for `room_id`.
///
/// Bookings for other rooms are ignored. The caller must pass `check_in < check_out`;
/// run the request through [`crate::validate_booking_request`] first.
pub fn has_overlap(
    bookings: &[Booking],
    room_id: &str,
    check_in: impl ToDay,
    check_out: impl ToDay,
) -> bool {
    !find_conflicts(bookings, room_id, check_in, check_out).is_empty()
}

/// Same as [`has_overlap`], ignoring the booking with id `exclude_id`.
pub fn has_overlap_excluding(
    bookings: &[Booking],
    room_id: &str,
    check_in: impl ToDay,
    check_out: impl ToDay,
    exclude_id: &str,
) -> bool {
    !find_conflicts_excluding(bookings, room_id, check_in, check_out, Some(exclude_id)).is_empty()
}
