//! Commit helpers that mutate a caller-owned booking list.
//!
//! Each helper validates first and only touches the list on acceptance, so a
//! rejection never leaves a partial change behind.

use chrono::Duration;
use tracing::{debug, info};

use crate::conflict::find_conflicts_excluding;
use crate::error::{BookingError, Result};
use crate::model::{Booking, BookingEdit, BookingRequest, ToDay};
use crate::validate::{validate_booking_request, validate_excluding, Decision};

fn position(bookings: &[Booking], booking_id: &str) -> Result<usize> {
    bookings
        .iter()
        .position(|b| b.id == booking_id)
        .ok_or_else(|| BookingError::UnknownBooking(booking_id.to_string()))
}

/// Validate `request` and append it under `id` when accepted.
pub fn create_booking(
    bookings: &mut Vec<Booking>,
    request: BookingRequest,
    id: impl Into<String>,
    today: impl ToDay,
) -> Decision {
    let decision = validate_booking_request(
        bookings,
        &request.room_id,
        request.check_in,
        request.check_out,
        today,
    );
    if decision.is_accepted() {
        let booking = request.into_booking(id);
        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            check_in = %booking.check_in,
            check_out = %booking.check_out,
            "booking created"
        );
        bookings.push(booking);
    }
    decision
}

/// Move a booking so it starts on `new_check_in`, keeping its length in nights.
///
/// The shifted stay is checked against every other booking for the same room.
/// On conflict the list is left untouched. Moving to the current check-in day
/// is accepted without change.
pub fn reschedule_booking(
    bookings: &mut [Booking],
    booking_id: &str,
    new_check_in: impl ToDay,
) -> Result<Decision> {
    let idx = position(bookings, booking_id)?;
    let current = &bookings[idx];
    let new_check_in = new_check_in.to_day();

    if new_check_in == current.check_in {
        return Ok(Decision::Accepted);
    }

    let nights = current.nights();
    if nights <= 0 {
        return Err(BookingError::InvalidRange {
            check_in: current.check_in,
            check_out: current.check_out,
        });
    }
    let new_check_out = new_check_in
        .checked_add_signed(Duration::days(nights))
        .ok_or_else(|| BookingError::InvalidDate(format!("{} + {} nights", new_check_in, nights)))?;

    let conflicts = find_conflicts_excluding(
        bookings,
        &current.room_id,
        new_check_in,
        new_check_out,
        Some(booking_id),
    );
    if !conflicts.is_empty() {
        debug!(
            booking_id,
            %new_check_in,
            %new_check_out,
            conflicts = conflicts.len(),
            "reschedule rejected"
        );
        return Ok(Decision::conflict(conflicts));
    }

    let booking = &mut bookings[idx];
    booking.check_in = new_check_in;
    booking.check_out = new_check_out;
    info!(booking_id, %new_check_in, %new_check_out, "booking rescheduled");
    Ok(Decision::Accepted)
}

/// Apply guest and date changes to a booking after re-running the full gate.
///
/// The booking being edited is excluded from the conflict check. The past-date
/// rule only applies when the check-in day moves, so a stay already in
/// progress can still have its guest details or check-out changed.
pub fn update_booking(
    bookings: &mut [Booking],
    booking_id: &str,
    edit: BookingEdit,
    today: impl ToDay,
) -> Result<Decision> {
    let idx = position(bookings, booking_id)?;
    let mut today = today.to_day();
    if edit.check_in == bookings[idx].check_in {
        today = today.min(edit.check_in);
    }
    let decision = validate_excluding(
        bookings,
        &bookings[idx].room_id,
        edit.check_in,
        edit.check_out,
        today,
        Some(booking_id),
    );
    if decision.is_accepted() {
        let booking = &mut bookings[idx];
        booking.guest_name = edit.guest_name;
        booking.contact = edit.contact;
        booking.check_in = edit.check_in;
        booking.check_out = edit.check_out;
        info!(booking_id, "booking updated");
    }
    Ok(decision)
}

/// Remove a booking and hand it back.
pub fn cancel_booking(bookings: &mut Vec<Booking>, booking_id: &str) -> Result<Booking> {
    let idx = position(bookings, booking_id)?;
    let removed = bookings.remove(idx);
    info!(booking_id, room_id = %removed.room_id, "booking cancelled");
    Ok(removed)
}
