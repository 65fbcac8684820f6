//! # booking-engine
//!
//! Deterministic booking-conflict and calendar availability rules for room
//! reservations.
//!
//! The engine owns no state. Callers pass in the booking list and the reference
//! day ("today"); the engine answers whether a room is free, explains why a
//! request is rejected, and derives the per-day views a booking calendar needs.
//! All stays are half-open `[check_in, check_out)` at day granularity, so a
//! guest can check in on the day the previous guest checks out.
//!
//! ## Modules
//!
//! - [`model`] — `Room`, `Booking`, `DateRange`, day normalization
//! - [`occupancy`] — Single-day occupancy queries
//! - [`conflict`] — Overlap detection against existing bookings
//! - [`validate`] — The ordered accept/reject gate for new stays
//! - [`schedule`] — Create, reschedule, edit, and cancel on a caller-owned list
//! - [`calendar`] — Month grids, occupied-date sets, free ranges
//! - [`quote`] — Stay pricing and confirmation numbers
//! - [`error`] — Error types

pub mod calendar;
pub mod conflict;
pub mod error;
pub mod model;
pub mod occupancy;
pub mod quote;
pub mod schedule;
pub mod validate;

pub use calendar::{find_first_free_range, find_free_ranges, month_view, occupied_dates};
pub use conflict::{find_conflicts, has_overlap, has_overlap_excluding, ConflictDetail};
pub use error::BookingError;
pub use model::{Booking, BookingEdit, BookingRequest, DateRange, Room, ToDay};
pub use occupancy::{bookings_for_date, is_date_occupied};
pub use schedule::{cancel_booking, create_booking, reschedule_booking, update_booking};
pub use validate::{validate_booking_request, Decision, Rejection, RejectionKind};
