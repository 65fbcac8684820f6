//! The single gate every booking request passes through.
//!
//! Rejections are returned as data so a presentation layer can render them
//! without error handling. The checks run in a fixed order and the first
//! failure wins: date order, then past date, then conflicts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::{find_conflicts_excluding, ConflictDetail};
use crate::model::{Booking, ToDay};

/// Why a request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionKind {
    /// Check-out is not strictly after check-in.
    InvalidRange,
    /// Check-in is earlier than the reference day.
    PastDate,
    /// The stay overlaps an existing booking for the same room.
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub kind: RejectionKind,
    /// Offending bookings; empty unless `kind` is `Conflict`.
    pub conflicts: Vec<ConflictDetail>,
}

/// Outcome of a booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Decision {
    Accepted,
    Rejected(Rejection),
}

impl Decision {
    pub(crate) fn reject(kind: RejectionKind) -> Self {
        Decision::Rejected(Rejection {
            kind,
            conflicts: Vec::new(),
        })
    }

    pub(crate) fn conflict(conflicts: Vec<ConflictDetail>) -> Self {
        Decision::Rejected(Rejection {
            kind: RejectionKind::Conflict,
            conflicts,
        })
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }

    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            Decision::Accepted => None,
            Decision::Rejected(r) => Some(r.kind),
        }
    }

    pub fn conflicts(&self) -> &[ConflictDetail] {
        match self {
            Decision::Accepted => &[],
            Decision::Rejected(r) => &r.conflicts,
        }
    }
}

/// Decide whether `room_id` can be booked for `[check_in, check_out)`.
///
/// 1. `check_in >= check_out` → `InvalidRange`
/// 2. `check_in < today` → `PastDate` (only check-in is inspected; today is bookable)
/// 3. overlap with a booking for the same room → `Conflict`, listing every offender
/// 4. otherwise `Accepted`
pub fn validate_booking_request(
    bookings: &[Booking],
    room_id: &str,
    check_in: impl ToDay,
    check_out: impl ToDay,
    today: impl ToDay,
) -> Decision {
    validate_excluding(bookings, room_id, check_in, check_out, today, None)
}

/// [`validate_booking_request`] ignoring one existing booking, for edits.
pub(crate) fn validate_excluding(
    bookings: &[Booking],
    room_id: &str,
    check_in: impl ToDay,
    check_out: impl ToDay,
    today: impl ToDay,
    exclude_id: Option<&str>,
) -> Decision {
    let (check_in, check_out, today) = (check_in.to_day(), check_out.to_day(), today.to_day());

    if check_in >= check_out {
        debug!(room_id, %check_in, %check_out, "rejected: invalid range");
        return Decision::reject(RejectionKind::InvalidRange);
    }
    if check_in < today {
        debug!(room_id, %check_in, %today, "rejected: check-in in the past");
        return Decision::reject(RejectionKind::PastDate);
    }

    let conflicts = find_conflicts_excluding(bookings, room_id, check_in, check_out, exclude_id);
    if !conflicts.is_empty() {
        debug!(
            room_id,
            %check_in,
            %check_out,
            conflicts = conflicts.len(),
            "rejected: overlaps existing booking"
        );
        return Decision::conflict(conflicts);
    }

    Decision::Accepted
}
