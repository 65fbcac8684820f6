//! Property-based tests for booking invariants using proptest.
//!
//! These hold for *any* sequence of requests, not just the hand-picked
//! examples in the other test files.

use booking_engine::{
    bookings_for_date, create_booking, has_overlap, is_date_occupied, reschedule_booking,
    validate_booking_request, Booking, BookingRequest, RejectionKind,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn arb_room() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("101".to_string()),
        Just("102".to_string()),
        Just("201".to_string()),
    ]
}

/// A stay of 1-7 nights starting within the first 60 days of 2026.
fn arb_stay() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0i64..60, 1i64..=7).prop_map(|(offset, nights)| {
        let check_in = base() + Duration::days(offset);
        (check_in, check_in + Duration::days(nights))
    })
}

fn arb_request() -> impl Strategy<Value = BookingRequest> {
    (arb_room(), arb_stay()).prop_map(|(room_id, (check_in, check_out))| BookingRequest {
        room_id,
        room_name: String::new(),
        check_in,
        check_out,
        guest_name: "Guest".to_string(),
        contact: String::new(),
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

/// Accept whatever passes the gate, in order.
fn accept_all(requests: Vec<BookingRequest>) -> Vec<Booking> {
    let mut bookings = Vec::new();
    for (i, request) in requests.into_iter().enumerate() {
        create_booking(&mut bookings, request, format!("b{}", i), base());
    }
    bookings
}

fn pairwise_disjoint(bookings: &[Booking]) -> bool {
    bookings.iter().enumerate().all(|(i, a)| {
        bookings[i + 1..]
            .iter()
            .filter(|b| b.room_id == a.room_id)
            .all(|b| !a.range().overlaps(&b.range()))
    })
}

// ---------------------------------------------------------------------------
// Property 1: accepted bookings never overlap within a room
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn accepted_bookings_never_overlap(requests in prop::collection::vec(arb_request(), 0..40)) {
        let bookings = accept_all(requests);

        prop_assert!(pairwise_disjoint(&bookings));
        for (i, b) in bookings.iter().enumerate() {
            let others: Vec<Booking> = bookings
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, o)| o.clone())
                .collect();
            prop_assert!(!has_overlap(&others, &b.room_id, b.check_in, b.check_out));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: reschedules keep the invariant and the stay length
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn reschedule_keeps_invariant(
        requests in prop::collection::vec(arb_request(), 1..30),
        pick in any::<prop::sample::Index>(),
        shift in -10i64..30,
    ) {
        let mut bookings = accept_all(requests);
        prop_assume!(!bookings.is_empty());

        let idx = pick.index(bookings.len());
        let id = bookings[idx].id.clone();
        let nights = bookings[idx].nights();
        let before = bookings.clone();
        let target = bookings[idx].check_in + Duration::days(shift);

        let decision = reschedule_booking(&mut bookings, &id, target).unwrap();

        if decision.is_accepted() {
            prop_assert_eq!(bookings[idx].check_in, target);
            prop_assert_eq!(bookings[idx].nights(), nights);
        } else {
            prop_assert_eq!(&bookings, &before);
        }
        prop_assert!(pairwise_disjoint(&bookings));
    }
}

// ---------------------------------------------------------------------------
// Property 3: queries are pure
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn queries_are_deterministic(
        requests in prop::collection::vec(arb_request(), 0..20),
        room in arb_room(),
        offset in 0i64..70,
    ) {
        let bookings = accept_all(requests);
        let day = base() + Duration::days(offset);

        prop_assert_eq!(
            is_date_occupied(&bookings, &room, day),
            is_date_occupied(&bookings, &room, day)
        );
        prop_assert_eq!(
            bookings_for_date(&bookings, day, Some(room.as_str())),
            bookings_for_date(&bookings, day, Some(room.as_str()))
        );
        prop_assert_eq!(
            is_date_occupied(&bookings, &room, day),
            !bookings_for_date(&bookings, day, Some(room.as_str())).is_empty()
        );
    }
}

// ---------------------------------------------------------------------------
// Property 4: a reversed range is always InvalidRange
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn reversed_range_always_invalid(
        requests in prop::collection::vec(arb_request(), 0..20),
        (check_out, check_in) in arb_stay(),
        today_offset in -400i64..400,
    ) {
        let bookings = accept_all(requests);
        let today = base() + Duration::days(today_offset);

        let decision = validate_booking_request(&bookings, "101", check_in, check_out, today);

        prop_assert_eq!(decision.rejection_kind(), Some(RejectionKind::InvalidRange));
    }
}

// ---------------------------------------------------------------------------
// Property 5: occupancy agrees with overlap on single nights
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn single_night_overlap_matches_occupancy(
        requests in prop::collection::vec(arb_request(), 0..20),
        room in arb_room(),
        offset in 0i64..70,
    ) {
        let bookings = accept_all(requests);
        let day = base() + Duration::days(offset);

        prop_assert_eq!(
            has_overlap(&bookings, &room, day, day + Duration::days(1)),
            is_date_occupied(&bookings, &room, day)
        );
    }
}
