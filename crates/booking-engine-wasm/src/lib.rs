//! WASM bindings for booking-engine.
//!
//! Exposes availability checks, conflict detection, rescheduling, and calendar
//! views to the browser front end via `wasm-bindgen`. Bookings and results cross
//! the boundary as JSON strings using the same camelCase shape as the engine's
//! serde types, so every booking decision in the UI goes through one gate.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/booking-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```
//!
//! The `*_json` functions carry the logic and return `String` errors so they can
//! be exercised natively; the `#[wasm_bindgen]` exports only map errors to `JsValue`.

use booking_engine::model::{parse_bookings_json, parse_day};
use booking_engine::{Booking, DateRange, Decision, Room};
use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RescheduleDto<'a> {
    decision: &'a Decision,
    bookings: &'a [Booking],
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type BridgeResult<T> = Result<T, String>;

fn day(s: &str) -> BridgeResult<NaiveDate> {
    parse_day(s).map_err(|e| e.to_string())
}

fn bookings(json: &str) -> BridgeResult<Vec<Booking>> {
    parse_bookings_json(json).map_err(|e| format!("Invalid bookings JSON: {}", e))
}

fn window(start: &str, end: &str) -> BridgeResult<DateRange> {
    DateRange::new(day(start)?, day(end)?).map_err(|e| e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> BridgeResult<String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn js(result: BridgeResult<String>) -> Result<String, JsValue> {
    result.map_err(|e| JsValue::from_str(&e))
}

// ---------------------------------------------------------------------------
// JSON-level operations
// ---------------------------------------------------------------------------

pub fn is_date_occupied_json(bookings_json: &str, room_id: &str, date: &str) -> BridgeResult<bool> {
    Ok(booking_engine::is_date_occupied(
        &bookings(bookings_json)?,
        room_id,
        day(date)?,
    ))
}

pub fn has_overlap_json(
    bookings_json: &str,
    room_id: &str,
    check_in: &str,
    check_out: &str,
) -> BridgeResult<bool> {
    let (check_in, check_out) = (day(check_in)?, day(check_out)?);
    if check_in >= check_out {
        return Err(format!(
            "check-in {} must be before check-out {}",
            check_in, check_out
        ));
    }
    Ok(booking_engine::has_overlap(
        &bookings(bookings_json)?,
        room_id,
        check_in,
        check_out,
    ))
}

pub fn validate_booking_request_json(
    bookings_json: &str,
    room_id: &str,
    check_in: &str,
    check_out: &str,
    today: &str,
) -> BridgeResult<String> {
    let decision = booking_engine::validate_booking_request(
        &bookings(bookings_json)?,
        room_id,
        day(check_in)?,
        day(check_out)?,
        day(today)?,
    );
    to_json(&decision)
}

pub fn bookings_for_date_json(
    bookings_json: &str,
    date: &str,
    room_filter: Option<&str>,
) -> BridgeResult<String> {
    let all = bookings(bookings_json)?;
    to_json(&booking_engine::bookings_for_date(&all, day(date)?, room_filter))
}

pub fn reschedule_booking_json(
    bookings_json: &str,
    booking_id: &str,
    new_check_in: &str,
) -> BridgeResult<String> {
    let mut all = bookings(bookings_json)?;
    let decision = booking_engine::reschedule_booking(&mut all, booking_id, day(new_check_in)?)
        .map_err(|e| e.to_string())?;
    to_json(&RescheduleDto {
        decision: &decision,
        bookings: &all,
    })
}

pub fn occupied_dates_json(
    bookings_json: &str,
    room_id: &str,
    window_start: &str,
    window_end: &str,
) -> BridgeResult<String> {
    let dates = booking_engine::occupied_dates(
        &bookings(bookings_json)?,
        room_id,
        window(window_start, window_end)?,
    );
    to_json(&dates)
}

pub fn find_free_ranges_json(
    bookings_json: &str,
    room_id: &str,
    window_start: &str,
    window_end: &str,
) -> BridgeResult<String> {
    let ranges = booking_engine::find_free_ranges(
        &bookings(bookings_json)?,
        room_id,
        window(window_start, window_end)?,
    );
    to_json(&ranges)
}

pub fn month_view_json(
    bookings_json: &str,
    year: i32,
    month: u32,
    room_filter: Option<&str>,
) -> BridgeResult<String> {
    let view = booking_engine::month_view(&bookings(bookings_json)?, year, month, room_filter)
        .map_err(|e| e.to_string())?;
    to_json(&view)
}

pub fn quote_stay_json(room_json: &str, check_in: &str, check_out: &str) -> BridgeResult<String> {
    let room: Room =
        serde_json::from_str(room_json).map_err(|e| format!("Invalid room JSON: {}", e))?;
    let quote = booking_engine::quote::quote_stay(&room, day(check_in)?, day(check_out)?)
        .map_err(|e| e.to_string())?;
    to_json(&quote)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether `roomId` is occupied on `date`. The check-out day is never occupied.
#[wasm_bindgen(js_name = "isDateOccupied")]
pub fn is_date_occupied(bookings_json: &str, room_id: &str, date: &str) -> Result<bool, JsValue> {
    is_date_occupied_json(bookings_json, room_id, date).map_err(|e| JsValue::from_str(&e))
}

/// Whether `[checkIn, checkOut)` overlaps an existing booking for `roomId`.
///
/// Unlike the Rust API this rejects a reversed range with an error instead of
/// relying on the caller.
#[wasm_bindgen(js_name = "hasOverlap")]
pub fn has_overlap(
    bookings_json: &str,
    room_id: &str,
    check_in: &str,
    check_out: &str,
) -> Result<bool, JsValue> {
    has_overlap_json(bookings_json, room_id, check_in, check_out)
        .map_err(|e| JsValue::from_str(&e))
}

/// Run the booking gate. Returns a JSON decision:
/// `{"status":"accepted"}` or
/// `{"status":"rejected","kind":"Conflict","conflicts":[...]}`.
#[wasm_bindgen(js_name = "validateBookingRequest")]
pub fn validate_booking_request(
    bookings_json: &str,
    room_id: &str,
    check_in: &str,
    check_out: &str,
    today: &str,
) -> Result<String, JsValue> {
    js(validate_booking_request_json(
        bookings_json,
        room_id,
        check_in,
        check_out,
        today,
    ))
}

/// Bookings occupying `date`, optionally for one room, as a JSON array.
#[wasm_bindgen(js_name = "bookingsForDate")]
pub fn bookings_for_date(
    bookings_json: &str,
    date: &str,
    room_filter: Option<String>,
) -> Result<String, JsValue> {
    js(bookings_for_date_json(bookings_json, date, room_filter.as_deref()))
}

/// Move a booking to a new check-in day, keeping its length.
///
/// Returns `{decision, bookings}`; `bookings` is unchanged when rejected.
#[wasm_bindgen(js_name = "rescheduleBooking")]
pub fn reschedule_booking(
    bookings_json: &str,
    booking_id: &str,
    new_check_in: &str,
) -> Result<String, JsValue> {
    js(reschedule_booking_json(bookings_json, booking_id, new_check_in))
}

/// Occupied days of `roomId` within `[windowStart, windowEnd)` as a JSON array of dates.
#[wasm_bindgen(js_name = "occupiedDates")]
pub fn occupied_dates(
    bookings_json: &str,
    room_id: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    js(occupied_dates_json(bookings_json, room_id, window_start, window_end))
}

/// Free runs of nights for `roomId` within `[windowStart, windowEnd)`.
#[wasm_bindgen(js_name = "findFreeRanges")]
pub fn find_free_ranges(
    bookings_json: &str,
    room_id: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    js(find_free_ranges_json(bookings_json, room_id, window_start, window_end))
}

/// Day cells for one month, each with the ids of bookings occupying it.
#[wasm_bindgen(js_name = "monthView")]
pub fn month_view(
    bookings_json: &str,
    year: i32,
    month: u32,
    room_filter: Option<String>,
) -> Result<String, JsValue> {
    js(month_view_json(bookings_json, year, month, room_filter.as_deref()))
}

/// Price a stay: nights × the room's nightly price.
#[wasm_bindgen(js_name = "quoteStay")]
pub fn quote_stay(room_json: &str, check_in: &str, check_out: &str) -> Result<String, JsValue> {
    js(quote_stay_json(room_json, check_in, check_out))
}
