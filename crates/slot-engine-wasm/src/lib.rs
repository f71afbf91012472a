//! WASM bindings for slot-engine.
//!
//! Exposes walking/boarding slot computation, the booking history split, and
//! the date/time normalizers to JavaScript via `wasm-bindgen`. All entity
//! collections cross the boundary as JSON strings using the backend's
//! camelCase row shape; results come back as JSON strings too.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target bundler --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use slot_engine::model::{
    BoardingAvailabilityDay, ExistingBoardingBooking, ExistingBooking, UnavailabilityDate,
    WeeklyAvailabilityRule,
};
use slot_engine::normalize::date_key_string;
use slot_engine::OverlapPolicy;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_rows<T: DeserializeOwned>(json: &str, what: &str) -> Result<Vec<T>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn parse_today(today: &str) -> Result<NaiveDate, String> {
    slot_engine::normalize_date(today).ok_or_else(|| format!("Invalid date '{}'", today))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn walking_slots_json(
    rules_json: &str,
    unavailable_json: &str,
    bookings_json: &str,
    today: &str,
    split: bool,
) -> Result<String, String> {
    let rules: Vec<WeeklyAvailabilityRule> = parse_rows(rules_json, "weekly rules")?;
    let unavailable: Vec<UnavailabilityDate> = parse_rows(unavailable_json, "unavailable dates")?;
    let bookings: Vec<ExistingBooking> = parse_rows(bookings_json, "bookings")?;
    let today = parse_today(today)?;
    let policy = if split {
        OverlapPolicy::SplitFree
    } else {
        OverlapPolicy::WholeWindow
    };

    let slots =
        slot_engine::compute_walking_slots_with(&rules, &unavailable, &bookings, today, policy);
    to_json(&slots)
}

fn boarding_slots_json(
    days_json: &str,
    bookings_json: &str,
    max_dogs_boarding: u32,
) -> Result<String, String> {
    let days: Vec<BoardingAvailabilityDay> = parse_rows(days_json, "boarding days")?;
    let bookings: Vec<ExistingBoardingBooking> = parse_rows(bookings_json, "boarding bookings")?;

    let slots = slot_engine::compute_boarding_slots(&days, &bookings, max_dogs_boarding);
    to_json(&slots)
}

fn partition_json(bookings_json: &str, today: &str) -> Result<String, String> {
    let bookings: Vec<ExistingBooking> = parse_rows(bookings_json, "bookings")?;
    let today = parse_today(today)?;

    to_json(&slot_engine::partition_bookings(&bookings, today))
}

fn local_today_string(now: &str, timezone: &str) -> Result<String, String> {
    let now: DateTime<Utc> = DateTime::parse_from_rfc3339(now)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid datetime '{}': {}", now, e))?;
    let today = slot_engine::local_today(now, timezone).map_err(|e| e.to_string())?;
    Ok(date_key_string(today))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute bookable walking slots for the 14 days starting at `today`.
///
/// # Arguments
/// - `rules_json` -- JSON array of weekly rules (`sitterId`, `weekday`, `startTime`, `endTime`)
/// - `unavailable_json` -- JSON array of `{sitterId, date}` blocked dates
/// - `bookings_json` -- JSON array of walking bookings
/// - `today` -- The sitter's local calendar date (`YYYY-MM-DD`)
/// - `split` -- Keep free parts of partly booked windows instead of dropping them
#[wasm_bindgen(js_name = "computeWalkingSlots")]
pub fn compute_walking_slots(
    rules_json: &str,
    unavailable_json: &str,
    bookings_json: &str,
    today: &str,
    split: Option<bool>,
) -> Result<String, JsValue> {
    walking_slots_json(
        rules_json,
        unavailable_json,
        bookings_json,
        today,
        split.unwrap_or(false),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Compute boarding nights with remaining capacity.
///
/// Returns a JSON array of slots whose `formattedTime` carries the nightly
/// price and the number of spots left.
#[wasm_bindgen(js_name = "computeBoardingSlots")]
pub fn compute_boarding_slots(
    days_json: &str,
    bookings_json: &str,
    max_dogs_boarding: u32,
) -> Result<String, JsValue> {
    boarding_slots_json(days_json, bookings_json, max_dogs_boarding)
        .map_err(|e| JsValue::from_str(&e))
}

/// Split walking bookings into `{upcoming, history}` lists.
#[wasm_bindgen(js_name = "partitionBookings")]
pub fn partition_bookings(bookings_json: &str, today: &str) -> Result<String, JsValue> {
    partition_json(bookings_json, today).map_err(|e| JsValue::from_str(&e))
}

/// Canonical `YYYY-MM-DD` for a raw date string, or `undefined` if invalid.
#[wasm_bindgen(js_name = "normalizeDate")]
pub fn normalize_date(raw: &str) -> Option<String> {
    slot_engine::normalize_date(raw).map(date_key_string)
}

/// Minutes since midnight for a raw time string, or `undefined` if invalid.
#[wasm_bindgen(js_name = "normalizeTime")]
pub fn normalize_time(raw: &str) -> Option<u32> {
    slot_engine::normalize_time(raw)
}

/// The sitter's local calendar date (`YYYY-MM-DD`) at the RFC 3339 instant `now`.
#[wasm_bindgen(js_name = "localToday")]
pub fn local_today(now: &str, timezone: &str) -> Result<String, JsValue> {
    local_today_string(now, timezone).map_err(|e| JsValue::from_str(&e))
}
