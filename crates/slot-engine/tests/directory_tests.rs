//! Tests for the data-source seam, the snapshot document, and the sitter clock.

use std::fmt;

use chrono::{NaiveDate, TimeZone, Utc};
use slot_engine::directory::{
    plan_boarding, plan_history, plan_walking, MemoryDirectory, SitterDirectory, SitterSnapshot,
};
use slot_engine::model::{
    BoardingAvailabilityDay, BookingStatus, ExistingBoardingBooking, ExistingBooking,
    SitterCapacity, UnavailabilityDate, WeeklyAvailabilityRule,
};
use slot_engine::{local_today, OverlapPolicy, SlotError};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

const SNAPSHOT: &str = r#"{
  "weeklyRules": [
    { "sitterId": "alice", "weekday": 1, "startTime": "09:00:00", "endTime": "17:00:00" },
    { "sitterId": "alice", "weekday": 3, "startTime": "8:00 AM", "endTime": "10:00 AM" },
    { "sitterId": "bob", "weekday": 1, "startTime": "06:00", "endTime": "07:00" }
  ],
  "unavailableDates": [
    { "sitterId": "alice", "date": "2026-03-18" }
  ],
  "bookings": [
    { "sitterId": "alice", "date": "2026-03-23", "startTime": "10:00", "endTime": "11:00", "status": "confirmed" },
    { "sitterId": "alice", "date": "2026-03-09", "startTime": "10:00", "endTime": "11:00", "status": "completed" },
    { "sitterId": "bob", "date": "2026-03-16", "startTime": "10:00", "endTime": "11:00", "status": "confirmed" }
  ],
  "boardingDays": [
    { "sitterId": "alice", "date": "2026-03-20" },
    { "sitterId": "alice", "date": "2026-03-21" }
  ],
  "boardingBookings": [
    { "sitterId": "alice", "startDate": "2026-03-20", "endDate": "2026-03-20", "status": "confirmed" }
  ],
  "capacities": [
    { "sitterId": "alice", "maxDogsBoarding": 2 }
  ]
}"#;

fn directory() -> MemoryDirectory {
    MemoryDirectory::new(SitterSnapshot::from_json(SNAPSHOT).unwrap())
}

/// A directory whose every fetch fails, to check error propagation.
struct Offline;

#[derive(Debug, PartialEq)]
struct OfflineError(&'static str);

impl fmt::Display for OfflineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offline while fetching {}", self.0)
    }
}

impl std::error::Error for OfflineError {}

impl SitterDirectory for Offline {
    type Error = OfflineError;

    fn weekly_rules(&self, _: &str) -> Result<Vec<WeeklyAvailabilityRule>, OfflineError> {
        Err(OfflineError("weekly rules"))
    }

    fn unavailable_dates(&self, _: &str) -> Result<Vec<UnavailabilityDate>, OfflineError> {
        Err(OfflineError("unavailable dates"))
    }

    fn walking_bookings(&self, _: &str) -> Result<Vec<ExistingBooking>, OfflineError> {
        Err(OfflineError("walking bookings"))
    }

    fn boarding_days(&self, _: &str) -> Result<Vec<BoardingAvailabilityDay>, OfflineError> {
        Err(OfflineError("boarding days"))
    }

    fn boarding_bookings(&self, _: &str) -> Result<Vec<ExistingBoardingBooking>, OfflineError> {
        Err(OfflineError("boarding bookings"))
    }

    fn capacity(&self, _: &str) -> Result<SitterCapacity, OfflineError> {
        Err(OfflineError("capacity"))
    }
}

// ── Snapshot ────────────────────────────────────────────────────────────────

#[test]
fn snapshot_parses_camel_case_rows() {
    let snapshot = SitterSnapshot::from_json(SNAPSHOT).unwrap();

    assert_eq!(snapshot.weekly_rules.len(), 3);
    assert_eq!(snapshot.bookings[0].status, BookingStatus::Confirmed);
    assert_eq!(snapshot.capacities[0].max_dogs_boarding, 2);
}

#[test]
fn snapshot_sections_default_to_empty() {
    let snapshot = SitterSnapshot::from_json("{}").unwrap();
    assert_eq!(snapshot, SitterSnapshot::default());
}

#[test]
fn malformed_snapshot_is_an_error() {
    let err = SitterSnapshot::from_json(r#"{"bookings": [{"status": "maybe"}]}"#).unwrap_err();
    assert!(matches!(err, SlotError::Snapshot(_)));
}

// ── MemoryDirectory ─────────────────────────────────────────────────────────

#[test]
fn rows_are_filtered_by_sitter() {
    let dir = directory();

    assert_eq!(dir.weekly_rules("alice").unwrap().len(), 2);
    assert_eq!(dir.weekly_rules("bob").unwrap().len(), 1);
    assert!(dir.weekly_rules("carol").unwrap().is_empty());
    assert_eq!(dir.walking_bookings("bob").unwrap().len(), 1);

    // Filtering copies rows out; the snapshot itself keeps every sitter.
    assert_eq!(dir.snapshot().weekly_rules.len(), 3);
    assert_eq!(dir.snapshot().bookings.len(), 3);
}

#[test]
fn missing_capacity_is_an_error() {
    let err = directory().capacity("bob").unwrap_err();
    assert!(matches!(err, SlotError::MissingCapacity(ref id) if id == "bob"));
}

// ── plan_* ──────────────────────────────────────────────────────────────────

#[test]
fn plan_walking_applies_rules_blocks_and_bookings() {
    let slots = plan_walking(&directory(), "alice", march(16), OverlapPolicy::WholeWindow).unwrap();

    let summary: Vec<(NaiveDate, &str)> = slots
        .iter()
        .map(|s| (s.date_key, s.formatted_time.as_str()))
        .collect();
    // Wed 18th is blocked; Mon 23rd has a confirmed 10-11 booking.
    assert_eq!(
        summary,
        vec![
            (march(16), "9:00 AM - 5:00 PM"),
            (march(25), "8:00 AM - 10:00 AM"),
        ]
    );
}

#[test]
fn plan_walking_ignores_other_sitters_bookings() {
    // Bob's 10-11 booking on the 16th must not affect Alice.
    let slots = plan_walking(&directory(), "alice", march(16), OverlapPolicy::WholeWindow).unwrap();
    assert_eq!(slots[0].date_key, march(16));
}

#[test]
fn plan_boarding_uses_stored_capacity() {
    let slots = plan_boarding(&directory(), "alice").unwrap();

    let spots: Vec<(NaiveDate, Option<u32>)> =
        slots.iter().map(|s| (s.date_key, s.spots_left)).collect();
    assert_eq!(spots, vec![(march(20), Some(1)), (march(21), Some(2))]);
}

#[test]
fn plan_boarding_without_capacity_fails() {
    assert!(matches!(
        plan_boarding(&directory(), "bob"),
        Err(SlotError::MissingCapacity(_))
    ));
}

#[test]
fn plan_history_splits_upcoming_and_past() {
    let lists = plan_history(&directory(), "alice", march(16)).unwrap();

    assert_eq!(lists.upcoming.len(), 1);
    assert_eq!(lists.upcoming[0].date, "2026-03-23");
    assert_eq!(lists.history.len(), 1);
    assert_eq!(lists.history[0].date, "2026-03-09");
}

#[test]
fn fetch_errors_propagate_unchanged() {
    assert_eq!(
        plan_walking(&Offline, "alice", march(16), OverlapPolicy::WholeWindow).unwrap_err(),
        OfflineError("weekly rules")
    );
    assert_eq!(
        plan_boarding(&Offline, "alice").unwrap_err(),
        OfflineError("boarding days")
    );
    assert_eq!(
        plan_history(&Offline, "alice", march(16)).unwrap_err(),
        OfflineError("walking bookings")
    );
}

// ── Clock ───────────────────────────────────────────────────────────────────

#[test]
fn local_today_uses_sitter_timezone() {
    // 03:30 UTC on the 17th is still the evening of the 16th in Chicago.
    let now = Utc.with_ymd_and_hms(2026, 3, 17, 3, 30, 0).unwrap();

    assert_eq!(local_today(now, "America/Chicago").unwrap(), march(16));
    assert_eq!(local_today(now, "UTC").unwrap(), march(17));
    assert_eq!(local_today(now, "Asia/Tokyo").unwrap(), march(17));
}

#[test]
fn local_today_rejects_unknown_timezone() {
    let now = Utc.with_ymd_and_hms(2026, 3, 17, 3, 30, 0).unwrap();
    let err = local_today(now, "Mars/Olympus_Mons").unwrap_err();
    assert!(matches!(err, SlotError::InvalidTimezone(ref tz) if tz == "Mars/Olympus_Mons"));
}
