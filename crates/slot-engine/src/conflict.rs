//! Detect overlaps between candidate windows and existing walking bookings.
//!
//! Windows are half-open `[start, end)` in minutes since midnight. Adjacent
//! windows (where one ends exactly when another starts) are NOT conflicts, and
//! a zero-length or inverted window never overlaps anything.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ExistingBooking;
use crate::normalize::{normalize_date, normalize_time};

/// A half-open window of minutes within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: u32,
    pub end: u32,
}

impl TimeWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Normalize a raw start/end pair. Returns `None` if either side is invalid.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self::new(normalize_time(start)?, normalize_time(end)?))
    }

    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        overlaps(*self, *other)
    }

    /// Length of the shared part of two windows, 0 when they do not overlap.
    pub fn overlap_minutes(&self, other: &TimeWindow) -> u32 {
        if !self.overlaps(other) {
            return 0;
        }
        self.end.min(other.end) - self.start.max(other.start)
    }
}

/// Two windows overlap iff `a.start < b.end && a.end > b.start`.
///
/// Degenerate windows are rejected first: without that check an empty window
/// sitting strictly inside another would satisfy the inequality.
pub fn overlaps(a: TimeWindow, b: TimeWindow) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    a.start < b.end && a.end > b.start
}

/// A detected overlap between a candidate window and a booked window.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub date: NaiveDate,
    pub candidate: TimeWindow,
    pub booked: TimeWindow,
    pub overlap_minutes: u32,
}

/// Blocking booking windows grouped by canonical date.
#[derive(Debug, Clone, Default)]
pub struct BookingIndex {
    by_date: BTreeMap<NaiveDate, Vec<TimeWindow>>,
}

impl BookingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every pending or confirmed booking.
    ///
    /// Bookings with an unparseable date or time are left out of the index.
    pub fn from_bookings(bookings: &[ExistingBooking]) -> Self {
        let mut index = Self::new();
        for booking in bookings.iter().filter(|b| b.status.blocks_availability()) {
            let Some(date) = normalize_date(&booking.date) else {
                debug!(date = %booking.date, "skipping booking with invalid date");
                continue;
            };
            let Some(window) = TimeWindow::parse(&booking.start_time, &booking.end_time) else {
                debug!(
                    start = %booking.start_time,
                    end = %booking.end_time,
                    "skipping booking with invalid time"
                );
                continue;
            };
            index.insert(date, window);
        }
        index
    }

    pub fn insert(&mut self, date: NaiveDate, window: TimeWindow) {
        self.by_date.entry(date).or_default().push(window);
    }

    /// Booked windows on `date`, in insertion order.
    pub fn windows_on(&self, date: NaiveDate) -> &[TimeWindow] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `window` on `date` overlaps any booked window.
    pub fn conflicts(&self, date: NaiveDate, window: TimeWindow) -> bool {
        self.windows_on(date).iter().any(|booked| overlaps(window, *booked))
    }

    /// Every booked window on `date` that overlaps `window`.
    pub fn conflicting(&self, date: NaiveDate, window: TimeWindow) -> Vec<Conflict> {
        self.windows_on(date)
            .iter()
            .filter(|booked| overlaps(window, **booked))
            .map(|booked| Conflict {
                date,
                candidate: window,
                booked: *booked,
                overlap_minutes: window.overlap_minutes(booked),
            })
            .collect()
    }

    /// Number of indexed booking windows across all dates.
    pub fn len(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
