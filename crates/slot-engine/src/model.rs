//! Entity types consumed and produced by the slot computation.
//!
//! Input entities mirror the backend rows one-to-one. Their date and time
//! fields stay raw strings: rows arrive in several formats and are only
//! canonicalized by [`crate::normalize`] at computation time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a walking or boarding booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Only pending and confirmed bookings occupy the sitter.
    pub fn blocks_availability(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// A recurring weekly offer window. `weekday` is 1 (Monday) through 7 (Sunday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailabilityRule {
    pub sitter_id: String,
    pub weekday: u8,
    pub start_time: String,
    pub end_time: String,
}

/// A calendar date the sitter has blocked out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailabilityDate {
    pub sitter_id: String,
    pub date: String,
}

/// An existing dog-walking booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingBooking {
    pub sitter_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
}

/// A date the sitter has opened for overnight boarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingAvailabilityDay {
    pub sitter_id: String,
    pub date: String,
}

/// An existing boarding booking, occupying every date in `[start_date, end_date]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingBoardingBooking {
    pub sitter_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitterCapacity {
    pub sitter_id: String,
    pub max_dogs_boarding: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Walking,
    Boarding,
}

/// A concrete, display-ready bookable slot.
///
/// The string fields are what the booking screen renders. The typed fields
/// (`date_key`, `start_minutes`, `end_minutes`) carry the sort key so callers
/// never reparse the display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: String,
    /// Weekday name, e.g. "Monday".
    pub day: String,
    /// Display date, e.g. "Mar 16, 2026".
    pub date: String,
    /// Canonical `HH:MM`.
    pub start_time: String,
    /// Canonical `HH:MM`.
    pub end_time: String,
    /// "9:00 AM - 5:00 PM" for walks, the capacity annotation for boarding.
    pub formatted_time: String,
    pub kind: SlotKind,
    pub date_key: NaiveDate,
    pub start_minutes: u32,
    pub end_minutes: u32,
    /// Remaining boarding spots; `None` for walking slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spots_left: Option<u32>,
}
