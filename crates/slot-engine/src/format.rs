//! Display strings and ordering for computed slots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conflict::TimeWindow;
use crate::model::{AvailabilitySlot, ExistingBooking, SlotKind};
use crate::normalize::{canonical_time, date_key_string, normalize_date, normalize_time};

/// Boarding occupies the whole calendar date.
const BOARDING_DAY: TimeWindow = TimeWindow {
    start: 0,
    end: 23 * 60 + 59,
};

/// Full weekday name, e.g. "Monday".
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Short display date, e.g. "Mar 16, 2026".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// 12-hour clock rendering of minutes since midnight, e.g. "9:00 AM".
pub fn twelve_hour(minutes: u32) -> String {
    let hour = (minutes / 60) % 24;
    let minute = minutes % 60;
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minute, meridiem)
}

/// "9:00 AM - 5:00 PM"
pub fn walking_label(window: TimeWindow) -> String {
    format!("{} - {}", twelve_hour(window.start), twelve_hour(window.end))
}

/// "Overnight Stay - $45/night (2 spots left)"
pub fn boarding_label(nightly_price: u32, remaining: u32) -> String {
    let noun = if remaining == 1 { "spot" } else { "spots" };
    format!(
        "Overnight Stay - ${}/night ({} {} left)",
        nightly_price, remaining, noun
    )
}

pub(crate) fn walking_slot(id: String, date: NaiveDate, window: TimeWindow) -> AvailabilitySlot {
    AvailabilitySlot {
        id,
        day: weekday_name(date),
        date: display_date(date),
        start_time: canonical_time(window.start),
        end_time: canonical_time(window.end),
        formatted_time: walking_label(window),
        kind: SlotKind::Walking,
        date_key: date,
        start_minutes: window.start,
        end_minutes: window.end,
        spots_left: None,
    }
}

pub(crate) fn boarding_slot(date: NaiveDate, nightly_price: u32, remaining: u32) -> AvailabilitySlot {
    AvailabilitySlot {
        id: format!("boarding-{}", date_key_string(date)),
        day: weekday_name(date),
        date: display_date(date),
        start_time: canonical_time(BOARDING_DAY.start),
        end_time: canonical_time(BOARDING_DAY.end),
        formatted_time: boarding_label(nightly_price, remaining),
        kind: SlotKind::Boarding,
        date_key: date,
        start_minutes: BOARDING_DAY.start,
        end_minutes: BOARDING_DAY.end,
        spots_left: Some(remaining),
    }
}

/// Chronological direction for a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Soonest first.
    #[default]
    Upcoming,
    /// Most recent first.
    History,
}

/// Anything placed on the calendar at a (date, start minute) position.
pub trait Scheduled {
    fn schedule_key(&self) -> (NaiveDate, u32);
}

impl Scheduled for AvailabilitySlot {
    fn schedule_key(&self) -> (NaiveDate, u32) {
        (self.date_key, self.start_minutes)
    }
}

impl Scheduled for ExistingBooking {
    /// Unparseable dates sort as the earliest possible date and unparseable
    /// times as midnight; callers that care drop such bookings first.
    fn schedule_key(&self) -> (NaiveDate, u32) {
        (
            normalize_date(&self.date).unwrap_or(NaiveDate::MIN),
            normalize_time(&self.start_time).unwrap_or(0),
        )
    }
}

/// Sort in place by (date, start). Stable: equal keys keep their input order.
pub fn sort_slots<T: Scheduled>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Upcoming => items.sort_by_key(|item| item.schedule_key()),
        SortOrder::History => items.sort_by(|a, b| b.schedule_key().cmp(&a.schedule_key())),
    }
}
