//! Split a sitter's walking bookings into the "upcoming" and "history" lists.

use chrono::NaiveDate;
use serde::Serialize;

use crate::format::{sort_slots, SortOrder};
use crate::model::ExistingBooking;
use crate::normalize::normalize_date;

/// Bookings grouped for the two list views.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingLists {
    /// Pending or confirmed, dated today or later; soonest first.
    pub upcoming: Vec<ExistingBooking>,
    /// Completed, cancelled, or dated before today; most recent first.
    pub history: Vec<ExistingBooking>,
}

/// Partition bookings relative to `today`. Bookings with an invalid date are dropped.
pub fn partition_bookings(bookings: &[ExistingBooking], today: NaiveDate) -> BookingLists {
    let mut lists = BookingLists::default();

    for booking in bookings {
        let Some(date) = normalize_date(&booking.date) else {
            continue;
        };
        if booking.status.blocks_availability() && date >= today {
            lists.upcoming.push(booking.clone());
        } else {
            lists.history.push(booking.clone());
        }
    }

    sort_slots(&mut lists.upcoming, SortOrder::Upcoming);
    sort_slots(&mut lists.history, SortOrder::History);
    lists
}
