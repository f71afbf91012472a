//! Booking-aware slot filtering for walks and boarding.
//!
//! Walking slots come from the weekly rules expanded over the horizon, minus
//! blocked-out dates and minus any window that overlaps a pending or confirmed
//! booking. Boarding slots come from explicitly opened dates, minus dates where
//! the sitter is already at capacity.
//!
//! Records with malformed dates or times are excluded, never guessed at.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::conflict::BookingIndex;
use crate::expander::expand_weekly;
use crate::format::{boarding_slot, sort_slots, walking_slot, SortOrder};
use crate::freebusy::free_windows;
use crate::model::{
    AvailabilitySlot, BoardingAvailabilityDay, ExistingBoardingBooking, ExistingBooking,
    UnavailabilityDate, WeeklyAvailabilityRule,
};
use crate::normalize::{date_key_string, normalize_date};

/// Nightly boarding price in whole dollars. Not configurable per sitter.
pub const BOARDING_NIGHTLY_PRICE: u32 = 45;

/// What to do with a weekly window that is partly booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlapPolicy {
    /// Drop the whole window if any part of it is booked.
    #[default]
    WholeWindow,
    /// Keep the unbooked sub-windows as separate slots.
    SplitFree,
}

/// Compute bookable walking slots for the 14 days starting at `today`.
///
/// A window that overlaps a booking anywhere is dropped entirely; see
/// [`compute_walking_slots_with`] for the splitting alternative.
pub fn compute_walking_slots(
    rules: &[WeeklyAvailabilityRule],
    unavailable: &[UnavailabilityDate],
    bookings: &[ExistingBooking],
    today: NaiveDate,
) -> Vec<AvailabilitySlot> {
    compute_walking_slots_with(rules, unavailable, bookings, today, OverlapPolicy::WholeWindow)
}

/// Compute bookable walking slots with an explicit overlap policy.
///
/// Output is sorted by (date, start time); slot ids are derived from the date
/// and rule position, so identical inputs give identical output.
pub fn compute_walking_slots_with(
    rules: &[WeeklyAvailabilityRule],
    unavailable: &[UnavailabilityDate],
    bookings: &[ExistingBooking],
    today: NaiveDate,
    policy: OverlapPolicy,
) -> Vec<AvailabilitySlot> {
    let blocked = blocked_dates(unavailable);
    let index = BookingIndex::from_bookings(bookings);

    let mut slots = Vec::new();
    for candidate in expand_weekly(rules, today) {
        if blocked.contains(&candidate.date) {
            trace!(date = %candidate.date, "dropping slot on unavailable date");
            continue;
        }

        let id = format!("{}-{}", date_key_string(candidate.date), candidate.rule_index);
        match policy {
            OverlapPolicy::WholeWindow => {
                if index.conflicts(candidate.date, candidate.window) {
                    trace!(
                        date = %candidate.date,
                        start = candidate.window.start,
                        end = candidate.window.end,
                        "dropping slot overlapping a booking"
                    );
                    continue;
                }
                slots.push(walking_slot(id, candidate.date, candidate.window));
            }
            OverlapPolicy::SplitFree => {
                let free = free_windows(index.windows_on(candidate.date), candidate.window);
                if free == [candidate.window] {
                    slots.push(walking_slot(id, candidate.date, candidate.window));
                    continue;
                }
                for (part, window) in free.into_iter().enumerate() {
                    slots.push(walking_slot(format!("{id}-{part}"), candidate.date, window));
                }
            }
        }
    }

    sort_slots(&mut slots, SortOrder::Upcoming);
    slots
}

/// Compute bookable boarding nights with remaining capacity, sorted by date.
///
/// Duplicate boarding days collapse into one slot. A date is dropped once the
/// number of pending or confirmed stays covering it reaches `max_dogs_boarding`.
pub fn compute_boarding_slots(
    days: &[BoardingAvailabilityDay],
    bookings: &[ExistingBoardingBooking],
    max_dogs_boarding: u32,
) -> Vec<AvailabilitySlot> {
    let open: BTreeSet<NaiveDate> = days
        .iter()
        .filter_map(|day| {
            let date = normalize_date(&day.date);
            if date.is_none() {
                debug!(date = %day.date, "skipping boarding day with invalid date");
            }
            date
        })
        .collect();

    let stays: Vec<(NaiveDate, NaiveDate)> = bookings.iter().filter_map(stay_range).collect();

    open.into_iter()
        .filter_map(|date| {
            let booked = count_covering(date, &stays);
            if booked >= max_dogs_boarding {
                trace!(%date, booked, max_dogs_boarding, "dropping full boarding date");
                return None;
            }
            Some(boarding_slot(
                date,
                BOARDING_NIGHTLY_PRICE,
                max_dogs_boarding - booked,
            ))
        })
        .collect()
}

/// Number of pending or confirmed boarding stays covering `date`.
pub fn booked_count(date: NaiveDate, bookings: &[ExistingBoardingBooking]) -> u32 {
    let stays: Vec<(NaiveDate, NaiveDate)> = bookings.iter().filter_map(stay_range).collect();
    count_covering(date, &stays)
}

fn blocked_dates(unavailable: &[UnavailabilityDate]) -> BTreeSet<NaiveDate> {
    unavailable
        .iter()
        .filter_map(|u| {
            let date = normalize_date(&u.date);
            if date.is_none() {
                debug!(date = %u.date, "ignoring unavailability with invalid date");
            }
            date
        })
        .collect()
}

/// Inclusive date range of a blocking stay. `end < start` covers nothing.
fn stay_range(booking: &ExistingBoardingBooking) -> Option<(NaiveDate, NaiveDate)> {
    if !booking.status.blocks_availability() {
        return None;
    }
    match (
        normalize_date(&booking.start_date),
        normalize_date(&booking.end_date),
    ) {
        (Some(start), Some(end)) if start <= end => Some((start, end)),
        _ => {
            debug!(
                start = %booking.start_date,
                end = %booking.end_date,
                "skipping boarding booking with unusable range"
            );
            None
        }
    }
}

fn count_covering(date: NaiveDate, stays: &[(NaiveDate, NaiveDate)]) -> u32 {
    let covering = stays
        .iter()
        .filter(|(start, end)| *start <= date && date <= *end)
        .count();
    u32::try_from(covering).unwrap_or(u32::MAX)
}
