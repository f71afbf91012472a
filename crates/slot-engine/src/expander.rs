//! Weekly rule expansion -- converts recurring weekly availability into concrete
//! dated candidate windows over a fixed horizon.
//!
//! Rules number weekdays 1 (Monday) through 7 (Sunday). Calendar dates are
//! compared using the Sunday-first numbering (0 = Sunday .. 6 = Saturday), so a
//! rule's weekday is mapped with `7 -> 0` and `1..=6` unchanged.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::conflict::TimeWindow;
use crate::model::WeeklyAvailabilityRule;

/// Number of consecutive calendar dates considered, starting with today.
pub const HORIZON_DAYS: usize = 14;

/// A dated window produced by one weekly rule, before any filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlot {
    pub date: NaiveDate,
    pub window: TimeWindow,
    /// Position of the originating rule in the input slice.
    pub rule_index: usize,
}

/// The horizon dates: `today` through `today + 13`, ascending.
pub fn horizon(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    today.iter_days().take(HORIZON_DAYS)
}

/// Map a stored weekday (1 = Monday .. 7 = Sunday) to Sunday-first numbering.
///
/// Returns `None` for values outside `1..=7`.
pub fn js_weekday(db_weekday: u8) -> Option<u32> {
    match db_weekday {
        7 => Some(0),
        1..=6 => Some(u32::from(db_weekday)),
        _ => None,
    }
}

/// Expand weekly rules into candidate slots over the horizon starting at `today`.
///
/// Output is ordered by date, then by rule input order. Rules with an unknown
/// weekday, an unparseable time, or `start >= end` produce nothing.
pub fn expand_weekly(rules: &[WeeklyAvailabilityRule], today: NaiveDate) -> Vec<CandidateSlot> {
    let usable: Vec<(usize, u32, TimeWindow)> = rules
        .iter()
        .enumerate()
        .filter_map(|(rule_index, rule)| {
            let weekday = js_weekday(rule.weekday);
            let window = TimeWindow::parse(&rule.start_time, &rule.end_time)
                .filter(|w| !w.is_degenerate());
            match (weekday, window) {
                (Some(weekday), Some(window)) => Some((rule_index, weekday, window)),
                _ => {
                    debug!(
                        weekday = rule.weekday,
                        start = %rule.start_time,
                        end = %rule.end_time,
                        "skipping unusable weekly rule"
                    );
                    None
                }
            }
        })
        .collect();

    let mut candidates = Vec::new();
    for date in horizon(today) {
        let weekday = date.weekday().num_days_from_sunday();
        for &(rule_index, rule_weekday, window) in &usable {
            if rule_weekday == weekday {
                candidates.push(CandidateSlot {
                    date,
                    window,
                    rule_index,
                });
            }
        }
    }

    candidates
}
