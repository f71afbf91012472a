//! Compute the free parts of an offer window around booked time.
//!
//! Clips booked windows to the offer window, merges overlapping booked periods,
//! then returns the gaps between them. Backs [`OverlapPolicy::SplitFree`].
//!
//! [`OverlapPolicy::SplitFree`]: crate::availability::OverlapPolicy::SplitFree

use crate::conflict::TimeWindow;

/// Merge overlapping or adjacent booked windows, clipped to `within`.
///
/// Returns a sorted, non-overlapping list of windows.
pub fn merge_busy_windows(booked: &[TimeWindow], within: TimeWindow) -> Vec<TimeWindow> {
    let mut intervals: Vec<TimeWindow> = booked
        .iter()
        .filter(|b| !b.is_degenerate() && b.start < within.end && b.end > within.start)
        .map(|b| TimeWindow::new(b.start.max(within.start), b.end.min(within.end)))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort();

    let mut merged: Vec<TimeWindow> = Vec::new();
    for window in intervals {
        if let Some(last) = merged.last_mut() {
            if window.start <= last.end {
                last.end = last.end.max(window.end);
                continue;
            }
        }
        merged.push(window);
    }

    merged
}

/// Free sub-windows of `within` not covered by any booked window, in order.
///
/// A degenerate `within` has no free time.
pub fn free_windows(booked: &[TimeWindow], within: TimeWindow) -> Vec<TimeWindow> {
    if within.is_degenerate() {
        return Vec::new();
    }

    let mut free = Vec::new();
    let mut cursor = within.start;

    for busy in merge_busy_windows(booked, within) {
        if cursor < busy.start {
            free.push(TimeWindow::new(cursor, busy.start));
        }
        cursor = cursor.max(busy.end);
    }

    if cursor < within.end {
        free.push(TimeWindow::new(cursor, within.end));
    }

    free
}
