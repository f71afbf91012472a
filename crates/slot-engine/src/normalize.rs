//! Date and time normalization.
//!
//! Backend rows carry dates as `YYYY-MM-DD`, `MM/DD/YYYY` or full ISO-8601
//! timestamps, and times as 24-hour `HH:MM[:SS]` or 12-hour `H:MM AM/PM`.
//! Everything is reduced to two canonical forms:
//!
//! - a calendar date ([`NaiveDate`], rendered `YYYY-MM-DD`), taken from the
//!   components as written and never shifted by a UTC offset;
//! - minutes since midnight (`u32`, `0..1440`).
//!
//! `None` is the invalid sentinel. Callers exclude the record it came from.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Anything that can be reduced to a canonical calendar date.
pub trait AsDateKey {
    fn date_key(&self) -> Option<NaiveDate>;
}

impl AsDateKey for str {
    fn date_key(&self) -> Option<NaiveDate> {
        normalize_date(self)
    }
}

impl AsDateKey for String {
    fn date_key(&self) -> Option<NaiveDate> {
        normalize_date(self)
    }
}

impl AsDateKey for NaiveDate {
    fn date_key(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl AsDateKey for NaiveDateTime {
    fn date_key(&self) -> Option<NaiveDate> {
        Some(self.date())
    }
}

impl<Tz: TimeZone> AsDateKey for DateTime<Tz> {
    /// Uses the calendar date in the value's own timezone.
    fn date_key(&self) -> Option<NaiveDate> {
        Some(self.date_naive())
    }
}

/// Parse a raw date string into a calendar date.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, and ISO-8601 date-times whose date part
/// is `YYYY-MM-DD` followed by `T` or a space, a clock time `HH:MM[:SS[.fff]]`
/// and an optional offset (`Z`, `+02:00`, `+0200`, `+00`). The offset is
/// validated but not applied: `2026-03-31T23:30:00-05:00` yields March 31.
///
/// Years must be written with four digits; `3/16/26` is rejected rather than
/// read as the year 26.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains('/') {
        if !is_four_digit_year(s.rsplit('/').next()?) {
            return None;
        }
        return NaiveDate::parse_from_str(s, "%m/%d/%Y").ok();
    }
    if !is_four_digit_year(s.split('-').next()?) {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    // Date-time: the separator must sit right after a 10-character date.
    let (date_part, rest) = (s.get(..10)?, s.get(10..)?);
    let clock = rest.strip_prefix(['T', ' '])?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let (time, offset) = match clock.find(['+', '-', 'Z']) {
        Some(at) => clock.split_at(at),
        None => (clock, ""),
    };
    parse_twenty_four(time)?;
    if !is_utc_offset(offset) {
        return None;
    }
    Some(date)
}

/// Render a date as its canonical `YYYY-MM-DD` key.
pub fn date_key_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a raw time string into minutes since midnight.
///
/// 12-hour input follows the usual clock convention: `12:xx AM` is just after
/// midnight and `12:xx PM` just after noon.
pub fn normalize_time(raw: &str) -> Option<u32> {
    let upper = raw.trim().to_ascii_uppercase();

    if let Some(clock) = upper.strip_suffix("AM") {
        return parse_twelve_hour(clock.trim_end(), false);
    }
    if let Some(clock) = upper.strip_suffix("PM") {
        return parse_twelve_hour(clock.trim_end(), true);
    }
    parse_twenty_four(&upper)
}

/// Render minutes since midnight as `HH:MM`.
pub fn canonical_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn parse_twenty_four(s: &str) -> Option<u32> {
    // Postgres `timetz` columns append an offset ("09:00:00+00"); drop it.
    let clock = s.split(['+', '-', 'Z']).next()?;
    let (hour, minute) = split_clock(clock)?;
    if hour >= 24 {
        return None;
    }
    Some(hour * 60 + minute)
}

fn parse_twelve_hour(s: &str, pm: bool) -> Option<u32> {
    let (hour, minute) = split_clock(s)?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let base = (hour % 12) * 60 + minute;
    Some(if pm { base + 720 } else { base })
}

/// Split `H:MM` or `H:MM:SS[.fff]` into validated (hour, minute).
fn split_clock(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split(':');
    let hour = parse_component(parts.next()?, 1)?;
    let minute = parse_component(parts.next()?, 2)?;
    if minute >= 60 {
        return None;
    }
    if let Some(seconds) = parts.next() {
        let (whole, fraction) = match seconds.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (seconds, None),
        };
        if whole.len() != 2 || parse_component(whole, 2)? >= 60 {
            return None;
        }
        if let Some(fraction) = fraction {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
        }
    }
    if parts.next().is_some() {
        return None;
    }
    Some((hour, minute))
}

fn is_four_digit_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Empty, `Z`, or `±HH`, `±HHMM`, `±HH:MM`.
fn is_utc_offset(s: &str) -> bool {
    if s.is_empty() || s == "Z" {
        return true;
    }
    let Some(body) = s.strip_prefix(['+', '-']) else {
        return false;
    };
    let (hours, minutes) = match body.split_once(':') {
        Some((hours, minutes)) => (hours, Some(minutes)),
        None if body.len() == 4 => match (body.get(..2), body.get(2..)) {
            (Some(hours), Some(minutes)) => (hours, Some(minutes)),
            _ => return false,
        },
        None => (body, None),
    };
    two_digits_below(hours, 24) && minutes.is_none_or(|m| two_digits_below(m, 60))
}

fn two_digits_below(s: &str, limit: u32) -> bool {
    s.len() == 2 && parse_component(s, 2).is_some_and(|v| v < limit)
}

/// Parse a one- or two-digit clock component with at least `min_len` digits.
fn parse_component(s: &str, min_len: usize) -> Option<u32> {
    if s.len() < min_len || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
