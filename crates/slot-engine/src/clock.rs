//! Sitter-local calendar date.
//!
//! Every calendar decision (horizon start, weekday matching, blocked dates)
//! uses the sitter's local calendar date. The instant is converted once, here,
//! and everything downstream works on naive dates.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// The calendar date at `now` in the IANA `timezone` (e.g. "America/Chicago").
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if the timezone is not a valid IANA identifier.
pub fn local_today(now: DateTime<Utc>, timezone: &str) -> Result<NaiveDate> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))?;
    Ok(now.with_timezone(&tz).date_naive())
}
