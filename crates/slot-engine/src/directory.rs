//! Data-source seam for per-sitter entity collections.
//!
//! The computation never reaches for a global store. Callers hand it a
//! [`SitterDirectory`]; the `plan_*` functions fetch through it and run the
//! pure computation. A fetch failure aborts the whole plan and is returned to
//! the caller unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{compute_boarding_slots, compute_walking_slots_with, OverlapPolicy};
use crate::error::{Result, SlotError};
use crate::history::{partition_bookings, BookingLists};
use crate::model::{
    AvailabilitySlot, BoardingAvailabilityDay, ExistingBoardingBooking, ExistingBooking,
    SitterCapacity, UnavailabilityDate, WeeklyAvailabilityRule,
};

/// Source of the entity collections for one sitter.
pub trait SitterDirectory {
    type Error: std::error::Error;

    fn weekly_rules(
        &self,
        sitter_id: &str,
    ) -> std::result::Result<Vec<WeeklyAvailabilityRule>, Self::Error>;

    fn unavailable_dates(
        &self,
        sitter_id: &str,
    ) -> std::result::Result<Vec<UnavailabilityDate>, Self::Error>;

    fn walking_bookings(
        &self,
        sitter_id: &str,
    ) -> std::result::Result<Vec<ExistingBooking>, Self::Error>;

    fn boarding_days(
        &self,
        sitter_id: &str,
    ) -> std::result::Result<Vec<BoardingAvailabilityDay>, Self::Error>;

    fn boarding_bookings(
        &self,
        sitter_id: &str,
    ) -> std::result::Result<Vec<ExistingBoardingBooking>, Self::Error>;

    fn capacity(
        &self,
        sitter_id: &str,
    ) -> std::result::Result<SitterCapacity, Self::Error>;
}

/// Walking slots for `sitter_id` over the horizon starting at `today`.
pub fn plan_walking<D: SitterDirectory>(
    directory: &D,
    sitter_id: &str,
    today: NaiveDate,
    policy: OverlapPolicy,
) -> std::result::Result<Vec<AvailabilitySlot>, D::Error> {
    let rules = directory.weekly_rules(sitter_id)?;
    let unavailable = directory.unavailable_dates(sitter_id)?;
    let bookings = directory.walking_bookings(sitter_id)?;
    Ok(compute_walking_slots_with(
        &rules,
        &unavailable,
        &bookings,
        today,
        policy,
    ))
}

/// Boarding nights with remaining capacity for `sitter_id`.
pub fn plan_boarding<D: SitterDirectory>(
    directory: &D,
    sitter_id: &str,
) -> std::result::Result<Vec<AvailabilitySlot>, D::Error> {
    let days = directory.boarding_days(sitter_id)?;
    let bookings = directory.boarding_bookings(sitter_id)?;
    let capacity = directory.capacity(sitter_id)?;
    Ok(compute_boarding_slots(&days, &bookings, capacity.max_dogs_boarding))
}

/// Upcoming and past walking bookings for `sitter_id`.
pub fn plan_history<D: SitterDirectory>(
    directory: &D,
    sitter_id: &str,
    today: NaiveDate,
) -> std::result::Result<BookingLists, D::Error> {
    let bookings = directory.walking_bookings(sitter_id)?;
    Ok(partition_bookings(&bookings, today))
}

/// A serialized bundle of entity collections, possibly for several sitters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitterSnapshot {
    #[serde(default)]
    pub weekly_rules: Vec<WeeklyAvailabilityRule>,
    #[serde(default)]
    pub unavailable_dates: Vec<UnavailabilityDate>,
    #[serde(default)]
    pub bookings: Vec<ExistingBooking>,
    #[serde(default)]
    pub boarding_days: Vec<BoardingAvailabilityDay>,
    #[serde(default)]
    pub boarding_bookings: Vec<ExistingBoardingBooking>,
    #[serde(default)]
    pub capacities: Vec<SitterCapacity>,
}

impl SitterSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// In-memory [`SitterDirectory`] over a [`SitterSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    snapshot: SitterSnapshot,
}

impl MemoryDirectory {
    pub fn new(snapshot: SitterSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &SitterSnapshot {
        &self.snapshot
    }
}

fn rows_for<T: Clone>(rows: &[T], sitter_id: &str, owner: impl Fn(&T) -> &str) -> Vec<T> {
    rows.iter().filter(|row| owner(*row) == sitter_id).cloned().collect()
}

impl SitterDirectory for MemoryDirectory {
    type Error = SlotError;

    fn weekly_rules(&self, sitter_id: &str) -> Result<Vec<WeeklyAvailabilityRule>> {
        Ok(rows_for(&self.snapshot.weekly_rules, sitter_id, |r| r.sitter_id.as_str()))
    }

    fn unavailable_dates(&self, sitter_id: &str) -> Result<Vec<UnavailabilityDate>> {
        Ok(rows_for(&self.snapshot.unavailable_dates, sitter_id, |r| r.sitter_id.as_str()))
    }

    fn walking_bookings(&self, sitter_id: &str) -> Result<Vec<ExistingBooking>> {
        Ok(rows_for(&self.snapshot.bookings, sitter_id, |r| r.sitter_id.as_str()))
    }

    fn boarding_days(&self, sitter_id: &str) -> Result<Vec<BoardingAvailabilityDay>> {
        Ok(rows_for(&self.snapshot.boarding_days, sitter_id, |r| r.sitter_id.as_str()))
    }

    fn boarding_bookings(&self, sitter_id: &str) -> Result<Vec<ExistingBoardingBooking>> {
        Ok(rows_for(&self.snapshot.boarding_bookings, sitter_id, |r| r.sitter_id.as_str()))
    }

    fn capacity(&self, sitter_id: &str) -> Result<SitterCapacity> {
        self.snapshot
            .capacities
            .iter()
            .find(|c| c.sitter_id == sitter_id)
            .cloned()
            .ok_or_else(|| SlotError::MissingCapacity(sitter_id.to_string()))
    }
}
