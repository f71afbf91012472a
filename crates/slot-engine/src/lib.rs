//! # slot-engine
//!
//! Deterministic walking and boarding availability for pet sitters.
//!
//! Given a sitter's weekly availability rules, blocked-out dates, existing
//! bookings and boarding capacity, the engine produces the display-ready list
//! of bookable slots for the next 14 days. It is a pure, synchronous transform:
//! inputs in, freshly built slot list out, nothing cached between calls.
//!
//! ## Modules
//!
//! - [`normalize`] — raw date/time strings → canonical dates and minutes
//! - [`conflict`] — half-open window overlap and the per-date booking index
//! - [`expander`] — weekly rules → dated candidate windows over the horizon
//! - [`availability`] — booking-aware filtering for walking and boarding
//! - [`freebusy`] — free sub-windows around booked time
//! - [`format`] — display strings and upcoming/history ordering
//! - [`history`] — upcoming vs. past booking lists
//! - [`directory`] — data-source trait, snapshot document, `plan_*` entry points
//! - [`clock`] — sitter-local calendar date
//! - [`model`] — entity types
//! - [`error`] — Error types

pub mod availability;
pub mod clock;
pub mod conflict;
pub mod directory;
pub mod error;
pub mod expander;
pub mod format;
pub mod freebusy;
pub mod history;
pub mod model;
pub mod normalize;

pub use availability::{
    booked_count, compute_boarding_slots, compute_walking_slots, compute_walking_slots_with,
    OverlapPolicy, BOARDING_NIGHTLY_PRICE,
};
pub use clock::local_today;
pub use conflict::{overlaps, BookingIndex, TimeWindow};
pub use directory::{
    plan_boarding, plan_history, plan_walking, MemoryDirectory, SitterDirectory, SitterSnapshot,
};
pub use error::SlotError;
pub use expander::{expand_weekly, HORIZON_DAYS};
pub use format::{sort_slots, Scheduled, SortOrder};
pub use history::{partition_bookings, BookingLists};
pub use model::{
    AvailabilitySlot, BoardingAvailabilityDay, BookingStatus, ExistingBoardingBooking,
    ExistingBooking, SitterCapacity, SlotKind, UnavailabilityDate, WeeklyAvailabilityRule,
};
pub use normalize::{normalize_date, normalize_time, AsDateKey};
