//! Error types for slot-engine operations.
//!
//! Malformed dates and times are deliberately absent here: the normalizer turns
//! them into `None` and the offending record is excluded from the computation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("No boarding capacity on record for sitter {0}")]
    MissingCapacity(String),

    #[error("Invalid sitter snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
