//! Settlement period temporal types
//!
//! A balance calculation covers the window `(start, end]`. The start is the
//! `period_end` of the previous finalized settlement, or `None` when no
//! settlement has ever been finalized ("since the beginning of the
//! household's history").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must be before end {end}")]
    InvalidPeriod { start: String, end: String },
}

/// The time window a balance calculation covers
///
/// The window is open at the start and closed at the end: an expense created
/// exactly at `start` belongs to the previous period (it was already settled),
/// while one created exactly at `end` is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPeriod {
    /// Start of the period (exclusive); None means since inception
    pub start: Option<DateTime<Utc>>,
    /// End of the period (inclusive) - the instant balances were computed
    pub end: DateTime<Utc>,
}

impl SettlementPeriod {
    /// Creates a bounded period anchored at a previous settlement's end
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        if start >= end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start: Some(start),
            end,
        })
    }

    /// Creates an open-ended period covering all history up to `end`
    pub fn since_inception(end: DateTime<Utc>) -> Self {
        Self { start: None, end }
    }

    /// Returns true if the instant falls inside this period
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let after_start = match self.start {
            Some(start) => instant > start,
            None => true,
        };
        after_start && instant <= self.end
    }
}
