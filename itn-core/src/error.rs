/// Error types for the national indicator pipeline
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for indicator computation.
///
/// Incomplete station panels are not errors: those days are dropped by the
/// daily series source and never reach this type.
#[derive(Error, Debug)]
pub enum IndicatorError {
    /// The day selected by a day-of-month slice is absent from the fetched series
    #[error("Day {day} not found in daily series for {period}")]
    SliceTargetMissing { day: u32, period: String },

    /// A selector required by the requested slice was not supplied
    #[error("Missing selector for the requested slice: {0}")]
    MissingSelector(&'static str),

    /// A bucket anchor could not be built as a calendar date
    #[error("Invalid bucket anchor: {year}-{month:02}")]
    InvalidAnchor { year: i32, month: u32 },

    /// The requested window is empty (start after end)
    #[error("Empty date window: {start} > {end}")]
    EmptyWindow { start: NaiveDate, end: NaiveDate },

    /// The daily series source failed to read its backing storage
    #[error(transparent)]
    DataSource(#[from] anyhow::Error),
}

/// Type alias for Results using IndicatorError
pub type Result<T> = std::result::Result<T, IndicatorError>;
