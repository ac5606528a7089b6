use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of indicator data, as produced by a daily series source.
///
/// A series holds at most one point per date, and only for days whose
/// station panel was complete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    /// National indicator value for the day (°C).
    pub temperature: f64,
    pub baseline_mean: f64,
    pub baseline_std_dev_upper: f64,
    pub baseline_std_dev_lower: f64,
    pub baseline_max: f64,
    pub baseline_min: f64,
}

/// One point of the output series.
///
/// `date` is the bucket anchor (first day of the month or year, or the one
/// selected day) and the values are reductions over the bucket's points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputPoint {
    pub date: NaiveDate,
    pub temperature: f64,
    pub baseline_mean: f64,
    pub baseline_std_dev_upper: f64,
    pub baseline_std_dev_lower: f64,
    pub baseline_max: f64,
    pub baseline_min: f64,
}

impl OutputPoint {
    /// Carry a daily point through unchanged, re-dated to `anchor`.
    pub fn anchored(point: &DailyPoint, anchor: NaiveDate) -> Self {
        OutputPoint {
            date: anchor,
            temperature: point.temperature,
            baseline_mean: point.baseline_mean,
            baseline_std_dev_upper: point.baseline_std_dev_upper,
            baseline_std_dev_lower: point.baseline_std_dev_lower,
            baseline_max: point.baseline_max,
            baseline_min: point.baseline_min,
        }
    }
}

impl From<&DailyPoint> for OutputPoint {
    fn from(point: &DailyPoint) -> Self {
        OutputPoint::anchored(point, point.date)
    }
}
