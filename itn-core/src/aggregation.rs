//! Aggregation of a sliced daily series into output buckets.
//!
//! Buckets are the calendar months or years intersecting the request
//! window, not just those with data. Empty buckets are skipped.
//!
//! Reduction per bucket:
//! - arithmetic mean of `temperature`, `baseline_mean` and both std bands;
//! - min/max envelope of `baseline_min`/`baseline_max`.
//!
//! Values keep full precision here; rounding happens when shaping the
//! response.

use crate::date_range::{iter_month_starts_intersecting, iter_years_intersecting};
use crate::error::{IndicatorError, Result};
use crate::point::{DailyPoint, OutputPoint};
use crate::query::{Granularity, SliceType};
use chrono::{Datelike, NaiveDate};

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    sum / count as f64
}

/// Reduce a non-empty bucket to one point dated `anchor`.
fn aggregate_bucket(anchor: NaiveDate, points: &[&DailyPoint]) -> OutputPoint {
    OutputPoint {
        date: anchor,
        temperature: mean(points.iter().map(|p| p.temperature)),
        baseline_mean: mean(points.iter().map(|p| p.baseline_mean)),
        baseline_std_dev_upper: mean(points.iter().map(|p| p.baseline_std_dev_upper)),
        baseline_std_dev_lower: mean(points.iter().map(|p| p.baseline_std_dev_lower)),
        baseline_max: points
            .iter()
            .map(|p| p.baseline_max)
            .fold(f64::NEG_INFINITY, f64::max),
        baseline_min: points
            .iter()
            .map(|p| p.baseline_min)
            .fold(f64::INFINITY, f64::min),
    }
}

/// Group `sliced` into buckets of the requested granularity and reduce each.
pub fn aggregate(
    sliced: &[DailyPoint],
    date_start: NaiveDate,
    date_end: NaiveDate,
    granularity: Granularity,
    slice_type: SliceType,
    month_of_year: Option<u32>,
) -> Result<Vec<OutputPoint>> {
    match (granularity, slice_type) {
        // already one point per output date
        (Granularity::Day, _) | (_, SliceType::DayOfMonth) => {
            Ok(sliced.iter().map(OutputPoint::from).collect())
        }
        (Granularity::Month, _) => Ok(monthly_buckets(sliced, date_start, date_end)),
        (Granularity::Year, SliceType::MonthOfYear) => {
            let month = month_of_year.ok_or(IndicatorError::MissingSelector("month_of_year"))?;
            yearly_buckets(sliced, date_start, date_end, month)
        }
        (Granularity::Year, SliceType::Full) => yearly_buckets(sliced, date_start, date_end, 1),
    }
}

fn monthly_buckets(
    sliced: &[DailyPoint],
    date_start: NaiveDate,
    date_end: NaiveDate,
) -> Vec<OutputPoint> {
    let mut out = Vec::new();
    for month_start in iter_month_starts_intersecting(date_start, date_end) {
        let (year, month) = (month_start.year(), month_start.month());
        let points: Vec<&DailyPoint> = sliced
            .iter()
            .filter(|p| p.date.year() == year && p.date.month() == month)
            .collect();
        if points.is_empty() {
            // a slice may empty a whole month
            continue;
        }
        out.push(aggregate_bucket(month_start, &points));
    }
    out
}

fn yearly_buckets(
    sliced: &[DailyPoint],
    date_start: NaiveDate,
    date_end: NaiveDate,
    anchor_month: u32,
) -> Result<Vec<OutputPoint>> {
    let mut out = Vec::new();
    for year in iter_years_intersecting(date_start, date_end) {
        let points: Vec<&DailyPoint> = sliced.iter().filter(|p| p.date.year() == year).collect();
        if points.is_empty() {
            continue;
        }
        let anchor = NaiveDate::from_ymd_opt(year, anchor_month, 1).ok_or(
            IndicatorError::InvalidAnchor {
                year,
                month: anchor_month,
            },
        )?;
        out.push(aggregate_bucket(anchor, &points));
    }
    Ok(out)
}
