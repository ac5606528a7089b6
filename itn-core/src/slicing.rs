//! Slicing: which days of the daily series take part in the output.
//!
//! - `full`: every day.
//! - `month_of_year`: every day of one month, across years.
//! - `day_of_month`: one day per month (monthly series) or one day per year
//!   in a given month (yearly series). The day is clamped to the month's
//!   length, so day 31 selects Feb 29 in 2024.

use crate::error::{IndicatorError, Result};
use crate::point::DailyPoint;
use crate::query::{Granularity, SliceType};
use chrono::Datelike;
use itn_utils::dates::clamp_day_to_month_end;
use std::collections::BTreeMap;

/// Reduce `daily` to the days selected by the slice.
///
/// A day-of-month selection whose target day is missing from the series is
/// an error: the source window was supposed to contain it.
pub fn apply_slice(
    daily: Vec<DailyPoint>,
    granularity: Granularity,
    slice_type: SliceType,
    month_of_year: Option<u32>,
    day_of_month: Option<u32>,
) -> Result<Vec<DailyPoint>> {
    match slice_type {
        SliceType::Full => Ok(daily),
        SliceType::MonthOfYear => {
            let month = month_of_year.ok_or(IndicatorError::MissingSelector("month_of_year"))?;
            Ok(daily.into_iter().filter(|p| p.date.month() == month).collect())
        }
        SliceType::DayOfMonth => {
            let day = day_of_month.ok_or(IndicatorError::MissingSelector("day_of_month"))?;
            match granularity {
                Granularity::Month => select_day_per_month(&daily, day),
                Granularity::Year => {
                    let month =
                        month_of_year.ok_or(IndicatorError::MissingSelector("month_of_year"))?;
                    select_day_per_year(&daily, month, day)
                }
                // rejected at the boundary; nothing to select
                Granularity::Day => Ok(daily),
            }
        }
    }
}

fn select_day_per_month(daily: &[DailyPoint], day: u32) -> Result<Vec<DailyPoint>> {
    let mut by_month: BTreeMap<(i32, u32), Vec<&DailyPoint>> = BTreeMap::new();
    for point in daily {
        by_month
            .entry((point.date.year(), point.date.month()))
            .or_default()
            .push(point);
    }

    let mut selected = Vec::with_capacity(by_month.len());
    for ((year, month), points) in by_month {
        let target = clamp_day_to_month_end(year, month, day)
            .ok_or(IndicatorError::InvalidAnchor { year, month })?;
        let chosen = points
            .into_iter()
            .find(|p| p.date.day() == target)
            .ok_or_else(|| IndicatorError::SliceTargetMissing {
                day: target,
                period: format!("{year}-{month:02}"),
            })?;
        selected.push(*chosen);
    }
    Ok(selected)
}

fn select_day_per_year(daily: &[DailyPoint], month: u32, day: u32) -> Result<Vec<DailyPoint>> {
    let mut by_year: BTreeMap<i32, Vec<&DailyPoint>> = BTreeMap::new();
    for point in daily {
        by_year.entry(point.date.year()).or_default().push(point);
    }

    let mut selected = Vec::with_capacity(by_year.len());
    for (year, points) in by_year {
        let target = clamp_day_to_month_end(year, month, day)
            .ok_or(IndicatorError::InvalidAnchor { year, month })?;
        let chosen = points
            .into_iter()
            .find(|p| p.date.month() == month && p.date.day() == target)
            .ok_or_else(|| IndicatorError::SliceTargetMissing {
                day: target,
                period: year.to_string(),
            })?;
        selected.push(*chosen);
    }
    Ok(selected)
}
