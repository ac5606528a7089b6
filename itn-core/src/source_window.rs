use crate::date_range::iter_years_intersecting;
use crate::error::{IndicatorError, Result};
use crate::query::{Granularity, SliceType};
use chrono::NaiveDate;
use itn_utils::dates::last_day_of_month;

/// Window of daily data needed to answer a request.
///
/// Usually the request window itself. For a yearly series targeting one
/// month (`month_of_year` or `day_of_month` slices) the target month of the
/// first or last intersecting year may fall outside the request, so the
/// window is widened to run from the target month of the first year through
/// the end of the target month of the last year.
pub fn compute_source_window(
    date_start: NaiveDate,
    date_end: NaiveDate,
    granularity: Granularity,
    slice_type: SliceType,
    month_of_year: Option<u32>,
) -> Result<(NaiveDate, NaiveDate)> {
    let targets_month = matches!(slice_type, SliceType::MonthOfYear | SliceType::DayOfMonth);
    if granularity != Granularity::Year || !targets_month {
        return Ok((date_start, date_end));
    }

    let month = month_of_year.ok_or(IndicatorError::MissingSelector("month_of_year"))?;
    let years = iter_years_intersecting(date_start, date_end);
    let (first, last) = (*years.start(), *years.end());
    if first > last {
        return Err(IndicatorError::EmptyWindow {
            start: date_start,
            end: date_end,
        });
    }

    let start = NaiveDate::from_ymd_opt(first, month, 1)
        .ok_or(IndicatorError::InvalidAnchor { year: first, month })?;
    let end = last_day_of_month(last, month)
        .and_then(|day| NaiveDate::from_ymd_opt(last, month, day))
        .ok_or(IndicatorError::InvalidAnchor { year: last, month })?;

    log::debug!("source window widened: {date_start}..={date_end} -> {start}..={end}");
    Ok((start, end))
}
