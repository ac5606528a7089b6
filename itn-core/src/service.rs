//! National indicator orchestration: window, fetch, slice, aggregate, shape.

use crate::aggregation::aggregate;
use crate::error::Result;
use crate::point::OutputPoint;
use crate::query::{Granularity, IndicatorQuery, SliceType};
use crate::slicing::apply_slice;
use crate::source::DailySeriesSource;
use crate::source_window::compute_source_window;
use itn_utils::dates::format_date;
use itn_utils::numbers::round2;
use serde::{Deserialize, Serialize};

/// Reference period label reported in response metadata.
pub const BASELINE_PERIOD: &str = "1991-2020";

/// One point of the response series: ISO date, values rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub temperature: f64,
    pub baseline_mean: f64,
    pub baseline_std_dev_upper: f64,
    pub baseline_std_dev_lower: f64,
    pub baseline_max: f64,
    pub baseline_min: f64,
}

impl From<&OutputPoint> for TimeSeriesPoint {
    fn from(p: &OutputPoint) -> Self {
        TimeSeriesPoint {
            date: format_date(&p.date),
            temperature: round2(p.temperature),
            baseline_mean: round2(p.baseline_mean),
            baseline_std_dev_upper: round2(p.baseline_std_dev_upper),
            baseline_std_dev_lower: round2(p.baseline_std_dev_lower),
            baseline_max: round2(p.baseline_max),
            baseline_min: round2(p.baseline_min),
        }
    }
}

/// `{"time_series": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPayload {
    pub time_series: Vec<TimeSeriesPoint>,
}

/// Echo of the request attached to the full response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub date_start: String,
    pub date_end: String,
    pub baseline: String,
    pub granularity: Granularity,
    pub slice_type: SliceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

impl From<&IndicatorQuery> for ResponseMetadata {
    fn from(q: &IndicatorQuery) -> Self {
        ResponseMetadata {
            date_start: format_date(&q.date_start),
            date_end: format_date(&q.date_end),
            baseline: BASELINE_PERIOD.to_string(),
            granularity: q.granularity,
            slice_type: q.slice_type,
            month_of_year: q.month_of_year,
            day_of_month: q.day_of_month,
        }
    }
}

/// `{"metadata": {...}, "time_series": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalIndicatorResponse {
    pub metadata: ResponseMetadata,
    pub time_series: Vec<TimeSeriesPoint>,
}

/// Run the pipeline and return full-precision output points.
pub fn compute_output_points<S>(source: &S, query: &IndicatorQuery) -> Result<Vec<OutputPoint>>
where
    S: DailySeriesSource + ?Sized,
{
    let (src_start, src_end) = compute_source_window(
        query.date_start,
        query.date_end,
        query.granularity,
        query.slice_type,
        query.month_of_year,
    )?;

    let daily = source.fetch_daily_series(src_start, src_end)?;
    let fetched = daily.len();

    let sliced = apply_slice(
        daily,
        query.granularity,
        query.slice_type,
        query.month_of_year,
        query.day_of_month,
    )?;

    let points = aggregate(
        &sliced,
        query.date_start,
        query.date_end,
        query.granularity,
        query.slice_type,
        query.month_of_year,
    )?;

    log::info!(
        "national indicator {}..={} granularity={} slice={}: {} daily, {} sliced, {} points",
        query.date_start,
        query.date_end,
        query.granularity,
        query.slice_type,
        fetched,
        sliced.len(),
        points.len()
    );
    Ok(points)
}

/// Compute the indicator series for a validated request.
pub fn compute_national_indicator<S>(source: &S, query: &IndicatorQuery) -> Result<TimeSeriesPayload>
where
    S: DailySeriesSource + ?Sized,
{
    let points = compute_output_points(source, query)?;
    Ok(TimeSeriesPayload {
        time_series: points.iter().map(TimeSeriesPoint::from).collect(),
    })
}

/// Compute the indicator series wrapped with request metadata.
pub fn national_indicator_response<S>(
    source: &S,
    query: &IndicatorQuery,
) -> Result<NationalIndicatorResponse>
where
    S: DailySeriesSource + ?Sized,
{
    let payload = compute_national_indicator(source, query)?;
    Ok(NationalIndicatorResponse {
        metadata: ResponseMetadata::from(query),
        time_series: payload.time_series,
    })
}
