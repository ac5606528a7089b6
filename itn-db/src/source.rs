//! Daily series built from stored station records.
//!
//! A day contributes a point only when its station panel is exactly the 30
//! expected stations. Incomplete or contaminated days are dropped and
//! logged, never reported as errors.

use crate::models::StationDailyMean;
use crate::Database;
use chrono::NaiveDate;
use itn_core::baseline::{BaselineProvider, PlaceholderBaseline};
use itn_core::error::Result;
use itn_core::point::DailyPoint;
use itn_core::source::DailySeriesSource;
use itn_core::stations::{
    expected_station_codes, itn_station_codes_for_query, other_reims_code, PANEL_SIZE,
};
use itn_utils::dates::{format_date, parse_date};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// National indicator value for one day, or `None` if the panel is invalid.
///
/// The decommissioned Reims station is ignored when present. The remaining
/// codes must match the expected panel exactly; the value is their sum
/// divided by 30.
pub fn compute_itn_for_day(day: NaiveDate, values: &HashMap<String, f64>) -> Option<f64> {
    let other = other_reims_code(day);
    let expected = expected_station_codes(day);
    let present: BTreeSet<&str> = values
        .keys()
        .map(String::as_str)
        .filter(|code| *code != other)
        .collect();
    if present != expected {
        return None;
    }

    // summed in code order so the result does not depend on map layout
    let sum: f64 = expected
        .iter()
        .filter_map(|code| values.get(*code))
        .sum();
    Some(sum / PANEL_SIZE as f64)
}

/// Why a day's panel was rejected, for logging.
fn panel_mismatch(day: NaiveDate, values: &HashMap<String, f64>) -> String {
    let other = other_reims_code(day);
    let expected = expected_station_codes(day);
    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|code| !values.contains_key(*code))
        .collect();
    let extra: Vec<&str> = values
        .keys()
        .map(String::as_str)
        .filter(|code| *code != other && !expected.contains(code))
        .collect();
    format!("missing {missing:?}, unexpected {extra:?}")
}

type PanelsByDay = BTreeMap<NaiveDate, HashMap<String, f64>>;

/// Group ordered rows by day. A station seen twice on a day keeps its last value.
fn group_by_day(rows: Vec<StationDailyMean>) -> anyhow::Result<PanelsByDay> {
    let mut by_day = PanelsByDay::new();
    for row in rows {
        let day = parse_date(&row.date)?;
        by_day.entry(day).or_default().insert(row.station_code, row.tntxm);
    }
    Ok(by_day)
}

/// Daily series source reading station records from a [`Database`].
#[derive(Clone)]
pub struct StoredDailySeries<B = PlaceholderBaseline> {
    db: Database,
    baseline: B,
}

impl StoredDailySeries {
    pub fn new(db: Database) -> Self {
        Self::with_baseline(db, PlaceholderBaseline::default())
    }
}

impl<B: BaselineProvider> StoredDailySeries<B> {
    pub fn with_baseline(db: Database, baseline: B) -> Self {
        StoredDailySeries { db, baseline }
    }
}

impl<B: BaselineProvider> DailySeriesSource for StoredDailySeries<B> {
    fn fetch_daily_series(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<DailyPoint>> {
        let codes = itn_station_codes_for_query();
        let rows = self.db.query_daily_means(
            &format_date(&date_start),
            &format_date(&date_end),
            &codes,
        )?;
        let row_count = rows.len();
        let by_day = group_by_day(rows)?;

        let mut points = Vec::with_capacity(by_day.len());
        let mut dropped = 0usize;
        for (day, values) in &by_day {
            match compute_itn_for_day(*day, values) {
                Some(temperature) => {
                    let baseline = self.baseline.baseline_for(*day, temperature);
                    points.push(baseline.daily_point(*day, temperature));
                }
                None => {
                    dropped += 1;
                    log::debug!(
                        "dropping {day}: incomplete panel ({})",
                        panel_mismatch(*day, values)
                    );
                }
            }
        }

        log::info!(
            "stored series {date_start}..={date_end}: {row_count} rows, {} days kept, {dropped} dropped",
            points.len()
        );
        Ok(points)
    }
}
