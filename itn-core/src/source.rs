//! Daily series sources for the national indicator.
//!
//! A source turns an inclusive date window into one [`DailyPoint`] per valid
//! day. The orchestrator only sees the [`DailySeriesSource`] capability, so
//! the synthetic generator below and the stored source in `itn-db` are
//! interchangeable.

use crate::date_range::iter_days_intersecting;
use crate::error::Result;
use crate::point::DailyPoint;
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::collections::HashSet;
use std::f64::consts::PI;

/// Default seed of the synthetic generator.
pub const DEFAULT_SEED: u64 = 42;

/// Anything able to produce the daily indicator series for a window.
///
/// Returned points are sorted by date with no duplicates. Days that could
/// not be computed are absent, not errors.
pub trait DailySeriesSource {
    fn fetch_daily_series(&self, date_start: NaiveDate, date_end: NaiveDate)
        -> Result<Vec<DailyPoint>>;
}

impl<F> DailySeriesSource for F
where
    F: Fn(NaiveDate, NaiveDate) -> Result<Vec<DailyPoint>>,
{
    fn fetch_daily_series(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<DailyPoint>> {
        self(date_start, date_end)
    }
}

/// Deterministic generator: a seasonal climatology plus Gaussian noise.
///
/// The same seed and window always produce the same series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticDailySeries {
    pub seed: u64,
}

impl Default for SyntheticDailySeries {
    fn default() -> Self {
        SyntheticDailySeries { seed: DEFAULT_SEED }
    }
}

impl SyntheticDailySeries {
    pub fn new(seed: u64) -> Self {
        SyntheticDailySeries { seed }
    }
}

/// Synthetic climatology for one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climatology {
    pub mean: f64,
    pub sigma: f64,
    pub min: f64,
    pub max: f64,
}

/// Seasonal climatology: annual mean 13 °C with a 6 °C sine amplitude whose
/// phase origin is January 15. The spread widens as the mean drops.
pub fn climatology_for_date(date: NaiveDate) -> Climatology {
    let doy = f64::from(date.ordinal());
    let phi = 2.0 * PI * (doy - 15.0) / 365.25;

    let mean = 13.0 + 6.0 * phi.sin();
    let sigma = 1.6 + 0.6 * (1.0 - phi.sin()) / 2.0;
    let envelope = 3.0 * sigma + 1.0;

    Climatology {
        mean,
        sigma,
        min: mean - envelope,
        max: mean + envelope,
    }
}

impl DailySeriesSource for SyntheticDailySeries {
    fn fetch_daily_series(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<DailyPoint>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut out = Vec::new();

        for date in iter_days_intersecting(date_start, date_end) {
            let clim = climatology_for_date(date);
            let noise = Normal::new(0.0, clim.sigma)
                .map_err(|e| anyhow::anyhow!("invalid climatology spread on {date}: {e}"))?;
            let temperature = clim.mean + noise.sample(&mut rng);

            out.push(DailyPoint {
                date,
                temperature,
                baseline_mean: clim.mean,
                baseline_std_dev_upper: clim.mean + clim.sigma,
                baseline_std_dev_lower: clim.mean - clim.sigma,
                baseline_max: clim.max,
                baseline_min: clim.min,
            });
        }

        log::debug!(
            "synthetic series: {} points for {date_start}..={date_end} (seed {})",
            out.len(),
            self.seed
        );
        Ok(out)
    }
}

/// Days of `[date_start, date_end]` with no point in `series`.
///
/// Lets a caller tell an empty window from one thinned by incomplete panels.
pub fn missing_days(
    series: &[DailyPoint],
    date_start: NaiveDate,
    date_end: NaiveDate,
) -> Vec<NaiveDate> {
    let present: HashSet<NaiveDate> = series.iter().map(|p| p.date).collect();
    iter_days_intersecting(date_start, date_end)
        .filter(|day| !present.contains(day))
        .collect()
}
