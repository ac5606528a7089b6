//! Climatological baseline attached to each daily point.

use crate::point::DailyPoint;
use chrono::NaiveDate;

/// Baseline band for one day (°C).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Baseline {
    pub mean: f64,
    pub std_dev_upper: f64,
    pub std_dev_lower: f64,
    pub max: f64,
    pub min: f64,
}

impl Baseline {
    /// Build the daily point carrying this baseline.
    pub fn daily_point(&self, date: NaiveDate, temperature: f64) -> DailyPoint {
        DailyPoint {
            date,
            temperature,
            baseline_mean: self.mean,
            baseline_std_dev_upper: self.std_dev_upper,
            baseline_std_dev_lower: self.std_dev_lower,
            baseline_max: self.max,
            baseline_min: self.min,
        }
    }
}

/// Supplies the baseline for a day given that day's indicator value.
pub trait BaselineProvider {
    fn baseline_for(&self, day: NaiveDate, temperature: f64) -> Baseline;
}

/// Stand-in baseline until the 1991-2020 climatology is available:
/// `mean = temperature - 1` and fixed bounds (zero by default).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaceholderBaseline {
    pub std_dev_upper: f64,
    pub std_dev_lower: f64,
    pub max: f64,
    pub min: f64,
}

impl BaselineProvider for PlaceholderBaseline {
    fn baseline_for(&self, _day: NaiveDate, temperature: f64) -> Baseline {
        Baseline {
            mean: temperature - 1.0,
            std_dev_upper: self.std_dev_upper,
            std_dev_lower: self.std_dev_lower,
            max: self.max,
            min: self.min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_mean_is_one_below_temperature() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let baseline = PlaceholderBaseline::default().baseline_for(day, 11.5);
        assert_eq!(baseline.mean, 10.5);
        assert_eq!(baseline.std_dev_upper, 0.0);
        assert_eq!(baseline.std_dev_lower, 0.0);
        assert_eq!(baseline.max, 0.0);
        assert_eq!(baseline.min, 0.0);
    }

    #[test]
    fn baseline_builds_daily_point() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let baseline = Baseline {
            mean: 5.0,
            std_dev_upper: 6.0,
            std_dev_lower: 4.0,
            max: 9.0,
            min: 1.0,
        };
        let point = baseline.daily_point(day, 5.5);
        assert_eq!(point.date, day);
        assert_eq!(point.temperature, 5.5);
        assert_eq!(point.baseline_max, 9.0);
        assert_eq!(point.baseline_min, 1.0);
    }
}
