//! Query result models. All derive `Serialize` for JSON output.

use serde::Serialize;

/// Station metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationInfo {
    /// Météo-France station code (e.g. "51449002").
    pub code: String,
    pub name: String,
    pub department: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Metres above sea level.
    pub altitude: Option<f64>,
}

/// One stored day for one station (°C).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyRecord {
    pub station_code: String,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub tn: Option<f64>,
    pub tx: Option<f64>,
    pub tntxm: Option<f64>,
}

/// A non-null daily mean, as consumed by the stored daily series source.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationDailyMean {
    pub date: String,
    pub station_code: String,
    pub tntxm: f64,
}

/// First and last stored dates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordedPeriod {
    pub first: String,
    pub last: String,
}
