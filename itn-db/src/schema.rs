//! SQL schema for the in-memory database, applied as one batch.

/// Returns the full SQL schema as a single batch string.
///
/// - `stations` - station code, name, department, coordinates, altitude
/// - `daily_records` - one row per (station, day): `tn`, `tx` and the daily
///   mean `tntxm`, any of which may be NULL
///
/// Dates are stored as ISO `YYYY-MM-DD` text so range filters and ordering
/// work lexicographically.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS stations (
        code TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        department TEXT,
        latitude REAL,
        longitude REAL,
        altitude REAL
    );

    CREATE TABLE IF NOT EXISTS daily_records (
        station_code TEXT NOT NULL,
        date TEXT NOT NULL,
        tn REAL,
        tx REAL,
        tntxm REAL,
        PRIMARY KEY (station_code, date)
    );
    CREATE INDEX IF NOT EXISTS idx_daily_station ON daily_records(station_code);
    CREATE INDEX IF NOT EXISTS idx_daily_date ON daily_records(date);
    "#
}
