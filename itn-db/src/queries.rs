//! Typed queries over the station tables.
//!
//! Date arguments are ISO `YYYY-MM-DD` strings, bounds inclusive.

use crate::models::{DailyRecord, RecordedPeriod, StationDailyMean, StationInfo};
use crate::Database;
use rusqlite::{params, params_from_iter};

impl Database {
    /// Non-null daily means of the given stations, ordered by date then
    /// station code.
    pub fn query_daily_means(
        &self,
        start_date: &str,
        end_date: &str,
        station_codes: &[&str],
    ) -> anyhow::Result<Vec<StationDailyMean>> {
        if station_codes.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = (0..station_codes.len())
            .map(|i| format!("?{}", i + 3))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT date, station_code, tntxm FROM daily_records
             WHERE date >= ?1 AND date <= ?2
               AND tntxm IS NOT NULL
               AND station_code IN ({placeholders})
             ORDER BY date, station_code"
        );

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let bound = [start_date, end_date]
            .into_iter()
            .chain(station_codes.iter().copied());
        let rows = stmt
            .query_map(params_from_iter(bound), |row| {
                Ok(StationDailyMean {
                    date: row.get(0)?,
                    station_code: row.get(1)?,
                    tntxm: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_daily_means returned {} records", rows.len());
        Ok(rows)
    }

    /// All stations, ordered by code.
    pub fn query_stations(&self) -> anyhow::Result<Vec<StationInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT code, name, department, latitude, longitude, altitude
             FROM stations
             ORDER BY code",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StationInfo {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    department: row.get(2)?,
                    latitude: row.get(3)?,
                    longitude: row.get(4)?,
                    altitude: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_stations returned {} records", rows.len());
        Ok(rows)
    }

    /// Stored days for one station within a date range, oldest first.
    pub fn query_station_history(
        &self,
        station_code: &str,
        start_date: &str,
        end_date: &str,
    ) -> anyhow::Result<Vec<DailyRecord>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT station_code, date, tn, tx, tntxm FROM daily_records
             WHERE station_code = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date",
        )?;
        let rows = stmt
            .query_map(params![station_code, start_date, end_date], |row| {
                Ok(DailyRecord {
                    station_code: row.get(0)?,
                    date: row.get(1)?,
                    tn: row.get(2)?,
                    tx: row.get(3)?,
                    tntxm: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_station_history({}) returned {} records",
            station_code,
            rows.len()
        );
        Ok(rows)
    }

    /// First and last stored dates, or `None` when no records are loaded.
    pub fn query_date_range(&self) -> anyhow::Result<Option<RecordedPeriod>> {
        let conn = self.conn.borrow();
        let (first, last): (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM daily_records",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(first
            .zip(last)
            .map(|(first, last)| RecordedPeriod { first, last }))
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    fn seeded() -> Database {
        let db = Database::new().unwrap();
        db.load_stations(
            "code,name,department,latitude,longitude,altitude\n\
             51449002,Reims-Prunay,51,49.209,4.155,95\n\
             6088001,Nice,06,43.648,7.209,2\n",
        )
        .unwrap();
        db.load_daily_records(
            "51449002,20250102,0.5,7.5,4.0\n\
             6088001,20250101,7.1,13.9,10.5\n\
             51449002,20250101,-1.2,6.8,2.8\n\
             75114001,20250101,2.0,8.0,5.0\n\
             6088001,20250102,6.0,12.0,\n\
             51449002,20250110,1.0,3.0,2.0\n",
        )
        .unwrap();
        db
    }

    #[test]
    fn daily_means_are_ordered_and_filtered() {
        let db = seeded();
        let rows = db
            .query_daily_means("2025-01-01", "2025-01-02", &["51449002", "6088001"])
            .unwrap();
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.date.as_str(), r.station_code.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2025-01-01", "51449002"),
                ("2025-01-01", "6088001"),
                ("2025-01-02", "51449002"),
            ],
            "Ordered by date then code; NULL means, other stations and out-of-range days excluded"
        );
        assert!((rows[0].tntxm - 2.8).abs() < 1e-9);
    }

    #[test]
    fn daily_means_with_no_codes_is_empty() {
        let db = seeded();
        assert!(db.query_daily_means("2025-01-01", "2025-12-31", &[]).unwrap().is_empty());
    }

    #[test]
    fn stations_are_ordered_by_code() {
        let db = seeded();
        let codes: Vec<String> = db.query_stations().unwrap().into_iter().map(|s| s.code).collect();
        assert_eq!(codes, vec!["51449002", "6088001"], "Codes sort as text");
    }

    #[test]
    fn station_history_covers_the_range() {
        let db = seeded();
        let history = db
            .query_station_history("6088001", "2025-01-01", "2025-01-31")
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, "2025-01-01");
        assert_eq!(history[1].tntxm, None);
        assert_eq!(history[1].tx, Some(12.0));
    }

    #[test]
    fn date_range_spans_all_records() {
        let db = seeded();
        let period = db.query_date_range().unwrap().unwrap();
        assert_eq!(period.first, "2025-01-01");
        assert_eq!(period.last, "2025-01-10");
    }
}
