//! CSV loaders for populating the in-memory database.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `code,name,department,latitude,longitude,altitude`
//! - **Daily records** (no headers): `station_code,date(YYYYMMDD),tn,tx,tntxm`

use crate::Database;
use itn_utils::dates::{format_date, parse_date_compact};
use rusqlite::params;

fn optional_number(field: Option<&str>) -> Option<f64> {
    field.and_then(|s| s.trim().parse().ok())
}

fn optional_text(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

impl Database {
    /// Load station metadata from a CSV string.
    ///
    /// Rows without a code are skipped. A station loaded twice keeps the
    /// last row.
    ///
    /// # Example CSV
    /// ```text
    /// code,name,department,latitude,longitude,altitude
    /// 51449002,Reims-Prunay,51,49.209,4.155,95
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let code = r.get(0).unwrap_or("").trim();
            if code.is_empty() {
                skipped += 1;
                continue;
            }
            let name = r.get(1).unwrap_or("").trim();
            let department = optional_text(r.get(2));
            let latitude = optional_number(r.get(3));
            let longitude = optional_number(r.get(4));
            let altitude = optional_number(r.get(5));

            conn.execute(
                "INSERT OR REPLACE INTO stations (code, name, department, latitude, longitude, altitude)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![code, name, department, latitude, longitude, altitude],
            )?;
            count += 1;
        }
        log::info!("loader: loaded {} stations, skipped {}", count, skipped);
        Ok(())
    }

    /// Load daily station records from a CSV string.
    ///
    /// Blank or non-numeric temperatures are stored as NULL. Rows with an
    /// empty station code or an unparsable date are skipped. A (station, day)
    /// loaded twice keeps the last row.
    ///
    /// # Example CSV
    /// ```text
    /// 51449002,20250101,-1.2,6.8,2.8
    /// 51449002,20250102,,7.4,
    /// ```
    pub fn load_daily_records(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let code = r.get(0).unwrap_or("").trim();
            let date = match parse_date_compact(r.get(1).unwrap_or("").trim()) {
                Ok(date) => date,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            if code.is_empty() {
                skipped += 1;
                continue;
            }
            let tn = optional_number(r.get(2));
            let tx = optional_number(r.get(3));
            let tntxm = optional_number(r.get(4));

            conn.execute(
                "INSERT OR REPLACE INTO daily_records (station_code, date, tn, tx, tntxm)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![code, format_date(&date), tn, tx, tntxm],
            )?;
            count += 1;
        }
        log::info!("loader: loaded {} daily records, skipped {} invalid", count, skipped);
        Ok(())
    }
}
