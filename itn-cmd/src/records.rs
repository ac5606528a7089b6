//! Panel and station record inspection commands.

use crate::{read_input, write_json};
use itn_core::stations::{expected_reims_code, expected_station_codes};
use itn_db::models::DailyRecord;
use itn_db::Database;
use itn_utils::dates::{format_date, parse_date};
use log::info;
use std::io::Write;

/// Print the 30 codes expected on `date`, one per line.
pub fn run_panel(date: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let day = parse_date(date)?;
    info!("panel for {}: Reims station {}", day, expected_reims_code(day));
    for code in expected_station_codes(day) {
        writeln!(out, "{code}")?;
    }
    Ok(())
}

/// Print the stations of a stations CSV as JSON.
pub fn run_stations(stations_csv: &str, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let db = Database::new()?;
    db.load_stations(&read_input(stations_csv)?)?;
    write_json(out, &db.query_stations()?, pretty)
}

/// Print one station's daily records as JSON.
///
/// Missing bounds default to the stored period.
pub fn run_daily(
    records_csv: &str,
    station: &str,
    date_start: Option<&str>,
    date_end: Option<&str>,
    pretty: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let db = Database::new()?;
    db.load_daily_records(&read_input(records_csv)?)?;

    let history: Vec<DailyRecord> = match db.query_date_range()? {
        None => Vec::new(),
        Some(period) => {
            let start = match date_start {
                Some(raw) => format_date(&parse_date(raw)?),
                None => period.first,
            };
            let end = match date_end {
                Some(raw) => format_date(&parse_date(raw)?),
                None => period.last,
            };
            db.query_station_history(station, &start, &end)?
        }
    };
    write_json(out, &history, pretty)
}
