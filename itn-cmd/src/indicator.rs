//! `indicator` subcommand: compute the national thermal indicator series.

use crate::{read_input, write_json};
use anyhow::Context;
use clap::{Args, ValueEnum};
use itn_core::query::RawIndicatorQuery;
use itn_core::service::national_indicator_response;
use itn_core::source::{SyntheticDailySeries, DEFAULT_SEED};
use itn_db::source::StoredDailySeries;
use itn_db::Database;
use log::info;
use std::io::Write;

/// Where the daily indicator series comes from.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Seeded seasonal generator, no input files needed
    #[default]
    Synthetic,
    /// Station records loaded from CSV files
    Stored,
}

/// Request parameters are kept as raw strings so malformed values are
/// reported alongside contradictory ones.
#[derive(Args, Debug, Clone)]
pub struct IndicatorArgs {
    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub date_start: Option<String>,

    /// Last day of the window, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub date_end: Option<String>,

    /// day, month or year
    #[arg(short, long)]
    pub granularity: Option<String>,

    /// full, month_of_year or day_of_month
    #[arg(long)]
    pub slice_type: Option<String>,

    /// Target month (1-12)
    #[arg(long)]
    pub month_of_year: Option<String>,

    /// Target day (1-31), clamped to the month's length
    #[arg(long)]
    pub day_of_month: Option<String>,

    #[arg(long, value_enum, default_value_t = SourceKind::Synthetic)]
    pub source: SourceKind,

    /// Seed of the synthetic generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Stations CSV (with headers), stored source only
    #[arg(short = 't', long)]
    pub stations_csv: Option<String>,

    /// Daily records CSV (no headers), required by the stored source
    #[arg(short = 'r', long)]
    pub records_csv: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl IndicatorArgs {
    pub fn raw_query(&self) -> RawIndicatorQuery {
        RawIndicatorQuery {
            date_start: self.date_start.clone(),
            date_end: self.date_end.clone(),
            granularity: self.granularity.clone(),
            slice_type: self.slice_type.clone(),
            month_of_year: self.month_of_year.clone(),
            day_of_month: self.day_of_month.clone(),
        }
    }
}

fn open_stored_database(args: &IndicatorArgs) -> anyhow::Result<Database> {
    let records_csv = args
        .records_csv
        .as_deref()
        .context("--records-csv is required with --source stored")?;

    let db = Database::new()?;
    if let Some(stations_csv) = args.stations_csv.as_deref() {
        db.load_stations(&read_input(stations_csv)?)?;
    }
    db.load_daily_records(&read_input(records_csv)?)?;
    Ok(db)
}

/// Validate the request, compute the series and write the JSON response.
///
/// Invalid parameters are written as the error envelope and returned as
/// an error.
pub fn run_indicator(args: &IndicatorArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let query = match args.raw_query().validate() {
        Ok(query) => query,
        Err(errors) => {
            write_json(out, &errors.to_envelope(), args.pretty)?;
            return Err(errors.into());
        }
    };

    let response = match args.source {
        SourceKind::Synthetic => {
            national_indicator_response(&SyntheticDailySeries::new(args.seed), &query)?
        }
        SourceKind::Stored => {
            let db = open_stored_database(args)?;
            national_indicator_response(&StoredDailySeries::new(db), &query)?
        }
    };

    info!(
        "indicator ({:?} source): {} points",
        args.source,
        response.time_series.len()
    );
    write_json(out, &response, args.pretty)
}
