//! Command implementations for the ITN CLI.
//!
//! Computes the national thermal indicator from synthetic or stored data,
//! and inspects the station panel and stored station records.

use clap::Subcommand;
use serde::Serialize;
use std::io::Write;

pub mod indicator;
pub mod records;

pub use indicator::{IndicatorArgs, SourceKind};

#[derive(Subcommand)]
pub enum Command {
    /// Compute the national thermal indicator time series
    Indicator(IndicatorArgs),

    /// List the 30 panel stations expected on a date
    Panel {
        /// Day to inspect (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },

    /// List stations loaded from a stations CSV
    Stations {
        /// Stations CSV (with headers)
        #[arg(short = 't', long)]
        stations_csv: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print one station's stored daily records
    Daily {
        /// Daily records CSV (no headers)
        #[arg(short = 'r', long)]
        records_csv: String,

        /// Station code
        #[arg(short, long)]
        station: String,

        /// First day (YYYY-MM-DD); defaults to the first stored day
        #[arg(long)]
        date_start: Option<String>,

        /// Last day (YYYY-MM-DD); defaults to the last stored day
        #[arg(long)]
        date_end: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Indicator(args) => indicator::run_indicator(&args, &mut out),
        Command::Panel { date } => records::run_panel(&date, &mut out),
        Command::Stations {
            stations_csv,
            pretty,
        } => records::run_stations(&stations_csv, pretty, &mut out),
        Command::Daily {
            records_csv,
            station,
            date_start,
            date_end,
            pretty,
        } => records::run_daily(
            &records_csv,
            &station,
            date_start.as_deref(),
            date_end.as_deref(),
            pretty,
            &mut out,
        ),
    }
}

/// Write `value` as one JSON document followed by a newline.
pub(crate) fn write_json<T: Serialize>(
    out: &mut impl Write,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Read a CSV input file into memory.
pub(crate) fn read_input(path: &str) -> anyhow::Result<String> {
    use anyhow::Context;
    std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}
