//! In-memory SQLite storage for Météo-France station records.
//!
//! Station metadata and per-station daily temperatures are loaded from CSV
//! strings into an in-memory database. The [`source::StoredDailySeries`]
//! reads the candidate stations back and turns each complete panel day into
//! one national indicator point.
//!
//! Station codes are stored exactly as loaded; the panel uses unpadded
//! Météo-France codes (`6088001` for Nice, not `06088001`).
//!
//! # Usage
//!
//! ```rust
//! use itn_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_stations("code,name,department,latitude,longitude,altitude\n6088001,Nice,06,43.648,7.209,2\n").unwrap();
//! db.load_daily_records("6088001,20250101,7.1,13.9,10.5\n").unwrap();
//!
//! let stations = db.query_stations().unwrap();
//! assert_eq!(stations.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`].
//! - `stations` - station metadata
//! - `daily_records` - daily min/max/mean temperature per station

pub mod schema;
mod loader;
mod queries;
pub mod models;
pub mod source;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding station records.
///
/// Clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create an empty in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
