//! Station panel of the national thermal indicator (ITN).
//!
//! The panel is 30 stations: 29 permanent members plus one Reims station.
//! Reims-Courcy was replaced by Reims-Prunay on [`REIMS_SWITCH_DATE`];
//! from that day on (inclusive) Prunay is the expected station.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Number of stations expected to report on any given day.
pub const PANEL_SIZE: usize = 30;

/// Stations that belong to the panel on every date.
pub const ITN_ALWAYS_STATION_CODES: [&str; 29] = [
    "6088001", "13054001", "14137001", "16089001", "20148001", "21473001", "25056001",
    "26198001", "29075001", "30189001", "31069001", "33281001", "35281001", "36063001",
    "44020001", "45055001", "47091001", "54526001", "58160001", "59343001", "63113001",
    "64549001", "66164002", "67124001", "69029001", "72008001", "73054001", "75114001",
    "86027001",
];

/// Reims station used before the switch date.
pub const REIMS_COURCY: &str = "51183001";

/// Reims station used on and after the switch date.
pub const REIMS_PRUNAY: &str = "51449002";

/// First day on which Reims-Prunay replaces Reims-Courcy.
pub const REIMS_SWITCH_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2012, 5, 8) {
    Some(date) => date,
    None => panic!("invalid Reims switch date"),
};

/// The Reims station expected to report on `day`.
pub fn expected_reims_code(day: NaiveDate) -> &'static str {
    if day >= REIMS_SWITCH_DATE {
        REIMS_PRUNAY
    } else {
        REIMS_COURCY
    }
}

/// The Reims station that must be ignored on `day` if it reports anyway.
pub fn other_reims_code(day: NaiveDate) -> &'static str {
    if expected_reims_code(day) == REIMS_PRUNAY {
        REIMS_COURCY
    } else {
        REIMS_PRUNAY
    }
}

/// Exactly the 30 station codes expected for `day`.
pub fn expected_station_codes(day: NaiveDate) -> BTreeSet<&'static str> {
    let mut codes: BTreeSet<&'static str> = ITN_ALWAYS_STATION_CODES.iter().copied().collect();
    codes.insert(expected_reims_code(day));
    codes
}

/// Every code that may contribute on some date: the permanent members and
/// both Reims stations, so either era can be read in a single query.
pub fn itn_station_codes_for_query() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = ITN_ALWAYS_STATION_CODES.to_vec();
    codes.push(REIMS_COURCY);
    codes.push(REIMS_PRUNAY);
    codes.sort_unstable();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_station_codes_len_is_30() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(expected_station_codes(day).len(), PANEL_SIZE);
    }

    #[test]
    fn permanent_codes_are_unique() {
        let unique: BTreeSet<&str> = ITN_ALWAYS_STATION_CODES.iter().copied().collect();
        assert_eq!(unique.len(), 29);
        assert!(!unique.contains(REIMS_COURCY));
        assert!(!unique.contains(REIMS_PRUNAY));
    }

    #[test]
    fn reims_before_switch_is_courcy() {
        let day = REIMS_SWITCH_DATE.pred_opt().unwrap();
        let codes = expected_station_codes(day);
        assert!(codes.contains(REIMS_COURCY));
        assert!(!codes.contains(REIMS_PRUNAY));
        assert_eq!(other_reims_code(day), REIMS_PRUNAY);
    }

    #[test]
    fn reims_on_switch_date_is_prunay() {
        let codes = expected_station_codes(REIMS_SWITCH_DATE);
        assert!(codes.contains(REIMS_PRUNAY));
        assert!(!codes.contains(REIMS_COURCY));
        assert_eq!(other_reims_code(REIMS_SWITCH_DATE), REIMS_COURCY);
    }

    #[test]
    fn every_date_has_exactly_one_reims_station() {
        let start = NaiveDate::from_ymd_opt(2012, 4, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2012, 6, 30).unwrap();
        for day in crate::date_range::DateRange(start, end) {
            let codes = expected_station_codes(day);
            assert_eq!(codes.len(), PANEL_SIZE, "panel size on {day}");
            let reims = [REIMS_COURCY, REIMS_PRUNAY]
                .iter()
                .filter(|code| codes.contains(*code))
                .count();
            assert_eq!(reims, 1, "exactly one Reims station on {day}");
        }
    }

    #[test]
    fn query_codes_cover_both_eras() {
        let codes = itn_station_codes_for_query();
        assert_eq!(codes.len(), 31);
        assert!(codes.contains(&REIMS_COURCY));
        assert!(codes.contains(&REIMS_PRUNAY));
    }
}
