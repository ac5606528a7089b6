//! Shared utility functions for ITN crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, Months, NaiveDate};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse a date string in "YYYYMMDD" format (compact climatological format)
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y%m%d")?)
    }

    /// Number of days in the given month, or `None` for an invalid month.
    pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = first.checked_add_months(Months::new(1))?;
        Some(next.pred_opt()?.day())
    }

    /// Clamp a day-of-month to the last valid day of that month.
    ///
    /// e.g. day 30 in February 2024 -> 29, day 31 in April -> 30.
    /// Returns `None` only when `month` is not a calendar month.
    pub fn clamp_day_to_month_end(year: i32, month: u32, day: u32) -> Option<u32> {
        last_day_of_month(year, month).map(|last| day.min(last))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_last_day_of_month() {
            assert_eq!(last_day_of_month(2024, 1), Some(31));
            assert_eq!(last_day_of_month(2024, 2), Some(29));
            assert_eq!(last_day_of_month(2023, 2), Some(28));
            assert_eq!(last_day_of_month(2023, 4), Some(30));
            assert_eq!(last_day_of_month(2023, 12), Some(31));
            assert_eq!(last_day_of_month(2023, 13), None);
        }

        #[test]
        fn test_clamp_day_to_month_end() {
            assert_eq!(clamp_day_to_month_end(2024, 2, 30), Some(29));
            assert_eq!(clamp_day_to_month_end(2023, 2, 31), Some(28));
            assert_eq!(clamp_day_to_month_end(2023, 4, 31), Some(30));
            assert_eq!(clamp_day_to_month_end(2023, 5, 15), Some(15));
            assert_eq!(clamp_day_to_month_end(2023, 0, 1), None);
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_compact() {
            let parsed = parse_date_compact("20120508").unwrap();
            assert_eq!(parsed, NaiveDate::from_ymd_opt(2012, 5, 8).unwrap());
            assert!(parse_date_compact("2012-05-08").is_err());
        }
    }
}

/// Numeric helpers
pub mod numbers {
    /// Round to 2 decimal places. Exact ties go to the even neighbour,
    /// so 0.125 rounds to 0.12 and 0.375 to 0.38.
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round_ties_even() / 100.0
    }

}
