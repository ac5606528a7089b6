use chrono::{Datelike, Months, NaiveDate};

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > self.1 {
            return None;
        }
        let current = self.0;
        match current.succ_opt() {
            Some(next) => self.0 = next,
            // end of the representable calendar: exhaust the range
            None => self.1 = current.pred_opt()?,
        }
        Some(current)
    }
}

/// Iterator over the first day of every month intersecting an inclusive
/// date range.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct MonthStarts {
    current: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for MonthStarts {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        if current > self.last {
            return None;
        }
        self.current = current.checked_add_months(Months::new(1));
        Some(current)
    }
}

/// Every day in `[date_start, date_end]`.
pub fn iter_days_intersecting(date_start: NaiveDate, date_end: NaiveDate) -> DateRange {
    DateRange(date_start, date_end)
}

/// `YYYY-MM-01` for every month intersecting `[date_start, date_end]`.
pub fn iter_month_starts_intersecting(date_start: NaiveDate, date_end: NaiveDate) -> MonthStarts {
    MonthStarts {
        current: date_start.with_day(1),
        last: date_end.with_day(1).unwrap_or(date_end),
    }
}

/// Every calendar year intersecting `[date_start, date_end]`.
pub fn iter_years_intersecting(
    date_start: NaiveDate,
    date_end: NaiveDate,
) -> std::ops::RangeInclusive<i32> {
    date_start.year()..=date_end.year()
}

/// `YYYY-01-01` for every year intersecting `[date_start, date_end]`.
pub fn iter_year_starts_intersecting(
    date_start: NaiveDate,
    date_end: NaiveDate,
) -> impl Iterator<Item = NaiveDate> {
    iter_years_intersecting(date_start, date_end)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}
