//! Request parameters of the national indicator and their validation.
//!
//! Validation happens before the pipeline runs. Every offending field is
//! collected into [`ValidationErrors`] rather than failing on the first one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error code of the structured validation envelope.
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";

/// Temporal resolution of the output series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Granularity::Day),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            other => Err(format!("\"{other}\" is not a valid choice (day, month, year).")),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which calendar days of the daily series take part in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceType {
    #[default]
    Full,
    MonthOfYear,
    DayOfMonth,
}

impl SliceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SliceType::Full => "full",
            SliceType::MonthOfYear => "month_of_year",
            SliceType::DayOfMonth => "day_of_month",
        }
    }
}

impl FromStr for SliceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(SliceType::Full),
            "month_of_year" => Ok(SliceType::MonthOfYear),
            "day_of_month" => Ok(SliceType::DayOfMonth),
            other => Err(format!(
                "\"{other}\" is not a valid choice (full, month_of_year, day_of_month)."
            )),
        }
    }
}

impl fmt::Display for SliceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offending fields mapped to their messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[error("Invalid or missing parameter: {}", field_list(.0))]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

fn field_list(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields.keys().cloned().collect::<Vec<_>>().join(", ")
}

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn details(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }

    /// The `{"error": {...}}` envelope returned to clients.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorBody {
                code: INVALID_PARAMETER.to_string(),
                message: "Invalid or missing parameter".to_string(),
                details: self.0.clone(),
            },
        }
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: BTreeMap<String, Vec<String>>,
}

/// A validated national indicator request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorQuery {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub granularity: Granularity,
    pub slice_type: SliceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

impl IndicatorQuery {
    /// Validate already-typed parameters.
    pub fn new(
        date_start: NaiveDate,
        date_end: NaiveDate,
        granularity: Granularity,
        slice_type: SliceType,
        month_of_year: Option<u32>,
        day_of_month: Option<u32>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(month) = month_of_year {
            check_month(&mut errors, month);
        }
        if let Some(day) = day_of_month {
            check_day(&mut errors, day);
        }
        check_order(&mut errors, date_start, date_end);
        check_combination(
            &mut errors,
            granularity,
            slice_type,
            month_of_year.is_some(),
            day_of_month.is_some(),
        );
        errors.into_result(|| IndicatorQuery {
            date_start,
            date_end,
            granularity,
            slice_type,
            month_of_year,
            day_of_month,
        })
    }
}

/// Request parameters exactly as received at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawIndicatorQuery {
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub granularity: Option<String>,
    pub slice_type: Option<String>,
    pub month_of_year: Option<String>,
    pub day_of_month: Option<String>,
}

const REQUIRED: &str = "This field is required.";

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl RawIndicatorQuery {
    /// Parse and validate, reporting every offending field.
    pub fn validate(&self) -> Result<IndicatorQuery, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let date_start = parse_required_date(&mut errors, "date_start", &self.date_start);
        let date_end = parse_required_date(&mut errors, "date_end", &self.date_end);

        let granularity = match supplied(&self.granularity) {
            None => {
                errors.add("granularity", REQUIRED);
                None
            }
            Some(raw) => raw
                .parse::<Granularity>()
                .map_err(|e| errors.add("granularity", e))
                .ok(),
        };

        let slice_type = match supplied(&self.slice_type) {
            None => Some(SliceType::default()),
            Some(raw) => raw
                .parse::<SliceType>()
                .map_err(|e| errors.add("slice_type", e))
                .ok(),
        };

        let month_raw = supplied(&self.month_of_year);
        let day_raw = supplied(&self.day_of_month);
        let month_of_year = month_raw.and_then(|raw| parse_selector(&mut errors, "month_of_year", raw));
        let day_of_month = day_raw.and_then(|raw| parse_selector(&mut errors, "day_of_month", raw));
        if let Some(month) = month_of_year {
            check_month(&mut errors, month);
        }
        if let Some(day) = day_of_month {
            check_day(&mut errors, day);
        }

        if let (Some(start), Some(end)) = (date_start, date_end) {
            check_order(&mut errors, start, end);
        }
        if let (Some(granularity), Some(slice_type)) = (granularity, slice_type) {
            check_combination(
                &mut errors,
                granularity,
                slice_type,
                month_raw.is_some(),
                day_raw.is_some(),
            );
        }

        match (date_start, date_end, granularity, slice_type) {
            (Some(date_start), Some(date_end), Some(granularity), Some(slice_type)) => errors
                .into_result(|| IndicatorQuery {
                    date_start,
                    date_end,
                    granularity,
                    slice_type,
                    month_of_year,
                    day_of_month,
                }),
            _ => Err(errors),
        }
    }
}

fn parse_required_date(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Option<String>,
) -> Option<NaiveDate> {
    match supplied(value) {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(raw) => match itn_utils::dates::parse_date(raw) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add(field, "Date has wrong format. Use YYYY-MM-DD.");
                None
            }
        },
    }
}

fn parse_selector(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<u32> {
    match raw.parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, "A valid integer is required.");
            None
        }
    }
}

fn check_month(errors: &mut ValidationErrors, month: u32) {
    if !(1..=12).contains(&month) {
        errors.add("month_of_year", "Ensure this value is between 1 and 12.");
    }
}

fn check_day(errors: &mut ValidationErrors, day: u32) {
    if !(1..=31).contains(&day) {
        errors.add("day_of_month", "Ensure this value is between 1 and 31.");
    }
}

fn check_order(errors: &mut ValidationErrors, date_start: NaiveDate, date_end: NaiveDate) {
    if date_start > date_end {
        errors.add("date_end", "date_end must be on or after date_start.");
    }
}

fn check_combination(
    errors: &mut ValidationErrors,
    granularity: Granularity,
    slice_type: SliceType,
    has_month: bool,
    has_day: bool,
) {
    if granularity == Granularity::Day {
        if slice_type != SliceType::Full {
            errors.add("slice_type", "granularity=day only supports slice_type=full.");
        }
        if has_month {
            errors.add("month_of_year", "Not allowed when granularity=day.");
        }
        if has_day {
            errors.add("day_of_month", "Not allowed when granularity=day.");
        }
        return;
    }

    match slice_type {
        SliceType::Full => {
            if has_month {
                errors.add("month_of_year", "Not allowed when slice_type=full.");
            }
            if has_day {
                errors.add("day_of_month", "Not allowed when slice_type=full.");
            }
        }
        SliceType::MonthOfYear => {
            if granularity != Granularity::Year {
                errors.add("slice_type", "slice_type=month_of_year requires granularity=year.");
            }
            if !has_month {
                errors.add("month_of_year", "Required when slice_type=month_of_year.");
            }
            if has_day {
                errors.add("day_of_month", "Not allowed when slice_type=month_of_year.");
            }
        }
        SliceType::DayOfMonth => {
            if !has_day {
                errors.add("day_of_month", "Required when slice_type=day_of_month.");
            }
            match (granularity, has_month) {
                (Granularity::Year, false) => errors.add(
                    "month_of_year",
                    "Required when slice_type=day_of_month and granularity=year.",
                ),
                (Granularity::Month, true) => errors.add(
                    "month_of_year",
                    "Not allowed when slice_type=day_of_month and granularity=month.",
                ),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawIndicatorQuery {
        let mut q = RawIndicatorQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "date_start" => q.date_start = value,
                "date_end" => q.date_end = value,
                "granularity" => q.granularity = value,
                "slice_type" => q.slice_type = value,
                "month_of_year" => q.month_of_year = value,
                "day_of_month" => q.day_of_month = value,
                other => panic!("unknown field {other}"),
            }
        }
        q
    }

    fn errors_for(pairs: &[(&str, &str)]) -> ValidationErrors {
        raw(pairs).validate().expect_err("query should be rejected")
    }

    #[test]
    fn date_start_may_equal_date_end() {
        let q = raw(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-01-01"),
            ("granularity", "month"),
        ])
        .validate()
        .unwrap();
        assert_eq!(q.date_start, q.date_end);
    }

    #[test]
    fn date_start_after_date_end_is_reported_on_date_end() {
        let errors = errors_for(&[
            ("date_start", "2024-01-02"),
            ("date_end", "2024-01-01"),
            ("granularity", "month"),
        ]);
        assert!(errors.contains("date_end"));
        assert!(!errors.contains("date_start"));
    }

    #[test]
    fn granularity_must_be_valid_choice() {
        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-01-31"),
            ("granularity", "hour"),
        ]);
        assert!(errors.contains("granularity"));
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = errors_for(&[("date_end", "not-a-date")]);
        assert!(errors.contains("date_start"));
        assert!(errors.contains("date_end"));
        assert!(errors.contains("granularity"));
        assert_eq!(errors.details().len(), 3);
    }

    #[test]
    fn granularity_day_rejects_non_full_slice_type() {
        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-01-07"),
            ("granularity", "day"),
            ("slice_type", "day_of_month"),
            ("day_of_month", "1"),
        ]);
        assert!(errors.contains("slice_type"));
    }

    #[test]
    fn granularity_day_defaults_slice_type_to_full() {
        let q = raw(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-01-07"),
            ("granularity", "day"),
        ])
        .validate()
        .unwrap();
        assert_eq!(q.slice_type, SliceType::Full);
    }

    #[test]
    fn granularity_day_forbids_selectors() {
        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-01-07"),
            ("granularity", "day"),
            ("month_of_year", "1"),
            ("day_of_month", "1"),
        ]);
        assert!(errors.contains("month_of_year"));
        assert!(errors.contains("day_of_month"));
    }

    #[test]
    fn slice_type_full_forbids_selectors() {
        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-03-31"),
            ("granularity", "month"),
            ("slice_type", "full"),
            ("month_of_year", "1"),
        ]);
        assert!(errors.contains("month_of_year"));

        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-03-31"),
            ("granularity", "month"),
            ("slice_type", "full"),
            ("day_of_month", "1"),
        ]);
        assert!(errors.contains("day_of_month"));
    }

    #[test]
    fn month_of_year_slice_requires_granularity_year() {
        for granularity in ["month", "day"] {
            let errors = errors_for(&[
                ("date_start", "2024-01-01"),
                ("date_end", "2024-12-31"),
                ("granularity", granularity),
                ("slice_type", "month_of_year"),
                ("month_of_year", "1"),
            ]);
            assert!(errors.contains("slice_type"), "granularity={granularity}");
        }
    }

    #[test]
    fn month_of_year_slice_requires_month_and_forbids_day() {
        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-12-31"),
            ("granularity", "year"),
            ("slice_type", "month_of_year"),
        ]);
        assert!(errors.contains("month_of_year"));

        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-12-31"),
            ("granularity", "year"),
            ("slice_type", "month_of_year"),
            ("month_of_year", "1"),
            ("day_of_month", "1"),
        ]);
        assert!(errors.contains("day_of_month"));
        assert!(!errors.contains("month_of_year"));
    }

    #[test]
    fn day_of_month_slice_requires_day() {
        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-03-31"),
            ("granularity", "month"),
            ("slice_type", "day_of_month"),
        ]);
        assert!(errors.contains("day_of_month"));
    }

    #[test]
    fn day_of_month_slice_month_selector_depends_on_granularity() {
        let errors = errors_for(&[
            ("date_start", "2020-01-01"),
            ("date_end", "2024-12-31"),
            ("granularity", "year"),
            ("slice_type", "day_of_month"),
            ("day_of_month", "1"),
        ]);
        assert!(errors.contains("month_of_year"));

        let errors = errors_for(&[
            ("date_start", "2024-01-01"),
            ("date_end", "2024-03-31"),
            ("granularity", "month"),
            ("slice_type", "day_of_month"),
            ("day_of_month", "1"),
            ("month_of_year", "1"),
        ]);
        assert!(errors.contains("month_of_year"));
    }

    #[test]
    fn selectors_out_of_range_are_rejected() {
        let errors = errors_for(&[
            ("date_start", "2020-01-01"),
            ("date_end", "2024-12-31"),
            ("granularity", "year"),
            ("slice_type", "day_of_month"),
            ("month_of_year", "13"),
            ("day_of_month", "0"),
        ]);
        assert!(errors.contains("month_of_year"));
        assert!(errors.contains("day_of_month"));

        let errors = errors_for(&[
            ("date_start", "2020-01-01"),
            ("date_end", "2024-12-31"),
            ("granularity", "year"),
            ("slice_type", "month_of_year"),
            ("month_of_year", "feb"),
        ]);
        assert!(errors.contains("month_of_year"));
    }

    #[test]
    fn valid_combinations_are_accepted() {
        let cases: &[&[(&str, &str)]] = &[
            &[
                ("date_start", "2024-01-01"),
                ("date_end", "2024-03-31"),
                ("granularity", "month"),
            ],
            &[
                ("date_start", "2024-01-01"),
                ("date_end", "2024-03-31"),
                ("granularity", "month"),
                ("slice_type", "day_of_month"),
                ("day_of_month", "31"),
            ],
            &[
                ("date_start", "2020-01-01"),
                ("date_end", "2024-12-31"),
                ("granularity", "year"),
                ("slice_type", "month_of_year"),
                ("month_of_year", "1"),
            ],
            &[
                ("date_start", "2020-01-01"),
                ("date_end", "2024-12-31"),
                ("granularity", "year"),
                ("slice_type", "day_of_month"),
                ("month_of_year", "1"),
                ("day_of_month", "1"),
            ],
        ];
        for case in cases {
            assert!(raw(case).validate().is_ok(), "{case:?}");
        }
    }

    #[test]
    fn typed_constructor_applies_same_rules() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let errors = IndicatorQuery::new(
            start,
            end,
            Granularity::Month,
            SliceType::MonthOfYear,
            Some(2),
            None,
        )
        .unwrap_err();
        assert!(errors.contains("slice_type"));

        let q = IndicatorQuery::new(start, end, Granularity::Year, SliceType::MonthOfYear, Some(2), None)
            .unwrap();
        assert_eq!(q.month_of_year, Some(2));
    }

    #[test]
    fn envelope_carries_code_and_details() {
        let errors = errors_for(&[("date_start", "2024-01-01"), ("date_end", "2024-03-31")]);
        let envelope = errors.to_envelope();
        assert_eq!(envelope.error.code, INVALID_PARAMETER);
        assert!(envelope.error.details.contains_key("granularity"));

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["error"]["code"], "INVALID_PARAMETER");
        assert!(json["error"]["details"]["granularity"].is_array());
        assert_eq!(errors.to_string(), "Invalid or missing parameter: granularity");
    }
}
