//! Ordered date parsing for the effective-date columns.
//!
//! The registry has been fed by several import paths over the years, so the
//! same column may hold `2024-03-15`, `15/03/2024`, a full timestamp or a
//! hand-typed `15 March 2024`. Each [`DateStrategy`] recognizes one family of
//! encodings and a [`DateParser`] tries them in a fixed order.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::company::FieldValue;

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const FREE_FORM_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d-%b-%Y",
    "%Y/%m/%d",
];

/// One family of accepted date encodings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateStrategy {
    /// `YYYY-MM-DD`.
    Iso,
    /// RFC 3339 or `YYYY-MM-DD[T ]HH:MM[:SS[.f]]`, reduced to the calendar date.
    IsoDateTime,
    /// `DD/MM/YYYY`, also with `-` or `.` separators.
    DayFirst,
    /// Month names and slash-separated year-first dates.
    FreeForm,
}

impl DateStrategy {
    /// Attempts to read `raw` as a calendar date. `raw` must already be trimmed.
    pub fn parse(self, raw: &str) -> Option<NaiveDate> {
        match self {
            DateStrategy::Iso => {
                if !has_four_digit_year_prefix(raw) {
                    return None;
                }
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
            }
            DateStrategy::IsoDateTime => {
                if !has_four_digit_year_prefix(raw) {
                    return None;
                }
                if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
                    return Some(with_offset.date_naive());
                }
                ISO_DATETIME_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                    .map(|datetime| datetime.date())
            }
            DateStrategy::DayFirst => parse_day_first(raw),
            DateStrategy::FreeForm => FREE_FORM_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .filter(|date| (1000..=9999).contains(&date.year())),
        }
    }
}

fn has_four_digit_year_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let separator = raw.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let parts: Vec<&str> = raw.split(separator).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let is_digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !is_digits(day, 1, 2) || !is_digits(month, 1, 2) || !is_digits(year, 4, 4) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Outcome of reading a date column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsedDate {
    /// Column missing, null or blank.
    Absent,
    Valid(NaiveDate),
    /// A value was present but no strategy recognized it.
    Invalid,
}

/// Ordered list of strategies; the first one that succeeds wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateParser {
    strategies: Vec<DateStrategy>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self {
            strategies: vec![
                DateStrategy::Iso,
                DateStrategy::IsoDateTime,
                DateStrategy::DayFirst,
                DateStrategy::FreeForm,
            ],
        }
    }
}

impl DateParser {
    /// Builds a parser with a custom order. An empty list falls back to the default.
    pub fn new(strategies: Vec<DateStrategy>) -> Self {
        if strategies.is_empty() {
            Self::default()
        } else {
            Self { strategies }
        }
    }

    pub fn parse_str(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        self.strategies
            .iter()
            .find_map(|strategy| strategy.parse(raw))
    }

    /// Reads a column value. Native dates bypass string parsing.
    pub fn parse_value(&self, value: Option<&FieldValue>) -> ParsedDate {
        match value {
            None => ParsedDate::Absent,
            Some(value) if value.is_blank() => ParsedDate::Absent,
            Some(FieldValue::Date(date)) => ParsedDate::Valid(*date),
            Some(FieldValue::DateTime(datetime)) => ParsedDate::Valid(datetime.date()),
            Some(FieldValue::Text(text)) => self
                .parse_str(text)
                .map_or(ParsedDate::Invalid, ParsedDate::Valid),
            Some(_) => ParsedDate::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_and_day_first_resolve_to_same_date() {
        let parser = DateParser::default();
        assert_eq!(parser.parse_str("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(parser.parse_str("15/03/2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parser.parse_str(" 15-03-2024 "), Some(ymd(2024, 3, 15)));
        assert_eq!(parser.parse_str("5.3.2024"), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn datetimes_reduce_to_calendar_date() {
        let parser = DateParser::default();
        assert_eq!(
            parser.parse_str("2024-01-31T23:59:59"),
            Some(ymd(2024, 1, 31))
        );
        assert_eq!(
            parser.parse_str("2024-01-31 10:15:00.250"),
            Some(ymd(2024, 1, 31))
        );
        assert_eq!(
            parser.parse_str("2024-01-31T23:30:00+03:00"),
            Some(ymd(2024, 1, 31))
        );
    }

    #[test]
    fn free_form_month_names() {
        let parser = DateParser::default();
        assert_eq!(parser.parse_str("15 Mar 2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parser.parse_str("15 March 2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parser.parse_str("March 15, 2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parser.parse_str("2024/03/15"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn impossible_or_garbled_dates_do_not_parse() {
        let parser = DateParser::default();
        assert_eq!(parser.parse_str("31/02/2024"), None);
        assert_eq!(parser.parse_str("2024-13-01"), None);
        assert_eq!(parser.parse_str("01/01/24"), None);
        assert_eq!(parser.parse_str("not a date"), None);
        assert_eq!(parser.parse_str("   "), None);
    }

    #[test]
    fn strategy_order_is_respected() {
        let iso_only = DateParser::new(vec![DateStrategy::Iso]);
        assert_eq!(iso_only.parse_str("15/03/2024"), None);
        assert_eq!(iso_only.parse_str("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(DateParser::new(Vec::new()), DateParser::default());
    }

    #[test]
    fn parse_value_distinguishes_absent_from_invalid() {
        let parser = DateParser::default();
        assert_eq!(parser.parse_value(None), ParsedDate::Absent);
        assert_eq!(
            parser.parse_value(Some(&FieldValue::Null)),
            ParsedDate::Absent
        );
        assert_eq!(
            parser.parse_value(Some(&FieldValue::from(" "))),
            ParsedDate::Absent
        );
        assert_eq!(
            parser.parse_value(Some(&FieldValue::from("soon"))),
            ParsedDate::Invalid
        );
        assert_eq!(
            parser.parse_value(Some(&FieldValue::Bool(true))),
            ParsedDate::Invalid
        );
        assert_eq!(
            parser.parse_value(Some(&FieldValue::Date(ymd(2023, 1, 1)))),
            ParsedDate::Valid(ymd(2023, 1, 1))
        );
    }
}
