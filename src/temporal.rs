//! Temporal field extraction.
//!
//! Each dataset convention stores temporal validity in different trailing
//! columns. This module is the single place that knows those layouts; the
//! rest of the crate only sees the structured [`TemporalFields`] result.

use crate::models::DatasetType;
use chrono::{Datelike, NaiveDate};

/// Temporal contribution of one accepted line.
///
/// `None` from [`extract`] means the line contributes nothing temporal;
/// the triple itself is still counted by the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalFields {
    /// Validity marker (e.g. "since"), counted as a temporal record.
    pub marker: Option<String>,
    /// Year contribution for frequency and range tracking.
    pub year: Option<i32>,
    /// Full event date for range tracking.
    pub date: Option<NaiveDate>,
}

/// Extract the temporal fields of one tab-split line for the given
/// convention.
pub fn extract(columns: &[&str], dataset_type: DatasetType) -> Option<TemporalFields> {
    match dataset_type {
        DatasetType::EventCalendar => extract_event_calendar(columns),
        DatasetType::LinkedData => extract_linked_data(columns),
        DatasetType::FactExtraction => extract_fact_extraction(columns),
        // No temporal convention is defined for generic datasets. This is
        // an explicit no-op, not a missing case.
        DatasetType::Generic => None,
    }
}

/// Column 4 must parse as a `YYYY-MM-DD` date; an unparsable date means no
/// temporal contribution. There is no marker concept.
fn extract_event_calendar(columns: &[&str]) -> Option<TemporalFields> {
    if columns.len() < 4 {
        return None;
    }
    let date = NaiveDate::parse_from_str(columns[3], "%Y-%m-%d").ok()?;
    Some(TemporalFields {
        marker: None,
        year: Some(date.year()),
        date: Some(date),
    })
}

/// Column 4 is a verbatim marker, column 5 a year token. The marker always
/// counts as a temporal record, even when the year fails to parse.
fn extract_linked_data(columns: &[&str]) -> Option<TemporalFields> {
    if columns.len() < 5 {
        return None;
    }
    let marker = columns[3].to_string();
    let year_token = columns[4].trim();
    let year = if year_token.is_empty() {
        None
    } else {
        year_token.parse::<i32>().ok()
    };
    Some(TemporalFields {
        marker: Some(marker),
        year,
        date: None,
    })
}

/// Column 4 is a marker with surrounding `<>"` stripped, column 5 a quoted
/// date token. The year is taken from the token's digit characters: all
/// digits are collected and the first four parsed, so `"1995-01-01"` and
/// `"1995-##-##"` both yield 1995.
fn extract_fact_extraction(columns: &[&str]) -> Option<TemporalFields> {
    if columns.len() < 5 {
        return None;
    }
    let marker = columns[3]
        .trim_matches(|c| c == '<' || c == '>' || c == '"')
        .to_string();
    let date_token = columns[4].trim_matches('"');
    let digits: String = date_token.chars().filter(|c| c.is_ascii_digit()).collect();
    let year = if digits.len() >= 4 {
        digits[..4].parse::<i32>().ok()
    } else {
        None
    };
    Some(TemporalFields {
        marker: Some(marker),
        year,
        date: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_calendar_valid_date() {
        let cols = ["A", "rel", "B", "2010-05-01"];
        let fields = extract(&cols, DatasetType::EventCalendar).unwrap();
        assert_eq!(fields.marker, None);
        assert_eq!(fields.year, Some(2010));
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2010, 5, 1));
    }

    #[test]
    fn test_event_calendar_invalid_date_is_skipped() {
        let cols = ["A", "rel", "B", "2010-13-01"];
        assert_eq!(extract(&cols, DatasetType::EventCalendar), None);

        let cols = ["A", "rel", "B", "not-a-date"];
        assert_eq!(extract(&cols, DatasetType::EventCalendar), None);
    }

    #[test]
    fn test_event_calendar_too_few_columns() {
        let cols = ["A", "rel", "B"];
        assert_eq!(extract(&cols, DatasetType::EventCalendar), None);
    }

    #[test]
    fn test_linked_data_marker_and_year() {
        let cols = ["A", "rel", "B", "since", "1990"];
        let fields = extract(&cols, DatasetType::LinkedData).unwrap();
        assert_eq!(fields.marker.as_deref(), Some("since"));
        assert_eq!(fields.year, Some(1990));
        assert_eq!(fields.date, None);
    }

    #[test]
    fn test_linked_data_marker_without_year() {
        // A blank or unparsable year still yields a temporal record.
        let cols = ["A", "rel", "B", "until", "  "];
        let fields = extract(&cols, DatasetType::LinkedData).unwrap();
        assert_eq!(fields.marker.as_deref(), Some("until"));
        assert_eq!(fields.year, None);

        let cols = ["A", "rel", "B", "until", "soon"];
        let fields = extract(&cols, DatasetType::LinkedData).unwrap();
        assert_eq!(fields.marker.as_deref(), Some("until"));
        assert_eq!(fields.year, None);
    }

    #[test]
    fn test_linked_data_negative_year() {
        let cols = ["A", "rel", "B", "since", "-44"];
        let fields = extract(&cols, DatasetType::LinkedData).unwrap();
        assert_eq!(fields.year, Some(-44));
    }

    #[test]
    fn test_fact_extraction_strips_marker_decorations() {
        let cols = ["A", "rel", "B", "<occursSince>", "\"1995-01-01\""];
        let fields = extract(&cols, DatasetType::FactExtraction).unwrap();
        assert_eq!(fields.marker.as_deref(), Some("occursSince"));
        assert_eq!(fields.year, Some(1995));
    }

    #[test]
    fn test_fact_extraction_collects_all_digits() {
        // Digits are gathered across the token before the first four are
        // taken as the year.
        let cols = ["A", "rel", "B", "occursUntil", "\"19##-07\""];
        let fields = extract(&cols, DatasetType::FactExtraction).unwrap();
        assert_eq!(fields.year, Some(1907));
    }

    #[test]
    fn test_fact_extraction_too_few_digits() {
        let cols = ["A", "rel", "B", "occursSince", "\"##\""];
        let fields = extract(&cols, DatasetType::FactExtraction).unwrap();
        assert_eq!(fields.marker.as_deref(), Some("occursSince"));
        assert_eq!(fields.year, None);
    }

    #[test]
    fn test_generic_is_a_no_op() {
        let cols = ["A", "rel", "B", "2010", "extra"];
        assert_eq!(extract(&cols, DatasetType::Generic), None);
    }
}
