//! Per-split accumulation.
//!
//! Reads one split line by line in streaming fashion and feeds every
//! accepted triple, plus its temporal contribution, into a fresh
//! [`Stats`] value. Malformed temporal data never discards the triple
//! counts already applied.

use crate::models::DatasetType;
use crate::stats::Stats;
use crate::temporal;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Split a raw line into its tab-delimited columns, or `None` when the
/// line is blank or has fewer than the three mandatory columns.
///
/// Shared with the auxiliary tools so the acceptance rule lives in one
/// place.
pub fn triple_columns(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < 3 {
        return None;
    }
    Some(columns)
}

/// Accumulate statistics over all lines of `reader`.
pub fn process_reader<R: BufRead>(reader: R, dataset_type: DatasetType) -> Result<Stats> {
    let mut stats = Stats::new();
    for line in reader.lines() {
        let line = line?;
        let columns = match triple_columns(&line) {
            Some(columns) => columns,
            None => continue,
        };
        stats.record_triple(columns[0], columns[1], columns[2]);
        if let Some(fields) = temporal::extract(&columns, dataset_type) {
            stats.apply_temporal(fields);
        }
    }
    Ok(stats)
}

/// Accumulate statistics over one split file.
pub fn process_file(path: &Path, dataset_type: DatasetType) -> Result<Stats> {
    let file =
        File::open(path).with_context(|| format!("Failed to open split file: {}", path.display()))?;
    process_reader(BufReader::new(file), dataset_type)
        .with_context(|| format!("Failed to read split file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn accumulate(input: &str, dataset_type: DatasetType) -> Stats {
        process_reader(Cursor::new(input), dataset_type).unwrap()
    }

    #[test]
    fn test_triple_columns_rules() {
        assert_eq!(triple_columns(""), None);
        assert_eq!(triple_columns("   "), None);
        assert_eq!(triple_columns("A\tB"), None);
        assert_eq!(triple_columns("A\trel\tB"), Some(vec!["A", "rel", "B"]));
    }

    #[test]
    fn test_blank_and_short_lines_are_skipped_entirely() {
        let input = "\nA\trel\tB\n\nonly-one-column\nA\tB\n";
        let stats = accumulate(input, DatasetType::Generic);
        assert_eq!(stats.triples, 1);
        assert_eq!(stats.subjects.len(), 1);
    }

    #[test]
    fn test_event_calendar_line() {
        let stats = accumulate("A\trel\tB\t2010-05-01\n", DatasetType::EventCalendar);
        assert_eq!(stats.triples, 1);
        assert_eq!(stats.year_freq.get(&2010), 1);
        assert_eq!(stats.min_date, NaiveDate::from_ymd_opt(2010, 5, 1));
        assert_eq!(stats.max_date, NaiveDate::from_ymd_opt(2010, 5, 1));
        // Event dates carry no marker, so no temporal record is counted.
        assert_eq!(stats.temporal_records, 0);
    }

    #[test]
    fn test_event_calendar_invalid_date_keeps_triple() {
        let stats = accumulate("A\trel\tB\t2010-13-01\n", DatasetType::EventCalendar);
        assert_eq!(stats.triples, 1);
        assert!(stats.year_freq.is_empty());
        assert_eq!(stats.min_date, None);
        assert_eq!(stats.max_date, None);
    }

    #[test]
    fn test_linked_data_line() {
        let stats = accumulate("A\trel\tB\tsince\t1990\n", DatasetType::LinkedData);
        assert_eq!(stats.marker_freq.get(&"since".to_string()), 1);
        assert_eq!(stats.temporal_records, 1);
        assert_eq!(stats.year_freq.get(&1990), 1);
        assert_eq!(stats.min_year, Some(1990));
        assert_eq!(stats.max_year, Some(1990));
    }

    #[test]
    fn test_fact_extraction_line() {
        let stats = accumulate(
            "A\trel\tB\t<occursSince>\t\"1995-01-01\"\n",
            DatasetType::FactExtraction,
        );
        assert_eq!(stats.marker_freq.get(&"occursSince".to_string()), 1);
        assert_eq!(stats.year_freq.get(&1995), 1);
        assert_eq!(stats.temporal_records, 1);
    }

    #[test]
    fn test_generic_lines_have_no_temporal_contribution() {
        let stats = accumulate("A\trel\tB\t2010\textra\n", DatasetType::Generic);
        assert_eq!(stats.triples, 1);
        assert!(stats.year_freq.is_empty());
        assert_eq!(stats.temporal_records, 0);
    }

    #[test]
    fn test_year_range_accumulates_across_lines() {
        let input = "A\tr\tB\tsince\t1990\nC\tr\tD\tuntil\t2005\nE\tr\tF\tsince\t1971\n";
        let stats = accumulate(input, DatasetType::LinkedData);
        assert_eq!(stats.min_year, Some(1971));
        assert_eq!(stats.max_year, Some(2005));
        assert_eq!(stats.temporal_records, 3);
    }

    #[test]
    fn test_process_file_names_missing_path() {
        let err = process_file(Path::new("/nonexistent/split.txt"), DatasetType::Generic)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/split.txt"));
    }

    #[test]
    fn test_process_file_reads_from_disk() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "A\trel\tB\t2010-05-01").unwrap();
        writeln!(file, "C\trel\tD\t2011-06-02").unwrap();

        let stats = process_file(&path, DatasetType::EventCalendar).unwrap();
        assert_eq!(stats.triples, 2);
        assert_eq!(stats.min_date, NaiveDate::from_ymd_opt(2010, 5, 1));
        assert_eq!(stats.max_date, NaiveDate::from_ymd_opt(2011, 6, 2));
    }
}
