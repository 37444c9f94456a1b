//! Text and JSON report generation.
//!
//! Pure projections of the analysis result: an ordered block of labeled
//! lines per dataset for the console, and a pretty-printed JSON document
//! with stable key ordering for machine consumers.

use crate::models::{AnalysisReport, Summary};
use anyhow::{Context, Result};
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

/// Render one summary as an ordered block of labeled lines. Lines whose
/// underlying list or value is empty are omitted.
pub fn humanize(name: &str, summary: &Summary) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("=== {} ===", name));
    lines.push(format!(
        "Total triples: {}; unique subjects: {}; unique objects: {}; relations: {}",
        thousands(summary.triples),
        thousands(summary.unique_subjects as u64),
        thousands(summary.unique_objects as u64),
        thousands(summary.unique_relations as u64)
    ));
    if !summary.top_entities.is_empty() {
        lines.push(format!(
            "Top entities: {}",
            format_ranking(&summary.top_entities)
        ));
    }
    if !summary.top_relations.is_empty() {
        lines.push(format!(
            "Top relations: {}",
            format_ranking(&summary.top_relations)
        ));
    }
    if !summary.top_years.is_empty() {
        lines.push(format!(
            "Most active years: {}",
            format_ranking(&summary.top_years)
        ));
    }
    if !summary.temporal_markers.is_empty() {
        lines.push(format!(
            "Temporal markers: {}; with explicit temporal info: {}",
            format_ranking(&summary.temporal_markers),
            thousands(summary.temporal_records)
        ));
    }
    if let (Some(min), Some(max)) = (summary.min_date, summary.max_date) {
        lines.push(format!("Date range: {} to {}", min, max));
    }
    if let (Some(min), Some(max)) = (summary.min_year, summary.max_year) {
        lines.push(format!("Year span: {} to {}", min, max));
    }
    lines
}

/// Render the whole run as console text, one block per dataset and
/// optionally an indented block per split.
pub fn render_text(report: &AnalysisReport, per_file: bool) -> String {
    let mut output = String::new();
    for (dataset, payload) in report {
        for line in humanize(dataset, &payload.aggregate) {
            output.push_str(&line);
            output.push('\n');
        }
        if per_file {
            for (filename, summary) in &payload.files {
                let lines = humanize(&format!("{}/{}", dataset, filename), summary);
                let mut iter = lines.into_iter();
                if let Some(header) = iter.next() {
                    output.push_str("  ");
                    output.push_str(&header);
                    output.push('\n');
                }
                for line in iter {
                    output.push_str("    ");
                    output.push_str(&line);
                    output.push('\n');
                }
            }
        }
        output.push('\n');
    }
    output
}

/// Serialize the full nested result as pretty JSON.
pub fn generate_json_report(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write the JSON report to a file.
pub fn write_json_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let content = generate_json_report(report)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

fn format_ranking<K: Display>(entries: &[(K, u64)]) -> String {
    entries
        .iter()
        .map(|(key, count)| format!("{} ({})", key, thousands(*count)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Group digits in threes: 1234567 -> "1,234,567".
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DatasetReport;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn sample_summary() -> Summary {
        Summary {
            triples: 1234,
            unique_subjects: 10,
            unique_objects: 12,
            unique_relations: 3,
            top_entities: vec![("A".to_string(), 40), ("B".to_string(), 25)],
            top_subjects: vec![("A".to_string(), 30)],
            top_objects: vec![("B".to_string(), 25)],
            top_relations: vec![("met".to_string(), 1000)],
            top_years: vec![(2014, 900), (2013, 334)],
            temporal_markers: Vec::new(),
            temporal_records: 0,
            min_date: NaiveDate::from_ymd_opt(2013, 1, 2),
            max_date: NaiveDate::from_ymd_opt(2014, 12, 30),
            min_year: None,
            max_year: None,
        }
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_humanize_orders_and_formats_lines() {
        let lines = humanize("icews14", &sample_summary());
        assert_eq!(lines[0], "=== icews14 ===");
        assert!(lines[1].starts_with("Total triples: 1,234;"));
        assert!(lines.iter().any(|l| l == "Top entities: A (40), B (25)"));
        assert!(lines
            .iter()
            .any(|l| l == "Most active years: 2014 (900), 2013 (334)"));
        assert!(lines
            .iter()
            .any(|l| l == "Date range: 2013-01-02 to 2014-12-30"));
    }

    #[test]
    fn test_humanize_omits_empty_sections() {
        let lines = humanize("icews14", &sample_summary());
        assert!(!lines.iter().any(|l| l.starts_with("Temporal markers:")));
        assert!(!lines.iter().any(|l| l.starts_with("Year span:")));
    }

    #[test]
    fn test_render_text_per_file_indents_split_blocks() {
        let mut files = BTreeMap::new();
        files.insert("train.txt".to_string(), sample_summary());
        let mut report: AnalysisReport = BTreeMap::new();
        report.insert(
            "icews14".to_string(),
            DatasetReport {
                aggregate: sample_summary(),
                files,
            },
        );

        let text = render_text(&report, true);
        assert!(text.contains("=== icews14 ==="));
        assert!(text.contains("  === icews14/train.txt ==="));
        assert!(text.contains("    Total triples:"));

        let without = render_text(&report, false);
        assert!(!without.contains("train.txt"));
    }

    #[test]
    fn test_json_report_shape() {
        let mut report: AnalysisReport = BTreeMap::new();
        report.insert(
            "wikidata".to_string(),
            DatasetReport {
                aggregate: sample_summary(),
                files: BTreeMap::new(),
            },
        );

        let json = generate_json_report(&report).unwrap();
        assert!(json.contains("\"wikidata\""));
        assert!(json.contains("\"aggregate\""));
        assert!(json.contains("\"files\": {}"));
        assert!(json.contains("\"min_date\": \"2013-01-02\""));
        assert!(json.contains("\"min_year\": null"));
    }

    #[test]
    fn test_write_json_report_names_bad_path() {
        let report: AnalysisReport = BTreeMap::new();
        let err = write_json_report(&report, Path::new("/nonexistent/dir/out.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dir/out.json"));
    }
}
