//! Data models for the statistics engine.
//!
//! This module contains the dataset type classifier and the report
//! structures shared by the orchestrator and the presentation layer.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Column-layout convention used to locate temporal information in a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetType {
    /// Event-calendar style: column 4 is a `YYYY-MM-DD` event date.
    EventCalendar,
    /// Linked-data style: column 4 is a validity marker, column 5 a year.
    LinkedData,
    /// Fact-extraction style: column 4 is a bracketed marker, column 5 a
    /// quoted date whose digits carry the year.
    FactExtraction,
    /// No known temporal convention.
    Generic,
}

impl DatasetType {
    /// Classify a dataset directory name by case-insensitive substring
    /// match, in priority order. Never fails; unknown names are `Generic`.
    pub fn classify(dataset_name: &str) -> Self {
        let name = dataset_name.to_lowercase();
        if name.contains("icews") {
            DatasetType::EventCalendar
        } else if name.contains("wikidata") {
            DatasetType::LinkedData
        } else if name.contains("yago") {
            DatasetType::FactExtraction
        } else {
            DatasetType::Generic
        }
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetType::EventCalendar => write!(f, "event-calendar"),
            DatasetType::LinkedData => write!(f, "linked-data"),
            DatasetType::FactExtraction => write!(f, "fact-extraction"),
            DatasetType::Generic => write!(f, "generic"),
        }
    }
}

/// Read-only ranked summary derived from a `Stats` value.
///
/// Field order here defines the JSON key order of the report document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of accepted triple lines.
    pub triples: u64,
    /// Cardinality of the unique subject set.
    pub unique_subjects: usize,
    /// Cardinality of the unique object set.
    pub unique_objects: usize,
    /// Cardinality of the unique relation set.
    pub unique_relations: usize,
    /// Top-N entities (subject and object occurrences combined).
    pub top_entities: Vec<(String, u64)>,
    /// Top-N subjects.
    pub top_subjects: Vec<(String, u64)>,
    /// Top-N objects.
    pub top_objects: Vec<(String, u64)>,
    /// Top-N relations.
    pub top_relations: Vec<(String, u64)>,
    /// Top-N years by triple count.
    pub top_years: Vec<(i32, u64)>,
    /// Top-N temporal validity markers.
    pub temporal_markers: Vec<(String, u64)>,
    /// Lines that carried an explicit temporal annotation.
    pub temporal_records: u64,
    /// Earliest event date seen, if any.
    pub min_date: Option<NaiveDate>,
    /// Latest event date seen, if any.
    pub max_date: Option<NaiveDate>,
    /// Earliest year seen, if any.
    pub min_year: Option<i32>,
    /// Latest year seen, if any.
    pub max_year: Option<i32>,
}

/// Per-dataset result: the aggregate summary plus optional per-split
/// summaries (empty unless per-file reporting was requested).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    /// Summary of all splits folded together.
    pub aggregate: Summary,
    /// Per-split summaries keyed by file name.
    pub files: BTreeMap<String, Summary>,
}

/// Full run result keyed by dataset name. `BTreeMap` keeps the JSON key
/// order stable and matching the sorted discovery order.
pub type AnalysisReport = BTreeMap<String, DatasetReport>;
