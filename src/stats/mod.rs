//! Running statistics and the merge algebra.
//!
//! A `Stats` value is built up mutably while one split is read, then
//! treated as immutable: per-file values are folded into a dataset
//! aggregate with the pure [`Stats::merge`] combinator, which is
//! commutative and associative so the fold order of splits cannot change
//! the result.

pub mod accumulator;
pub mod freq;

use crate::models::Summary;
use crate::temporal::TemporalFields;
use chrono::NaiveDate;
use freq::FreqMap;
use std::collections::HashSet;

/// Running statistics for one split or one dataset aggregate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    /// Number of accepted triple lines.
    pub triples: u64,
    /// Unique subject identifiers.
    pub subjects: HashSet<String>,
    /// Unique object identifiers.
    pub objects: HashSet<String>,
    /// Unique relation identifiers.
    pub relations: HashSet<String>,
    /// Occurrences per subject.
    pub subject_freq: FreqMap<String>,
    /// Occurrences per object.
    pub object_freq: FreqMap<String>,
    /// Occurrences per entity (subject and object positions combined).
    pub entity_freq: FreqMap<String>,
    /// Occurrences per relation.
    pub relation_freq: FreqMap<String>,
    /// Triple count per year.
    pub year_freq: FreqMap<i32>,
    /// Occurrences per temporal validity marker.
    pub marker_freq: FreqMap<String>,
    /// Lines that carried an explicit temporal annotation.
    pub temporal_records: u64,
    /// Earliest event date seen.
    pub min_date: Option<NaiveDate>,
    /// Latest event date seen.
    pub max_date: Option<NaiveDate>,
    /// Earliest year seen.
    pub min_year: Option<i32>,
    /// Latest year seen.
    pub max_year: Option<i32>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one accepted (subject, relation, object) line.
    pub fn record_triple(&mut self, subject: &str, relation: &str, object: &str) {
        self.triples += 1;
        self.subjects.insert(subject.to_string());
        self.objects.insert(object.to_string());
        self.relations.insert(relation.to_string());
        self.subject_freq.increment(subject.to_string());
        self.object_freq.increment(object.to_string());
        self.entity_freq.increment(subject.to_string());
        self.entity_freq.increment(object.to_string());
        self.relation_freq.increment(relation.to_string());
    }

    /// Apply the extractor's temporal contribution for one line.
    pub fn apply_temporal(&mut self, fields: TemporalFields) {
        if let Some(marker) = fields.marker {
            self.marker_freq.increment(marker);
            self.temporal_records += 1;
        }
        if let Some(year) = fields.year {
            self.year_freq.increment(year);
            self.min_year = merge_min(self.min_year, Some(year));
            self.max_year = merge_max(self.max_year, Some(year));
        }
        if let Some(date) = fields.date {
            self.min_date = merge_min(self.min_date, Some(date));
            self.max_date = merge_max(self.max_date, Some(date));
        }
    }

    /// Combine two statistics values into a new one.
    ///
    /// Commutative and associative over counts, set unions, frequency sums
    /// and extrema, so a dataset aggregate is independent of the order in
    /// which its splits were folded.
    pub fn merge(mut self, other: Stats) -> Stats {
        self.triples += other.triples;
        self.subjects.extend(other.subjects);
        self.objects.extend(other.objects);
        self.relations.extend(other.relations);
        self.subject_freq.merge_from(&other.subject_freq);
        self.object_freq.merge_from(&other.object_freq);
        self.entity_freq.merge_from(&other.entity_freq);
        self.relation_freq.merge_from(&other.relation_freq);
        self.year_freq.merge_from(&other.year_freq);
        self.marker_freq.merge_from(&other.marker_freq);
        self.temporal_records += other.temporal_records;
        self.min_date = merge_min(self.min_date, other.min_date);
        self.max_date = merge_max(self.max_date, other.max_date);
        self.min_year = merge_min(self.min_year, other.min_year);
        self.max_year = merge_max(self.max_year, other.max_year);
        self
    }

    /// Derive a ranked, read-only summary.
    pub fn summarize(&self, top_n: usize) -> Summary {
        Summary {
            triples: self.triples,
            unique_subjects: self.subjects.len(),
            unique_objects: self.objects.len(),
            unique_relations: self.relations.len(),
            top_entities: self.entity_freq.top_n(top_n),
            top_subjects: self.subject_freq.top_n(top_n),
            top_objects: self.object_freq.top_n(top_n),
            top_relations: self.relation_freq.top_n(top_n),
            top_years: self.year_freq.top_n(top_n),
            temporal_markers: self.marker_freq.top_n(top_n),
            temporal_records: self.temporal_records,
            min_date: self.min_date,
            max_date: self.max_date,
            min_year: self.min_year,
            max_year: self.max_year,
        }
    }
}

/// Pointwise minimum over optional values: an absent side never wins
/// against a present one.
pub fn merge_min<T: Ord>(left: Option<T>, right: Option<T>) -> Option<T> {
    match (left, right) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// Pointwise maximum over optional values: an absent side never wins
/// against a present one.
pub fn merge_max<T: Ord>(left: Option<T>, right: Option<T>) -> Option<T> {
    match (left, right) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}
