//! Tail-entity sampling.
//!
//! Inspects a split's coverage of rare entities: entities whose combined
//! subject/object frequency is at or below a threshold, and a random
//! sample of the triples touching them.

use crate::stats::accumulator::triple_columns;
use crate::stats::freq::FreqMap;
use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One (subject, relation, object) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub relation: String,
    pub object: String,
}

/// Load all accepted triples of one split, using the same acceptance rule
/// as the accumulator.
pub fn load_triples(path: &Path) -> Result<Vec<Triple>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open split file: {}", path.display()))?;
    let mut triples = Vec::new();
    for line in BufReader::new(file).lines() {
        let line =
            line.with_context(|| format!("Failed to read split file: {}", path.display()))?;
        if let Some(columns) = triple_columns(&line) {
            triples.push(Triple {
                subject: columns[0].to_string(),
                relation: columns[1].to_string(),
                object: columns[2].to_string(),
            });
        }
    }
    Ok(triples)
}

/// Entities whose occurrence frequency is at or below `max_frequency`,
/// in first-seen order.
pub fn find_tail_entities(triples: &[Triple], max_frequency: u64) -> Vec<String> {
    let mut freq: FreqMap<String> = FreqMap::new();
    for triple in triples {
        freq.increment(triple.subject.clone());
        freq.increment(triple.object.clone());
    }
    freq.iter()
        .filter(|(_, count)| *count <= max_frequency)
        .map(|(entity, _)| entity.clone())
        .collect()
}

/// Randomly sample up to `sample_size` triples that touch a tail entity.
/// All qualifying triples are returned when there are fewer than
/// `sample_size` of them.
pub fn sample_tail_triples(
    triples: &[Triple],
    tail_entities: &[String],
    sample_size: usize,
    seed: Option<u64>,
) -> Vec<Triple> {
    let tail_set: HashSet<&str> = tail_entities.iter().map(String::as_str).collect();
    let qualifying: Vec<&Triple> = triples
        .iter()
        .filter(|t| tail_set.contains(t.subject.as_str()) || tail_set.contains(t.object.as_str()))
        .collect();

    if qualifying.len() <= sample_size {
        return qualifying.into_iter().cloned().collect();
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    qualifying
        .choose_multiple(&mut rng, sample_size)
        .map(|t| (*t).clone())
        .collect()
}

/// Run the sampler over one split and print the result.
pub fn run(path: &Path, max_frequency: u64, sample_size: usize, seed: Option<u64>) -> Result<()> {
    let triples = load_triples(path)?;
    if triples.is_empty() {
        bail!("no triples found in {}", path.display());
    }

    let tail_entities = find_tail_entities(&triples, max_frequency);
    if tail_entities.is_empty() {
        println!("No entities fall below the specified frequency threshold.");
        return Ok(());
    }

    let samples = sample_tail_triples(&triples, &tail_entities, sample_size, seed);
    println!("Found {} tail entities.", tail_entities.len());
    println!("Showing {} sampled triples:", samples.len());
    for triple in &samples {
        println!("{}\t{}\t{}", triple.subject, triple.relation, triple.object);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn triple(s: &str, r: &str, o: &str) -> Triple {
        Triple {
            subject: s.to_string(),
            relation: r.to_string(),
            object: o.to_string(),
        }
    }

    #[test]
    fn test_load_triples_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "A\trel\tB\t2014-01-01").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "short\tline").unwrap();
        writeln!(file, "C\trel\tD").unwrap();

        let triples = load_triples(&path).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0], triple("A", "rel", "B"));
    }

    #[test]
    fn test_find_tail_entities_threshold() {
        let triples = vec![
            triple("hub", "r", "a"),
            triple("hub", "r", "b"),
            triple("hub", "r", "c"),
        ];
        // hub appears 3 times, a/b/c once each.
        let tail = find_tail_entities(&triples, 2);
        assert_eq!(tail, vec!["a", "b", "c"]);

        let tail_all = find_tail_entities(&triples, 3);
        assert_eq!(tail_all.len(), 4);
    }

    #[test]
    fn test_sample_returns_all_when_under_size() {
        let triples = vec![triple("a", "r", "b"), triple("c", "r", "d")];
        let tail = vec!["a".to_string()];
        let samples = sample_tail_triples(&triples, &tail, 10, None);
        assert_eq!(samples, vec![triple("a", "r", "b")]);
    }

    #[test]
    fn test_sample_is_seeded_and_bounded() {
        let triples: Vec<Triple> = (0..50)
            .map(|i| triple(&format!("s{}", i), "r", &format!("o{}", i)))
            .collect();
        let tail: Vec<String> = (0..50).map(|i| format!("s{}", i)).collect();

        let first = sample_tail_triples(&triples, &tail, 5, Some(42));
        let second = sample_tail_triples(&triples, &tail, 5, Some(42));
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        for sample in &first {
            assert!(triples.contains(sample));
        }
    }

    #[test]
    fn test_run_fails_on_empty_split() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::File::create(&path).unwrap();

        let err = run(&path, 5, 10, None).unwrap_err();
        assert!(err.to_string().contains("no triples found"));
    }
}
