//! Entity label joining.
//!
//! Enriches a split with human-readable labels: each row with the three
//! mandatory columns gets the subject and object labels inserted after
//! the object column, with a placeholder for unmapped identifiers. Rows
//! under the column minimum pass through unchanged.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Resolve a delimiter argument to a single character. The literal `\t`
/// escape is accepted so shells need no real tab on the command line.
pub fn resolve_delimiter(delimiter: &str) -> Result<char> {
    let resolved = match delimiter {
        "\\t" => "\t",
        other => other,
    };
    let mut chars = resolved.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!(
            "delimiter must resolve to a single character, got {:?}; use '\\t' for tabs",
            delimiter
        ),
    }
}

/// Load a two-column identifier -> label mapping file. Rows with a blank
/// identifier are skipped; a missing label column maps to an empty label.
pub fn load_mapping(path: &Path, delimiter: char) -> Result<HashMap<String, String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open mapping file: {}", path.display()))?;
    let mut mapping = HashMap::new();
    for line in BufReader::new(file).lines() {
        let line =
            line.with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
        let mut parts = line.split(delimiter);
        let key = parts.next().unwrap_or("").trim();
        if key.is_empty() {
            continue;
        }
        let label = parts.next().unwrap_or("").trim().to_string();
        mapping.insert(key.to_string(), label);
    }
    Ok(mapping)
}

/// Default output path: the source suffix with `.labeled` appended.
pub fn default_output_path(dataset: &Path) -> PathBuf {
    let mut name = dataset
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.push_str(".labeled");
    dataset.with_file_name(name)
}

/// Rewrite `dataset` with subject/object labels inserted after the object
/// column. `missing_value` substitutes for identifiers absent from the
/// mapping.
pub fn attach_labels(
    dataset: &Path,
    mapping: &HashMap<String, String>,
    delimiter: char,
    output: &Path,
    missing_value: &str,
) -> Result<()> {
    let source = File::open(dataset)
        .with_context(|| format!("Failed to open split file: {}", dataset.display()))?;
    let target = File::create(output)
        .with_context(|| format!("Failed to write labeled file: {}", output.display()))?;
    let mut writer = BufWriter::new(target);

    for line in BufReader::new(source).lines() {
        let line =
            line.with_context(|| format!("Failed to read split file: {}", dataset.display()))?;
        let columns: Vec<&str> = line.split(delimiter).collect();
        if columns.len() < 3 {
            writeln!(writer, "{}", line)
                .with_context(|| format!("Failed to write labeled file: {}", output.display()))?;
            continue;
        }

        let subject_label = mapping
            .get(columns[0])
            .map(String::as_str)
            .unwrap_or(missing_value);
        let object_label = mapping
            .get(columns[2])
            .map(String::as_str)
            .unwrap_or(missing_value);

        let mut row: Vec<&str> = Vec::with_capacity(columns.len() + 2);
        row.extend_from_slice(&columns[..3]);
        row.push(subject_label);
        row.push(object_label);
        row.extend_from_slice(&columns[3..]);

        writeln!(writer, "{}", row.join(&delimiter.to_string()))
            .with_context(|| format!("Failed to write labeled file: {}", output.display()))?;
    }
    Ok(())
}

/// Run the label join end to end.
pub fn run(
    dataset: &Path,
    mapping_path: &Path,
    output: Option<PathBuf>,
    delimiter: &str,
    missing_value: &str,
) -> Result<()> {
    let delimiter = resolve_delimiter(delimiter)?;
    let mapping = load_mapping(mapping_path, delimiter)?;
    if mapping.is_empty() {
        bail!("no entries found in mapping file {}", mapping_path.display());
    }

    let output = output.unwrap_or_else(|| default_output_path(dataset));
    attach_labels(dataset, &mapping, delimiter, &output, missing_value)?;
    println!("Wrote {}", output.display());
    Ok(())
}
