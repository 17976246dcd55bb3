// ============================================================
// Layer 4 — Corpus Statistics
// ============================================================
// Simple per-year summaries of a bucket, useful for checking
// what the sampler will draw from:
//
//   residue_counts_by_position — for every residue, how often
//       it occurs at each sequence position
//   sequence_frequencies       — distinct sequences with their
//       counts, most common first
//
// Reference: Rust Book §8 (Hash Maps)

use std::collections::{BTreeMap, HashMap};

use crate::domain::record::SequenceRecord;

/// For each residue, its count at every position (index = position).
pub fn residue_counts_by_position(records: &[SequenceRecord]) -> BTreeMap<char, Vec<usize>> {
    let width = records.iter().map(|r| r.sequence.chars().count()).max().unwrap_or(0);
    let mut counts: BTreeMap<char, Vec<usize>> = BTreeMap::new();

    for record in records {
        for (pos, residue) in record.sequence.chars().enumerate() {
            counts.entry(residue).or_insert_with(|| vec![0; width])[pos] += 1;
        }
    }

    counts
}

/// Distinct sequences and how many records carry them.
/// Sorted by count (descending), ties by sequence.
pub fn sequence_frequencies(records: &[SequenceRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.sequence.as_str()).or_insert(0) += 1;
    }

    let mut freq: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(s, n)| (s.to_string(), n))
        .collect();
    freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freq
}

/// The most common sequence, if any
pub fn most_common_sequence(records: &[SequenceRecord]) -> Option<(String, usize)> {
    sequence_frequencies(records).into_iter().next()
}
