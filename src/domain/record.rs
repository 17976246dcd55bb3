// ============================================================
// Layer 3 — Sequence Record Domain Types
// ============================================================
// SequenceRecord is one accepted HA sequence with its parsed
// metadata. It is only ever built by the corpus parser, after
// the date and length checks have passed, so every value of
// this type is valid by construction.
//
// RawRecord is what a corpus source yields before parsing,
// and ParseReport counts what the parser kept and dropped.
//
// YearBuckets groups records of ONE corpus (north or south)
// by their collection year. A BTreeMap keeps the years sorted,
// which makes min/max lookups and listing deterministic.
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §8 (Collections: HashMap / BTreeMap)

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which corpus a bucket (and each of its records) came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    /// Northern hemisphere corpus, source of winter samples
    North,
    /// Southern hemisphere corpus, source of summer samples
    South,
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::North => write!(f, "north"),
            Hemisphere::South => write!(f, "south"),
        }
    }
}

/// A record as handed over by a corpus source, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Record identifier
    pub id: String,

    /// Free-text description; its last tokens carry strain name and date
    pub description: String,

    /// The raw residue string
    pub sequence: String,
}

impl RawRecord {
    pub fn new(
        id:          impl Into<String>,
        description: impl Into<String>,
        sequence:    impl Into<String>,
    ) -> Self {
        Self {
            id:          id.into(),
            description: description.into(),
            sequence:    sequence.into(),
        }
    }
}

/// What the parser kept and dropped from one corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Records stored in a year bucket
    pub accepted: usize,

    /// Dropped because the date lacked a numeric year, month or day
    pub missing_date: usize,

    /// Dropped because the sequence had the wrong length
    pub bad_length: usize,
}

impl ParseReport {
    /// Every record the source yielded
    pub fn total(&self) -> usize {
        self.accepted + self.missing_date + self.bad_length
    }
}

/// One dated, located amino-acid sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Record identifier (first token of the FASTA header)
    pub id: String,

    /// Collection year
    pub year: i32,

    /// Collection month, 1–12 in well-formed data
    pub month: u32,

    /// Collection day of month
    pub day: u32,

    /// Location field taken from the strain name
    pub location: String,

    /// The amino-acid sequence, always of the configured length
    pub sequence: String,
}

impl SequenceRecord {
    /// Create a new SequenceRecord
    pub fn new(
        id:       impl Into<String>,
        year:     i32,
        month:    u32,
        day:      u32,
        location: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            id:       id.into(),
            year,
            month,
            day,
            location: location.into(),
            sequence: sequence.into(),
        }
    }
}

/// Records of one corpus grouped by collection year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearBuckets {
    buckets: BTreeMap<i32, Vec<SequenceRecord>>,
}

impl YearBuckets {
    /// Create an empty set of buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the bucket of its own year
    pub fn insert(&mut self, record: SequenceRecord) {
        self.buckets.entry(record.year).or_default().push(record);
    }

    /// Records collected in `year`, if that year is present
    pub fn get(&self, year: i32) -> Option<&[SequenceRecord]> {
        self.buckets.get(&year).map(Vec::as_slice)
    }

    /// Returns true if at least one record was collected in `year`
    pub fn contains(&self, year: i32) -> bool {
        self.buckets.contains_key(&year)
    }

    /// All years present, ascending
    pub fn years(&self) -> Vec<i32> {
        self.buckets.keys().copied().collect()
    }

    /// Earliest year present
    pub fn min_year(&self) -> Option<i32> {
        self.buckets.keys().next().copied()
    }

    /// Latest year present
    pub fn max_year(&self) -> Option<i32> {
        self.buckets.keys().next_back().copied()
    }

    /// Total number of records across all years
    pub fn record_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true if no record was accepted
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate over (year, records) pairs in ascending year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[SequenceRecord])> + '_ {
        self.buckets.iter().map(|(y, r)| (*y, r.as_slice()))
    }
}

impl FromIterator<SequenceRecord> for YearBuckets {
    fn from_iter<I: IntoIterator<Item = SequenceRecord>>(iter: I) -> Self {
        let mut buckets = Self::new();
        for record in iter {
            buckets.insert(record);
        }
        buckets
    }
}
