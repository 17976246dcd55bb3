// ============================================================
// Layer 4 — Corpus Parser
// ============================================================
// Turns RawRecords into SequenceRecords grouped by year.
//
// Where the metadata lives:
//   The description ends with "<strain> <date> <segment>":
//
//     CY121680 A/Boston/DOA2107/2012 2012/11/01 HA
//              └──── strain ─────┘ └─ date ─┘
//
//   - date      = second-to-last token, "year/month/day"
//   - location  = second '/'-field of the token before the date
//
// Records are dropped (counted, never raised) when:
//   1. the date has no numeric year, month or day
//      (e.g. "2012/11" or "2012/unknown")   → missing_date
//   2. the sequence length differs from the expected length
//                                           → bad_length
// The checks run in that order, so a record failing both is
// counted once, as missing_date.
//
// Alongside the buckets, the parser collects the alphabet of
// every accepted sequence for the vocabulary builder.
//
// Reference: Rust Book §8 (Strings), §9 (Option and Result)

use std::collections::BTreeSet;

use crate::domain::record::{ParseReport, RawRecord, SequenceRecord, YearBuckets};

/// HA1+HA2 length of the sequences the training corpora use.
pub const DEFAULT_SEQUENCE_LEN: usize = 566;

/// Output of parsing one corpus.
#[derive(Debug, Clone, Default)]
pub struct ParsedCorpus {
    /// Accepted records by collection year
    pub buckets: YearBuckets,

    /// Distinct characters seen in accepted sequences
    pub alphabet: BTreeSet<char>,

    /// Accept / reject counts
    pub report: ParseReport,
}

/// Why a record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingDate,
    BadLength,
}

/// Parses raw records, checking sequence length against `expected_len`.
pub struct CorpusParser {
    expected_len: usize,
}

impl CorpusParser {
    /// Create a parser that keeps sequences of exactly `expected_len` residues
    pub fn new(expected_len: usize) -> Self {
        Self { expected_len }
    }

    /// Parse a whole corpus.
    pub fn parse<I>(&self, records: I) -> ParsedCorpus
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut parsed = ParsedCorpus::default();

        for raw in records {
            match self.parse_record(raw) {
                Ok(record) => {
                    parsed.alphabet.extend(record.sequence.chars());
                    parsed.buckets.insert(record);
                    parsed.report.accepted += 1;
                }
                Err(Rejection::MissingDate) => parsed.report.missing_date += 1,
                Err(Rejection::BadLength)   => parsed.report.bad_length += 1,
            }
        }

        tracing::debug!(
            "Parsed corpus: {} accepted, {} missing date, {} bad length",
            parsed.report.accepted,
            parsed.report.missing_date,
            parsed.report.bad_length,
        );

        parsed
    }

    /// Parse a single record, or say why it is rejected.
    pub fn parse_record(&self, raw: RawRecord) -> Result<SequenceRecord, Rejection> {
        let tokens: Vec<&str> = raw.description.split_whitespace().collect();

        // Need at least "<date> <segment>"
        if tokens.len() < 2 {
            return Err(Rejection::MissingDate);
        }
        let date_idx = tokens.len() - 2;

        let (year, month, day) = parse_date(tokens[date_idx]).ok_or(Rejection::MissingDate)?;

        if raw.sequence.chars().count() != self.expected_len {
            return Err(Rejection::BadLength);
        }

        let location = date_idx
            .checked_sub(1)
            .and_then(|i| tokens[i].split('/').nth(1))
            .unwrap_or_default()
            .to_string();

        Ok(SequenceRecord {
            id: raw.id,
            year,
            month,
            day,
            location,
            sequence: raw.sequence,
        })
    }
}

impl Default for CorpusParser {
    fn default() -> Self {
        Self::new(DEFAULT_SEQUENCE_LEN)
    }
}

/// Parse "year/month/day"; None unless all three parts are numeric.
fn parse_date(token: &str) -> Option<(i32, u32, u32)> {
    let mut parts = token.split('/');
    let year  = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day   = parts.next()?.parse().ok()?;
    Some((year, month, day))
}
