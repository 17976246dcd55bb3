// ============================================================
// Layer 3 — Sampler Errors
// ============================================================
// Fatal failures surfaced by the core. Malformed corpus records
// are NOT errors: the parser counts and skips them (see
// ParseReport in data::parser).
//
//   Configuration — the caller asked for something the current
//                   state cannot serve (no partition yet, a
//                   pattern longer than three seasons, ...)
//   Range         — a requested year is missing from a bucket
//   Unsatisfiable — no record in a pool matches the season
//                   window, so sampling could never finish
//   UnknownSymbol — a character has no token id
//   UnknownToken  — a token id has no character
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use thiserror::Error;

use crate::domain::season::Season;

/// Errors raised by the vocabulary, year partitioning and sampling code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    /// The request is invalid for the current configuration or state.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A year needed for sampling is absent from the corpus.
    #[error("Specified year ({year}) is not present in dataset. Maximum year is: {max_year}")]
    Range {
        /// The year that could not be found
        year: i32,
        /// The latest year present in the north corpus
        max_year: i32,
    },

    /// No record in the candidate pool satisfies the season window.
    #[error("No {season} record satisfies the season window for year {year}")]
    Unsatisfiable {
        /// Season tag being sampled
        season: Season,
        /// Year the season window is anchored on
        year: i32,
    },

    /// A character without a token id was encoded.
    #[error("Symbol {0:?} is not in the vocabulary")]
    UnknownSymbol(char),

    /// A token id without a character was decoded.
    #[error("Token id {0} is not in the vocabulary")]
    UnknownToken(u32),
}

impl SamplerError {
    /// Create a Configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a Range error.
    pub fn range(year: i32, max_year: i32) -> Self {
        Self::Range { year, max_year }
    }
}
