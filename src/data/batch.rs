// ============================================================
// Layer 4 — Batch Assembler
// ============================================================
// Builds a batch of N token sequences for next-token
// training, drawing composites from random years of one group
// (training or validation).
//
// Assembly loop:
//   while fewer than N sequences:
//     year  = random year of the group
//     count = random in 1..=remaining
//     add `count` full W,S,W composites pivoting on `year`
//
// Mixing several years in every batch keeps a batch from being
// dominated by one season.
//
// Slicing (optional, slice_len = L):
//   A full composite is ~3 × 566 tokens, too long for one
//   recurrent unroll, so each row is cut to a random window:
//
//   sequence  $ M K A I L V V L ... %
//   offset         ↓
//   input          A I L V          (L tokens)
//   target           I L V V        (same window, one ahead)
//
//   Windows running off the end are right-padded with the pad
//   id (0) up to L, so every row of the batch has length L.
//
// Without slice_len the raw variable-length sequences are
// returned as both inputs and targets.
//
// Reference: Rust Book §8 (Vectors and Slices)
//            rand crate documentation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::sampler::{Encoding, SampleRequest, SeasonalSampler};
use crate::data::years::{YearGroup, YearPartition};
use crate::domain::error::SamplerError;

// ─── Batch Types ──────────────────────────────────────────────────────────────

/// One input row and its next-token target row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    pub input:  Vec<u32>,
    pub target: Vec<u32>,
}

/// Inputs and targets of one batch, row-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBatch {
    pub inputs:  Vec<Vec<u32>>,
    pub targets: Vec<Vec<u32>>,
}

impl TokenBatch {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Split into per-row pairs (for burn's Dataset / Batcher)
    pub fn into_pairs(self) -> Vec<TrainingPair> {
        self.inputs
            .into_iter()
            .zip(self.targets)
            .map(|(input, target)| TrainingPair { input, target })
            .collect()
    }
}

// ─── TokenSource ──────────────────────────────────────────────────────────────
/// Anything that can produce full, token-encoded composites for a pivot year.
/// SeasonalSampler is the real implementation.
pub trait TokenSource {
    fn sample_tokens<R: Rng + ?Sized>(
        &self,
        rng:        &mut R,
        pivot_year: i32,
        count:      usize,
    ) -> Result<Vec<Vec<u32>>, SamplerError>;
}

impl TokenSource for SeasonalSampler<'_> {
    fn sample_tokens<R: Rng + ?Sized>(
        &self,
        rng:        &mut R,
        pivot_year: i32,
        count:      usize,
    ) -> Result<Vec<Vec<u32>>, SamplerError> {
        let request = SampleRequest::new(pivot_year, count).with_encoding(Encoding::Text);
        let vocab   = self.vocabulary();

        self.sample_text(rng, &request)?
            .iter()
            .map(|text| vocab.encode(text))
            .collect()
    }
}

// ─── BatchAssembler ───────────────────────────────────────────────────────────
pub struct BatchAssembler<'a, S: TokenSource> {
    source:    &'a S,
    partition: Option<&'a YearPartition>,
    pad_id:    u32,
}

impl<'a, S: TokenSource> BatchAssembler<'a, S> {
    /// `partition` is None until validation years have been set.
    pub fn new(source: &'a S, partition: Option<&'a YearPartition>, pad_id: u32) -> Self {
        Self { source, partition, pad_id }
    }

    /// Assemble `n` rows from `group`, sliced to `slice_len` when given.
    ///
    /// # Errors
    /// Configuration if no partition was set, the group has no years, or
    /// `slice_len` is zero; any sampler error is passed through.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        rng:       &mut R,
        n:         usize,
        group:     YearGroup,
        slice_len: Option<usize>,
    ) -> Result<TokenBatch, SamplerError> {
        let partition = self.partition.ok_or_else(|| {
            SamplerError::configuration("Please set train and validation years first")
        })?;

        if slice_len == Some(0) {
            return Err(SamplerError::configuration("slice length must be at least 1"));
        }

        if n == 0 {
            return Ok(TokenBatch::default());
        }

        let years = partition.years(group);
        if years.is_empty() {
            return Err(SamplerError::configuration(format!(
                "no {group:?} years available to sample from"
            )));
        }

        let mut sequences: Vec<Vec<u32>> = Vec::with_capacity(n);
        while sequences.len() < n {
            let remaining = n - sequences.len();
            let count     = rng.gen_range(1..=remaining);
            let year      = years[rng.gen_range(0..years.len())];

            tracing::trace!("Sampling {} composites pivoting on {}", count, year);
            sequences.extend(self.source.sample_tokens(rng, year, count)?);
        }

        let Some(slice_len) = slice_len else {
            return Ok(TokenBatch { inputs: sequences.clone(), targets: sequences });
        };

        let mut batch = TokenBatch {
            inputs:  Vec::with_capacity(n),
            targets: Vec::with_capacity(n),
        };
        for seq in &sequences {
            let offset = rng.gen_range(0..seq.len().saturating_sub(slice_len).max(1));
            let pair   = slice_pair(seq, offset, slice_len, self.pad_id);
            batch.inputs.push(pair.input);
            batch.targets.push(pair.target);
        }

        Ok(batch)
    }
}

/// Cut `seq[offset..offset+len]` and the window one position ahead,
/// both right-padded with `pad_id` to `len`.
pub fn slice_pair(seq: &[u32], offset: usize, len: usize, pad_id: u32) -> TrainingPair {
    let window = |start: usize| {
        let start = start.min(seq.len());
        let end   = (start + len).min(seq.len());

        let mut row = seq[start..end].to_vec();
        row.resize(len, pad_id);
        row
    };

    TrainingPair {
        input:  window(offset),
        target: window(offset + 1),
    }
}
