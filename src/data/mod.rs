// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw FASTA files to token batches.
//
// The pipeline flows in this order:
//
//   north.fa / south.fa
//       │
//       ▼
//   FastaLoader       → reads files, yields RawRecords
//       │
//       ▼
//   CorpusParser      → dates, locations, length filter,
//       │               per-year buckets + alphabet
//       ▼
//   vocab_builder     → one Vocabulary for both corpora
//       │
//       ▼
//   YearPartition     → training / validation years
//       │
//       ▼
//   SeasonalSampler   → winter & summer composites per pivot
//       │
//       ▼
//   BatchAssembler    → sliced, padded (input, target) rows
//       │
//       ▼
//   PairDataset /     → Burn Dataset and Batcher for the
//   PairBatcher         external training loop
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads FASTA files into raw records
pub mod fasta;

/// Parses raw records into per-year buckets
pub mod parser;

/// Builds the shared character vocabulary
pub mod vocab_builder;

/// Splits corpus years into training and validation years
pub mod years;

/// Draws season-consistent composite sequences
pub mod sampler;

/// Assembles sliced and padded token batches
pub mod batch;

/// Implements Burn's Dataset trait for training pairs
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Per-year residue and sequence statistics
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures;
