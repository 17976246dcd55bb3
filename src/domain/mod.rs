// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define the core
// concepts of the system:
//
//   SequenceRecord  — one dated, located HA sequence
//   YearBuckets     — records grouped by collection year
//   Season          — winter / summer tags and their patterns
//   Vocabulary      — character ↔ token id mapping
//   SamplerError    — every fatal failure the core can raise
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Think of this layer as the "dictionary" of the system:
// it defines what things ARE, not how they are produced.
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

/// Sequence records and per-year buckets
pub mod record;

/// Season tags, patterns and month bounds
pub mod season;

/// Character ↔ token id mapping with reserved control symbols
pub mod vocabulary;

/// Error taxonomy for configuration, range and sampling failures
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
