// ============================================================
// Layer 2 — Application
// ============================================================
// Wires the data pipeline into one object the CLI (or an
// external training loop) can hold on to.
//
// Rules for this layer:
//   - No parsing or sampling logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - No direct file access (that goes through RecordSource)
//   - Only workflow coordination
//
// Reference: Rust Book §7 (Module System)

// Load, partition and sample the two corpora
pub mod seasonal_corpus;
