// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   config_store.rs — SamplerConfig JSON loading and printing
//                     (serde_json), so month windows, symbols
//                     and validation years can be changed
//                     without recompiling.
//
//   diagnostics.rs  — DiagnosticsSink implementations: one
//                     that logs through tracing, one that
//                     collects reports in memory.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// SamplerConfig JSON loading
pub mod config_store;

/// Parse report sinks (tracing / in-memory)
pub mod diagnostics;
