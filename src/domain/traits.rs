// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two collaborators the core talks to without knowing
// their concrete types:
//
//   RecordSource     — yields raw records from some corpus
//                      (FastaLoader reads a .fa file; tests
//                      use an in-memory Vec)
//   DiagnosticsSink  — receives parse reports for logging
//                      (TracingDiagnostics, CollectingDiagnostics)
//
// Programming against traits keeps the parser and sampler free
// of file formats and logging backends.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::record::{Hemisphere, ParseReport, RawRecord};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can hand over the raw records of a corpus.
pub trait RecordSource {
    /// Short human readable name used in log lines (e.g. a file path)
    fn name(&self) -> String;

    /// Load every record of this source, in source order.
    fn load_all(&self) -> Result<Vec<RawRecord>>;
}

/// An in-memory corpus is a source too.
impl RecordSource for Vec<RawRecord> {
    fn name(&self) -> String {
        "in-memory".to_string()
    }

    fn load_all(&self) -> Result<Vec<RawRecord>> {
        Ok(self.clone())
    }
}

// ─── DiagnosticsSink ──────────────────────────────────────────────────────────
/// Receives observability data. Never influences control flow.
pub trait DiagnosticsSink {
    /// Called once per parsed corpus with its accept/reject counts.
    fn parse_report(&self, hemisphere: Hemisphere, report: &ParseReport);
}
