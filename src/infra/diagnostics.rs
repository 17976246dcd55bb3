// ============================================================
// Layer 6 — Diagnostics Sinks
// ============================================================
// Implementations of the DiagnosticsSink trait from Layer 3.
//
//   TracingDiagnostics     — logs parse reports through tracing
//                            (what the CLI uses)
//   CollectingDiagnostics  — keeps reports in memory so tests
//                            and callers can inspect them
//
// Reports are observability only: nothing in the pipeline
// reads them back to make decisions.
//
// Reference: tracing crate documentation

use std::cell::RefCell;

use crate::domain::record::{Hemisphere, ParseReport};
use crate::domain::traits::DiagnosticsSink;

/// Logs every parse report; warns when records were dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn parse_report(&self, hemisphere: Hemisphere, report: &ParseReport) {
        tracing::info!(
            "{} corpus: {} records accepted",
            hemisphere,
            report.accepted
        );

        if report.missing_date > 0 || report.bad_length > 0 {
            tracing::warn!(
                "{} corpus: dropped {} with missing date, {} with bad length",
                hemisphere,
                report.missing_date,
                report.bad_length,
            );
        }
    }
}

/// Stores every report it receives, in order.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    reports: RefCell<Vec<(Hemisphere, ParseReport)>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far
    pub fn reports(&self) -> Vec<(Hemisphere, ParseReport)> {
        self.reports.borrow().clone()
    }

    /// The report of one hemisphere, if it was received
    pub fn report_for(&self, hemisphere: Hemisphere) -> Option<ParseReport> {
        self.reports
            .borrow()
            .iter()
            .find(|(h, _)| *h == hemisphere)
            .map(|(_, r)| *r)
    }
}

impl DiagnosticsSink for CollectingDiagnostics {
    fn parse_report(&self, hemisphere: Hemisphere, report: &ParseReport) {
        self.reports.borrow_mut().push((hemisphere, *report));
    }
}
