// ============================================================
// Layer 4 — FASTA Corpus Loader
// ============================================================
// Reads a FASTA file into RawRecords.
//
// How a FASTA file looks:
//
//   >CY121680 A/Boston/DOA2107/2012 2012/11/01 HA
//   MKAILVVLLYTFATANADTLCIGYHANNSTDTVDTVLEKNVTVTHSVNLLEDKHNGKLCK
//   LRGVAPLHLGKCNIAGWILGNPECESLSTASSWSYIVETSSSDNGTCYPGDFIDYEELRE
//   >CY121688 ...
//
//   - a '>' line starts a record; the text after '>' is the
//     description, and its first whitespace token is the id
//   - every following line up to the next '>' is sequence,
//     concatenated with surrounding whitespace trimmed
//   - blank lines and text before the first '>' are ignored
//
// The loader does no validation; dates and lengths are the
// corpus parser's job (data::parser).
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::domain::record::RawRecord;
use crate::domain::traits::RecordSource;

/// Loads every record of one FASTA file.
/// Implements the RecordSource trait from Layer 3.
pub struct FastaLoader {
    /// Path to the .fa / .fasta file
    path: String,
}

impl FastaLoader {
    /// Create a new FastaLoader pointed at a file
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FastaLoader {
    fn name(&self) -> String {
        self.path.clone()
    }

    fn load_all(&self) -> Result<Vec<RawRecord>> {
        let path = Path::new(&self.path);
        let file = File::open(path)
            .with_context(|| format!("Cannot open FASTA file '{}'", self.path))?;

        let records = read_fasta(BufReader::new(file))
            .with_context(|| format!("Cannot read FASTA file '{}'", self.path))?;

        tracing::info!("Read {} records from '{}'", records.len(), self.path);
        Ok(records)
    }
}

/// Parse FASTA text from any buffered reader.
pub fn read_fasta<R: BufRead>(reader: R) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut header: Option<String> = None;
    let mut sequence = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if let Some(description) = line.strip_prefix('>') {
            // Close the previous record before starting a new one
            if let Some(done) = header.take() {
                records.push(make_record(done, std::mem::take(&mut sequence)));
            }
            header = Some(description.trim().to_string());
        } else if header.is_some() {
            sequence.push_str(line);
        }
    }

    if let Some(done) = header {
        records.push(make_record(done, sequence));
    }

    Ok(records)
}

fn make_record(description: String, sequence: String) -> RawRecord {
    let id = description
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    RawRecord { id, description, sequence }
}
