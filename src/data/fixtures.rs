// Test-only corpus shared by the data and application tests.
//
// Four years (2010..=2013), one record per month in both
// hemispheres. Each sequence spells out where it came from:
//
//   W C E K K K
//   │ │ └ month  ('A' = January)
//   │ └── year   ('A' = 2010)
//   └──── 'W' north, 'S' south
//
// so a test can tell from a sampled sequence alone which
// bucket and month it was drawn from.

use crate::data::parser::CorpusParser;
use crate::data::vocab_builder::{build_vocabulary, merge_alphabets};
use crate::domain::record::{RawRecord, YearBuckets};
use crate::domain::vocabulary::{ControlSymbols, Vocabulary};

pub const SEQ_LEN: usize = 6;
pub const FIRST_YEAR: i32 = 2010;
pub const LAST_YEAR: i32 = 2013;

/// Sequence for a (hemisphere tag, year, month) triple
pub fn seq_for(tag: char, year: i32, month: u32) -> String {
    let year_letter  = char::from(b'A' + (year - FIRST_YEAR) as u8);
    let month_letter = char::from(b'A' + (month - 1) as u8);
    format!("{tag}{year_letter}{month_letter}KKK")
}

fn raw_corpus(tag: char, place: &str) -> Vec<RawRecord> {
    let mut records = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        for month in 1..=12u32 {
            let id = format!("{tag}{year}{month:02}");
            let description = format!("{id} A/{place}/{month}/{year} {year}/{month:02}/15 HA");
            records.push(RawRecord::new(id, description, seq_for(tag, year, month)));
        }
    }
    records
}

/// Raw (north, south) records, ready for the parser
pub fn four_year_raw() -> (Vec<RawRecord>, Vec<RawRecord>) {
    (raw_corpus('W', "Boston"), raw_corpus('S', "Perth"))
}

/// Parsed (north, south) buckets
pub fn four_year_corpus() -> (YearBuckets, YearBuckets) {
    let (north, south) = four_year_raw();
    let parser = CorpusParser::new(SEQ_LEN);
    (parser.parse(north).buckets, parser.parse(south).buckets)
}

/// Vocabulary over both fixture corpora with the default symbols
pub fn tiny_vocabulary() -> Vocabulary {
    let (north, south) = four_year_raw();
    let parser = CorpusParser::new(SEQ_LEN);
    let north  = parser.parse(north);
    let south  = parser.parse(south);
    build_vocabulary(
        &merge_alphabets([&north.alphabet, &south.alphabet]),
        ControlSymbols::default(),
    )
}
