// ============================================================
// Layer 2 — SeasonalCorpus
// ============================================================
// Owns everything built at load time and hands out samples:
//
//   Step 1: Load raw records      (RecordSource, north + south)
//   Step 2: Parse into buckets    (Layer 4 - data::parser)
//   Step 3: Report parse counts   (DiagnosticsSink)
//   Step 4: Build the vocabulary  (Layer 4 - data::vocab_builder)
//
// After that the corpus is read-only. Only the year partition
// can change, through set_validation_years; batches cannot be
// drawn before it has been called once.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::{
    batch::{BatchAssembler, TokenBatch},
    dataset::PairDataset,
    parser::{CorpusParser, DEFAULT_SEQUENCE_LEN},
    sampler::{Composites, SampleRequest, SeasonWindows, SeasonalSampler},
    stats,
    vocab_builder::{build_vocabulary, merge_alphabets},
    years::{YearGroup, YearPartition},
};
use crate::domain::{
    error::SamplerError,
    record::{Hemisphere, ParseReport, RawRecord, SequenceRecord, YearBuckets},
    traits::{DiagnosticsSink, RecordSource},
    vocabulary::{ControlSymbols, Vocabulary},
};

// ─── Sampler Configuration ───────────────────────────────────────────────────
// Everything that shapes parsing and sampling. Serialisable so a
// run can be reproduced from a JSON file (see infra::config_store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub expected_len:     usize,
    pub symbols:          ControlSymbols,
    pub windows:          SeasonWindows,
    pub validation_years: Vec<i32>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            expected_len:     DEFAULT_SEQUENCE_LEN,
            symbols:          ControlSymbols::default(),
            windows:          SeasonWindows::default(),
            validation_years: vec![2016, 2017],
        }
    }
}

// ─── SeasonalCorpus ──────────────────────────────────────────────────────────
pub struct SeasonalCorpus {
    config:    SamplerConfig,
    north:     YearBuckets,
    south:     YearBuckets,
    vocab:     Vocabulary,
    partition: Option<YearPartition>,
    reports:   [(Hemisphere, ParseReport); 2],
}

impl SeasonalCorpus {
    /// Load both corpora from their sources and build the vocabulary.
    pub fn load(
        north:  &dyn RecordSource,
        south:  &dyn RecordSource,
        config: SamplerConfig,
        sink:   &dyn DiagnosticsSink,
    ) -> Result<Self> {
        tracing::info!("Loading north corpus from {}", north.name());
        let north_raw = north
            .load_all()
            .with_context(|| format!("Failed to load north corpus from {}", north.name()))?;

        tracing::info!("Loading south corpus from {}", south.name());
        let south_raw = south
            .load_all()
            .with_context(|| format!("Failed to load south corpus from {}", south.name()))?;

        Ok(Self::from_records(north_raw, south_raw, config, sink))
    }

    /// Build from records already in memory.
    pub fn from_records(
        north:  Vec<RawRecord>,
        south:  Vec<RawRecord>,
        config: SamplerConfig,
        sink:   &dyn DiagnosticsSink,
    ) -> Self {
        let parser       = CorpusParser::new(config.expected_len);
        let north_parsed = parser.parse(north);
        let south_parsed = parser.parse(south);

        sink.parse_report(Hemisphere::North, &north_parsed.report);
        sink.parse_report(Hemisphere::South, &south_parsed.report);

        let alphabet = merge_alphabets([&north_parsed.alphabet, &south_parsed.alphabet]);
        let vocab    = build_vocabulary(&alphabet, config.symbols);

        tracing::info!(
            "Corpus ready: {} north / {} south records, {} symbols",
            north_parsed.buckets.record_count(),
            south_parsed.buckets.record_count(),
            vocab.len()
        );

        Self {
            config,
            north:     north_parsed.buckets,
            south:     south_parsed.buckets,
            vocab,
            partition: None,
            reports:   [
                (Hemisphere::North, north_parsed.report),
                (Hemisphere::South, south_parsed.report),
            ],
        }
    }

    /// Split the north corpus years into training and validation.
    /// Replaces any earlier partition.
    pub fn set_validation_years(&mut self, validation: &[i32]) -> Result<(), SamplerError> {
        let partition = YearPartition::new(&self.north.years(), validation)?;
        tracing::info!(
            "Training years {:?}, validation years {:?}",
            partition.training(),
            partition.validation()
        );
        self.partition = Some(partition);
        Ok(())
    }

    /// Same as set_validation_years with the years from the config.
    pub fn use_configured_years(&mut self) -> Result<(), SamplerError> {
        let years = self.config.validation_years.clone();
        self.set_validation_years(&years)
    }

    pub fn partition(&self) -> Option<&YearPartition> {
        self.partition.as_ref()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn buckets(&self, hemisphere: Hemisphere) -> &YearBuckets {
        match hemisphere {
            Hemisphere::North => &self.north,
            Hemisphere::South => &self.south,
        }
    }

    /// Parse counts recorded at load time
    pub fn report(&self, hemisphere: Hemisphere) -> ParseReport {
        self.reports
            .iter()
            .find(|(h, _)| *h == hemisphere)
            .map(|(_, r)| *r)
            .unwrap_or_default()
    }

    /// A sampler borrowing this corpus
    pub fn sampler(&self) -> SeasonalSampler<'_> {
        SeasonalSampler::new(&self.north, &self.south, &self.vocab, self.config.windows)
    }

    /// Composites for one pivot year.
    pub fn sample_per_year<R: Rng + ?Sized>(
        &self,
        rng:     &mut R,
        request: &SampleRequest,
    ) -> Result<Composites, SamplerError> {
        self.sampler().sample(rng, request)
    }

    /// A batch of `n` rows drawn from random years of `group`.
    ///
    /// Every drawn year is a pivot, so it needs the following north year
    /// too. The latest north year stays in the training group; whenever it
    /// is drawn the batch fails with Range. Hold it out as a validation year
    /// (the validation group never samples its own last year).
    pub fn random_batch<R: Rng + ?Sized>(
        &self,
        rng:       &mut R,
        n:         usize,
        group:     YearGroup,
        slice_len: Option<usize>,
    ) -> Result<TokenBatch, SamplerError> {
        let sampler = self.sampler();
        BatchAssembler::new(&sampler, self.partition.as_ref(), self.vocab.pad_id())
            .assemble(rng, n, group, slice_len)
    }

    /// One epoch worth of training pairs as a burn Dataset.
    pub fn epoch_dataset<R: Rng + ?Sized>(
        &self,
        rng:       &mut R,
        samples:   usize,
        group:     YearGroup,
        slice_len: Option<usize>,
    ) -> Result<PairDataset, SamplerError> {
        let batch = self.random_batch(rng, samples, group, slice_len)?;
        tracing::debug!("Epoch dataset of {} {:?} pairs", batch.len(), group);
        Ok(PairDataset::from(batch))
    }

    /// Per-position residue counts of one year bucket, None if the year is absent.
    pub fn residue_counts(
        &self,
        year:       i32,
        hemisphere: Hemisphere,
    ) -> Option<BTreeMap<char, Vec<usize>>> {
        self.bucket(year, hemisphere).map(stats::residue_counts_by_position)
    }

    /// Distinct sequences of one year bucket, most common first.
    pub fn sequence_frequencies(
        &self,
        year:       i32,
        hemisphere: Hemisphere,
    ) -> Option<Vec<(String, usize)>> {
        self.bucket(year, hemisphere).map(stats::sequence_frequencies)
    }

    fn bucket(&self, year: i32, hemisphere: Hemisphere) -> Option<&[SequenceRecord]> {
        self.buckets(hemisphere).get(year)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::data::dataset::Dataset;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::data::fixtures::{four_year_raw, seq_for, SEQ_LEN};
    use crate::data::sampler::Encoding;
    use crate::infra::diagnostics::CollectingDiagnostics;

    fn fixture_config() -> SamplerConfig {
        SamplerConfig { expected_len: SEQ_LEN, ..SamplerConfig::default() }
    }

    fn fixture_corpus() -> SeasonalCorpus {
        let (north, south) = four_year_raw();
        SeasonalCorpus::from_records(north, south, fixture_config(), &CollectingDiagnostics::new())
    }

    #[test]
    fn test_load_reports_both_hemispheres() {
        let (mut north, south) = four_year_raw();
        north.push(RawRecord::new("bad", "bad A/Boston/1/2012 2012/unknown HA", "WAAKKK"));
        north.push(RawRecord::new("short", "short A/Boston/1/2012 2012/01/01 HA", "W"));

        let sink   = CollectingDiagnostics::new();
        let corpus = SeasonalCorpus::load(&north, &south, fixture_config(), &sink).unwrap();

        let report = sink.report_for(Hemisphere::North).unwrap();
        assert_eq!(report.accepted, 48);
        assert_eq!(report.missing_date, 1);
        assert_eq!(report.bad_length, 1);
        assert_eq!(sink.report_for(Hemisphere::South).unwrap().accepted, 48);
        assert_eq!(corpus.report(Hemisphere::North), report);
    }

    #[test]
    fn test_vocabulary_covers_both_corpora() {
        let corpus = fixture_corpus();
        let vocab  = corpus.vocabulary();
        assert!(vocab.id('W').is_some());
        assert!(vocab.id('S').is_some());
        assert_eq!(vocab.id('_'), Some(0));
    }

    #[test]
    fn test_batch_requires_partition() {
        let corpus  = fixture_corpus();
        let mut rng = StdRng::seed_from_u64(1);
        let err     = corpus.random_batch(&mut rng, 2, YearGroup::Training, None).unwrap_err();
        assert!(matches!(err, SamplerError::Configuration(_)));
    }

    #[test]
    fn test_partition_and_batch() {
        let mut corpus = fixture_corpus();
        corpus.set_validation_years(&[2012, 2013]).unwrap();

        let partition = corpus.partition().unwrap();
        assert_eq!(partition.training(), &[2011]);
        assert_eq!(partition.validation(), &[2012]);

        let mut rng = StdRng::seed_from_u64(7);
        let batch   = corpus.random_batch(&mut rng, 5, YearGroup::Validation, Some(4)).unwrap();
        assert_eq!(batch.len(), 5);
        assert!(batch.inputs.iter().all(|row| row.len() == 4));
    }

    #[test]
    fn test_configured_years_outside_corpus() {
        // 2016 and 2017 are not in the fixture, so nothing is held out
        let mut corpus = fixture_corpus();
        corpus.use_configured_years().unwrap();
        let partition = corpus.partition().unwrap();
        assert_eq!(partition.training(), &[2011, 2012, 2013]);
        assert!(partition.validation().is_empty());
    }

    #[test]
    fn test_sample_round_trip_years() {
        let corpus  = fixture_corpus();
        let mut rng = StdRng::seed_from_u64(3);
        let request = SampleRequest::new(2012, 2).with_encoding(Encoding::Text);

        let Composites::Text(texts) = corpus.sample_per_year(&mut rng, &request).unwrap() else {
            panic!("expected text composites");
        };
        assert_eq!(texts.len(), 2);

        // Summer segment sits between the two delimiters and comes from 2012
        for text in &texts {
            let summer = &text[SEQ_LEN + 2..2 * SEQ_LEN + 2];
            assert!(summer.starts_with("SC"), "{summer}");
        }
    }

    #[test]
    fn test_range_error_passes_through() {
        let corpus  = fixture_corpus();
        let mut rng = StdRng::seed_from_u64(3);
        let err     = corpus.sample_per_year(&mut rng, &SampleRequest::new(2013, 1)).unwrap_err();
        assert_eq!(err, SamplerError::range(2013, 2013));
    }

    #[test]
    fn test_latest_year_must_be_held_out() {
        // 2013 has no following north year, so it cannot be a pivot
        let mut corpus = fixture_corpus();
        corpus.set_validation_years(&[]).unwrap();
        let failures = (0..50u64)
            .filter_map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                corpus.random_batch(&mut rng, 4, YearGroup::Training, None).err()
            })
            .collect::<Vec<_>>();
        assert!(!failures.is_empty());
        assert!(failures.iter().all(|e| *e == SamplerError::range(2013, 2013)));

        corpus.set_validation_years(&[2013]).unwrap();
        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(corpus.random_batch(&mut rng, 4, YearGroup::Training, None).is_ok());
        }
    }

    #[test]
    fn test_epoch_dataset_size() {
        // Training years 2011 and 2012, both with a following north year
        let mut corpus = fixture_corpus();
        corpus.set_validation_years(&[2013]).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        let dataset = corpus.epoch_dataset(&mut rng, 6, YearGroup::Training, Some(3)).unwrap();
        assert_eq!(dataset.len(), 6);
        assert_eq!(dataset.get(0).unwrap().input.len(), 3);
    }

    #[test]
    fn test_stats_for_present_and_missing_years() {
        let corpus = fixture_corpus();

        let freq = corpus.sequence_frequencies(2011, Hemisphere::South).unwrap();
        assert_eq!(freq.len(), 12);
        assert!(freq.iter().all(|(_, n)| *n == 1));
        assert!(freq.iter().any(|(s, _)| *s == seq_for('S', 2011, 7)));

        let counts = corpus.residue_counts(2011, Hemisphere::North).unwrap();
        assert_eq!(counts[&'W'][0], 12);

        assert!(corpus.residue_counts(1999, Hemisphere::North).is_none());
    }
}
