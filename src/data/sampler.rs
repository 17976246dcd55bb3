// ============================================================
// Layer 4 — Seasonal Sampler
// ============================================================
// Draws season-consistent sequences around a pivot year and
// joins them into composite sequences:
//
//   full:     $ WINTER & SUMMER @ WINTER %
//   priming:  $ WINTER & SUMMER @
//
// ($ start, & delim0, @ delim1, % end with default symbols.)
// Priming output stops right after delim1 so a trained model
// can be asked to continue with the next winter.
//
// For pivot Y and the pattern W,S,W:
//
//   segment  season  year  pool                 accepted months
//   1        winter  Y     north[Y] + north[Y-1] Y: ≤5, Y-1: ≥10
//   2        summer  Y     south[Y]              5..=10 (MonthBand)
//   3        winter  Y+1   north[Y+1] + north[Y] Y+1: ≤5, Y: ≥10
//
// Sampling is uniform with replacement among the records of
// the pool that fall inside the season window. The pool is
// filtered BEFORE drawing: this picks from exactly the same
// distribution as draw-and-reject, but an empty window becomes
// an Unsatisfiable error instead of a loop that never ends.
//
// Randomness is always passed in (`rng: &mut R`), so a seeded
// StdRng makes every draw reproducible.
//
// Reference: rand crate documentation (Rng::gen_range)
//            Rust Book §10 (Generic Types, Traits, Lifetimes)

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::error::SamplerError;
use crate::domain::record::{SequenceRecord, YearBuckets};
use crate::domain::season::{Season, SeasonPattern, SummerBounds, SummerRule, WinterBounds};
use crate::domain::vocabulary::{ControlSymbols, Vocabulary};

// ─── Options ──────────────────────────────────────────────────────────────────

/// Month windows used to accept winter and summer candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonWindows {
    pub winter:      WinterBounds,
    pub summer:      SummerBounds,
    pub summer_rule: SummerRule,
}

/// Whether the final segment and end symbol are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Every segment plus the end symbol (training examples)
    #[default]
    Full,
    /// Everything up to and including the last delimiter (generation primers)
    Priming,
}

/// Output representation of the composites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Plain strings
    Text,
    /// Token ids from the vocabulary
    #[default]
    Tokens,
}

/// Composite sequences in the requested representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composites {
    Text(Vec<String>),
    Tokens(Vec<Vec<u32>>),
}

impl Composites {
    pub fn len(&self) -> usize {
        match self {
            Composites::Text(v)   => v.len(),
            Composites::Tokens(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything one call to the sampler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRequest {
    /// Year of the first winter (e.g. 2013 → winter 2012/13, summer 2013, winter 2013/14)
    pub pivot_year: i32,
    /// Number of composites to produce
    pub count:      usize,
    pub pattern:    SeasonPattern,
    pub mode:       CompositeMode,
    pub encoding:   Encoding,
}

impl SampleRequest {
    /// W,S,W, full, token encoded: the training defaults
    pub fn new(pivot_year: i32, count: usize) -> Self {
        Self {
            pivot_year,
            count,
            pattern:  SeasonPattern::default(),
            mode:     CompositeMode::default(),
            encoding: Encoding::default(),
        }
    }

    pub fn with_pattern(mut self, pattern: SeasonPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_mode(mut self, mode: CompositeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

// ─── Season Draws ─────────────────────────────────────────────────────────────

/// Draw `n` winter sequences for the winter of `year` from `pool`.
pub fn sample_winter<'r, R: Rng + ?Sized>(
    rng:    &mut R,
    pool:   &[&'r SequenceRecord],
    n:      usize,
    year:   i32,
    bounds: WinterBounds,
) -> Result<Vec<&'r str>, SamplerError> {
    draw(rng, pool, n, Season::Winter, year, |r| bounds.accepts(year, r.year, r.month))
}

/// Draw `n` summer sequences for the summer of `year` from `pool`.
pub fn sample_summer<'r, R: Rng + ?Sized>(
    rng:    &mut R,
    pool:   &[&'r SequenceRecord],
    n:      usize,
    year:   i32,
    bounds: SummerBounds,
    rule:   SummerRule,
) -> Result<Vec<&'r str>, SamplerError> {
    draw(rng, pool, n, Season::Summer, year, |r| bounds.accepts(rule, year, r.year, r.month))
}

fn draw<'r, R, F>(
    rng:    &mut R,
    pool:   &[&'r SequenceRecord],
    n:      usize,
    season: Season,
    year:   i32,
    accept: F,
) -> Result<Vec<&'r str>, SamplerError>
where
    R: Rng + ?Sized,
    F: Fn(&SequenceRecord) -> bool,
{
    if n == 0 {
        return Ok(Vec::new());
    }

    let eligible: Vec<&'r SequenceRecord> = pool.iter().copied().filter(|r| accept(*r)).collect();
    if eligible.is_empty() {
        return Err(SamplerError::Unsatisfiable { season, year });
    }

    Ok((0..n)
        .map(|_| eligible[rng.gen_range(0..eligible.len())].sequence.as_str())
        .collect())
}

// ─── SeasonalSampler ──────────────────────────────────────────────────────────

/// Samples composites from the north/south buckets.
pub struct SeasonalSampler<'a> {
    north:   &'a YearBuckets,
    south:   &'a YearBuckets,
    vocab:   &'a Vocabulary,
    windows: SeasonWindows,
}

impl<'a> SeasonalSampler<'a> {
    pub fn new(
        north:   &'a YearBuckets,
        south:   &'a YearBuckets,
        vocab:   &'a Vocabulary,
        windows: SeasonWindows,
    ) -> Self {
        Self { north, south, vocab, windows }
    }

    /// Produce `request.count` composites.
    ///
    /// # Errors
    /// - Range if the pivot (or a year the pattern walks to) is missing
    /// - Configuration if the corpora are empty
    /// - Unsatisfiable if a season window matches no record
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng:     &mut R,
        request: &SampleRequest,
    ) -> Result<Composites, SamplerError> {
        let texts = self.sample_text(rng, request)?;

        match request.encoding {
            Encoding::Text   => Ok(Composites::Text(texts)),
            Encoding::Tokens => texts
                .iter()
                .map(|t| self.vocab.encode(t))
                .collect::<Result<Vec<_>, _>>()
                .map(Composites::Tokens),
        }
    }

    /// Produce `request.count` composites as strings, ignoring `request.encoding`.
    /// Priming needs at least two seasons, otherwise nothing but the start symbol is left.
    pub fn sample_text<R: Rng + ?Sized>(
        &self,
        rng:     &mut R,
        request: &SampleRequest,
    ) -> Result<Vec<String>, SamplerError> {
        if request.mode == CompositeMode::Priming && request.pattern.len() < 2 {
            return Err(SamplerError::configuration(
                "priming composites need a pattern of at least two seasons",
            ));
        }

        let segments = self.sample_segments(rng, request.count, request.pivot_year, &request.pattern)?;
        let symbols  = self.vocab.symbols();

        Ok((0..request.count)
            .map(|i| assemble(&segments, i, symbols, request.mode))
            .collect())
    }

    /// The vocabulary composites are encoded with
    pub fn vocabulary(&self) -> &'a Vocabulary {
        self.vocab
    }

    /// Draw `n` sequences for every position of `pattern`, in pattern order.
    pub fn sample_segments<R: Rng + ?Sized>(
        &self,
        rng:     &mut R,
        n:       usize,
        pivot:   i32,
        pattern: &SeasonPattern,
    ) -> Result<Vec<Vec<&'a str>>, SamplerError> {
        self.check_pivot(pivot)?;

        let mut segments = Vec::with_capacity(pattern.len());
        for (season, year) in pattern.year_walk(pivot) {
            let seqs = match season {
                Season::Winter => {
                    let pool = self.winter_pool(year)?;
                    sample_winter(rng, &pool, n, year, self.windows.winter)?
                }
                Season::Summer => {
                    let pool = self.summer_pool(year)?;
                    sample_summer(rng, &pool, n, year, self.windows.summer, self.windows.summer_rule)?
                }
            };
            segments.push(seqs);
        }

        Ok(segments)
    }

    /// Pivot, pivot ± 1 must be in the north corpus and pivot in the south corpus.
    pub fn check_pivot(&self, pivot: i32) -> Result<(), SamplerError> {
        let max_year = self.max_year()?;

        let present = self.north.contains(pivot)
            && self.south.contains(pivot)
            && self.north.contains(pivot + 1)
            && self.north.contains(pivot - 1);

        if present {
            Ok(())
        } else {
            Err(SamplerError::range(pivot, max_year))
        }
    }

    fn max_year(&self) -> Result<i32, SamplerError> {
        self.north
            .max_year()
            .ok_or_else(|| SamplerError::configuration("the north corpus is empty"))
    }

    /// north[year] followed by north[year - 1]
    fn winter_pool(&self, year: i32) -> Result<Vec<&'a SequenceRecord>, SamplerError> {
        let current  = self.bucket(self.north, year)?;
        let previous = self.bucket(self.north, year - 1)?;
        Ok(current.iter().chain(previous.iter()).collect())
    }

    fn summer_pool(&self, year: i32) -> Result<Vec<&'a SequenceRecord>, SamplerError> {
        Ok(self.bucket(self.south, year)?.iter().collect())
    }

    fn bucket(&self, buckets: &'a YearBuckets, year: i32) -> Result<&'a [SequenceRecord], SamplerError> {
        match buckets.get(year) {
            Some(records) => Ok(records),
            None          => Err(SamplerError::range(year, self.max_year()?)),
        }
    }
}

/// Join the i-th draw of every segment into one composite.
fn assemble(segments: &[Vec<&str>], i: usize, symbols: &ControlSymbols, mode: CompositeMode) -> String {
    let delimiters = [symbols.delim0, symbols.delim1];
    let last       = segments.len().saturating_sub(1);

    let mut out = String::new();
    out.push(symbols.start);

    for (j, segment) in segments.iter().enumerate() {
        if mode == CompositeMode::Priming && j == last {
            break;
        }
        out.push_str(segment[i]);
        if j < last {
            out.push(delimiters[j]);
        }
    }

    if mode == CompositeMode::Full {
        out.push(symbols.end);
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{four_year_corpus, seq_for, tiny_vocabulary, SEQ_LEN};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_winter_draws_respect_window() {
        let (north, _south) = four_year_corpus();
        let pool: Vec<&SequenceRecord> = north
            .get(2012)
            .unwrap()
            .iter()
            .chain(north.get(2011).unwrap().iter())
            .collect();

        let mut rng = StdRng::seed_from_u64(7);
        let seqs    = sample_winter(&mut rng, &pool, 200, 2012, WinterBounds::default()).unwrap();

        assert_eq!(seqs.len(), 200);
        for s in seqs {
            let record = pool.iter().find(|r| r.sequence == s).unwrap();
            assert!(
                (record.year == 2012 && record.month <= 5)
                    || (record.year == 2011 && record.month >= 10)
            );
        }
    }

    #[test]
    fn test_summer_draws_respect_band() {
        let (_north, south) = four_year_corpus();
        let pool: Vec<&SequenceRecord> = south.get(2012).unwrap().iter().collect();

        let mut rng = StdRng::seed_from_u64(3);
        let seqs    = sample_summer(
            &mut rng, &pool, 100, 2012, SummerBounds::default(), SummerRule::MonthBand,
        )
        .unwrap();

        for s in seqs {
            let record = pool.iter().find(|r| r.sequence == s).unwrap();
            assert!((5..=10).contains(&record.month));
        }
    }

    #[test]
    fn test_empty_window_is_unsatisfiable() {
        let only_july = SequenceRecord::new("x", 2012, 7, 1, "Perth", seq_for('S', 2012, 7));
        let pool      = vec![&only_july];

        let mut rng = StdRng::seed_from_u64(0);
        let err     = sample_winter(&mut rng, &pool, 1, 2012, WinterBounds::default()).unwrap_err();

        assert_eq!(err, SamplerError::Unsatisfiable { season: Season::Winter, year: 2012 });
    }

    #[test]
    fn test_zero_draws_need_no_candidates() {
        let mut rng = StdRng::seed_from_u64(0);
        let seqs    = sample_winter(&mut rng, &[], 0, 2012, WinterBounds::default()).unwrap();
        assert!(seqs.is_empty());
    }

    #[test]
    fn test_full_composite_layout() {
        let (north, south) = four_year_corpus();
        let vocab          = tiny_vocabulary();
        let sampler        = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        let mut rng = StdRng::seed_from_u64(11);
        let request = SampleRequest::new(2012, 5).with_encoding(Encoding::Text);
        let Composites::Text(texts) = sampler.sample(&mut rng, &request).unwrap() else {
            panic!("expected text output");
        };

        assert_eq!(texts.len(), 5);
        for t in texts {
            let chars: Vec<char> = t.chars().collect();
            assert_eq!(chars.len(), 3 * SEQ_LEN + 4);
            assert_eq!(chars[0], '$');
            assert_eq!(chars[1 + SEQ_LEN], '&');
            assert_eq!(chars[2 + 2 * SEQ_LEN], '@');
            assert_eq!(chars[3 + 3 * SEQ_LEN], '%');

            // Fixture sequences encode their season tag in the first residue
            assert_eq!(chars[1], 'W');
            assert_eq!(chars[2 + SEQ_LEN], 'S');
            assert_eq!(chars[3 + 2 * SEQ_LEN], 'W');
        }
    }

    #[test]
    fn test_round_trip_years_for_pivot_2012() {
        let (north, south) = four_year_corpus();
        let vocab          = tiny_vocabulary();
        let sampler        = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        let mut rng  = StdRng::seed_from_u64(5);
        let segments = sampler
            .sample_segments(&mut rng, 50, 2012, &SeasonPattern::default())
            .unwrap();

        let find = |b: &YearBuckets, s: &str| {
            b.iter()
                .flat_map(|(_, r)| r.iter())
                .find(|r| r.sequence == s)
                .map(|r| (r.year, r.month))
                .unwrap()
        };

        for s in &segments[0] {
            let (y, m) = find(&north, s);
            assert!((y == 2012 && m <= 5) || (y == 2011 && m >= 10));
        }
        for s in &segments[1] {
            let (y, m) = find(&south, s);
            assert!(y == 2012 && (5..=10).contains(&m));
        }
        for s in &segments[2] {
            let (y, m) = find(&north, s);
            assert!((y == 2013 && m <= 5) || (y == 2012 && m >= 10));
        }
    }

    #[test]
    fn test_priming_stops_after_second_delimiter() {
        let (north, south) = four_year_corpus();
        let vocab          = tiny_vocabulary();
        let sampler        = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        let mut rng = StdRng::seed_from_u64(1);
        let request = SampleRequest::new(2011, 2)
            .with_mode(CompositeMode::Priming)
            .with_encoding(Encoding::Text);
        let Composites::Text(texts) = sampler.sample(&mut rng, &request).unwrap() else {
            panic!("expected text output");
        };

        for t in texts {
            assert_eq!(t.chars().count(), 2 * SEQ_LEN + 3);
            assert!(t.starts_with('$'));
            assert!(t.ends_with('@'));
            assert!(!t.contains('%'));
        }
    }

    #[test]
    fn test_token_output_matches_vocabulary() {
        let (north, south) = four_year_corpus();
        let vocab          = tiny_vocabulary();
        let sampler        = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        let mut rng = StdRng::seed_from_u64(9);
        let Composites::Tokens(rows) = sampler.sample(&mut rng, &SampleRequest::new(2012, 3)).unwrap() else {
            panic!("expected token output");
        };

        for row in rows {
            assert_eq!(row[0], vocab.id('$').unwrap());
            assert_eq!(*row.last().unwrap(), vocab.id('%').unwrap());
            assert!(row.iter().all(|&id| id != vocab.pad_id()));
        }
    }

    #[test]
    fn test_max_year_pivot_is_range_error() {
        let (north, south) = four_year_corpus();
        let vocab          = tiny_vocabulary();
        let sampler        = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        let mut rng = StdRng::seed_from_u64(0);
        let err     = sampler.sample(&mut rng, &SampleRequest::new(2013, 1)).unwrap_err();
        assert_eq!(err, SamplerError::Range { year: 2013, max_year: 2013 });

        let err = sampler.sample(&mut rng, &SampleRequest::new(2010, 1)).unwrap_err();
        assert_eq!(err, SamplerError::Range { year: 2010, max_year: 2013 });
    }

    #[test]
    fn test_walk_past_last_year_is_range_error() {
        let (north, south) = four_year_corpus();
        let vocab          = tiny_vocabulary();
        let sampler        = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        // W,W,W from 2012 needs the winter of 2014
        let pattern = SeasonPattern::parse("W,W,W").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err     = sampler
            .sample(&mut rng, &SampleRequest::new(2012, 1).with_pattern(pattern))
            .unwrap_err();

        assert_eq!(err, SamplerError::Range { year: 2014, max_year: 2013 });
    }

    #[test]
    fn test_pivot_missing_from_south_is_range_error() {
        let (north, south) = four_year_corpus();
        let south: YearBuckets = south
            .iter()
            .filter(|(year, _)| *year != 2012)
            .flat_map(|(_, records)| records.iter().cloned())
            .collect();
        let vocab   = tiny_vocabulary();
        let sampler = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        let mut rng = StdRng::seed_from_u64(0);
        let err     = sampler.sample(&mut rng, &SampleRequest::new(2012, 1)).unwrap_err();
        assert_eq!(err, SamplerError::Range { year: 2012, max_year: 2013 });
    }

    #[test]
    fn test_priming_single_season_is_rejected() {
        let (north, south) = four_year_corpus();
        let vocab          = tiny_vocabulary();
        let sampler        = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        let request = SampleRequest::new(2012, 1)
            .with_pattern(SeasonPattern::parse("W").unwrap())
            .with_mode(CompositeMode::Priming)
            .with_encoding(Encoding::Text);
        let mut rng = StdRng::seed_from_u64(0);
        let err     = sampler.sample(&mut rng, &request).unwrap_err();
        assert!(matches!(err, SamplerError::Configuration(_)));

        // Two seasons leave one full segment and its delimiter
        let request = request.with_pattern(SeasonPattern::parse("W,S").unwrap());
        let Composites::Text(texts) = sampler.sample(&mut rng, &request).unwrap() else {
            panic!("expected text output");
        };
        assert_eq!(texts[0].chars().count(), SEQ_LEN + 2);
        assert!(texts[0].ends_with('&'));
    }

    #[test]
    fn test_single_segment_pattern() {
        let (north, south) = four_year_corpus();
        let vocab          = tiny_vocabulary();
        let sampler        = SeasonalSampler::new(&north, &south, &vocab, SeasonWindows::default());

        let pattern = SeasonPattern::parse("W").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let request = SampleRequest::new(2012, 1)
            .with_pattern(pattern)
            .with_encoding(Encoding::Text);
        let Composites::Text(texts) = sampler.sample(&mut rng, &request).unwrap() else {
            panic!("expected text output");
        };

        assert_eq!(texts[0].chars().count(), SEQ_LEN + 2);
        assert!(texts[0].ends_with('%'));
    }
}
