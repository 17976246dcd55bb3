// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and the flags shared by all of them.
//
//   sample  — composite sequences for one pivot year
//   batch   — a training or validation batch of token rows
//   vocab   — the vocabulary as JSON
//   stats   — residue counts and common sequences of a year
//   config  — the effective configuration as JSON
//
// Every command reads the two corpora (--north, --south) and
// an optional JSON config (--config). Individual flags then
// override single config fields.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};

use crate::application::seasonal_corpus::SamplerConfig;
use crate::data::sampler::{CompositeMode, Encoding};
use crate::data::years::YearGroup;
use crate::domain::record::Hemisphere;
use crate::domain::season::SummerRule;
use crate::infra::config_store::load_config;

/// The top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print composite sequences for a pivot year
    Sample(SampleArgs),

    /// Assemble a batch from training or validation years
    Batch(BatchArgs),

    /// Print the vocabulary as JSON
    Vocab,

    /// Print residue counts and the most common sequences of a year
    Stats(StatsArgs),

    /// Print the effective configuration as JSON
    Config,
}

// ─── Shared Flags ─────────────────────────────────────────────────────────────
/// Corpus locations and config overrides, accepted by every command.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// FASTA file with northern-hemisphere sequences
    #[arg(long, global = true, default_value = "data/north.fasta")]
    pub north: PathBuf,

    /// FASTA file with southern-hemisphere sequences
    #[arg(long, global = true, default_value = "data/south.fasta")]
    pub south: PathBuf,

    /// JSON sampler config; missing fields use the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the random number generator (entropy when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Override the expected sequence length
    #[arg(long, global = true)]
    pub expected_len: Option<usize>,

    /// Override how summer records are matched to a season
    #[arg(long, global = true, value_enum)]
    pub summer_rule: Option<SummerRuleArg>,
}

impl CorpusArgs {
    /// The config file (or the defaults) with flag overrides applied
    pub fn resolve_config(&self) -> Result<SamplerConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None       => SamplerConfig::default(),
        };

        if let Some(len) = self.expected_len {
            cfg.expected_len = len;
        }
        if let Some(rule) = self.summer_rule {
            cfg.windows.summer_rule = rule.into();
        }

        Ok(cfg)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        }
    }
}

// ─── Command Arguments ────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Pivot year (the first winter of the pattern)
    #[arg(long)]
    pub year: i32,

    /// Number of composites to draw
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Season pattern, e.g. "W,S,W"
    #[arg(long, default_value = "W,S,W")]
    pub pattern: String,

    /// Stop before the last segment (no end symbol)
    #[arg(long)]
    pub priming: bool,

    /// Print token ids instead of characters
    #[arg(long)]
    pub tokens: bool,
}

impl SampleArgs {
    pub fn mode(&self) -> CompositeMode {
        if self.priming { CompositeMode::Priming } else { CompositeMode::Full }
    }

    pub fn encoding(&self) -> Encoding {
        if self.tokens { Encoding::Tokens } else { Encoding::Text }
    }
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Number of rows in the batch
    #[arg(long, default_value_t = 30)]
    pub size: usize,

    /// Which year group to draw from. The latest corpus year cannot be a
    /// pivot, so list it in --validation-years or training batches may fail
    #[arg(long, value_enum, default_value_t = GroupArg::Training)]
    pub group: GroupArg,

    /// Cut every row to a random window of this many tokens
    #[arg(long)]
    pub slice_len: Option<usize>,

    /// Validation years, comma separated (defaults to the config's)
    #[arg(long, value_delimiter = ',')]
    pub validation_years: Option<Vec<i32>>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Year bucket to summarise
    #[arg(long)]
    pub year: i32,

    /// Which corpus the bucket comes from
    #[arg(long, value_enum, default_value_t = HemisphereArg::North)]
    pub hemisphere: HemisphereArg,

    /// How many of the most common sequences to list
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

// ─── Value Enums ──────────────────────────────────────────────────────────────
// clap-facing mirrors of the domain enums; the lower layers never
// see clap types.

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupArg {
    Training,
    Validation,
}

impl From<GroupArg> for YearGroup {
    fn from(g: GroupArg) -> Self {
        match g {
            GroupArg::Training   => YearGroup::Training,
            GroupArg::Validation => YearGroup::Validation,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HemisphereArg {
    North,
    South,
}

impl From<HemisphereArg> for Hemisphere {
    fn from(h: HemisphereArg) -> Self {
        match h {
            HemisphereArg::North => Hemisphere::North,
            HemisphereArg::South => Hemisphere::South,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummerRuleArg {
    MonthBand,
    WinterBounds,
}

impl From<SummerRuleArg> for SummerRule {
    fn from(r: SummerRuleArg) -> Self {
        match r {
            SummerRuleArg::MonthBand    => SummerRule::MonthBand,
            SummerRuleArg::WinterBounds => SummerRule::WinterBounds,
        }
    }
}
