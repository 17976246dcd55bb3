// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, builds a SeasonalCorpus and prints what was asked for.
// All sampling logic lives in Layer 2 and below; this layer
// only routes and formats.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;

use crate::application::seasonal_corpus::{SamplerConfig, SeasonalCorpus};
use crate::data::fasta::FastaLoader;
use crate::data::sampler::{Composites, SampleRequest};
use crate::domain::record::Hemisphere;
use crate::domain::season::SeasonPattern;
use crate::infra::config_store::config_to_json;
use crate::infra::diagnostics::TracingDiagnostics;
use commands::{BatchArgs, Commands, CorpusArgs, SampleArgs, StatsArgs};

#[derive(Parser, Debug)]
#[command(
    name = "flu-season-sampler",
    version,
    about = "Draw season-aligned influenza HA sequences for sequence-model training."
)]
pub struct Cli {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.corpus.resolve_config()?;

        if let Commands::Config = self.command {
            println!("{}", config_to_json(&config)?);
            return Ok(());
        }

        let mut rng = self.corpus.rng();
        let corpus  = self.load_corpus(config)?;

        match self.command {
            Commands::Sample(args) => run_sample(&corpus, &mut rng, args),
            Commands::Batch(args)  => run_batch(corpus, &mut rng, args),
            Commands::Vocab        => run_vocab(&corpus),
            Commands::Stats(args)  => run_stats(&corpus, args),
            Commands::Config       => Ok(()),
        }
    }

    fn load_corpus(&self, config: SamplerConfig) -> Result<SeasonalCorpus> {
        let north = FastaLoader::new(self.corpus.north.to_string_lossy());
        let south = FastaLoader::new(self.corpus.south.to_string_lossy());
        SeasonalCorpus::load(&north, &south, config, &TracingDiagnostics)
    }
}

/// Handles `sample`: one composite per line.
fn run_sample(corpus: &SeasonalCorpus, rng: &mut StdRng, args: SampleArgs) -> Result<()> {
    let pattern = SeasonPattern::parse(&args.pattern)?;
    let request = SampleRequest::new(args.year, args.count)
        .with_pattern(pattern)
        .with_mode(args.mode())
        .with_encoding(args.encoding());

    let composites = corpus
        .sample_per_year(rng, &request)
        .with_context(|| format!("Sampling pivot year {} failed", args.year))?;

    match composites {
        Composites::Text(texts) => texts.iter().for_each(|t| println!("{t}")),
        Composites::Tokens(rows) => rows.iter().for_each(|r| println!("{}", join_ids(r))),
    }
    Ok(())
}

/// Handles `batch`: prints "input<TAB>target" per row.
fn run_batch(mut corpus: SeasonalCorpus, rng: &mut StdRng, args: BatchArgs) -> Result<()> {
    match &args.validation_years {
        Some(years) => corpus.set_validation_years(years)?,
        None        => corpus.use_configured_years()?,
    }

    let batch = corpus
        .random_batch(rng, args.size, args.group.into(), args.slice_len)
        .context("Batch assembly failed")?;

    tracing::info!("Assembled {} rows", batch.len());
    for pair in batch.into_pairs() {
        println!("{}\t{}", join_ids(&pair.input), join_ids(&pair.target));
    }
    Ok(())
}

fn run_vocab(corpus: &SeasonalCorpus) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(corpus.vocabulary())?);
    Ok(())
}

/// Handles `stats`: residue counts per position, then the top sequences.
fn run_stats(corpus: &SeasonalCorpus, args: StatsArgs) -> Result<()> {
    let hemisphere: Hemisphere = args.hemisphere.into();

    let counts = corpus
        .residue_counts(args.year, hemisphere)
        .with_context(|| format!("No {} records for year {}", hemisphere, args.year))?;

    println!("Residue counts by position ({hemisphere}, {}):", args.year);
    for (residue, per_position) in &counts {
        let row: Vec<String> = per_position.iter().map(usize::to_string).collect();
        println!("{residue}\t{}", row.join(" "));
    }

    let freq = corpus
        .sequence_frequencies(args.year, hemisphere)
        .unwrap_or_default();

    println!("\nMost common sequences ({} distinct):", freq.len());
    for (sequence, n) in freq.iter().take(args.top) {
        println!("{n:>6}  {sequence}");
    }
    Ok(())
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter().map(u32::to_string).collect::<Vec<_>>().join(" ")
}
