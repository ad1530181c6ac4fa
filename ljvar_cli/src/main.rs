mod stats;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ljvar_core::args::CorpusArgs;
use ljvar_core::{CorpusConfig, CorpusIndex, LocalProvisioner, provision};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::stats::WaveStats;

#[derive(Debug, Parser)]
#[command(name = "ljvar", about = "Inspect a speech corpus and its processed variants")]
struct Cli {
    #[command(flatten)]
    corpus: CorpusArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print corpus paths and entry count.
    Info,
    /// Decode one sample and print waveform statistics.
    Sample { index: usize },
    /// Check that every entry has all three audio files on disk.
    Verify,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = cli.corpus.to_config();

    match cli.command {
        Command::Info => info_cmd(&config),
        Command::Sample { index } => sample_cmd(&config, index),
        Command::Verify => verify_cmd(&config),
    }
}

fn info_cmd(config: &CorpusConfig) -> Result<ExitCode> {
    let index = CorpusIndex::open(config).context("failed to open corpus")?;
    let layout = index.layout();
    let [v1, v2] = index.variant_labels();

    println!("corpus:    {}", layout.corpus_name());
    println!("manifest:  {}", layout.manifest_path().display());
    println!("primary:   {}", layout.data_dir().display());
    println!("variant 1: {}", layout.variant_dir(v1).display());
    println!("variant 2: {}", layout.variant_dir(v2).display());
    println!("entries:   {}", index.len());
    Ok(ExitCode::SUCCESS)
}

fn sample_cmd(config: &CorpusConfig, n: usize) -> Result<ExitCode> {
    let index = CorpusIndex::open(config).context("failed to open corpus")?;
    let entry = index.entry(n)?;
    let sample = index
        .get(n)
        .with_context(|| format!("failed to load sample {n} ({})", entry.file_id))?;
    let [v1, v2] = index.variant_labels();

    println!("id: {}  sample_rate: {}", entry.file_id, sample.sample_rate);
    for (name, wave) in [
        ("primary", &sample.primary),
        (v1, &sample.variant_1),
        (v2, &sample.variant_2),
    ] {
        println!("{name:>10}: {}", WaveStats::of(wave));
    }
    println!("transcript: {}", sample.transcript);
    println!("normalized: {}", sample.normalized_transcript);
    Ok(ExitCode::SUCCESS)
}

fn verify_cmd(config: &CorpusConfig) -> Result<ExitCode> {
    provision(config, &LocalProvisioner).context("corpus layout incomplete")?;
    let index = CorpusIndex::open(config).context("failed to open corpus")?;

    let mut missing = 0usize;
    for i in 0..index.len() {
        for path in index.paths(i)?.iter().filter(|p| !p.exists()) {
            warn!(index = i, path = %path.display(), "missing audio file");
            missing += 1;
        }
    }

    info!(entries = index.len(), missing, "verification finished");
    println!("Entries: {}", index.len());
    println!("Missing audio files: {missing}");
    Ok(if missing == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
