mod manifest_to_jsonl;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ljvar_core::args::CorpusArgs;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ljvar_tools", about = "Offline tooling for variant speech corpora")]
struct Cli {
    #[command(flatten)]
    corpus: CorpusArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Export the resolved manifest as JSON lines.
    ManifestToJsonl {
        #[arg(long, default_value = "manifests/train.jsonl")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = cli.corpus.to_config();

    match cli.command {
        Command::ManifestToJsonl { out } => {
            info!(root = %config.root.display(), "converting manifest to JSONL");
            let summary = manifest_to_jsonl::convert(&config, &out)?;
            println!("Wrote: {}", out.display());
            println!("Kept: {}", summary.kept);
            println!("Skipped (missing audio file): {}", summary.skipped_missing_audio);
        }
    }

    Ok(())
}
