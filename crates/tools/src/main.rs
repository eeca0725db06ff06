use std::path::PathBuf;

use anyhow::{Context, Result};
use backrooms_core::journal_file::load_journal_from_file;
use backrooms_core::{Config, ReplayResult, replay_to_end};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSONL journal to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// TOML tuning the journal was recorded with; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };
    let loaded = load_journal_from_file(&args.journal)
        .with_context(|| format!("Failed to load journal: {}", args.journal.display()))?;
    info!("loaded {} inputs for seed {}", loaded.journal.inputs.len(), loaded.journal.seed);

    let result: ReplayResult =
        replay_to_end(&config, &loaded.journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Final Tick: {}", result.final_tick);
    println!("Level: {:?} ({:?})", result.level, result.phase);
    println!("Rooms Generated: {}", result.rooms_generated);
    println!("Rooms Explored: {}", result.rooms_explored);
    println!("Snapshot Hash: {:#018x}", result.snapshot_hash);

    Ok(())
}
