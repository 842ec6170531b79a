use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use limitless_scraper::model::{Card, DeckName, DeckStats, Tournament};
use limitless_scraper::stats;

/// Derive per-deck statistics and deck names from crawled artifacts.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding the per-tournament JSON artifacts.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Card catalog JSON file.
    #[arg(long, default_value = "pokemon_cards.json")]
    cards_file: PathBuf,

    /// Path of the derived statistics JSON file.
    #[arg(long, default_value = "deck_stats.json")]
    out: PathBuf,
}

#[derive(Serialize)]
struct StatsReport {
    deck_stats: Vec<DeckStats>,
    deck_names: Vec<DeckName>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut tournaments = Vec::new();
    for entry in fs_err::read_dir(&args.output_dir)? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let tournament: Tournament = serde_json::from_str(&fs_err::read_to_string(&path)?)
            .with_context(|| format!("malformed artifact {}", path.display()))?;
        tournaments.push(tournament);
    }

    let catalog: Vec<Card> = serde_json::from_str(&fs_err::read_to_string(&args.cards_file)?)
        .with_context(|| format!("malformed catalog {}", args.cards_file.display()))?;

    let report = StatsReport {
        deck_stats: stats::compute_deck_stats(&tournaments),
        deck_names: stats::derive_deck_names(&tournaments, &catalog),
    };

    fs_err::write(&args.out, serde_json::to_string_pretty(&report)?)?;
    println!(
        "{} decks, {} named, from {} tournaments; wrote {}",
        report.deck_stats.len(),
        report.deck_names.len(),
        tournaments.len(),
        args.out.display()
    );
    Ok(())
}
