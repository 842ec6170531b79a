use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use limitless_scraper::{CatalogScraper, Config};

/// Scrape the Pokémon TCG Pocket card database into one JSON catalog.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path of the card catalog JSON file.
    #[arg(long, default_value = "pokemon_cards.json")]
    out: PathBuf,

    /// Base URL of the card database site.
    #[arg(long)]
    cards_base_url: Option<String>,

    /// Pause between set-page requests, in milliseconds.
    #[arg(long, default_value_t = 500)]
    set_delay_ms: u64,

    /// Pause between card-page requests, in milliseconds.
    #[arg(long, default_value_t = 300)]
    card_delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = Config {
        set_fetch_delay: Duration::from_millis(args.set_delay_ms),
        card_fetch_delay: Duration::from_millis(args.card_delay_ms),
        ..Config::default()
    };
    if let Some(cards_base_url) = args.cards_base_url {
        config.cards_base_url = cards_base_url;
    }

    let catalog = CatalogScraper::new(config)?.scrape().await?;
    if catalog.is_empty() {
        println!("no cards scraped; nothing written");
        return Ok(());
    }

    fs_err::write(&args.out, serde_json::to_string_pretty(&catalog)?)?;
    println!("scraping finished, wrote {} cards to {}", catalog.len(), args.out.display());
    Ok(())
}
