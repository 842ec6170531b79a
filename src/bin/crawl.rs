use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use limitless_scraper::{Config, Crawler};

/// Crawl completed Pokémon TCG Pocket tournaments into JSON artifacts.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Root directory of the page cache.
    #[arg(long, default_value = "cache")]
    cache_dir: PathBuf,

    /// Directory receiving one JSON artifact per tournament.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Base URL of the tournament site.
    #[arg(long)]
    base_url: Option<String>,

    /// Cap on concurrent cache file operations.
    #[arg(long)]
    max_inflight_ops: Option<usize>,

    /// Cap on simultaneous outbound connections.
    #[arg(long)]
    max_connections: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = Config {
        cache_dir: args.cache_dir,
        output_dir: args.output_dir,
        ..Config::default()
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(max_inflight_ops) = args.max_inflight_ops {
        config.max_inflight_ops = max_inflight_ops;
    }
    if let Some(max_connections) = args.max_connections {
        config.max_connections = max_connections;
    }

    let report = Crawler::new(config)?.run().await?;
    println!(
        "{} tournaments written, {} already present, {} without decklists, {} failed",
        report.written, report.skipped_existing, report.abandoned, report.failed
    );
    Ok(())
}
