//! Scraper for Pokémon TCG Pocket tournament and card data from
//! limitlesstcg.com.
//!
//! The crate has two independent pipelines: [`Crawler`] walks the
//! completed-tournaments listing and persists one JSON artifact per
//! tournament (standings, decklists, and normalized match results from
//! both bracket and swiss pairing layouts), while [`CatalogScraper`]
//! collects the full card catalog from the card database. [`stats`]
//! derives per-deck win/loss records and synthesized deck names from the
//! persisted artifacts.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> limitless_scraper::Result<()> {
//! use limitless_scraper::{Config, Crawler};
//!
//! let crawler = Crawler::new(Config::default())?;
//! let report = crawler.run().await?;
//! println!("wrote {} tournaments", report.written);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod model;
pub(crate) mod scraper;
pub mod stats;

pub use catalog::CatalogScraper;
pub use config::Config;
pub use crawler::{CrawlReport, Crawler};
pub use error::{LimitlessError, Result};
