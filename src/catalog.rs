use std::collections::BTreeSet;

use tracing::{info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::{LimitlessError, Result};
use crate::model::Card;
use crate::scraper::{self, cards};

/// Scrapes the card database into a full catalog.
///
/// Unlike the tournament crawler this pipeline is deliberately slow: one
/// request at a time, a fixed pause between requests, and a short
/// per-request deadline. A set or card page that fails to load is logged
/// and skipped; the run continues.
pub struct CatalogScraper {
    http: reqwest::Client,
    base_url: Url,
    config: Config,
}

impl CatalogScraper {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.card_request_timeout)
            .build()
            .map_err(LimitlessError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: Url::parse(&config.cards_base_url)?,
            config,
        })
    }

    /// Discover all sets, then all cards, then scrape each card page.
    ///
    /// Returns the assembled catalog with `is_final_evolution` derived over
    /// the whole batch. An unreachable cards index yields an empty catalog.
    #[instrument(skip(self))]
    pub async fn scrape(&self) -> Result<Vec<Card>> {
        let set_links = match self.set_links().await {
            Ok(links) => links,
            Err(e) => {
                warn!(error = %e, "cards index unreachable");
                return Ok(Vec::new());
            }
        };
        if set_links.is_empty() {
            warn!("no card sets found; selectors may have changed");
            return Ok(Vec::new());
        }
        info!(count = set_links.len(), "discovered card sets");

        let mut card_links = BTreeSet::new();
        for (index, set_url) in set_links.iter().enumerate() {
            info!(set = %set_url, "exploring set {}/{}", index + 1, set_links.len());
            match self.card_links(set_url).await {
                Ok(links) => {
                    info!(count = links.len(), "cards in this set");
                    card_links.extend(links);
                }
                Err(e) => warn!(set = %set_url, error = %e, "failed to load set page, skipping"),
            }
            tokio::time::sleep(self.config.set_fetch_delay).await;
        }

        if card_links.is_empty() {
            warn!("no card links found; selectors may have changed");
            return Ok(Vec::new());
        }
        info!(count = card_links.len(), "cards discovered in total");

        let mut catalog = Vec::new();
        for (index, card_url) in card_links.iter().enumerate() {
            info!(card = %card_url, "scraping card {}/{}", index + 1, card_links.len());
            match self.scrape_card(card_url).await {
                Ok(card) => catalog.push(card),
                Err(e) => warn!(card = %card_url, error = %e, "failed to scrape card, skipping"),
            }
            tokio::time::sleep(self.config.card_fetch_delay).await;
        }

        derive_final_evolutions(&mut catalog);
        Ok(catalog)
    }

    async fn set_links(&self) -> Result<Vec<String>> {
        let index_url = self.base_url.join("/cards")?;
        let document = scraper::get_document(&self.http, index_url.as_str()).await?;
        cards::set_links(&document, &self.base_url)
    }

    async fn card_links(&self, set_url: &str) -> Result<Vec<String>> {
        let document = scraper::get_document(&self.http, set_url).await?;
        cards::card_links(&document, &self.base_url)
    }

    async fn scrape_card(&self, card_url: &str) -> Result<Card> {
        let document = scraper::get_document(&self.http, card_url).await?;
        cards::parse_card(&document, card_url)
    }
}

/// Batch-derive the final-evolution flag over a whole catalog.
///
/// A card is a final evolution iff no other card names it (by base name) as
/// its evolves-from target.
pub fn derive_final_evolutions(catalog: &mut [Card]) {
    let evolved_from: BTreeSet<String> = catalog
        .iter()
        .filter_map(|card| card.evolves_from.clone())
        .collect();
    for card in catalog.iter_mut() {
        card.is_final_evolution = !evolved_from.contains(card.base_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rarity;

    fn card(name: &str, evolves_from: Option<&str>) -> Card {
        Card {
            name: name.to_string(),
            element_type: Some("Fire".into()),
            evolution_stage: None,
            hp: None,
            rarity: Rarity::Unknown,
            url: String::new(),
            image_url: None,
            evolves_from: evolves_from.map(str::to_string),
            is_final_evolution: false,
        }
    }

    #[test]
    fn only_unreferenced_cards_are_final_evolutions() {
        let mut catalog = vec![
            card("Charmander (A1-33)", None),
            card("Charmeleon (A1-34)", Some("Charmander")),
            card("Charizard (A1-35)", Some("Charmeleon")),
        ];
        derive_final_evolutions(&mut catalog);

        assert!(!catalog[0].is_final_evolution);
        assert!(!catalog[1].is_final_evolution);
        assert!(catalog[2].is_final_evolution);
    }

    #[test]
    fn unrelated_cards_are_final_by_default() {
        let mut catalog = vec![card("Pikachu (A1-94)", None)];
        derive_final_evolutions(&mut catalog);
        assert!(catalog[0].is_final_evolution);
    }
}
