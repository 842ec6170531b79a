use std::collections::BTreeSet;

use ::scraper::Selector;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{LimitlessError, Result};
use crate::model::{Card, Rarity};
use crate::scraper::{self, select_text};

static HP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*HP").expect("static pattern"));

static RARITY_PATTERNS: Lazy<Vec<(Rarity, Regex)>> = Lazy::new(|| {
    Rarity::DETECTION_ORDER
        .iter()
        .map(|rarity| {
            let pattern = Regex::new(&format!(r"\b{rarity}\b")).expect("static pattern");
            (*rarity, pattern)
        })
        .collect()
});

/// Absolute URLs of every card set linked from the cards index page.
///
/// Set links carry a bare set code (`/cards/A1`); anything with a further
/// path segment is a card link and is ignored here. Deduplicated, sorted.
pub(crate) fn set_links(document: &scraper::Html, base: &Url) -> Result<Vec<String>> {
    let link_selector = Selector::parse(r#"a[href^="/cards/"]"#)?;
    let mut links = BTreeSet::new();
    for anchor in document.select(&link_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(code) = href.strip_prefix("/cards/") else {
            continue;
        };
        if !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric()) {
            links.insert(base.join(href)?.to_string());
        }
    }
    Ok(links.into_iter().collect())
}

/// Absolute URLs of every card linked from a set page (`/cards/{SET}/{NUM}`).
pub(crate) fn card_links(document: &scraper::Html, base: &Url) -> Result<Vec<String>> {
    let link_selector = Selector::parse(r#"a[href^="/cards/"]"#)?;
    let mut links = BTreeSet::new();
    for anchor in document.select(&link_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(rest) = href.strip_prefix("/cards/") else {
            continue;
        };
        let mut segments = rest.split('/');
        let (Some(code), Some(number), None) =
            (segments.next(), segments.next(), segments.next())
        else {
            continue;
        };
        if !code.is_empty()
            && code.chars().all(|c| c.is_ascii_alphanumeric())
            && !number.is_empty()
            && number.chars().all(|c| c.is_ascii_digit())
        {
            links.insert(base.join(href)?.to_string());
        }
    }
    Ok(links.into_iter().collect())
}

/// Parse a card detail page.
///
/// The display name is disambiguated with the set code and card number
/// taken from the URL. Element type, HP, evolution stage, evolves-from and
/// rarity are all optional site data; `is_final_evolution` is left false
/// here and derived over the whole catalog at assembly time.
pub(crate) fn parse_card(document: &scraper::Html, url: &str) -> Result<Card> {
    let name_selector = Selector::parse("span.card-text-name a")?;
    let root = document.root_element();
    let name = select_text(&root, &name_selector);
    if name.is_empty() {
        return Err(LimitlessError::ElementNotFound {
            context: "card name (span.card-text-name a)",
        });
    }

    let mut path_parts = url.trim_end_matches('/').rsplit('/');
    let number = path_parts.next().unwrap_or_default();
    let set_code = path_parts.next().unwrap_or_default();
    let full_name = format!("{name} ({set_code}-{number})");

    let image_selector = Selector::parse("div.card-image img")?;
    let image_url = document
        .select(&image_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.trim().to_string());

    let title_selector = Selector::parse("p.card-text-title")?;
    let title = select_join(document, &title_selector);
    let segments: Vec<&str> = title.split(" - ").map(str::trim).collect();
    let element_type = segments.get(1).map(|s| s.to_string()).filter(|s| !s.is_empty());
    let hp = segments
        .get(2)
        .and_then(|s| HP_PATTERN.captures(s))
        .and_then(|captures| captures[1].parse().ok());

    let stage_selector = Selector::parse("p.card-text-type")?;
    let evolution_stage = select_join(document, &stage_selector)
        .split('-')
        .nth(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let evolves_from_selector = Selector::parse("p.card-text-evolves-from")?;
    let evolves_from = select_join(document, &evolves_from_selector)
        .split(':')
        .nth(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let page_text = root.text().collect::<Vec<_>>().join(" ");
    let rarity = RARITY_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&page_text))
        .map(|(rarity, _)| *rarity)
        .unwrap_or_default();

    Ok(Card {
        name: full_name,
        element_type,
        evolution_stage,
        hp,
        rarity,
        url: url.to_string(),
        image_url,
        evolves_from,
        is_final_evolution: false,
    })
}

/// Concatenated text of the first matching element, or empty.
fn select_join(document: &scraper::Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}
