use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{LimitlessError, Result};
use crate::model::DeckListItem;
use crate::scraper;

/// Parse a player's decklist page into card entries, in source order.
///
/// A page without a decklist container yields an empty list; the caller
/// treats "no decklist" as an exclusion criterion, not an error. Card link
/// text follows a fixed two-character prefix format: the first character is
/// the count, the remainder after it is the display name.
pub(crate) fn parse_decklist(document: &scraper::Html) -> Result<Vec<DeckListItem>> {
    let container_selector = Selector::parse("div.decklist")?;
    let Some(container) = document.select(&container_selector).next() else {
        return Ok(Vec::new());
    };

    let card_link_selector = Selector::parse(r#"a[href*="pocket.limitlesstcg.com/cards/"]"#)?;
    let heading_selector = Selector::parse("div.heading")?;

    let mut cards = Vec::new();
    for link in container.select(&card_link_selector) {
        let text: String = link.text().collect();
        let count: u32 = text.get(..1).unwrap_or_default().parse()?;
        let name = text.get(2..).unwrap_or_default().to_string();
        let card_type = section_heading(&link, &heading_selector)?
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        cards.push(DeckListItem {
            card_type,
            url: link.value().attr("href").unwrap_or_default().to_string(),
            name,
            count,
        });
    }

    debug!(count = cards.len(), "parsed decklist");
    Ok(cards)
}

/// Heading text of the nearest enclosing decklist section.
fn section_heading(link: &ElementRef, heading_selector: &Selector) -> Result<String> {
    link.ancestors()
        .filter_map(ElementRef::wrap)
        .find_map(|ancestor| ancestor.select(heading_selector).next())
        .map(|heading| heading.text().collect::<String>())
        .ok_or(LimitlessError::ElementNotFound {
            context: "decklist section heading (div.heading)",
        })
}
