use ::scraper::Selector;
use tracing::debug;

use crate::error::{LimitlessError, Result};
use crate::model::StandingsRow;
use crate::scraper::{self, require_attr, table_rows};

/// Parse the ranked player rows of a standings page.
///
/// Whether a row links to a decklist decides later whether the player is
/// kept at all; placing and country are optional site data.
pub(crate) fn parse_standings(document: &scraper::Html) -> Result<Vec<StandingsRow>> {
    let player_link_selector = Selector::parse(r#"a[href*="/player/"]"#)?;
    let decklist_link_selector = Selector::parse(r#"a[href$="/decklist"]"#)?;

    let rows = table_rows(document, "striped", "standings table")?;
    let mut players = Vec::with_capacity(rows.len());
    for row in rows {
        let href = row
            .select(&player_link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(LimitlessError::ElementNotFound {
                context: "player link in standings row",
            })?;
        let id = href.split('/').nth(4).unwrap_or_default().to_string();

        players.push(StandingsRow {
            id,
            name: require_attr(&row, "data-name", "standings row")?.to_string(),
            placing: row.value().attr("data-placing").and_then(|p| p.parse().ok()),
            country: row
                .value()
                .attr("data-country")
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            has_decklist: row.select(&decklist_link_selector).next().is_some(),
        });
    }

    debug!(count = players.len(), "parsed standings rows");
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::scraper::Html;

    const STANDINGS_PAGE: &str = r#"
        <html><body>
        <table class="striped">
          <tr><th>Placing</th><th>Player</th></tr>
          <tr data-name="Alice" data-placing="1" data-country="FR">
            <td><a href="/tournament/abc123/player/alice42">Alice</a></td>
            <td><a href="/tournament/abc123/player/alice42/decklist">list</a></td>
          </tr>
          <tr data-name="Bob" data-placing="2">
            <td><a href="/tournament/abc123/player/bob_7">Bob</a></td>
          </tr>
        </table>
        </body></html>"#;

    #[test]
    fn parses_player_rows() {
        let document = Html::parse_document(STANDINGS_PAGE);
        let rows = parse_standings(&document).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].id, "alice42");
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].placing, Some(1));
        assert_eq!(rows[0].country.as_deref(), Some("FR"));
        assert!(rows[0].has_decklist);

        assert_eq!(rows[1].id, "bob_7");
        assert_eq!(rows[1].country, None);
        assert!(!rows[1].has_decklist);
    }

    #[test]
    fn missing_standings_table_is_an_error() {
        let document = Html::parse_document("<html><body></body></html>");
        assert!(parse_standings(&document).is_err());
    }
}
