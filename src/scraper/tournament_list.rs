use ::scraper::Selector;
use tracing::debug;

use crate::error::{LimitlessError, Result};
use crate::model::{parse_site_date, TournamentPage, TournamentSummary};
use crate::scraper::{self, require_attr, table_rows};

/// Parse one page of the completed-tournaments listing: the pagination
/// indicators plus one summary per tournament row.
pub(crate) fn parse_tournament_page(document: &scraper::Html) -> Result<TournamentPage> {
    let pagination_selector = Selector::parse("ul.pagination")?;
    let pagination = document
        .select(&pagination_selector)
        .next()
        .ok_or(LimitlessError::ElementNotFound {
            context: "tournament list pagination (ul.pagination)",
        })?;
    let current_page = require_attr(&pagination, "data-current", "ul.pagination")?.parse()?;
    let max_page = require_attr(&pagination, "data-max", "ul.pagination")?.parse()?;

    let standings_link_selector = Selector::parse(r#"a[href*="/standings"]"#)?;
    let rows = table_rows(document, "completed-tournaments", "completed tournaments table")?;

    let mut tournaments = Vec::with_capacity(rows.len());
    for row in rows {
        let href = row
            .select(&standings_link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(LimitlessError::ElementNotFound {
                context: "standings link in tournament row",
            })?;
        let id = href.split('/').nth(2).unwrap_or_default().to_string();

        tournaments.push(TournamentSummary {
            id,
            name: require_attr(&row, "data-name", "tournament row")?.to_string(),
            date: parse_site_date(require_attr(&row, "data-date", "tournament row")?)?,
            organizer: require_attr(&row, "data-organizer", "tournament row")?.to_string(),
            format: require_attr(&row, "data-format", "tournament row")?.to_string(),
            nb_players: require_attr(&row, "data-players", "tournament row")?.parse()?,
        });
    }

    debug!(
        count = tournaments.len(),
        current_page, max_page, "parsed tournament list page"
    );

    Ok(TournamentPage {
        tournaments,
        current_page,
        max_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::scraper::Html;

    const LIST_PAGE: &str = r#"
        <html><body>
        <ul class="pagination" data-current="2" data-max="5"></ul>
        <table class="completed-tournaments">
          <tr><th>Name</th><th>Date</th></tr>
          <tr data-name="Weekly Challenge #12" data-date="2025-03-01T18:30:00.000Z"
              data-organizer="Some Org" data-format="STANDARD" data-players="64">
            <td><a href="/tournament/abc123/standings?players">standings</a></td>
          </tr>
          <tr data-name="Open League" data-date="2025-02-27T12:00:00.000Z"
              data-organizer="Other Org" data-format="STANDARD" data-players="17">
            <td><a href="/tournament/xyz-9/standings?players">standings</a></td>
          </tr>
        </table>
        </body></html>"#;

    #[test]
    fn parses_rows_and_pagination() {
        let document = Html::parse_document(LIST_PAGE);
        let page = parse_tournament_page(&document).unwrap();

        assert_eq!(page.current_page, 2);
        assert_eq!(page.max_page, 5);
        assert_eq!(page.tournaments.len(), 2);

        let first = &page.tournaments[0];
        assert_eq!(first.id, "abc123");
        assert_eq!(first.name, "Weekly Challenge #12");
        assert_eq!(first.organizer, "Some Org");
        assert_eq!(first.nb_players, 64);

        assert_eq!(page.tournaments[1].id, "xyz-9");
    }

    #[test]
    fn missing_pagination_is_an_error() {
        let document = Html::parse_document("<html><body></body></html>");
        assert!(parse_tournament_page(&document).is_err());
    }
}
