use ::scraper::Selector;
use tracing::debug;

use crate::error::{LimitlessError, Result};
use crate::model::{Match, MatchResult};
use crate::scraper::{self, require_attr};

/// Paths of the previous-round pairing pages linked from the mini nav.
///
/// The nav's final link points back at the current page and is dropped; a
/// page without a mini nav (single-round tournament) has no previous pages.
pub(crate) fn previous_pairings_paths(document: &scraper::Html) -> Result<Vec<String>> {
    let nav_link_selector = Selector::parse(".mini-nav a")?;
    let mut paths: Vec<String> = document
        .select(&nav_link_selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect();
    paths.pop();
    Ok(paths)
}

/// Normalize one pairings page into match records.
///
/// The page is classified as exactly one of the two known layouts; a page
/// matching neither is a fatal error for this tournament's match
/// extraction.
pub(crate) fn parse_pairings(
    document: &scraper::Html,
    tournament_id: &str,
) -> Result<Vec<Match>> {
    let bracket_selector = Selector::parse("div.live-bracket")?;
    let table_selector = Selector::parse("div.pairings table[data-tournament]")?;

    let matches = if document.select(&bracket_selector).next().is_some() {
        bracket_matches(document)?
    } else if document.select(&table_selector).next().is_some() {
        table_matches(document)?
    } else {
        return Err(LimitlessError::UnrecognizedPairings {
            tournament_id: tournament_id.to_string(),
        });
    };

    debug!(count = matches.len(), tournament_id, "parsed pairings page");
    Ok(matches)
}

/// Single-elimination tree. Nodes flagged as byes contribute nothing; every
/// other node yields one match with one result per listed participant.
fn bracket_matches(document: &scraper::Html) -> Result<Vec<Match>> {
    let match_selector = Selector::parse("div.live-bracket div.bracket-match")?;
    let bye_selector = Selector::parse("a.bye")?;
    let player_selector = Selector::parse("div.live-bracket-player")?;
    let score_selector = Selector::parse("div.score")?;

    let mut matches = Vec::new();
    for node in document.select(&match_selector) {
        if node.select(&bye_selector).next().is_some() {
            continue;
        }

        let match_results = node
            .select(&player_selector)
            .map(|player| {
                let player_id = require_attr(&player, "data-id", "bracket player")?.to_string();
                let score = player
                    .select(&score_selector)
                    .next()
                    .ok_or(LimitlessError::ElementNotFound {
                        context: "bracket player score (div.score)",
                    })
                    .and_then(|score| require_attr(&score, "data-score", "bracket score"))?
                    .parse()?;
                Ok(MatchResult { player_id, score })
            })
            .collect::<Result<Vec<_>>>()?;

        matches.push(Match { match_results });
    }
    Ok(matches)
}

/// Swiss round table, one row per match. Only rows flagged completed count,
/// and each needs both participant cells.
fn table_matches(document: &scraper::Html) -> Result<Vec<Match>> {
    let row_selector = Selector::parse(r#"tr[data-completed="1"]"#)?;
    let p1_selector = Selector::parse("td.p1")?;
    let p2_selector = Selector::parse("td.p2")?;

    let mut matches = Vec::new();
    for row in document.select(&row_selector) {
        let (Some(p1), Some(p2)) = (
            row.select(&p1_selector).next(),
            row.select(&p2_selector).next(),
        ) else {
            continue;
        };

        let match_results = [p1, p2]
            .iter()
            .map(|cell| {
                Ok(MatchResult {
                    player_id: require_attr(cell, "data-id", "pairing cell")?.to_string(),
                    score: require_attr(cell, "data-count", "pairing cell")?.parse()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        matches.push(Match { match_results });
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::scraper::Html;

    const BRACKET_PAGE: &str = r#"
        <html><body>
        <div class="live-bracket">
          <div class="bracket-match">
            <div class="live-bracket-player" data-id="alice42">
              <div class="score" data-score="2"></div>
            </div>
            <div class="live-bracket-player" data-id="bob_7">
              <div class="score" data-score="1"></div>
            </div>
          </div>
          <div class="bracket-match">
            <a class="bye"></a>
            <div class="live-bracket-player" data-id="carol">
              <div class="score" data-score="0"></div>
            </div>
          </div>
        </div>
        </body></html>"#;

    const TABLE_PAGE: &str = r#"
        <html><body>
        <div class="pairings">
        <table data-tournament="abc123">
          <tr data-completed="1">
            <td class="p1" data-id="alice42" data-count="2"></td>
            <td class="p2" data-id="bob_7" data-count="0"></td>
          </tr>
          <tr>
            <td class="p1" data-id="carol" data-count="0"></td>
            <td class="p2" data-id="dave" data-count="0"></td>
          </tr>
          <tr data-completed="1">
            <td class="p1" data-id="erin" data-count="1"></td>
          </tr>
        </table>
        </div>
        </body></html>"#;

    #[test]
    fn bracket_byes_yield_no_match() {
        let document = Html::parse_document(BRACKET_PAGE);
        let matches = parse_pairings(&document, "abc123").unwrap();

        assert_eq!(matches.len(), 1);
        let results = &matches[0].match_results;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].player_id, "alice42");
        assert_eq!(results[0].score, 2);
        assert_eq!(results[1].player_id, "bob_7");
        assert_eq!(results[1].score, 1);
    }

    #[test]
    fn only_completed_table_rows_with_both_cells_count() {
        let document = Html::parse_document(TABLE_PAGE);
        let matches = parse_pairings(&document, "abc123").unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_results.len(), 2);
        assert_eq!(matches[0].match_results[1].player_id, "bob_7");
        assert_eq!(matches[0].match_results[1].score, 0);
    }

    #[test]
    fn unrecognized_layout_is_a_fatal_error() {
        let document = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        let err = parse_pairings(&document, "abc123").unwrap_err();
        assert!(matches!(
            err,
            LimitlessError::UnrecognizedPairings { ref tournament_id } if tournament_id == "abc123"
        ));
    }

    #[test]
    fn mini_nav_drops_the_self_referencing_link() {
        let page = r#"
            <div class="mini-nav">
              <a href="/tournament/abc123/pairings?round=1">1</a>
              <a href="/tournament/abc123/pairings?round=2">2</a>
              <a href="/tournament/abc123/pairings">current</a>
            </div>"#;
        let document = Html::parse_document(page);
        let paths = previous_pairings_paths(&document).unwrap();
        assert_eq!(
            paths,
            vec![
                "/tournament/abc123/pairings?round=1".to_string(),
                "/tournament/abc123/pairings?round=2".to_string(),
            ]
        );
    }

    #[test]
    fn page_without_mini_nav_has_no_previous_rounds() {
        let document = Html::parse_document("<html><body></body></html>");
        assert!(previous_pairings_paths(&document).unwrap().is_empty());
    }
}
