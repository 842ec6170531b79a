pub(crate) mod cards;
pub(crate) mod decklist;
pub(crate) mod pairings;
pub(crate) mod standings;
pub(crate) mod tournament_list;

pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{LimitlessError, Result};

/// Fetch a URL and parse the response body as an HTML document.
///
/// Used by the card catalog scraper, which runs one request at a time
/// against absolute URLs and does not consult the page cache.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| LimitlessError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LimitlessError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| LimitlessError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}

/// A required attribute; absence is a parse error, not a default.
pub(crate) fn require_attr<'a>(
    element: &ElementRef<'a>,
    attr: &'static str,
    context: &'static str,
) -> Result<&'a str> {
    element
        .value()
        .attr(attr)
        .ok_or(LimitlessError::MissingAttribute { attr, context })
}

/// Rows of the first table carrying `table_class`, header row skipped.
pub(crate) fn table_rows<'a>(
    document: &'a Html,
    table_class: &str,
    context: &'static str,
) -> Result<Vec<ElementRef<'a>>> {
    let class_selector = format!(".{table_class}");
    let table_selector = Selector::parse(&class_selector)?;
    let row_selector = Selector::parse("tr")?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or(LimitlessError::ElementNotFound { context })?;
    Ok(table.select(&row_selector).skip(1).collect())
}
