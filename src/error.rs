use ::scraper::error::SelectorErrorKind;
use std::num::ParseIntError;

/// All errors that can occur while crawling limitlesstcg.com.
#[derive(thiserror::Error, Debug)]
pub enum LimitlessError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// Failed to construct the underlying HTTP client.
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// Failed to parse a date/time from scraped text.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// An expected HTML attribute was not found on an element.
    #[error("missing attribute {attr} on {context}")]
    MissingAttribute {
        attr: &'static str,
        context: &'static str,
    },

    /// A pairings page matched neither the bracket nor the table layout.
    #[error("unrecognized pairings layout for tournament {tournament_id}")]
    UnrecognizedPairings { tournament_id: String },

    /// A URL could not be parsed or joined against the base URL.
    #[error("invalid url: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Cache or artifact file I/O failed.
    #[error("file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact serialization or deserialization failed.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl<'a> From<SelectorErrorKind<'a>> for LimitlessError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        LimitlessError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LimitlessError>;
