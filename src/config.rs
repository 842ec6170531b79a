use std::path::PathBuf;
use std::time::Duration;

/// Production endpoints and limits, mirrored by [`Config::default`].
pub const DEFAULT_BASE_URL: &str = "https://play.limitlesstcg.com";
pub const DEFAULT_CARDS_BASE_URL: &str = "https://pocket.limitlesstcg.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.106 Safari/537.36";

/// Explicit configuration for every crawler component.
///
/// All components take a `Config` at construction; there is no global
/// mutable state. [`Config::default`] yields the production values, and the
/// CLI binaries override individual fields from flags.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the tournament site (relative crawl paths join against it).
    pub base_url: String,
    /// Base URL of the card database site.
    pub cards_base_url: String,
    /// Browser-like user-agent header sent on every request.
    pub user_agent: String,
    /// Root directory of the on-disk page cache.
    pub cache_dir: PathBuf,
    /// Directory receiving one JSON artifact per tournament.
    pub output_dir: PathBuf,
    /// Path of the card catalog JSON file.
    pub cards_output_file: PathBuf,
    /// Cap on concurrent in-flight cache file operations.
    pub max_inflight_ops: usize,
    /// Cap on simultaneous outbound network requests.
    pub max_connections: usize,
    /// Per-request deadline for the card catalog scraper.
    pub card_request_timeout: Duration,
    /// Pause between consecutive set-page requests.
    pub set_fetch_delay: Duration,
    /// Pause between consecutive card-page requests.
    pub card_fetch_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cards_base_url: DEFAULT_CARDS_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_dir: PathBuf::from("cache"),
            output_dir: PathBuf::from("output"),
            cards_output_file: PathBuf::from("pokemon_cards.json"),
            max_inflight_ops: 50,
            max_connections: 20,
            card_request_timeout: Duration::from_secs(10),
            set_fetch_delay: Duration::from_millis(500),
            card_fetch_delay: Duration::from_millis(300),
        }
    }
}
