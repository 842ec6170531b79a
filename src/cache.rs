use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// On-disk store of raw fetched HTML, keyed by URL path.
///
/// Keys are derived by stripping every character that is not ASCII
/// alphanumeric or a path separator, so the cache tree mirrors the site's
/// URL hierarchy. Entries are written once and never evicted or refetched;
/// re-running a crawl against a warm cache performs no network access for
/// previously seen pages.
#[derive(Debug, Clone)]
pub struct PageCache {
    root: PathBuf,
}

impl PageCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Deterministic filesystem key for a URL path (including any query).
    ///
    /// Distinct URL paths map to distinct keys; query strings are flattened
    /// into the final path segment.
    pub fn key_for(&self, url_path: &str) -> PathBuf {
        let sanitized: String = url_path
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '/')
            .collect();
        let relative = sanitized.trim_start_matches('/');
        self.root.join(format!("{relative}.html"))
    }

    /// Read a cached page, or `None` if this key was never written.
    pub async fn load(&self, key: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(key).await {
            Ok(body) => {
                debug!(key = %key.display(), "cache hit");
                Ok(Some(body))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist a fetched page body, creating intermediate directories.
    pub async fn store(&self, key: &Path, body: &str) -> Result<()> {
        if let Some(parent) = key.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(key, body).await?;
        debug!(key = %key.display(), bytes = body.len(), "cached page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_derivation_is_deterministic() {
        let cache = PageCache::new("cache");
        let a = cache.key_for("/tournament/abc/standings?players");
        let b = cache.key_for("/tournament/abc/standings?players");
        assert_eq!(a, b);
        assert_eq!(a, PathBuf::from("cache/tournament/abc/standingsplayers.html"));
    }

    #[test]
    fn sibling_paths_get_distinct_keys() {
        let cache = PageCache::new("cache");
        let standings = cache.key_for("/tournament/abc/standings");
        let pairings = cache.key_for("/tournament/abc/pairings");
        assert_ne!(standings, pairings);
    }

    #[test]
    fn non_alphanumeric_characters_are_stripped() {
        let cache = PageCache::new("cache");
        let key = cache.key_for("/tournaments/completed?game=POCKET&page=2");
        assert_eq!(
            key,
            PathBuf::from("cache/tournaments/completedgamePOCKETpage2.html")
        );
    }

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());
        let key = cache.key_for("/tournament/xyz/pairings");

        assert_eq!(cache.load(&key).await.unwrap(), None);
        cache.store(&key, "<html></html>").await.unwrap();
        assert_eq!(
            cache.load(&key).await.unwrap().as_deref(),
            Some("<html></html>")
        );
    }
}
