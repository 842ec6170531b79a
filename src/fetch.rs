use ::scraper::Html;
use futures::future::try_join_all;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, instrument};
use url::Url;

use crate::cache::PageCache;
use crate::config::Config;
use crate::error::{LimitlessError, Result};

/// Whether a fetch may be answered from the page cache.
///
/// Tournament list pages are always refetched (`Bypass`) because their
/// pagination indicators change between runs; everything else is immutable
/// once published and uses the cache. Fetched bodies are written to the
/// cache under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Use,
    Bypass,
}

/// Cache-aware, concurrency-bounded HTTP fetcher.
///
/// Two semaphores bound resource usage: one caps concurrent cache file
/// operations, the other caps simultaneous outbound requests. Fan-outs are
/// issued with [`Fetcher::fetch_all`], which preserves request order in its
/// result and fails the whole batch on the first member error.
pub struct Fetcher {
    http: reqwest::Client,
    base_url: Url,
    cache: PageCache,
    file_ops: Semaphore,
    connections: Semaphore,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(LimitlessError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: Url::parse(&config.base_url)?,
            cache: PageCache::new(&config.cache_dir),
            file_ops: Semaphore::new(config.max_inflight_ops),
            connections: Semaphore::new(config.max_connections),
        })
    }

    async fn permit(semaphore: &Semaphore) -> SemaphorePermit<'_> {
        semaphore.acquire().await.expect("semaphore closed")
    }

    /// Resolve a site-relative path to a parsed HTML document, consulting
    /// the page cache first when the policy allows it.
    #[instrument(skip(self))]
    pub async fn get_document(&self, path: &str, cache: CachePolicy) -> Result<Html> {
        let key = self.cache.key_for(path);

        if cache == CachePolicy::Use {
            let cached = {
                let _permit = Self::permit(&self.file_ops).await;
                self.cache.load(&key).await?
            };
            if let Some(body) = cached {
                return Ok(Html::parse_document(&body));
            }
        }

        let url = self.base_url.join(path)?;
        let body = self.fetch_body(url).await?;

        {
            let _permit = Self::permit(&self.file_ops).await;
            self.cache.store(&key, &body).await?;
        }

        Ok(Html::parse_document(&body))
    }

    async fn fetch_body(&self, url: Url) -> Result<String> {
        let _permit = Self::permit(&self.connections).await;
        debug!(url = %url, "fetching page");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LimitlessError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LimitlessError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| LimitlessError::ResponseBody {
            url: url.to_string(),
            source: e,
        })
    }

    /// A `None` path resolves to `None` without issuing a request.
    pub async fn fetch_optional(
        &self,
        path: Option<&str>,
        cache: CachePolicy,
    ) -> Result<Option<Html>> {
        match path {
            Some(path) => Ok(Some(self.get_document(path, cache).await?)),
            None => Ok(None),
        }
    }

    /// Fetch a batch of optional paths concurrently.
    ///
    /// Results come back in input order regardless of completion order; the
    /// first failed member fails the batch.
    pub async fn fetch_all(
        &self,
        paths: &[Option<String>],
        cache: CachePolicy,
    ) -> Result<Vec<Option<Html>>> {
        try_join_all(
            paths
                .iter()
                .map(|path| self.fetch_optional(path.as_deref(), cache)),
        )
        .await
    }
}
