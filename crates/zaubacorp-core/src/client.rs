//! HTTP fetch backend for zaubacorp.com
//!
//! Provides the `Fetcher` capability trait, the shared rate limiter, and
//! the plain HTTP implementation. The scripted-browser implementation
//! lives in `browser` and is interchangeable behind the same trait.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{Result, ZaubacorpError};
use crate::types::SearchFilter;
use crate::url::{BASE_URL, detail_url, typeahead_url};

/// Configuration shared by both fetch backends
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Minimum delay between consecutive outbound requests (default: 1.0s)
    pub delay_secs: f64,
    /// Transport timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// How long the browser backend waits for the record-section marker
    /// before reading the page anyway (default: 15)
    pub wait_timeout_secs: u64,
    /// Run the browser backend headless (default: true)
    pub headless: bool,
    /// Target site origin; overridable for tests
    pub base_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay_secs: 1.0,
            timeout_secs: 30,
            wait_timeout_secs: 15,
            headless: true,
            base_url: BASE_URL.to_string(),
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart. The sleep
/// happens inside one fetcher; concurrent fetcher instances do not
/// coordinate with each other.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given inter-request delay
    pub fn new(delay_secs: f64) -> Self {
        let min_interval = Duration::from_secs_f64(delay_secs);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// If called before the minimum interval has passed since the last
    /// request, sleeps until the interval has elapsed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            sleep(wait_time).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Capability interface for fetching raw HTML from the target site
///
/// Both backends apply the inter-request delay before every operation
/// and surface transport failures without retrying; retry policy, if
/// any, belongs to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a typeahead search and return the raw HTML fragment
    async fn search(&self, query: &str, filter: SearchFilter) -> Result<String>;

    /// Fetch a company's detail page and return the raw HTML
    async fn fetch_detail_page(&self, company_id: &str) -> Result<String>;

    /// Release the backend's long-lived resource; idempotent
    async fn close(&self) -> Result<()>;
}

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Plain HTTP fetch backend
///
/// Presents a browser-like request identity (user agent, accept headers)
/// and keeps a cookie store so the session established on connect is
/// reused across calls. No hardcoded credentials.
pub struct HttpFetcher {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl HttpFetcher {
    /// Connect with default configuration
    pub async fn connect() -> Result<Self> {
        Self::connect_with_config(FetchConfig::default()).await
    }

    /// Connect with custom configuration
    ///
    /// Primes the session with a GET to the origin so server-issued
    /// cookies are in place before the first search.
    pub async fn connect_with_config(config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                        .parse()
                        .unwrap(),
                );
                headers.insert(
                    reqwest::header::ACCEPT_LANGUAGE,
                    "en-US,en;q=0.9".parse().unwrap(),
                );
                headers
            })
            .build()
            .map_err(ZaubacorpError::Network)?;

        let fetcher = Self {
            client,
            rate_limiter: RateLimiter::new(config.delay_secs),
            base_url: config.base_url,
        };
        fetcher.prime_session().await?;
        Ok(fetcher)
    }

    /// Visit the landing page once so the cookie store holds a session
    ///
    /// A non-2xx answer here is tolerated; cookies may be set regardless.
    async fn prime_session(&self) -> Result<()> {
        self.rate_limiter.acquire().await;
        let response = self.client.get(&self.base_url).send().await?;
        debug!(status = %response.status(), "session primed");
        Ok(())
    }

    /// Get a reference to the rate limiter (for testing)
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn search(&self, query: &str, filter: SearchFilter) -> Result<String> {
        self.rate_limiter.acquire().await;

        let response = self
            .client
            .post(typeahead_url(&self.base_url))
            .form(&[("search", query), ("filter", filter.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZaubacorpError::Status(status));
        }

        Ok(response.text().await?)
    }

    async fn fetch_detail_page(&self, company_id: &str) -> Result<String> {
        self.rate_limiter.acquire().await;

        let url = detail_url(&self.base_url, company_id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZaubacorpError::Status(status));
        }

        Ok(response.text().await?)
    }

    async fn close(&self) -> Result<()> {
        // nothing long-lived beyond the connection pool, which drops
        // with the client
        Ok(())
    }
}
