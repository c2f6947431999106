//! Scripted-browser fetch backend
//!
//! Drives a WebDriver session for pages the target site only populates
//! with client-side script. Interchangeable with the plain HTTP backend
//! behind the `Fetcher` trait; selected by configuration.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::client::{FetchConfig, Fetcher, RateLimiter, USER_AGENT};
use crate::error::{Result, ZaubacorpError};
use crate::types::SearchFilter;
use crate::url::detail_url;

/// Default WebDriver endpoint (chromedriver)
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// CSS marker for rendered record sections on detail pages
const SECTION_MARKER: &str = "div.rc";

/// In-page POST to the typeahead endpoint, run in the site's own origin
/// so the established session cookies apply
const TYPEAHEAD_SCRIPT: &str = r#"
    var callback = arguments[arguments.length - 1];
    fetch(arguments[0] + '/typeahead', {
        method: 'POST',
        headers: {
            'Content-Type': 'application/x-www-form-urlencoded',
            'Accept': 'text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8'
        },
        body: 'search=' + encodeURIComponent(arguments[1]) + '&filter=' + arguments[2]
    })
    .then(function (response) { return response.text(); })
    .then(function (text) { callback(text); })
    .catch(function () { callback(null); });
"#;

/// WebDriver-backed fetcher
///
/// Owns one long-lived browser session; `close` must run on shutdown
/// because the external browser process is not reclaimed automatically.
pub struct BrowserFetcher {
    driver: WebDriver,
    rate_limiter: RateLimiter,
    base_url: String,
    wait_timeout: Duration,
}

impl BrowserFetcher {
    /// Start a browser session against the given WebDriver endpoint
    pub async fn connect(webdriver_url: &str, config: FetchConfig) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg("--disable-blink-features=AutomationControlled")?;
        caps.add_arg("--window-size=1920,1080")?;
        caps.add_arg(&format!("--user-agent={USER_AGENT}"))?;

        let driver = WebDriver::new(webdriver_url, caps).await?;
        driver
            .set_page_load_timeout(Duration::from_secs(config.timeout_secs))
            .await?;

        Ok(Self {
            driver,
            rate_limiter: RateLimiter::new(config.delay_secs),
            base_url: config.base_url,
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
        })
    }

    /// Best-effort wait for a CSS marker; reads the page regardless
    ///
    /// Only the outer page-load timeout is fatal. If the marker never
    /// appears the rendered content is used as-is.
    async fn wait_for_marker(&self, marker: &str) {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            if self.driver.find(By::Css(marker)).await.is_ok() {
                return;
            }
            if Instant::now() >= deadline {
                warn!(marker, "marker did not appear, reading page anyway");
                return;
            }
            sleep(Duration::from_millis(500)).await;
        }
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn search(&self, query: &str, filter: SearchFilter) -> Result<String> {
        self.rate_limiter.acquire().await;

        // Land on the origin first so the session exists before the
        // in-page request
        self.driver.goto(&self.base_url).await?;

        let ret = self
            .driver
            .execute_async(
                TYPEAHEAD_SCRIPT,
                vec![json!(self.base_url), json!(query), json!(filter.as_str())],
            )
            .await?;

        match ret.convert::<Option<String>>()? {
            Some(body) => Ok(body),
            None => Err(ZaubacorpError::PageUnavailable(
                "typeahead request returned no response".to_string(),
            )),
        }
    }

    async fn fetch_detail_page(&self, company_id: &str) -> Result<String> {
        self.rate_limiter.acquire().await;

        let url = detail_url(&self.base_url, company_id);
        self.driver.goto(&url).await?;
        self.wait_for_marker(SECTION_MARKER).await;

        // brief settle so late scripts finish writing the DOM
        sleep(Duration::from_millis(500)).await;

        Ok(self.driver.source().await?)
    }

    async fn close(&self) -> Result<()> {
        if let Err(e) = self.driver.clone().quit().await {
            debug!(error = %e, "webdriver session already gone");
        }
        Ok(())
    }
}
