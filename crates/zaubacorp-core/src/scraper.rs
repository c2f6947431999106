//! Main scraper API for zaubacorp.com
//!
//! Combines a fetch backend with the HTML parsers. One instance owns one
//! long-lived backend; each operation is a strictly sequential
//! fetch-then-parse pipeline.

use tracing::{info, warn};

use crate::browser::BrowserFetcher;
use crate::client::{FetchConfig, Fetcher, HttpFetcher};
use crate::error::{Result, ZaubacorpError};
use crate::parser::{parse_company_record, parse_search_results};
use crate::types::{CompanyRecord, SearchCandidate, SearchFilter};

/// Which fetch backend the scraper drives
#[derive(Debug, Clone)]
pub enum FetchBackend {
    /// Plain HTTP client
    Http,
    /// WebDriver session at the given endpoint, for pages the site only
    /// populates with client-side script
    Browser { webdriver_url: String },
}

/// High-level API for searching companies and extracting record pages
pub struct ZaubacorpScraper {
    fetcher: Box<dyn Fetcher>,
}

impl ZaubacorpScraper {
    /// Create a scraper with the HTTP backend and default configuration
    pub async fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default(), FetchBackend::Http).await
    }

    /// Create a scraper with custom configuration and backend
    pub async fn with_config(config: FetchConfig, backend: FetchBackend) -> Result<Self> {
        let fetcher: Box<dyn Fetcher> = match backend {
            FetchBackend::Http => Box::new(HttpFetcher::connect_with_config(config).await?),
            FetchBackend::Browser { webdriver_url } => {
                Box::new(BrowserFetcher::connect(&webdriver_url, config).await?)
            }
        };
        Ok(Self { fetcher })
    }

    /// Search for companies via the typeahead endpoint
    ///
    /// # Errors
    /// - `InvalidQuery` if the query is empty or whitespace only
    /// - `Network`/`Status`/`Webdriver` if the transport fails
    /// - `Search` if the response defies parsing entirely
    pub async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
        max_results: Option<usize>,
    ) -> Result<Vec<SearchCandidate>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ZaubacorpError::InvalidQuery(
                "search query cannot be empty".to_string(),
            ));
        }

        let html = self.fetcher.search(trimmed, filter).await?;
        let candidates = parse_search_results(&html, max_results)?;
        info!(query = trimmed, found = candidates.len(), "search complete");
        Ok(candidates)
    }

    /// Fetch and parse one company's record page
    ///
    /// Infallible by design: a fetch failure degrades to a record with
    /// `success: false` and the error message, so batch callers can
    /// continue past individual failures.
    pub async fn get_company_record(&self, company_id: &str) -> CompanyRecord {
        match self.fetcher.fetch_detail_page(company_id).await {
            Ok(html) => parse_company_record(&html, company_id),
            Err(e) => {
                warn!(company_id, error = %e, "detail fetch failed");
                CompanyRecord::failed(company_id, e.to_string())
            }
        }
    }

    /// Search, then fetch every remaining candidate's record sequentially
    ///
    /// When `exact_match` is set, candidates are kept if their name
    /// contains the query case-insensitively. This is substring
    /// containment, not equality, despite the flag name; the behavior is
    /// preserved as-is for compatibility.
    pub async fn search_and_fetch_all(
        &self,
        query: &str,
        exact_match: bool,
        max_search_results: usize,
    ) -> Result<Vec<CompanyRecord>> {
        let mut candidates = self
            .search(query, SearchFilter::Company, Some(max_search_results))
            .await?;

        if exact_match {
            let needle = query.trim().to_lowercase();
            candidates.retain(|c| c.name.to_lowercase().contains(&needle));
        }

        let mut records = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            records.push(self.get_company_record(&candidate.id).await);
        }
        Ok(records)
    }

    /// Release the fetch backend
    ///
    /// Required for the browser backend, whose external process is not
    /// reclaimed automatically.
    pub async fn close(&self) -> Result<()> {
        self.fetcher.close().await
    }
}
