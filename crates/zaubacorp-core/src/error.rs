//! Error types for the zaubacorp.com scraper
//!
//! Transport failures are propagated to the caller; parse failures on
//! individual rows, sections and tables are absorbed locally and yield
//! partial results instead of errors.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all zaubacorp.com scraper operations
///
/// Implements Display for human-readable messages and Serialize
/// (string form) so the API layer can embed errors in JSON bodies.
#[derive(Error, Debug)]
pub enum ZaubacorpError {
    /// HTTP transport failed (timeout, DNS, connection)
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Target site answered with a non-2xx status
    #[error("unexpected status from target site: {0}")]
    Status(reqwest::StatusCode),

    /// WebDriver command failed (browser-backed fetch)
    #[error("webdriver request failed: {0}")]
    Webdriver(#[from] thirtyfour::error::WebDriverError),

    /// Page content could not be obtained despite the transport succeeding
    #[error("failed to load page: {0}")]
    PageUnavailable(String),

    /// Search response received but could not be parsed into candidates
    #[error("failed to parse search response: {0}")]
    Search(String),

    /// Reserved for detail-page extraction failures; the current policy
    /// degrades to partial records instead of raising this
    #[error("failed to extract company data: {0}")]
    Extraction(String),

    /// Empty or whitespace-only search input
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl Serialize for ZaubacorpError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for zaubacorp.com operations
pub type Result<T> = std::result::Result<T, ZaubacorpError>;
