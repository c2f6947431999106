//! Zaubacorp Scraper Core Library
//!
//! Async API for searching the zaubacorp.com company registry and
//! extracting structured dumps of company record pages.
//!
//! # Overview
//!
//! This crate provides:
//! - Rate-limited fetch backends (plain HTTP, or a scripted browser for
//!   pages that need client-side script) behind one `Fetcher` trait
//! - HTML parsers that turn search responses into candidates and detail
//!   pages into a generic nested section/table structure
//! - A high-level API combining the two
//!
//! # Example
//!
//! ```no_run
//! use zaubacorp_core::{Result, SearchFilter, ZaubacorpScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = ZaubacorpScraper::new().await?;
//!
//!     // Search for companies
//!     let candidates = scraper
//!         .search("Reliance", SearchFilter::Company, Some(3))
//!         .await?;
//!
//!     for candidate in &candidates {
//!         println!("{}: {}", candidate.name, candidate.id);
//!     }
//!
//!     // Extract the first candidate's record page
//!     if let Some(candidate) = candidates.first() {
//!         let record = scraper.get_company_record(&candidate.id).await;
//!         println!("extracted {} sections", record.sections.len());
//!     }
//!
//!     scraper.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! Transport failures surface as errors and are never retried
//! internally. Parse failures on individual rows, sections and tables
//! are absorbed, yielding smaller but valid results. A failed detail
//! fetch becomes a `CompanyRecord` with `success: false` instead of an
//! error, so batch operations continue past individual failures.

mod browser;
mod client;
mod error;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export fetch backends and configuration
pub use browser::{BrowserFetcher, DEFAULT_WEBDRIVER_URL};
pub use client::{FetchConfig, Fetcher, HttpFetcher, RateLimiter};

// Re-export error types
pub use error::{Result, ZaubacorpError};

// Re-export parser functions
pub use parser::{clean_text, parse_company_record, parse_search_results};

// Re-export main scraper API
pub use scraper::{FetchBackend, ZaubacorpScraper};

// Re-export data types
pub use types::{CompanyRecord, Row, SearchCandidate, SearchFilter, Section, Table};
