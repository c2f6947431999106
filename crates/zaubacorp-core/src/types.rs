//! Core data types for the zaubacorp.com scraper

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Filter values accepted by the typeahead search endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFilter {
    #[default]
    Company,
    Director,
    Trademark,
    #[serde(rename = "company_by_address")]
    AddressCompany,
}

impl SearchFilter {
    /// Wire value sent in the `filter` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchFilter::Company => "company",
            SearchFilter::Director => "director",
            SearchFilter::Trademark => "trademark",
            SearchFilter::AddressCompany => "company_by_address",
        }
    }

    /// Parses a wire value back into a filter, e.g. from an API query param
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "company" => Some(SearchFilter::Company),
            "director" => Some(SearchFilter::Director),
            "trademark" => Some(SearchFilter::Trademark),
            "company_by_address" => Some(SearchFilter::AddressCompany),
            _ => None,
        }
    }

    /// All wire values, for error messages listing the accepted filters
    pub fn all_params() -> [&'static str; 4] {
        ["company", "director", "trademark", "company_by_address"]
    }
}

/// A single candidate from a typeahead search response
///
/// `id` is the site's opaque company identifier (a URL path segment),
/// `name` the trimmed visible text of the result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub id: String,
    pub name: String,
}

/// A row of extracted table data
///
/// Either a single key/value pair (two-cell source rows) or a
/// `column_<n>` map (wider rows). Insertion order is preserved.
pub type Row = IndexMap<String, String>;

/// A table extracted from a record section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub caption: String,
    pub data: Vec<Row>,
}

/// One record section: descriptive paragraphs and/or tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,
}

impl Section {
    /// True when the section has no paragraphs and no tables
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty() && self.tables.is_empty()
    }
}

/// Structured dump of a company's public record page
///
/// `sections` preserves the document order of section headers. A failed
/// fetch produces a record with `success: false` and an error message
/// instead of an error value, so batch operations can continue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company_id: String,
    pub sections: IndexMap<String, Section>,
    pub extracted_at: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CompanyRecord {
    /// Record for a successfully extracted page
    pub fn extracted(company_id: impl Into<String>, sections: IndexMap<String, Section>) -> Self {
        Self {
            company_id: company_id.into(),
            sections,
            extracted_at: timestamp(),
            success: true,
            error_message: None,
        }
    }

    /// Record for a page that could not be fetched
    pub fn failed(company_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            sections: IndexMap::new(),
            extracted_at: timestamp(),
            success: false,
            error_message: Some(message.into()),
        }
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
