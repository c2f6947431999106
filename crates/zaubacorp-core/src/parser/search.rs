//! Search response parser for zaubacorp.com
//!
//! Parses the HTML fragment the typeahead endpoint returns into
//! candidate results.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ZaubacorpError};
use crate::parser::clean_text;
use crate::types::SearchCandidate;

/// Parses a typeahead response fragment into search candidates
///
/// Scans result rows (`div.show`) in document order. A row that cannot
/// yield both an id and a name is skipped, not fatal. Zero matching rows
/// is an empty list, never an error.
///
/// # Arguments
/// * `html` - Raw HTML fragment from the typeahead response
/// * `max_results` - Stop once this many candidates are collected
pub fn parse_search_results(
    html: &str,
    max_results: Option<usize>,
) -> Result<Vec<SearchCandidate>> {
    let document = Html::parse_fragment(html);

    let row_selector = Selector::parse("div.show")
        .map_err(|e| ZaubacorpError::Search(format!("invalid selector: {e:?}")))?;

    let mut results = Vec::new();

    for element in document.select(&row_selector) {
        if let Some(max) = max_results
            && results.len() >= max
        {
            break;
        }

        if let Some(candidate) = parse_result_row(&element) {
            results.push(candidate);
        }
    }

    Ok(results)
}

/// Parses a single result row
///
/// The row's identifier attribute is the company id (an opaque path
/// segment); its visible text is the company name.
fn parse_result_row(element: &ElementRef) -> Option<SearchCandidate> {
    let id = element.value().attr("id")?.trim();
    if id.is_empty() {
        return None;
    }

    let name = clean_text(&element.text().collect::<String>());
    if name.is_empty() {
        return None;
    }

    Some(SearchCandidate {
        id: id.to_string(),
        name,
    })
}
