//! HTML parsers for zaubacorp.com
//!
//! Pure, deterministic, no I/O. Fragments that cannot be parsed are
//! skipped rather than failing the whole document.

pub mod record;
pub mod search;

pub use record::parse_company_record;
pub use search::parse_search_results;

use std::sync::LazyLock;

use regex::Regex;

/// Matches the obfuscated-email placeholder the site injects in place of
/// real addresses, e.g. `[email protected]` with junk in between
static EMAIL_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[email.*?protected\]").unwrap());

/// Cleans an extracted text value
///
/// Collapses whitespace runs to single spaces, trims, and normalizes the
/// site's masked-email token to a literal `[email protected]`. Applied to
/// every text value before any further processing; idempotent.
pub fn clean_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    EMAIL_PLACEHOLDER
        .replace_all(&collapsed, "[email protected]")
        .into_owned()
}
