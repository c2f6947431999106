//! URL helpers for zaubacorp.com

/// Origin of the target site
pub const BASE_URL: &str = "https://www.zaubacorp.com";

/// Builds the typeahead search endpoint URL
///
/// # Example
/// ```
/// use zaubacorp_core::url::typeahead_url;
/// assert_eq!(
///     typeahead_url("https://www.zaubacorp.com"),
///     "https://www.zaubacorp.com/typeahead"
/// );
/// ```
pub fn typeahead_url(base_url: &str) -> String {
    format!("{}/typeahead", base_url.trim_end_matches('/'))
}

/// Builds the detail page URL for a company identifier
///
/// The identifier is the opaque slug the search response carries, used
/// verbatim as a path segment.
///
/// # Example
/// ```
/// use zaubacorp_core::url::detail_url;
/// assert_eq!(
///     detail_url("https://www.zaubacorp.com", "company/ACME-LIMITED/U12345"),
///     "https://www.zaubacorp.com/company/ACME-LIMITED/U12345"
/// );
/// ```
pub fn detail_url(base_url: &str, company_id: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        company_id.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typeahead_url() {
        assert_eq!(typeahead_url(BASE_URL), "https://www.zaubacorp.com/typeahead");
    }

    #[test]
    fn test_typeahead_url_trailing_slash() {
        assert_eq!(
            typeahead_url("https://www.zaubacorp.com/"),
            "https://www.zaubacorp.com/typeahead"
        );
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(
            detail_url(BASE_URL, "company/ACME-LIMITED/U12345"),
            "https://www.zaubacorp.com/company/ACME-LIMITED/U12345"
        );
    }

    #[test]
    fn test_detail_url_leading_slash_id() {
        assert_eq!(
            detail_url(BASE_URL, "/company/ACME-LIMITED/U12345"),
            "https://www.zaubacorp.com/company/ACME-LIMITED/U12345"
        );
    }
}
