//! Detail page parser for zaubacorp.com
//!
//! Decomposes a company's record page into a generic nested
//! section/table structure. No schema beyond the structural CSS markers:
//! `div.rc` blocks with `h3.rh` headings, `p.rp` paragraphs and plain
//! tables.

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::parser::clean_text;
use crate::types::{CompanyRecord, Row, Section, Table};

/// Parses a detail page into a `CompanyRecord`
///
/// Never fails: blocks, tables and rows that cannot be parsed are
/// skipped, yielding a partial but always-valid record. Sections with no
/// content are dropped before insertion; a section without a heading
/// gets the positional name `section_<n>`.
pub fn parse_company_record(html: &str, company_id: &str) -> CompanyRecord {
    let document = Html::parse_document(html);

    // Structural markers only; selectors are static and always valid
    let section_selector = Selector::parse("div.rc").unwrap();
    let title_selector = Selector::parse("h3.rh").unwrap();
    let paragraph_selector = Selector::parse("p.rp").unwrap();
    let table_selector = Selector::parse("table").unwrap();

    let mut sections: IndexMap<String, Section> = IndexMap::new();

    for block in document.select(&section_selector) {
        let title = block
            .select(&title_selector)
            .next()
            .map(|h| clean_text(&h.text().collect::<String>()))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("section_{}", sections.len()));

        let descriptions: Vec<String> = block
            .select(&paragraph_selector)
            .map(|p| clean_text(&p.text().collect::<String>()))
            .filter(|d| !d.is_empty())
            .collect();

        let mut tables = Vec::new();
        for (i, table) in block.select(&table_selector).enumerate() {
            if let Some(table) = extract_table(&table, i) {
                tables.push(table);
            }
        }

        let section = Section {
            descriptions,
            tables,
        };
        if section.is_empty() {
            continue;
        }
        sections.insert(title, section);
    }

    debug!(company_id, sections = sections.len(), "record extracted");
    CompanyRecord::extracted(company_id, sections)
}

/// Extracts one table; `None` if no rows survive the row rules
///
/// Caption comes from the `<caption>` element when present, else the
/// positional name `table_<i>` (i counts all tables in the block,
/// including dropped ones).
fn extract_table(table: &ElementRef, index: usize) -> Option<Table> {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td, th").unwrap();
    let caption_selector = Selector::parse("caption").unwrap();

    let mut data = Vec::new();
    for tr in table.select(&row_selector) {
        let cells: Vec<String> = tr
            .select(&cell_selector)
            .map(|c| clean_text(&c.text().collect::<String>()))
            .collect();
        if let Some(row) = extract_row(&cells) {
            data.push(row);
        }
    }

    if data.is_empty() {
        return None;
    }

    let caption = table
        .select(&caption_selector)
        .next()
        .map(|c| clean_text(&c.text().collect::<String>()))
        .unwrap_or_else(|| format!("table_{index}"));

    Some(Table { caption, data })
}

/// Applies the row rules to a list of cleaned cell texts
///
/// Exactly two cells become a key/value pair; wider rows become a
/// `column_<n>` map over the non-empty cells. Rows with fewer than two
/// non-empty cells are dropped entirely — a lossy simplification kept
/// for compatibility with downstream consumers.
fn extract_row(cells: &[String]) -> Option<Row> {
    let non_empty = cells.iter().filter(|c| !c.is_empty()).count();
    if non_empty < 2 {
        return None;
    }

    let row: Row = if cells.len() == 2 {
        Row::from([(cells[0].clone(), cells[1].clone())])
    } else {
        cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(i, c)| (format!("column_{i}"), c.clone()))
            .collect()
    };

    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(html: &str) -> CompanyRecord {
        parse_company_record(html, "test-company-id")
    }

    #[test]
    fn test_parse_empty_page() {
        let result = record("<html><body><p>nothing here</p></body></html>");
        assert!(result.success);
        assert!(result.sections.is_empty());
        assert_eq!(result.company_id, "test-company-id");
    }

    #[test]
    fn test_two_section_page() {
        let html = r#"
        <html><body>
            <div class="rc">
                <h3 class="rh">About the Company</h3>
                <p class="rp">Incorporated in 1973.</p>
                <p class="rp">Registered office in Mumbai.</p>
            </div>
            <div class="rc">
                <h3 class="rh">Company Details</h3>
                <table>
                    <caption>Basic Information</caption>
                    <tr><td>CIN</td><td>L17110MH1973PLC019786</td></tr>
                    <tr><td>Company Status</td><td>Active</td></tr>
                </table>
            </div>
        </body></html>
        "#;

        let result = record(html);
        assert!(result.success);
        assert_eq!(result.sections.len(), 2);

        let (first_key, first) = result.sections.get_index(0).unwrap();
        assert_eq!(first_key, "About the Company");
        assert_eq!(
            first.descriptions,
            vec!["Incorporated in 1973.", "Registered office in Mumbai."]
        );
        assert!(first.tables.is_empty());

        let (second_key, second) = result.sections.get_index(1).unwrap();
        assert_eq!(second_key, "Company Details");
        assert!(second.descriptions.is_empty());
        assert_eq!(second.tables.len(), 1);

        let table = &second.tables[0];
        assert_eq!(table.caption, "Basic Information");
        assert_eq!(table.data.len(), 2);
        assert_eq!(
            table.data[0].get("CIN").map(String::as_str),
            Some("L17110MH1973PLC019786")
        );
        assert_eq!(
            table.data[1].get("Company Status").map(String::as_str),
            Some("Active")
        );
    }

    #[test]
    fn test_section_without_heading_gets_positional_name() {
        let html = r#"
            <div class="rc"><h3 class="rh">Named</h3><p class="rp">text</p></div>
            <div class="rc"><p class="rp">anonymous text</p></div>
        "#;

        let result = record(html);
        assert_eq!(result.sections.len(), 2);
        let (key, section) = result.sections.get_index(1).unwrap();
        assert_eq!(key, "section_1");
        assert_eq!(section.descriptions, vec!["anonymous text"]);
    }

    #[test]
    fn test_empty_section_is_dropped() {
        let html = r#"
            <div class="rc">
                <h3 class="rh">Empty Section</h3>
                <p class="rp">   </p>
                <table><tr><td></td><td></td></tr></table>
            </div>
            <div class="rc"><h3 class="rh">Kept</h3><p class="rp">content</p></div>
        "#;

        let result = record(html);
        assert_eq!(result.sections.len(), 1);
        assert!(result.sections.contains_key("Kept"));
        // The dropped section does not shift positional naming for later
        // anonymous sections: len() counts inserted sections only
        assert!(!result.sections.contains_key("Empty Section"));
    }

    #[test]
    fn test_table_without_caption_gets_positional_name() {
        let html = r#"
            <div class="rc">
                <h3 class="rh">Tables</h3>
                <table><tr><td>Key</td><td>Value</td></tr></table>
                <table><tr><td>Other</td><td>Data</td></tr></table>
            </div>
        "#;

        let result = record(html);
        let tables = &result.sections["Tables"].tables;
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].caption, "table_0");
        assert_eq!(tables[1].caption, "table_1");
    }

    #[test]
    fn test_table_with_no_surviving_rows_is_dropped() {
        let html = r#"
            <div class="rc">
                <h3 class="rh">Sparse</h3>
                <table><tr><td>only one cell</td></tr></table>
                <p class="rp">but a paragraph keeps the section</p>
            </div>
        "#;

        let result = record(html);
        let section = &result.sections["Sparse"];
        assert!(section.tables.is_empty());
        assert_eq!(section.descriptions.len(), 1);
    }

    #[test]
    fn test_two_cell_row_becomes_key_value() {
        let row = extract_row(&["Email".to_string(), "info@acme.in".to_string()]).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("Email").map(String::as_str), Some("info@acme.in"));
    }

    #[test]
    fn test_two_cell_row_with_empty_cell_is_dropped() {
        assert!(extract_row(&["Email".to_string(), String::new()]).is_none());
        assert!(extract_row(&[String::new(), "orphan value".to_string()]).is_none());
        assert!(extract_row(&[String::new(), String::new()]).is_none());
    }

    #[test]
    fn test_wide_row_becomes_column_map() {
        let cells = vec![
            "DIN".to_string(),
            "Name".to_string(),
            String::new(),
            "Designation".to_string(),
        ];
        let row = extract_row(&cells).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("column_0").map(String::as_str), Some("DIN"));
        assert_eq!(row.get("column_1").map(String::as_str), Some("Name"));
        // column index reflects source cell position, not output position
        assert_eq!(row.get("column_3").map(String::as_str), Some("Designation"));
        assert!(!row.contains_key("column_2"));
    }

    #[test]
    fn test_wide_row_with_single_non_empty_cell_is_dropped() {
        let cells = vec![String::new(), "lonely".to_string(), String::new()];
        assert!(extract_row(&cells).is_none());
    }

    #[test]
    fn test_short_rows_are_dropped() {
        assert!(extract_row(&[]).is_none());
        assert!(extract_row(&["single".to_string()]).is_none());
    }

    #[test]
    fn test_header_cells_count_as_cells() {
        let html = r#"
            <div class="rc">
                <h3 class="rh">Directors</h3>
                <table>
                    <tr><th>DIN</th><th>Name</th><th>Appointed</th></tr>
                    <tr><td>00001</td><td>A PERSON</td><td>2001-04-01</td></tr>
                </table>
            </div>
        "#;

        let result = record(html);
        let table = &result.sections["Directors"].tables[0];
        assert_eq!(table.data.len(), 2);
        assert_eq!(table.data[0].get("column_0").map(String::as_str), Some("DIN"));
        assert_eq!(
            table.data[1].get("column_1").map(String::as_str),
            Some("A PERSON")
        );
    }

    #[test]
    fn test_email_placeholder_normalized_in_cells_and_paragraphs() {
        let html = r#"
            <div class="rc">
                <h3 class="rh">Contact Details</h3>
                <p class="rp">Write to [email&#160;protected] anytime.</p>
                <table>
                    <tr><td>Email ID</td><td>[email-4f2a-protected]</td></tr>
                </table>
            </div>
        "#;

        let result = record(html);
        let section = &result.sections["Contact Details"];
        assert_eq!(section.descriptions[0], "Write to [email protected] anytime.");
        assert_eq!(
            section.tables[0].data[0].get("Email ID").map(String::as_str),
            Some("[email protected]")
        );
    }

    #[test]
    fn test_cell_whitespace_is_collapsed() {
        let html = r#"
            <div class="rc">
                <h3 class="rh">Messy</h3>
                <table>
                    <tr><td> Company
                        Status </td><td>
                        Active </td></tr>
                </table>
            </div>
        "#;

        let result = record(html);
        let row = &result.sections["Messy"].tables[0].data[0];
        assert_eq!(row.get("Company Status").map(String::as_str), Some("Active"));
    }

    #[test]
    fn test_sections_keep_document_order() {
        let html = r#"
            <div class="rc"><h3 class="rh">Zeta</h3><p class="rp">z</p></div>
            <div class="rc"><h3 class="rh">Alpha</h3><p class="rp">a</p></div>
            <div class="rc"><h3 class="rh">Mid</h3><p class="rp">m</p></div>
        "#;

        let result = record(html);
        let keys: Vec<&String> = result.sections.keys().collect();
        assert_eq!(keys, ["Zeta", "Alpha", "Mid"]);
    }
}
