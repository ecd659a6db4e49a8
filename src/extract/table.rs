//! The table extraction engine
//!
//! Given one parsed document, enumerates every candidate `<table>`, scores
//! its header row against the configured field aliases, and extracts daily
//! records from the first table that qualifies. Pages carry at most one
//! relevant data table, so extraction stops there.

use crate::config::{ExtractConfig, FieldSpec};
use crate::extract::fields::{classify_cell, day_token, score_headers, HeaderScore};
use crate::records::{FieldValue, Record};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// A table qualifies only when at least this many target fields match
const MIN_MATCHED_FIELDS: usize = 2;

/// Output of extracting one page's data table
#[derive(Debug, Clone)]
pub struct TableExtraction {
    /// One record per data row with a valid day; year/month still unresolved
    pub records: Vec<Record>,

    /// The header row's text, fed to the Date Resolver alongside the page
    /// title and headings
    pub header_text: String,
}

/// Extracts records from the first qualifying table in the document
///
/// Qualification: at least [`MIN_MATCHED_FIELDS`] target fields match the
/// header row, which is taken from an explicit `<thead>` when present and
/// from the table's first row otherwise. Tables that don't qualify are
/// skipped; this is what lets the engine tolerate markup it has never seen.
///
/// Returns None when no table on the page qualifies — a normal outcome,
/// not an error.
pub fn extract_first_table(
    document: &Html,
    fields: &[FieldSpec],
    policy: &ExtractConfig,
    source: &str,
) -> Option<TableExtraction> {
    let table_selector = Selector::parse("table").ok()?;
    let thead_cell_selector = Selector::parse("thead th, thead td").ok()?;
    let row_selector = Selector::parse("tr").ok()?;
    let cell_selector = Selector::parse("th, td").ok()?;

    for table in document.select(&table_selector) {
        // Explicit header section wins; first row is the fallback
        let thead_headers: Vec<String> = table
            .select(&thead_cell_selector)
            .map(cell_text)
            .collect();
        let has_thead = !thead_headers.is_empty();

        let headers = if has_thead {
            thead_headers
        } else {
            match table.select(&row_selector).next() {
                Some(first_row) => first_row.select(&cell_selector).map(cell_text).collect(),
                None => continue,
            }
        };

        if headers.is_empty() {
            continue;
        }

        let score = score_headers(&headers, fields);
        if score.matched_count() < MIN_MATCHED_FIELDS {
            continue;
        }

        let records = extract_rows(&table, &score, fields, policy, source, has_thead);

        return Some(TableExtraction {
            records,
            header_text: headers.join(" "),
        });
    }

    None
}

/// Extracts records from the data rows of a qualified table
fn extract_rows(
    table: &ElementRef,
    score: &HeaderScore,
    fields: &[FieldSpec],
    policy: &ExtractConfig,
    source: &str,
    has_thead: bool,
) -> Vec<Record> {
    let row_selector = match Selector::parse("tr") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let cell_selector = match Selector::parse("th, td") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut records = Vec::new();
    let mut skipped_header = false;

    for row in table.select(&row_selector) {
        if has_thead {
            if in_thead(&row) {
                continue;
            }
        } else if !skipped_header {
            // First row was consumed as the header
            skipped_header = true;
            continue;
        }

        let cells: Vec<String> = row.select(&cell_selector).map(|c| cell_text(c)).collect();

        // Malformed/short rows cannot carry all mapped columns
        if cells.len() < score.max_column() + 1 {
            continue;
        }

        // Sites repeat the header row mid-table; skip those too
        if cells.iter().any(|c| c.trim().eq_ignore_ascii_case("date")) {
            continue;
        }

        // Day: the designated cell first, then any cell in the row
        let day = match day_token(&cells[score.day_column()])
            .or_else(|| cells.iter().find_map(|c| day_token(c)))
        {
            Some(d) => d,
            None => continue,
        };

        let mut values = BTreeMap::new();
        for field in fields {
            let value = match score.columns.get(&field.name) {
                Some(&col) => classify_cell(&cells[col], policy),
                None => FieldValue::Absent,
            };
            values.insert(field.name.clone(), value);
        }

        records.push(Record {
            day,
            year: None,
            month: None,
            values,
            source: source.to_string(),
        });
    }

    records
}

/// Collects and trims the text content of one cell
fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Tests whether a row sits inside a `<thead>` section
fn in_thead(row: &ElementRef) -> bool {
    row.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|el| el.name() == "thead")
            .unwrap_or(false)
    })
}
