//! The date resolver
//!
//! Determines the calendar year and month a page's table refers to, from the
//! page title, headings, and table header text. Month is only ever taken
//! from a month *name* — a bare number is never assumed to be a month, which
//! avoids false positives from the many unrelated digits on these pages.

use scraper::{Html, Selector};
use url::Url;

const FULL_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

// "sept" must precede "sep" so the longer form is attributed correctly
const ABBR_MONTHS: [(&str, u32); 13] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sept", 9),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Resolved page date context
///
/// Components the resolver could not determine stay None; downstream code
/// can tell "January" apart from "not determined".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Resolves year and month from page context text and the page URL
///
/// The year is the first in-range 4-digit token in the text, falling back
/// to a 4-digit token anywhere in the URL — path or query, so monthly chart
/// URLs like `chart.php?ResultFor=March-2024` still resolve. The month is
/// the earliest month name in the text, full names taking precedence over
/// abbreviations.
pub fn resolve(page_text: &str, page_url: &Url, min_year: i32, max_year: i32) -> ResolvedDate {
    let lower = page_text.to_lowercase();

    let year = find_year(&lower, min_year, max_year)
        .or_else(|| find_year(&page_url.as_str().to_lowercase(), min_year, max_year));

    let month = find_month(&lower);

    ResolvedDate { year, month }
}

/// Collects the text the resolver scans: page title, h1-h4 headings
///
/// The caller appends the qualified table's header text before resolving.
pub fn page_context(document: &Html) -> String {
    let mut context = String::new();

    if let Ok(title_selector) = Selector::parse("title") {
        for element in document.select(&title_selector) {
            context.push_str(&element.text().collect::<String>());
            context.push(' ');
        }
    }

    if let Ok(heading_selector) = Selector::parse("h1, h2, h3, h4") {
        for element in document.select(&heading_selector) {
            context.push_str(&element.text().collect::<String>());
            context.push(' ');
        }
    }

    context
}

/// Finds the first 4-digit token within the accepted year range
fn find_year(text: &str, min_year: i32, max_year: i32) -> Option<i32> {
    let mut chars = text.chars().peekable();

    while chars.peek().is_some() {
        let mut run = String::new();
        while let Some(c) = chars.peek() {
            if c.is_ascii_digit() {
                run.push(*c);
                chars.next();
            } else {
                break;
            }
        }

        if run.is_empty() {
            chars.next();
            continue;
        }

        if run.len() == 4 {
            if let Ok(year) = run.parse::<i32>() {
                if year >= min_year && year <= max_year {
                    return Some(year);
                }
            }
        }
    }

    None
}

/// Finds the earliest month name in the text, full names before abbreviations
fn find_month(text: &str) -> Option<u32> {
    let full = FULL_MONTHS
        .iter()
        .enumerate()
        .filter_map(|(i, name)| text.find(name).map(|pos| (pos, i as u32 + 1)))
        .min();

    if let Some((_, month)) = full {
        return Some(month);
    }

    ABBR_MONTHS
        .iter()
        .filter_map(|(name, month)| text.find(name).map(|pos| (pos, *month)))
        .min()
        .map(|(_, month)| month)
}
