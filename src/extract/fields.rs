//! Field alias matching and cell classification
//!
//! The heart of the table heuristic lives here as small pure functions:
//! scoring a header row against the configured alias table, and classifying
//! a cell's text into observed / no-result.

use crate::config::{ExtractConfig, FieldSpec};
use crate::records::FieldValue;
use std::collections::BTreeMap;

impl FieldSpec {
    /// Tests whether a normalized header cell matches this field
    ///
    /// Matching is substring-based and case-insensitive, so "DSWR",
    /// "Desawer" and "DESAWAR" all hit a field whose aliases include
    /// "dswr" and "desaw".
    pub fn matches(&self, header: &str) -> bool {
        let header = header.to_lowercase();
        self.aliases
            .iter()
            .any(|alias| header.contains(&alias.to_lowercase()))
    }
}

/// Result of scoring one candidate table's header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderScore {
    /// Canonical field name -> column offset (leftmost match wins)
    pub columns: BTreeMap<String, usize>,

    /// Offset of a column whose header literally contains "date", if any
    pub date_column: Option<usize>,
}

impl HeaderScore {
    /// Number of target fields matched
    pub fn matched_count(&self) -> usize {
        self.columns.len()
    }

    /// The column the day number is read from: the date column when one was
    /// identified, otherwise the first column
    pub fn day_column(&self) -> usize {
        self.date_column.unwrap_or(0)
    }

    /// Highest column offset the row must provide
    pub fn max_column(&self) -> usize {
        self.columns
            .values()
            .copied()
            .chain(std::iter::once(self.day_column()))
            .max()
            .unwrap_or(0)
    }
}

/// Scores a header row against the field alias table
///
/// For each configured field the leftmost matching header wins; later
/// matches for the same field are ignored so the mapping stays stable
/// regardless of duplicated columns.
pub fn score_headers(headers: &[String], fields: &[FieldSpec]) -> HeaderScore {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut columns = BTreeMap::new();
    for field in fields {
        for (idx, header) in normalized.iter().enumerate() {
            if field.matches(header) {
                columns.insert(field.name.clone(), idx);
                break;
            }
        }
    }

    let date_column = normalized.iter().position(|h| h.contains("date"));

    HeaderScore {
        columns,
        date_column,
    }
}

/// Classifies one cell's text as observed or explicit-no-result
///
/// The empty cell and any configured placeholder token (compared
/// case-insensitively) mean the column existed but carried no observation.
/// Under the numeric-only policy, non-digit characters are stripped first;
/// a cell that strips to nothing is likewise no-result.
pub fn classify_cell(text: &str, policy: &ExtractConfig) -> FieldValue {
    let trimmed = text.trim();

    if trimmed.is_empty() || is_placeholder(trimmed, policy) {
        return FieldValue::NoResult;
    }

    if policy.numeric_only {
        let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return FieldValue::NoResult;
        }
        return FieldValue::Observed(digits);
    }

    FieldValue::Observed(trimmed.to_string())
}

fn is_placeholder(text: &str, policy: &ExtractConfig) -> bool {
    policy
        .placeholders
        .iter()
        .any(|p| text.eq_ignore_ascii_case(p))
}

/// Extracts a day number from cell text
///
/// Scans maximal digit runs left to right and returns the first run of one
/// or two digits whose value lies in [1, 31]. Longer runs (years and other
/// noise) never produce a day, which is what keeps "2024" from being read
/// as day 20.
pub fn day_token(text: &str) -> Option<u32> {
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

        if run.len() <= 2 {
            if let Ok(day) = run.parse::<u32>() {
                if (1..=31).contains(&day) {
                    return Some(day);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, aliases: &[&str]) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn default_fields() -> Vec<FieldSpec> {
        vec![
            field("dswr", &["dswr", "desaw"]),
            field("frbd", &["frbd", "farid"]),
            field("gzbd", &["gzbd", "gzb", "ghaziabad"]),
            field("gali", &["gali"]),
        ]
    }

    fn headers(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_alias_match_case_insensitive() {
        let f = field("dswr", &["dswr", "desaw"]);
        assert!(f.matches("DSWR"));
        assert!(f.matches("Desawer"));
        assert!(f.matches("DESAWAR result"));
        assert!(!f.matches("GALI"));
    }

    #[test]
    fn test_score_full_header() {
        let score = score_headers(
            &headers(&["DATE", "DSWR", "FRBD", "GZBD", "GALI"]),
            &default_fields(),
        );
        assert_eq!(score.matched_count(), 4);
        assert_eq!(score.date_column, Some(0));
        assert_eq!(score.columns["dswr"], 1);
        assert_eq!(score.columns["gali"], 4);
        assert_eq!(score.max_column(), 4);
    }

    #[test]
    fn test_score_alias_variants_map_to_same_field() {
        let a = score_headers(&headers(&["date", "Desawer"]), &default_fields());
        let b = score_headers(&headers(&["date", "DSWR"]), &default_fields());
        assert_eq!(a.columns.get("dswr"), Some(&1));
        assert_eq!(b.columns.get("dswr"), Some(&1));
    }

    #[test]
    fn test_leftmost_match_wins_on_duplicates() {
        let score = score_headers(&headers(&["date", "GALI", "GALI old"]), &default_fields());
        assert_eq!(score.columns["gali"], 1);
    }

    #[test]
    fn test_no_date_header_falls_back_to_first_column() {
        let score = score_headers(&headers(&["Day", "GALI", "FRBD"]), &default_fields());
        assert_eq!(score.date_column, None);
        assert_eq!(score.day_column(), 0);
    }

    #[test]
    fn test_classify_observed() {
        let policy = ExtractConfig::default();
        assert_eq!(
            classify_cell("45", &policy),
            FieldValue::Observed("45".to_string())
        );
    }

    #[test]
    fn test_classify_placeholders() {
        let policy = ExtractConfig::default();
        assert_eq!(classify_cell("XX", &policy), FieldValue::NoResult);
        assert_eq!(classify_cell("xx", &policy), FieldValue::NoResult);
        assert_eq!(classify_cell("--", &policy), FieldValue::NoResult);
        assert_eq!(classify_cell("null", &policy), FieldValue::NoResult);
        assert_eq!(classify_cell("", &policy), FieldValue::NoResult);
        assert_eq!(classify_cell("  ", &policy), FieldValue::NoResult);
    }

    #[test]
    fn test_classify_numeric_only_strips() {
        let policy = ExtractConfig::default();
        assert_eq!(
            classify_cell(" 45*", &policy),
            FieldValue::Observed("45".to_string())
        );
        // Strips to nothing -> the column existed but carried no observation
        assert_eq!(classify_cell("N/A", &policy), FieldValue::NoResult);
    }

    #[test]
    fn test_classify_without_numeric_only() {
        let policy = ExtractConfig {
            numeric_only: false,
            ..ExtractConfig::default()
        };
        assert_eq!(
            classify_cell("45*", &policy),
            FieldValue::Observed("45*".to_string())
        );
    }

    #[test]
    fn test_day_token_valid_range() {
        for d in 1..=31u32 {
            assert_eq!(day_token(&d.to_string()), Some(d), "day {}", d);
            assert_eq!(day_token(&format!("{:02}", d)), Some(d));
        }
    }

    #[test]
    fn test_day_token_out_of_range() {
        assert_eq!(day_token("0"), None);
        assert_eq!(day_token("32"), None);
        assert_eq!(day_token("99"), None);
    }

    #[test]
    fn test_day_token_embedded() {
        assert_eq!(day_token("05 Mar"), Some(5));
        assert_eq!(day_token("Day 7"), Some(7));
    }

    #[test]
    fn test_day_token_ignores_long_runs() {
        assert_eq!(day_token("2024"), None);
        assert_eq!(day_token("2024-03-05"), Some(3));
    }

    #[test]
    fn test_day_token_empty() {
        assert_eq!(day_token(""), None);
        assert_eq!(day_token("no digits here"), None);
    }
}
