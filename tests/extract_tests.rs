//! Integration tests for table extraction and date resolution
//!
//! These exercise the extraction path on whole documents the way the
//! coordinator runs it: parse, pick the first qualifying table, resolve
//! the page-level date context.

use chartrake::config::{ExtractConfig, FieldSpec};
use chartrake::extract::{extract_first_table, page_context, resolve};
use chartrake::records::FieldValue;
use scraper::Html;
use url::Url;

fn fields() -> Vec<FieldSpec> {
    [
        ("dswr", vec!["dswr", "desaw"]),
        ("frbd", vec!["frbd", "farid"]),
        ("gzbd", vec!["gzbd", "gzb", "ghaziabad"]),
        ("gali", vec!["gali"]),
    ]
    .into_iter()
    .map(|(name, aliases)| FieldSpec {
        name: name.to_string(),
        aliases: aliases.into_iter().map(String::from).collect(),
    })
    .collect()
}

fn extract(html: &str) -> Option<chartrake::extract::TableExtraction> {
    let document = Html::parse_document(html);
    extract_first_table(
        &document,
        &fields(),
        &ExtractConfig::default(),
        "https://example.com/chart",
    )
}

#[test]
fn test_extraction_is_idempotent() {
    let html = r#"<html><body><table>
        <tr><th>Date</th><th>Desawer</th><th>Gali</th></tr>
        <tr><td>05</td><td>23</td><td>45</td></tr>
        <tr><td>06</td><td>XX</td><td>88</td></tr>
    </table></body></html>"#;

    let first = extract(html).unwrap();
    let second = extract(html).unwrap();

    assert_eq!(first.records.len(), second.records.len());
    for (a, b) in first.records.iter().zip(second.records.iter()) {
        assert_eq!(a.day, b.day);
        assert_eq!(a.values, b.values);
    }
}

#[test]
fn test_alias_spellings_unify_to_one_field() {
    // Two sites, two spellings, one canonical field name
    let site_a = r#"<table>
        <tr><th>Date</th><th>DESAWAR</th><th>FARIDABAD</th></tr>
        <tr><td>05</td><td>23</td><td>45</td></tr>
    </table>"#;
    let site_b = r#"<table>
        <tr><th>Day</th><th>Dswr</th><th>Frbd</th></tr>
        <tr><td>05</td><td>23</td><td>45</td></tr>
    </table>"#;

    for html in [site_a, site_b] {
        let extraction = extract(html).unwrap();
        let record = &extraction.records[0];
        assert_eq!(record.field("dswr"), FieldValue::Observed("23".into()));
        assert_eq!(record.field("frbd"), FieldValue::Observed("45".into()));
    }
}

#[test]
fn test_day_values_stay_within_calendar_bounds() {
    // 32 and 00 are not valid days of month; those rows must be dropped
    let html = r#"<table>
        <tr><th>Date</th><th>Gali</th><th>Desawer</th></tr>
        <tr><td>32</td><td>470</td><td>960</td></tr>
        <tr><td>00</td><td>350</td><td>120</td></tr>
        <tr><td>31</td><td>47</td><td>96</td></tr>
    </table>"#;

    let extraction = extract(html).unwrap();
    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.records[0].day, 31);
}

#[test]
fn test_nested_layout_table_is_skipped() {
    // Navigation tables that match fewer than two fields don't qualify;
    // the real chart further down the page does
    let html = r#"<html><body>
        <table><tr><th>Menu</th><th>Gali Chart</th></tr><tr><td>a</td><td>b</td></tr></table>
        <table>
            <tr><th>Date</th><th>Gali</th><th>Ghaziabad</th></tr>
            <tr><td>12</td><td>77</td><td>31</td></tr>
        </table>
    </body></html>"#;

    let extraction = extract(html).unwrap();
    assert_eq!(extraction.records.len(), 1);
    assert_eq!(
        extraction.records[0].field("gzbd"),
        FieldValue::Observed("31".into())
    );
}

#[test]
fn test_page_context_feeds_date_resolution() {
    let html = r#"<html><head><title>Satta Chart</title></head><body>
        <h2>Results for March 2024</h2>
        <table><tr><td>x</td></tr></table>
    </body></html>"#;

    let document = Html::parse_document(html);
    let context = page_context(&document);
    let url = Url::parse("https://example.com/chart").unwrap();
    let resolved = resolve(&context, &url, 2015, 2026);

    assert_eq!(resolved.year, Some(2024));
    assert_eq!(resolved.month, Some(3));
}

#[test]
fn test_year_falls_back_to_url_path() {
    let html = r#"<html><head><title>June Chart</title></head><body></body></html>"#;
    let document = Html::parse_document(html);
    let context = page_context(&document);
    let url = Url::parse("https://example.com/charts/2023/june").unwrap();
    let resolved = resolve(&context, &url, 2015, 2026);

    assert_eq!(resolved.year, Some(2023));
    assert_eq!(resolved.month, Some(6));
}
