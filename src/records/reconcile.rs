//! Reconciliation of datasets from independent runs or sources
//!
//! Merging is keyed by the fully resolved date and applies a field-level
//! fill policy: primary's observed value always wins, secondary only fills
//! gaps. The policy is intentionally asymmetric — when the two sides
//! disagree on an observed value, primary is trusted.

use crate::records::dataset::Dataset;
use crate::records::record::{FieldValue, Record};

/// Merges two datasets into one, primary taking priority
///
/// - Dates present on both sides get a field-by-field merge via
///   [`merge_field`].
/// - Dates present on only one side pass through, with the other side's
///   exclusive fields left absent.
/// - Quarantined (unresolved-date) records from both sides are carried
///   through unmerged; they have no usable key.
///
/// Merging never mutates its inputs.
pub fn merge(primary: &Dataset, secondary: &Dataset) -> Dataset {
    let mut out = Dataset::new();

    // Union of field names keeps pass-through records schema-complete
    let mut field_names = primary.field_names();
    field_names.extend(secondary.field_names());
    field_names.sort();
    field_names.dedup();

    for (date, p_record) in primary.iter() {
        let merged = match secondary.get(date) {
            Some(s_record) => merge_records(p_record, s_record, &field_names),
            None => widen_record(p_record, &field_names),
        };
        out.insert_keyed(*date, merged);
    }

    for (date, s_record) in secondary.iter() {
        if primary.get(date).is_none() {
            out.insert_keyed(*date, widen_record(s_record, &field_names));
        }
    }

    for record in primary.quarantined().chain(secondary.quarantined()) {
        out.push_quarantine(record.clone());
    }

    out
}

/// Merges one field value pair under the fill-gaps policy
///
/// Primary's observed value wins outright; otherwise secondary's observed
/// value is used; otherwise an explicit no-result from either side is kept.
/// Only when neither side ever had the column does the result stay absent —
/// anything else would break the self-merge law `merge(d, d) == d`.
pub fn merge_field(primary: &FieldValue, secondary: &FieldValue) -> FieldValue {
    if primary.is_observed() {
        return primary.clone();
    }
    if secondary.is_observed() {
        return secondary.clone();
    }
    if *primary == FieldValue::NoResult || *secondary == FieldValue::NoResult {
        return FieldValue::NoResult;
    }
    FieldValue::Absent
}

/// Merges two records that share a resolved date
fn merge_records(primary: &Record, secondary: &Record, field_names: &[String]) -> Record {
    let mut merged = Record {
        day: primary.day,
        year: primary.year,
        month: primary.month,
        values: Default::default(),
        source: primary.source.clone(),
    };

    for name in field_names {
        merged
            .values
            .insert(name.clone(), merge_field(&primary.field(name), &secondary.field(name)));
    }

    merged
}

/// Pads a pass-through record with Absent entries for the union schema
fn widen_record(record: &Record, field_names: &[String]) -> Record {
    let mut out = record.clone();
    for name in field_names {
        out.values
            .entry(name.clone())
            .or_insert(FieldValue::Absent);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn record_with(day: u32, fields: &[(&str, FieldValue)]) -> Record {
        let mut values = BTreeMap::new();
        for (name, value) in fields {
            values.insert(name.to_string(), value.clone());
        }
        Record {
            day,
            year: Some(2024),
            month: Some(1),
            values,
            source: "https://example.com/a".to_string(),
        }
    }

    fn dataset_with(records: Vec<Record>) -> Dataset {
        let mut ds = Dataset::new();
        for r in records {
            ds.insert(r);
        }
        ds
    }

    fn observed(s: &str) -> FieldValue {
        FieldValue::Observed(s.to_string())
    }

    #[test]
    fn test_merge_field_primary_observed_wins() {
        assert_eq!(
            merge_field(&observed("10"), &observed("99")),
            observed("10")
        );
        assert_eq!(merge_field(&observed("10"), &FieldValue::NoResult), observed("10"));
        assert_eq!(merge_field(&observed("10"), &FieldValue::Absent), observed("10"));
    }

    #[test]
    fn test_merge_field_secondary_fills_gap() {
        assert_eq!(merge_field(&FieldValue::NoResult, &observed("20")), observed("20"));
        assert_eq!(merge_field(&FieldValue::Absent, &observed("20")), observed("20"));
    }

    #[test]
    fn test_merge_field_no_result_propagates() {
        assert_eq!(
            merge_field(&FieldValue::NoResult, &FieldValue::NoResult),
            FieldValue::NoResult
        );
        assert_eq!(
            merge_field(&FieldValue::NoResult, &FieldValue::Absent),
            FieldValue::NoResult
        );
        assert_eq!(
            merge_field(&FieldValue::Absent, &FieldValue::NoResult),
            FieldValue::NoResult
        );
    }

    #[test]
    fn test_merge_field_both_absent_stays_absent() {
        assert_eq!(
            merge_field(&FieldValue::Absent, &FieldValue::Absent),
            FieldValue::Absent
        );
    }

    #[test]
    fn test_merge_fills_from_secondary() {
        // Scenario: primary {A="10"}, secondary {A=no-result, B="20"}
        // yields {A="10", B="20"}
        let primary = dataset_with(vec![record_with(1, &[("a", observed("10"))])]);
        let secondary = dataset_with(vec![record_with(
            1,
            &[("a", FieldValue::NoResult), ("b", observed("20"))],
        )]);

        let merged = merge(&primary, &secondary);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let r = merged.get(&date).unwrap();
        assert_eq!(r.field("a"), observed("10"));
        assert_eq!(r.field("b"), observed("20"));
    }

    #[test]
    fn test_merge_is_primary_priority_on_disagreement() {
        let primary = dataset_with(vec![record_with(1, &[("a", observed("10"))])]);
        let secondary = dataset_with(vec![record_with(1, &[("a", observed("99"))])]);

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ab = merge(&primary, &secondary);
        let ba = merge(&secondary, &primary);
        assert_eq!(ab.get(&date).unwrap().field("a"), observed("10"));
        assert_eq!(ba.get(&date).unwrap().field("a"), observed("99"));
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let d = dataset_with(vec![
            record_with(1, &[("a", observed("10")), ("b", FieldValue::NoResult)]),
            record_with(2, &[("a", FieldValue::Absent)]),
        ]);
        let empty = Dataset::new();

        let merged = merge(&d, &empty);
        assert_eq!(merged.len(), d.len());
        for (date, record) in d.iter() {
            let m = merged.get(date).unwrap();
            for (name, value) in &record.values {
                assert_eq!(m.field(name), value.clone());
            }
        }
    }

    #[test]
    fn test_self_merge_is_noop() {
        let d = dataset_with(vec![record_with(
            1,
            &[
                ("a", observed("10")),
                ("b", FieldValue::NoResult),
                ("c", FieldValue::Absent),
            ],
        )]);

        let merged = merge(&d, &d);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let r = merged.get(&date).unwrap();
        assert_eq!(r.field("a"), observed("10"));
        assert_eq!(r.field("b"), FieldValue::NoResult);
        assert_eq!(r.field("c"), FieldValue::Absent);
    }

    #[test]
    fn test_one_sided_dates_pass_through() {
        let primary = dataset_with(vec![record_with(1, &[("a", observed("10"))])]);
        let mut late = record_with(15, &[("b", observed("77"))]);
        late.month = Some(2);
        let secondary = dataset_with(vec![late]);

        let merged = merge(&primary, &secondary);
        assert_eq!(merged.len(), 2);

        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        // Each side's exclusive field is absent on the other side's record
        assert_eq!(merged.get(&jan).unwrap().field("b"), FieldValue::Absent);
        assert_eq!(merged.get(&feb).unwrap().field("a"), FieldValue::Absent);
        assert_eq!(merged.get(&feb).unwrap().field("b"), observed("77"));
    }

    #[test]
    fn test_quarantine_carried_through() {
        let mut unresolved = record_with(3, &[("a", observed("1"))]);
        unresolved.year = None;
        let primary = dataset_with(vec![unresolved]);
        let secondary = dataset_with(vec![record_with(1, &[("a", observed("10"))])]);

        let merged = merge(&primary, &secondary);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.quarantine_len(), 1);
    }
}
