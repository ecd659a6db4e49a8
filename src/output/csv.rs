//! CSV persistence for datasets
//!
//! The on-disk shape is deliberately flat: `date,day,<fields...>,source`,
//! one row per calendar day, dates in ISO `YYYY-MM-DD`. Values that were
//! never observed (placeholder or missing column) are written as empty
//! cells; reading them back yields explicit no-result, since the file
//! cannot distinguish the two.
//!
//! Quarantined records land in a sibling `<stem>.unresolved.csv` with the
//! unknown date parts zeroed (e.g. `0000-00-05`), so a run never silently
//! drops data it could not date.

use crate::records::{Dataset, FieldValue, Record};
use crate::{ChartrakeError, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Sibling path for the quarantine file: `out.csv` -> `out.unresolved.csv`
pub fn unresolved_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    path.with_file_name(format!("{}.unresolved.csv", stem))
}

/// Writes the dataset to `path`, and quarantined records to the sibling
/// unresolved file when any exist
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    let fields = dataset.field_names();

    let mut writer = csv::Writer::from_path(path)?;
    write_header(&mut writer, &fields)?;
    for (date, record) in dataset.iter() {
        write_row(&mut writer, &date.format("%Y-%m-%d").to_string(), record, &fields)?;
    }
    writer.flush()?;

    if dataset.quarantine_len() > 0 {
        let sibling = unresolved_path(path);
        tracing::warn!(
            "{} records with unresolved dates, writing {}",
            dataset.quarantine_len(),
            sibling.display()
        );

        let mut writer = csv::Writer::from_path(&sibling)?;
        write_header(&mut writer, &fields)?;
        for record in dataset.quarantined() {
            write_row(&mut writer, &sentinel_date(record), record, &fields)?;
        }
        writer.flush()?;
    }

    Ok(())
}

/// Reads a dataset back from `path`, keyed by `key_column`
///
/// Aborts with [`ChartrakeError::SchemaMismatch`] when the key column is
/// missing from the header. Rows whose key does not parse as a real date
/// (sentinel dates included) are quarantined, not dropped.
pub fn read_dataset(path: &Path, key_column: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let key_idx = headers
        .iter()
        .position(|h| h == key_column)
        .ok_or_else(|| ChartrakeError::SchemaMismatch {
            column: key_column.to_string(),
            path: path.display().to_string(),
        })?;
    let day_idx = headers.iter().position(|h| h == "day");
    let source_idx = headers.iter().position(|h| h == "source");

    let field_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != key_idx && Some(*i) != day_idx && Some(*i) != source_idx)
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut dataset = Dataset::new();
    for row in reader.records() {
        let row = row?;

        let mut values = BTreeMap::new();
        for (idx, name) in &field_columns {
            let cell = row.get(*idx).unwrap_or("").trim();
            let value = if cell.is_empty() {
                FieldValue::NoResult
            } else {
                FieldValue::Observed(cell.to_string())
            };
            values.insert(name.clone(), value);
        }

        let source = source_idx
            .and_then(|i| row.get(i))
            .unwrap_or("")
            .to_string();

        let raw_key = row.get(key_idx).unwrap_or("").trim();
        let record = match NaiveDate::parse_from_str(raw_key, "%Y-%m-%d") {
            Ok(date) => Record {
                day: date.day(),
                year: Some(date.year()),
                month: Some(date.month()),
                values,
                source,
            },
            Err(_) => {
                let (year, month, day) = parse_sentinel(raw_key)
                    .unwrap_or((None, None, 0));
                let day = if day > 0 {
                    Some(day)
                } else {
                    day_idx
                        .and_then(|i| row.get(i))
                        .and_then(|c| c.trim().parse().ok())
                };
                // A record without a day in [1,31] has no identity at all;
                // it is dropped, never stored with a zeroed day
                let day = match day.filter(|d| (1..=31).contains(d)) {
                    Some(d) => d,
                    None => {
                        tracing::warn!(
                            "Skipping row with unusable date key '{}' in {}",
                            raw_key,
                            path.display()
                        );
                        continue;
                    }
                };
                Record {
                    day,
                    year,
                    month,
                    values,
                    source,
                }
            }
        };

        dataset.insert(record);
    }

    Ok(dataset)
}

fn write_header(writer: &mut csv::Writer<std::fs::File>, fields: &[String]) -> Result<()> {
    let mut header = vec!["date".to_string(), "day".to_string()];
    header.extend(fields.iter().cloned());
    header.push("source".to_string());
    writer.write_record(&header)?;
    Ok(())
}

fn write_row(
    writer: &mut csv::Writer<std::fs::File>,
    date: &str,
    record: &Record,
    fields: &[String],
) -> Result<()> {
    let mut row = vec![date.to_string(), record.day.to_string()];
    for field in fields {
        row.push(match record.field(field) {
            FieldValue::Observed(value) => value,
            FieldValue::NoResult | FieldValue::Absent => String::new(),
        });
    }
    row.push(record.source.clone());
    writer.write_record(&row)?;
    Ok(())
}

/// Renders a quarantined record's date with unknown parts zeroed
fn sentinel_date(record: &Record) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        record.year.unwrap_or(0),
        record.month.unwrap_or(0),
        record.day
    )
}

/// Parses a `yyyy-mm-dd` string where zeroed parts mean "unknown"
fn parse_sentinel(raw: &str) -> Option<(Option<i32>, Option<u32>, u32)> {
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;

    Some((
        (year != 0).then_some(year),
        (month != 0).then_some(month),
        day,
    ))
}
