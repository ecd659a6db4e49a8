//! The date-keyed record collection accumulated during a run

use crate::records::record::{FieldValue, Record};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// The mutable, run-scoped collection of records
///
/// Records with a fully resolved date are keyed by it; records whose year or
/// month could not be determined are quarantined so they can be reported and
/// fixed up manually rather than silently merged under a bogus key.
///
/// Each crawl or merge owns its own Dataset; nothing is shared across runs.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: BTreeMap<NaiveDate, Record>,
    quarantine: Vec<Record>,
}

impl Dataset {
    /// Creates an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, filling gaps when the date was already present
    ///
    /// Within one run the earlier record acts as primary: an observed value
    /// is never overwritten, but fields the earlier record lacked are filled
    /// from the newcomer. Records without a resolved date go to quarantine.
    pub fn insert(&mut self, record: Record) {
        match record.resolved_date() {
            Some(date) => match self.records.entry(date) {
                std::collections::btree_map::Entry::Vacant(e) => {
                    e.insert(record);
                }
                std::collections::btree_map::Entry::Occupied(mut e) => {
                    fill_gaps(e.get_mut(), &record);
                }
            },
            None => self.quarantine.push(record),
        }
    }

    /// Returns the record for a date, if present
    pub fn get(&self, date: &NaiveDate) -> Option<&Record> {
        self.records.get(date)
    }

    /// Number of date-keyed records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no date-keyed records exist
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of quarantined (unresolved-date) records
    pub fn quarantine_len(&self) -> usize {
        self.quarantine.len()
    }

    /// Iterates records in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Record)> {
        self.records.iter()
    }

    /// Iterates quarantined records in insertion order
    pub fn quarantined(&self) -> impl Iterator<Item = &Record> {
        self.quarantine.iter()
    }

    /// Inserts a record directly under a known date key
    ///
    /// Used by the merge path, which has already resolved the key.
    pub(crate) fn insert_keyed(&mut self, date: NaiveDate, record: Record) {
        self.records.insert(date, record);
    }

    /// Moves a record into quarantine
    pub(crate) fn push_quarantine(&mut self, record: Record) {
        self.quarantine.push(record);
    }

    /// Drops records whose year falls outside the accepted range
    pub fn retain_years(&mut self, min_year: i32, max_year: i32) {
        self.records
            .retain(|date, _| {
                use chrono::Datelike;
                let y = date.year();
                y >= min_year && y <= max_year
            });
    }

    /// Union of field names across all records, in sorted order
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .values()
            .chain(self.quarantine.iter())
            .flat_map(|r| r.values.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Fills absent or placeholder fields of `primary` from `secondary`
///
/// Observed values in `primary` are never downgraded.
fn fill_gaps(primary: &mut Record, secondary: &Record) {
    for (name, value) in &secondary.values {
        if !value.is_observed() {
            // Still record the column's existence: NoResult beats Absent
            if *value == FieldValue::NoResult
                && primary.field(name) == FieldValue::Absent
            {
                primary.values.insert(name.clone(), FieldValue::NoResult);
            }
            continue;
        }
        if !primary.field(name).is_observed() {
            primary.values.insert(name.clone(), value.clone());
        }
    }
}
