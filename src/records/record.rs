//! Daily record types
//!
//! A [`Record`] is one calendar day's observation: a day number, the
//! resolved (or partially unresolved) year and month, and one value per
//! configured target field.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// The value of one target field on one day
///
/// The three variants are deliberately distinct: `Absent` means the column
/// did not exist on the source page at all, while `NoResult` means the
/// column existed but its cell held a known placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// An observed value, kept as the string read from the cell
    Observed(String),

    /// The column existed but the cell read a placeholder ("XX", "--", empty)
    NoResult,

    /// The column did not exist on the source page
    Absent,
}

impl FieldValue {
    /// Returns true for an observed value
    pub fn is_observed(&self) -> bool {
        matches!(self, Self::Observed(_))
    }

    /// Returns the observed string, if any
    pub fn as_observed(&self) -> Option<&str> {
        match self {
            Self::Observed(s) => Some(s),
            _ => None,
        }
    }
}

/// One calendar day's observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Day of month, always in 1..=31
    pub day: u32,

    /// Resolved year, if the Date Resolver found one
    pub year: Option<i32>,

    /// Resolved month (1..=12), if the Date Resolver found one
    pub month: Option<u32>,

    /// One entry per configured field; unmapped fields are stored as Absent
    pub values: BTreeMap<String, FieldValue>,

    /// Origin URL, retained for provenance only — never part of identity
    pub source: String,
}

impl Record {
    /// Returns the fully resolved calendar date, when year and month are known
    ///
    /// Records without a resolvable date cannot be merged by date and are
    /// quarantined by the [`Dataset`](crate::records::Dataset) instead.
    /// Out-of-range combinations (e.g. February 31) also resolve to None.
    pub fn resolved_date(&self) -> Option<NaiveDate> {
        let year = self.year?;
        let month = self.month?;
        NaiveDate::from_ymd_opt(year, month, self.day)
    }

    /// Returns the value of a field by canonical name
    ///
    /// Fields the record has no entry for are Absent.
    pub fn field(&self, name: &str) -> FieldValue {
        self.values.get(name).cloned().unwrap_or(FieldValue::Absent)
    }

    /// Counts the observed (non-placeholder, non-absent) fields
    pub fn observed_count(&self) -> usize {
        self.values.values().filter(|v| v.is_observed()).count()
    }
}
