//! Record and dataset types
//!
//! This module holds the data model: one [`Record`] per calendar day, the
//! run-scoped [`Dataset`] keyed by resolved date, and the reconciliation
//! logic that merges datasets from independent runs.

mod dataset;
mod record;
pub mod reconcile;

pub use dataset::Dataset;
pub use record::{FieldValue, Record};
pub use reconcile::{merge, merge_field};
