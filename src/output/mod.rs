//! Output layer: CSV persistence and end-of-run reporting

pub mod csv;
pub mod stats;

pub use csv::{read_dataset, unresolved_path, write_dataset};
pub use stats::{print_report, RunReport};
