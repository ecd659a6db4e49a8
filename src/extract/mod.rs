//! Extraction module: locating and reading daily data tables
//!
//! This module contains the heuristics that pull structured daily records
//! out of pages whose markup the crawler does not control:
//! - field alias matching and header scoring
//! - the table extraction engine (first qualifying table wins)
//! - the date resolver (year/month from page context)

pub mod date;
pub mod fields;
pub mod table;

pub use date::{page_context, resolve, ResolvedDate};
pub use fields::{classify_cell, day_token, score_headers, HeaderScore};
pub use table::{extract_first_table, TableExtraction};
