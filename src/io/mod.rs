//! I/O module
//!
//! Handles CSV loading and report output.
//!
//! # Components
//!
//! - `csv_reader` - Streaming CSV reader yielding raw records
//! - `report` - Text and CSV rendering of a sales summary

pub mod csv_reader;
pub mod report;

pub use csv_reader::{load_records, SalesReader};
pub use report::{format_amount, write_breakdown_csv, write_text_report};
