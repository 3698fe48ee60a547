//! CSV reader with iterator interface
//!
//! Provides a streaming iterator over the rows of a delimited sales file,
//! turning each row into a [`RawRecord`] keyed by the header row.
//!
//! # Design
//!
//! The reader does no numeric interpretation at all: every cell becomes a
//! [`FieldValue::Text`]. Coercion belongs to the aggregator, which keeps
//! loading and computation separate and lets the aggregator be tested
//! without a filesystem.
//!
//! ```no_run
//! use sales_analyzer::io::csv_reader::SalesReader;
//! use std::path::Path;
//!
//! let reader = SalesReader::new(Path::new("sales_data.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Loaded row: {}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Opening failures are returned from `new()`; a missing file is reported
//!   as `SalesError::MissingSource`
//! - Malformed rows are yielded as `Err` items carrying the line number, and
//!   iteration continues with the next row
//! - [`load_records`] logs both kinds and degrades to whatever rows were
//!   readable, or an empty sequence

use crate::types::{FieldMapping, FieldValue, RawRecord, SalesError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, error, warn};

/// Streaming CSV reader
///
/// Each item is one data row. Cells are trimmed; rows shorter than the header
/// leave the trailing fields absent, and cells beyond the header are ignored.
#[derive(Debug)]
pub struct SalesReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
}

impl SalesReader {
    /// Open a CSV file and read its header row
    ///
    /// # Errors
    ///
    /// - `MissingSource` if the file does not exist
    /// - `IoError` for any other opening failure
    /// - `ParseError` if the header row cannot be read
    pub fn new(path: &Path) -> Result<Self, SalesError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SalesError::missing_source(&path.display().to_string()),
            _ => SalesError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        let headers = reader.headers()?.clone();

        Ok(Self { reader, headers })
    }

    /// Field names declared by the header row
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Whether the header row declares `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.headers.iter().any(|header| header == field)
    }

    fn to_record(&self, row: &StringRecord) -> RawRecord {
        self.headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name, FieldValue::from(cell)))
            .collect()
    }
}

impl Iterator for SalesReader {
    type Item = Result<RawRecord, SalesError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut row = StringRecord::new();

        match self.reader.read_record(&mut row) {
            Ok(true) => Some(Ok(self.to_record(&row))),
            Ok(false) => None,
            Err(e) => Some(Err(SalesError::from(e))),
        }
    }
}

/// Load every readable row of a CSV file into memory
///
/// Never fails: a missing or unreadable file is logged and yields an empty
/// sequence, and malformed rows are logged and skipped. Header columns named
/// by `mapping` but absent from the file are logged as warnings, since every
/// row will then take that field's default.
pub fn load_records(path: &Path, mapping: &FieldMapping) -> Vec<RawRecord> {
    let reader = match SalesReader::new(path) {
        Ok(reader) => reader,
        Err(e) => {
            error!("{}", e);
            return Vec::new();
        }
    };

    for field in [&mapping.product, &mapping.price, &mapping.quantity] {
        if !reader.has_field(field) {
            warn!(
                path = %path.display(),
                field = %field,
                headers = ?reader.headers(),
                "header row does not declare field"
            );
        }
    }

    let mut records = Vec::new();
    for result in reader {
        match result {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping row: {}", e),
        }
    }

    debug!(path = %path.display(), records = records.len(), "sales data loaded");
    records
}
