//! Error types for the sales analyzer
//!
//! This module defines every error that can occur while loading and
//! aggregating sales records. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Source Errors**: File not found, other I/O failures
//! - **CSV Parsing Errors**: Malformed rows
//! - **Field Errors**: Price or quantity not coercible to a number
//! - **Arithmetic Errors**: Revenue outside the decimal range
//!
//! None of these abort an aggregation. Only a failure to write the report
//! is surfaced to the process as an error.

use thiserror::Error;

/// Main error type for the sales analyzer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SalesError {
    /// The data source could not be located
    ///
    /// The loader reports this and supplies an empty record sequence, so the
    /// aggregator falls back to its empty-input results.
    #[error("File not found: {path}")]
    MissingSource {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// The malformed row is skipped and loading continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A price or quantity value could not be coerced to a number
    ///
    /// The record contributes zero and aggregation continues.
    #[error("Invalid {field} '{value}' in record {record}: expected {expected}")]
    FieldCoercion {
        /// Zero-based position of the record in the input sequence
        record: usize,
        /// Name of the offending field
        field: String,
        /// The value as found in the record
        value: String,
        /// The numeric type the field should hold
        expected: &'static str,
    },

    /// A revenue figure fell outside the representable decimal range
    ///
    /// Handled like a coercion failure: the record contributes zero.
    #[error("Arithmetic overflow computing {operation} for record {record}")]
    ArithmeticOverflow {
        /// Zero-based position of the record in the input sequence
        record: usize,
        /// Computation that overflowed
        operation: String,
    },
}

// Conversion from io::Error to SalesError
impl From<std::io::Error> for SalesError {
    fn from(error: std::io::Error) -> Self {
        SalesError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SalesError
impl From<csv::Error> for SalesError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SalesError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SalesError {
    /// Create a MissingSource error
    pub fn missing_source(path: &str) -> Self {
        SalesError::MissingSource {
            path: path.to_string(),
        }
    }

    /// Create a FieldCoercion error
    pub fn field_coercion(record: usize, field: &str, value: &str, expected: &'static str) -> Self {
        SalesError::FieldCoercion {
            record,
            field: field.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(record: usize, operation: &str) -> Self {
        SalesError::ArithmeticOverflow {
            record,
            operation: operation.to_string(),
        }
    }

    /// Whether this error only affects a single record
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SalesError::ParseError { .. }
                | SalesError::FieldCoercion { .. }
                | SalesError::ArithmeticOverflow { .. }
        )
    }
}
