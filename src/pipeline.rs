//! Analysis pipeline
//!
//! Orchestrates one analysis run, delegating:
//! - CSV loading to [`load_records`] (missing file → empty sequence)
//! - Aggregation to [`RevenueAggregator`] (pure, in-memory)
//! - Output to the report writers in [`crate::io::report`]
//!
//! Records are loaded once into memory and both the total and the top
//! product are computed over that same slice, so the two results always
//! describe the same dataset.

use crate::core::RevenueAggregator;
use crate::io::{load_records, write_breakdown_csv, write_text_report};
use crate::types::{FieldMapping, SalesError, SalesSummary};
use clap::ValueEnum;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Report formats available on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Total revenue and top seller, human-readable
    Text,
    /// Per-product breakdown as CSV
    Csv,
}

/// Settings for one analysis run
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub mapping: FieldMapping,
    pub format: OutputFormat,
}

impl AnalysisConfig {
    /// Text report over `input` with the default field mapping
    pub fn new(input: impl Into<PathBuf>) -> Self {
        AnalysisConfig {
            input: input.into(),
            mapping: FieldMapping::default(),
            format: OutputFormat::Text,
        }
    }
}

/// Load, aggregate and report
///
/// # Returns
///
/// The computed summary, after it has been written to `output`.
///
/// # Errors
///
/// Only output failures are returned. A missing input file or malformed rows
/// are logged and the run degrades to whatever data was usable.
pub fn run(config: &AnalysisConfig, output: &mut dyn Write) -> Result<SalesSummary, SalesError> {
    let records = load_records(&config.input, &config.mapping);

    let aggregator = RevenueAggregator::new(config.mapping.clone());
    let summary = aggregator.summarize(&records);

    if !summary.diagnostics.is_empty() {
        info!(
            skipped = summary.diagnostics.len(),
            records = summary.records,
            "some records contributed nothing to the totals"
        );
    }

    let source = config.input.display().to_string();
    match config.format {
        OutputFormat::Text => write_text_report(&summary, &source, output)?,
        OutputFormat::Csv => write_breakdown_csv(&summary, output)?,
    }

    Ok(summary)
}
