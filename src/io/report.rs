//! Report output for sales summaries
//!
//! Two renderings of a [`SalesSummary`]:
//! - a human-readable text report (total revenue plus the top seller)
//! - a CSV product breakdown with columns: product, revenue, quantity
//!
//! Amounts are rounded half away from zero to two decimal places.

use crate::types::{SalesError, SalesSummary};
use csv::WriterBuilder;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

/// One row of the CSV breakdown
#[derive(Debug, Serialize)]
struct BreakdownRow<'a> {
    product: &'a str,
    revenue: String,
    quantity: i64,
}

/// Render a monetary amount with exactly two decimals
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Write the text report
///
/// # Arguments
///
/// * `summary` - The aggregation to report
/// * `source` - Label of the data source, usually the input path
/// * `output` - Destination writer
///
/// # Errors
///
/// Returns `IoError` if the output cannot be written.
pub fn write_text_report(
    summary: &SalesSummary,
    source: &str,
    output: &mut dyn Write,
) -> Result<(), SalesError> {
    writeln!(
        output,
        "Total sales from {}: ${}",
        source,
        format_amount(summary.total_revenue)
    )?;

    match &summary.top_product {
        Some(top) => {
            writeln!(output)?;
            writeln!(output, "Top-Selling Product by Total Revenue:")?;
            writeln!(output, "  Product: {}", top.product)?;
            writeln!(output, "  Total Revenue: ${}", format_amount(top.revenue))?;
            writeln!(output, "  Total Quantity Sold: {}", top.quantity)?;
        }
        None => {
            writeln!(
                output,
                "No sales data available to determine top-selling product."
            )?;
        }
    }

    output.flush()?;
    Ok(())
}

/// Write the per-product breakdown as CSV
///
/// Rows follow the summary's ranking (descending revenue, ties in
/// first-seen order), so the first row is the top seller.
pub fn write_breakdown_csv(
    summary: &SalesSummary,
    output: &mut dyn Write,
) -> Result<(), SalesError> {
    // Header is written by hand so an empty breakdown still gets one
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer
        .write_record(["product", "revenue", "quantity"])
        .map_err(|e| SalesError::IoError {
            message: format!("Failed to write CSV header: {}", e),
        })?;

    for product in &summary.breakdown {
        let row = BreakdownRow {
            product: &product.product,
            revenue: format_amount(product.revenue),
            quantity: product.quantity,
        };
        writer.serialize(row).map_err(|e| SalesError::IoError {
            message: format!("Failed to write product record: {}", e),
        })?;
    }

    writer.flush()?;

    Ok(())
}
