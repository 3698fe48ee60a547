//! Aggregation output types
//!
//! These are the values handed back to callers for display: the per-product
//! summary, the total-revenue tally, and the combined sales summary.

use super::error::SalesError;
use super::record::ProductId;
use rust_decimal::Decimal;

/// Cumulative figures for one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    /// The product identifier
    pub product: ProductId,

    /// Σ price × quantity over every record of this product
    pub revenue: Decimal,

    /// Σ quantity over every record of this product
    pub quantity: i64,
}

/// Result of a total-revenue pass with its diagnostics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevenueTally {
    /// Sum of every accepted record's contribution
    pub total: Decimal,

    /// Number of records that contributed (malformed ones excluded)
    pub accepted: usize,

    /// Non-fatal per-record failures, in input order
    pub diagnostics: Vec<SalesError>,
}

impl RevenueTally {
    /// Number of records skipped because of a coercion failure
    pub fn rejected(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Everything a report needs from one aggregation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesSummary {
    pub total_revenue: Decimal,

    /// `None` only when there were no records at all
    pub top_product: Option<ProductSummary>,

    /// All products ranked by descending revenue
    pub breakdown: Vec<ProductSummary>,

    /// Number of records seen
    pub records: usize,

    pub diagnostics: Vec<SalesError>,
}

impl SalesSummary {
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}
