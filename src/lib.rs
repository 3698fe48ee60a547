//! Sales Analyzer Library
//! # Overview
//!
//! This library computes revenue figures from sales transaction records: the
//! total revenue across all records and the product with the highest
//! cumulative revenue.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (RawRecord, FieldMapping, ProductSummary, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::aggregator`] - Total revenue and top-product computation
//!   - [`core::ledger`] - Per-product accumulators for one pass
//! - [`io`] - CSV loading and report output
//! - [`pipeline`] - Load → aggregate → report orchestration
//!
//! # Record Handling
//!
//! - Records are untyped field maps; price and quantity are coerced per record
//! - A missing price or quantity counts as zero
//! - A value that cannot be coerced skips that record's contribution and is
//!   logged through `tracing`; aggregation never aborts
//! - The product column name is configurable (`product`, `product_name`, ...)
//!
//! ```
//! use sales_analyzer::{RawRecord, RevenueAggregator};
//! use rust_decimal::Decimal;
//!
//! let records = vec![
//!     RawRecord::new().with("product", "A").with("price", "10").with("quantity", "2"),
//!     RawRecord::new().with("product", "B").with("price", "5").with("quantity", "1"),
//!     RawRecord::new().with("product", "A").with("price", "10").with("quantity", "1"),
//! ];
//!
//! let aggregator = RevenueAggregator::default();
//! assert_eq!(aggregator.total_revenue(&records), Decimal::new(35, 0));
//!
//! let top = aggregator.top_selling_product(&records).unwrap();
//! assert_eq!(top.product, "A");
//! assert_eq!(top.quantity, 3);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{ProductLedger, RevenueAggregator};
pub use io::{load_records, SalesReader};
pub use pipeline::{run, AnalysisConfig, OutputFormat};
pub use types::{
    FieldMapping, FieldValue, ProductId, ProductSummary, RawRecord, RevenueTally, SalesError,
    SalesSummary,
};
