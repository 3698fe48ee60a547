//! Core business logic module
//!
//! This module contains the revenue aggregation components:
//! - `aggregator` - Total revenue and top-product computation
//! - `ledger` - Per-product accumulators for a single aggregation pass

pub mod aggregator;
pub mod ledger;

pub use aggregator::{Contribution, RevenueAggregator};
pub use ledger::{LedgerOverflow, ProductAccumulator, ProductLedger};
