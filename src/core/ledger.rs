//! Product ledger module
//!
//! This module provides the `ProductLedger`, which holds one
//! `ProductAccumulator` per product identifier for the duration of a single
//! aggregation pass.
//!
//! The ledger is responsible for:
//! - Creating an accumulator on the first sighting of a product
//! - Adding each record's revenue and quantity with checked arithmetic
//! - Remembering first-sighting order so tie-breaks are deterministic

use crate::types::{ProductId, ProductSummary};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Running totals for one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAccumulator {
    pub product: ProductId,
    pub total_revenue: Decimal,
    pub total_quantity: i64,
}

impl ProductAccumulator {
    fn new(product: ProductId) -> Self {
        ProductAccumulator {
            product,
            total_revenue: Decimal::ZERO,
            total_quantity: 0,
        }
    }

    /// Snapshot of the accumulator as an output value
    pub fn to_summary(&self) -> ProductSummary {
        ProductSummary {
            product: self.product.clone(),
            revenue: self.total_revenue,
            quantity: self.total_quantity,
        }
    }
}

/// Which running sum could not absorb a contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOverflow {
    Revenue,
    Quantity,
}

/// Per-product accumulators in first-sighting order
///
/// Accumulators live in a `Vec` so iteration order is the order products were
/// first seen; the `HashMap` only maps identifiers to their slot.
#[derive(Debug, Default)]
pub struct ProductLedger {
    index: HashMap<ProductId, usize>,
    entries: Vec<ProductAccumulator>,
}

impl ProductLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the accumulator for a product
    ///
    /// A newly created accumulator starts at zero revenue and zero quantity.
    pub fn get_or_create(&mut self, product: &str) -> &mut ProductAccumulator {
        let slot = match self.index.get(product) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(ProductAccumulator::new(product.to_string()));
                self.index.insert(product.to_string(), slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    /// Add one record's contribution to a product
    ///
    /// Both sums are checked before either is applied, so on overflow the
    /// accumulator is left unchanged (it is still created).
    ///
    /// # Errors
    ///
    /// Returns which sum would overflow.
    pub fn record(
        &mut self,
        product: &str,
        revenue: Decimal,
        quantity: i64,
    ) -> Result<(), LedgerOverflow> {
        let accumulator = self.get_or_create(product);

        let new_revenue = accumulator
            .total_revenue
            .checked_add(revenue)
            .ok_or(LedgerOverflow::Revenue)?;
        let new_quantity = accumulator
            .total_quantity
            .checked_add(quantity)
            .ok_or(LedgerOverflow::Quantity)?;

        accumulator.total_revenue = new_revenue;
        accumulator.total_quantity = new_quantity;
        Ok(())
    }

    pub fn get(&self, product: &str) -> Option<&ProductAccumulator> {
        self.index.get(product).map(|&slot| &self.entries[slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accumulators in first-sighting order
    pub fn iter(&self) -> impl Iterator<Item = &ProductAccumulator> {
        self.entries.iter()
    }

    /// The accumulator with the strictly greatest revenue
    ///
    /// Walks first-sighting order and only replaces the candidate on a
    /// strictly greater revenue, so the earliest product wins a tie.
    pub fn top(&self) -> Option<&ProductAccumulator> {
        self.entries.iter().fold(None, |best, candidate| match best {
            Some(current) if candidate.total_revenue <= current.total_revenue => Some(current),
            _ => Some(candidate),
        })
    }

    /// All products ranked by descending revenue
    ///
    /// The sort is stable, so tied products keep first-sighting order and the
    /// first element always matches [`ProductLedger::top`].
    pub fn ranked(&self) -> Vec<ProductSummary> {
        let mut ranked: Vec<ProductSummary> =
            self.entries.iter().map(ProductAccumulator::to_summary).collect();
        ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        ranked
    }
}
