//! Revenue aggregation engine
//!
//! This module provides the `RevenueAggregator`, a pure function over an
//! in-memory slice of [`RawRecord`]s. It computes the total revenue of the
//! slice and the product with the highest cumulative revenue.
//!
//! The aggregator enforces these rules:
//! - A missing price or quantity counts as zero
//! - A price or quantity that cannot be coerced skips that record's
//!   contribution, is logged as a warning, and never aborts the pass
//! - The top product is the strict revenue maximum; on an exact tie the
//!   product seen first wins
//! - Empty input yields a zero total and no top product

use crate::core::ledger::{LedgerOverflow, ProductLedger};
use crate::types::{
    FieldMapping, ProductId, ProductSummary, RawRecord, RevenueTally, SalesError, SalesSummary,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Revenue and quantity a single record adds to the aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub revenue: Decimal,
    pub quantity: i64,
}

/// Sales revenue aggregator
///
/// Holds only the field-name mapping; all accumulator state is created per
/// call and dropped when the call returns, so one aggregator can be reused
/// freely.
#[derive(Debug, Clone, Default)]
pub struct RevenueAggregator {
    mapping: FieldMapping,
}

impl RevenueAggregator {
    /// Create an aggregator reading the fields named by `mapping`
    pub fn new(mapping: FieldMapping) -> Self {
        RevenueAggregator { mapping }
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Total revenue across all records
    ///
    /// Malformed records contribute zero and are reported through `tracing`.
    /// The result is not floored, so negative prices or quantities can make
    /// it negative.
    pub fn total_revenue(&self, records: &[RawRecord]) -> Decimal {
        self.total_revenue_report(records).total
    }

    /// Total revenue together with the per-record diagnostics
    pub fn total_revenue_report(&self, records: &[RawRecord]) -> RevenueTally {
        let mut tally = RevenueTally::default();

        for (index, record) in records.iter().enumerate() {
            let outcome = self.contribution(index, record).and_then(|contribution| {
                tally
                    .total
                    .checked_add(contribution.revenue)
                    .ok_or_else(|| SalesError::arithmetic_overflow(index, "total revenue"))
            });

            match outcome {
                Ok(total) => {
                    tally.total = total;
                    tally.accepted += 1;
                }
                Err(error) => {
                    report_skipped(record, &error);
                    tally.diagnostics.push(error);
                }
            }
        }

        debug!(
            records = records.len(),
            rejected = tally.rejected(),
            total = %tally.total,
            "total revenue computed"
        );
        tally
    }

    /// The product with the highest cumulative revenue
    ///
    /// Returns `None` only for empty input. A malformed record still registers
    /// its product with a zero contribution, so any non-empty input has a
    /// winner.
    pub fn top_selling_product(&self, records: &[RawRecord]) -> Option<ProductSummary> {
        let ledger = self.build_ledger(records);
        ledger.top().map(|accumulator| accumulator.to_summary())
    }

    /// Every product ranked by descending revenue
    ///
    /// Tied products keep the order in which they were first seen, so the
    /// first entry is always the result of [`Self::top_selling_product`].
    pub fn product_breakdown(&self, records: &[RawRecord]) -> Vec<ProductSummary> {
        let ledger = self.build_ledger(records);
        ledger.ranked()
    }

    /// Total, top product and breakdown from a single pass
    pub fn summarize(&self, records: &[RawRecord]) -> SalesSummary {
        let mut total = Decimal::ZERO;
        let mut ledger = ProductLedger::new();
        let mut diagnostics = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let product = self.product_of(index, record);

            let outcome = self.contribution(index, record).and_then(|contribution| {
                let new_total = total
                    .checked_add(contribution.revenue)
                    .ok_or_else(|| SalesError::arithmetic_overflow(index, "total revenue"))?;
                ledger
                    .record(&product, contribution.revenue, contribution.quantity)
                    .map_err(|overflow| ledger_overflow(index, overflow))?;
                total = new_total;
                Ok(())
            });

            if let Err(error) = outcome {
                ledger.get_or_create(&product);
                report_skipped(record, &error);
                diagnostics.push(error);
            }
        }

        debug!(
            records = records.len(),
            products = ledger.len(),
            rejected = diagnostics.len(),
            total = %total,
            "sales summarized"
        );

        SalesSummary {
            total_revenue: total,
            top_product: ledger.top().map(|accumulator| accumulator.to_summary()),
            breakdown: ledger.ranked(),
            records: records.len(),
            diagnostics,
        }
    }

    /// Accumulate every record into a fresh ledger
    fn build_ledger(&self, records: &[RawRecord]) -> ProductLedger {
        let mut ledger = ProductLedger::new();

        for (index, record) in records.iter().enumerate() {
            let product = self.product_of(index, record);

            let outcome = self.contribution(index, record).and_then(|contribution| {
                ledger
                    .record(&product, contribution.revenue, contribution.quantity)
                    .map_err(|overflow| ledger_overflow(index, overflow))
            });

            if let Err(error) = outcome {
                // The product still takes part in the ranking, at zero.
                ledger.get_or_create(&product);
                report_skipped(record, &error);
            }
        }

        ledger
    }

    /// Coerce a record's price and quantity and compute its revenue
    ///
    /// # Errors
    ///
    /// Returns `FieldCoercion` if either field is present but not numeric,
    /// or `ArithmeticOverflow` if price × quantity leaves the decimal range.
    pub fn contribution(
        &self,
        index: usize,
        record: &RawRecord,
    ) -> Result<Contribution, SalesError> {
        let price = match record.get(&self.mapping.price) {
            None => Decimal::ZERO,
            Some(value) => value.to_decimal().ok_or_else(|| {
                SalesError::field_coercion(
                    index,
                    &self.mapping.price,
                    &value.to_string(),
                    "a decimal number",
                )
            })?,
        };

        let quantity = match record.get(&self.mapping.quantity) {
            None => 0,
            Some(value) => value.to_integer().ok_or_else(|| {
                SalesError::field_coercion(
                    index,
                    &self.mapping.quantity,
                    &value.to_string(),
                    "an integer",
                )
            })?,
        };

        let revenue = price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| SalesError::arithmetic_overflow(index, "price * quantity"))?;

        Ok(Contribution { revenue, quantity })
    }

    /// The grouping key of a record; a missing product field groups under `""`
    fn product_of(&self, index: usize, record: &RawRecord) -> ProductId {
        match record.get(&self.mapping.product) {
            Some(value) => value.as_identifier(),
            None => {
                warn!(
                    record = index,
                    field = %self.mapping.product,
                    "record has no product field, grouping under an empty identifier"
                );
                ProductId::new()
            }
        }
    }
}

fn ledger_overflow(index: usize, overflow: LedgerOverflow) -> SalesError {
    let operation = match overflow {
        LedgerOverflow::Revenue => "product revenue",
        LedgerOverflow::Quantity => "product quantity",
    };
    SalesError::arithmetic_overflow(index, operation)
}

fn report_skipped(record: &RawRecord, error: &SalesError) {
    warn!(row = %record, "Invalid data in row, skipping: {}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sale(product: &str, price: &str, quantity: &str) -> RawRecord {
        RawRecord::new()
            .with("product", product)
            .with("price", price)
            .with("quantity", quantity)
    }

    fn sample() -> Vec<RawRecord> {
        vec![
            sale("A", "10", "2"),
            sale("B", "5", "1"),
            sale("A", "10", "1"),
        ]
    }

    #[test]
    fn test_scenario_total_and_top() {
        let aggregator = RevenueAggregator::default();
        let records = sample();

        assert_eq!(aggregator.total_revenue(&records), Decimal::new(35, 0));

        let top = aggregator.top_selling_product(&records).unwrap();
        assert_eq!(top.product, "A");
        assert_eq!(top.revenue, Decimal::new(30, 0));
        assert_eq!(top.quantity, 3);
    }

    #[test]
    fn test_scenario_malformed_price_only_record() {
        let aggregator = RevenueAggregator::default();
        let records = vec![sale("X", "bad", "3")];

        let tally = aggregator.total_revenue_report(&records);
        assert_eq!(tally.total, Decimal::ZERO);
        assert_eq!(tally.accepted, 0);
        assert_eq!(
            tally.diagnostics,
            vec![SalesError::field_coercion(0, "price", "bad", "a decimal number")]
        );
    }

    #[test]
    fn test_empty_input() {
        let aggregator = RevenueAggregator::default();

        assert_eq!(aggregator.total_revenue(&[]), Decimal::ZERO);
        assert!(aggregator.top_selling_product(&[]).is_none());
        assert!(aggregator.product_breakdown(&[]).is_empty());

        let summary = aggregator.summarize(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert!(summary.top_product.is_none());
    }

    #[rstest]
    #[case::missing_price(RawRecord::new().with("product", "A").with("quantity", "4"))]
    #[case::missing_quantity(RawRecord::new().with("product", "A").with("price", "9.99"))]
    #[case::missing_both(RawRecord::new().with("product", "A"))]
    fn test_missing_numeric_fields_default_to_zero(#[case] record: RawRecord) {
        let aggregator = RevenueAggregator::default();
        let records = vec![record];

        let tally = aggregator.total_revenue_report(&records);
        assert_eq!(tally.total, Decimal::ZERO);
        assert_eq!(tally.accepted, 1);
        assert!(tally.diagnostics.is_empty());

        let top = aggregator.top_selling_product(&records).unwrap();
        assert_eq!(top.product, "A");
        assert_eq!(top.revenue, Decimal::ZERO);
    }

    #[test]
    fn test_missing_quantity_keeps_quantity_sum() {
        let aggregator = RevenueAggregator::default();
        let records = vec![
            RawRecord::new().with("product", "A").with("quantity", "4"),
            sale("A", "2", "3"),
        ];

        let top = aggregator.top_selling_product(&records).unwrap();
        assert_eq!(top.revenue, Decimal::new(6, 0));
        assert_eq!(top.quantity, 7);
    }

    #[rstest]
    #[case::bad_price(sale("Q", "abc", "1"), "price")]
    #[case::empty_price(sale("Q", "", "1"), "price")]
    #[case::fractional_quantity(sale("Q", "2", "1.5"), "quantity")]
    #[case::bad_quantity(sale("Q", "2", "many"), "quantity")]
    fn test_malformed_record_is_skipped(#[case] bad: RawRecord, #[case] field: &str) {
        let aggregator = RevenueAggregator::default();
        let mut records = sample();
        let baseline = aggregator.total_revenue(&records);
        records.insert(1, bad);

        let tally = aggregator.total_revenue_report(&records);
        assert_eq!(tally.total, baseline);
        assert_eq!(tally.accepted, 3);
        assert_eq!(tally.rejected(), 1);
        assert!(matches!(
            &tally.diagnostics[0],
            SalesError::FieldCoercion { record: 1, field: f, .. } if f == field
        ));

        // Still registered for the ranking, at zero
        let breakdown = aggregator.product_breakdown(&records);
        let q = breakdown.iter().find(|s| s.product == "Q").unwrap();
        assert_eq!(q.revenue, Decimal::ZERO);
        assert_eq!(q.quantity, 0);
    }

    #[test]
    fn test_all_malformed_still_has_top_product() {
        let aggregator = RevenueAggregator::default();
        let records = vec![sale("X", "bad", "3"), sale("Y", "1", "oops")];

        let top = aggregator.top_selling_product(&records).unwrap();
        assert_eq!(top.product, "X");
        assert_eq!(top.revenue, Decimal::ZERO);
        assert_eq!(top.quantity, 0);
    }

    #[test]
    fn test_additivity_over_partitions() {
        let aggregator = RevenueAggregator::default();
        let records = vec![
            sale("A", "1.10", "3"),
            sale("B", "bad", "1"),
            sale("C", "0.05", "7"),
            sale("A", "-2.5", "2"),
            sale("D", "19.99", "1"),
        ];
        let whole = aggregator.total_revenue(&records);

        for split in 0..=records.len() {
            let (left, right) = records.split_at(split);
            assert_eq!(
                aggregator.total_revenue(left) + aggregator.total_revenue(right),
                whole,
                "split at {}",
                split
            );
        }
    }

    #[test]
    fn test_single_product_matches_total() {
        let aggregator = RevenueAggregator::default();
        let records = vec![
            sale("Only", "3.25", "2"),
            sale("Only", "1.75", "4"),
            sale("Only", "10", "1"),
        ];

        let top = aggregator.top_selling_product(&records).unwrap();
        assert_eq!(top.product, "Only");
        assert_eq!(top.revenue, aggregator.total_revenue(&records));
        assert_eq!(top.quantity, 7);
    }

    #[test]
    fn test_permutation_keeps_total_and_untied_winner() {
        let aggregator = RevenueAggregator::default();
        let records = sample();
        let mut reversed = records.clone();
        reversed.reverse();

        assert_eq!(
            aggregator.total_revenue(&records),
            aggregator.total_revenue(&reversed)
        );
        assert_eq!(
            aggregator.top_selling_product(&records).unwrap().product,
            aggregator.top_selling_product(&reversed).unwrap().product
        );
    }

    #[test]
    fn test_tie_goes_to_first_seen_product() {
        let aggregator = RevenueAggregator::default();
        let records = vec![sale("A", "10", "3"), sale("B", "15", "2")];
        let mut reversed = records.clone();
        reversed.reverse();

        assert_eq!(aggregator.top_selling_product(&records).unwrap().product, "A");
        assert_eq!(aggregator.top_selling_product(&reversed).unwrap().product, "B");
    }

    #[test]
    fn test_negative_total_is_not_floored() {
        let aggregator = RevenueAggregator::default();
        let records = vec![sale("Refund", "-20", "1"), sale("A", "5", "1")];

        assert_eq!(aggregator.total_revenue(&records), Decimal::new(-15, 0));
        assert_eq!(aggregator.top_selling_product(&records).unwrap().product, "A");
    }

    #[test]
    fn test_custom_product_field() {
        let aggregator =
            RevenueAggregator::new(FieldMapping::default().with_product_field("product_name"));
        let records = vec![
            RawRecord::new()
                .with("product_name", "Widget")
                .with("price", "2.50")
                .with("quantity", "4"),
            RawRecord::new()
                .with("product_name", "Gadget")
                .with("price", "4")
                .with("quantity", "2"),
        ];

        let top = aggregator.top_selling_product(&records).unwrap();
        assert_eq!(top.product, "Widget");
        assert_eq!(top.revenue, Decimal::new(10, 0));
    }

    #[test]
    fn test_missing_product_field_groups_under_empty_identifier() {
        let aggregator = RevenueAggregator::default();
        let records = vec![
            RawRecord::new().with("price", "3").with("quantity", "3"),
            sale("A", "1", "1"),
        ];

        let top = aggregator.top_selling_product(&records).unwrap();
        assert_eq!(top.product, "");
        assert_eq!(top.revenue, Decimal::new(9, 0));
    }

    #[test]
    fn test_typed_values_are_accepted() {
        let aggregator = RevenueAggregator::default();
        let records = vec![RawRecord::new()
            .with("product", "T")
            .with("price", Decimal::new(125, 2))
            .with("quantity", 4i64)];

        assert_eq!(aggregator.total_revenue(&records), Decimal::new(5, 0));
    }

    #[test]
    fn test_price_times_quantity_overflow_is_skipped() {
        let aggregator = RevenueAggregator::default();
        let records = vec![
            RawRecord::new()
                .with("product", "Huge")
                .with("price", Decimal::MAX)
                .with("quantity", 2i64),
            sale("A", "1", "1"),
        ];

        let tally = aggregator.total_revenue_report(&records);
        assert_eq!(tally.total, Decimal::ONE);
        assert_eq!(
            tally.diagnostics,
            vec![SalesError::arithmetic_overflow(0, "price * quantity")]
        );
    }

    #[test]
    fn test_summarize_matches_individual_operations() {
        let aggregator = RevenueAggregator::default();
        let mut records = sample();
        records.push(sale("C", "bad", "1"));
        records.push(sale("B", "12.5", "2"));

        let summary = aggregator.summarize(&records);
        assert_eq!(summary.total_revenue, aggregator.total_revenue(&records));
        assert_eq!(summary.top_product, aggregator.top_selling_product(&records));
        assert_eq!(summary.breakdown, aggregator.product_breakdown(&records));
        assert_eq!(summary.records, 5);
        assert_eq!(summary.diagnostics.len(), 1);

        // B: 5 + 25 = 30 ties A at 30, A was seen first
        assert_eq!(summary.top_product.unwrap().product, "A");
        let order: Vec<&str> = summary.breakdown.iter().map(|s| s.product.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_records_are_not_mutated() {
        let aggregator = RevenueAggregator::default();
        let records = sample();
        let before = records.clone();

        aggregator.summarize(&records);
        assert_eq!(records, before);
    }
}
