//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Raw record, field values and field-name mapping
//! - `summary`: Aggregation outputs
//! - `error`: Error types for the sales analyzer

pub mod error;
pub mod record;
pub mod summary;

pub use error::SalesError;
pub use record::{FieldMapping, FieldValue, ProductId, RawRecord};
pub use summary::{ProductSummary, RevenueTally, SalesSummary};
