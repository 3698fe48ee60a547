//! Record-related types for the sales analyzer
//!
//! A [`RawRecord`] is an untyped mapping from field name to [`FieldValue`], as
//! produced by a loader. Values are only given a numeric meaning when the
//! aggregator coerces them, using the field names held by a [`FieldMapping`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Product identifier
///
/// Products are grouped by exact, case-sensitive string equality.
pub type ProductId = String;

/// An untyped field value
///
/// Loaders reading text sources produce `Text` values; in-memory callers may
/// hand over already-typed numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Decimal(Decimal),
    Integer(i64),
}

impl FieldValue {
    /// Coerce the value to a decimal number
    ///
    /// Text is trimmed and accepts plain (`12.50`) and scientific (`1.25e1`)
    /// notation. Returns `None` when the value is not numeric.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Text(text) => {
                let text = text.trim();
                Decimal::from_str(text)
                    .or_else(|_| Decimal::from_scientific(text))
                    .ok()
            }
            FieldValue::Decimal(value) => Some(*value),
            FieldValue::Integer(value) => Some(Decimal::from(*value)),
        }
    }

    /// Coerce the value to an integer
    ///
    /// Text must be an integer literal (`3`, `+3`, `-3`); `2.5` or `2.0` is
    /// rejected. A `Decimal` value is accepted only when it has no fractional
    /// part and fits in an `i64`.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Text(text) => i64::from_str(text.trim()).ok(),
            FieldValue::Decimal(value) if value.fract().is_zero() => value.to_i64(),
            FieldValue::Decimal(_) => None,
            FieldValue::Integer(value) => Some(*value),
        }
    }

    /// Render the value as an identifier
    pub fn as_identifier(&self) -> ProductId {
        match self {
            FieldValue::Text(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Decimal(value) => write!(f, "{}", value),
            FieldValue::Integer(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// Raw transaction record
///
/// A field-name to value mapping. The aggregator reads records once and never
/// mutates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, FieldValue>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, handy for in-memory callers and tests
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Look up a field by name
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl fmt::Display for RawRecord {
    /// Fields are rendered sorted by name so diagnostics are stable
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        f.write_str("{")?;
        for (i, (name, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {:?}", name, value.to_string())?;
        }
        f.write_str("}")
    }
}

/// Names of the fields the aggregator reads from each record
///
/// Sources disagree on the product column (`product` vs `product_name`), so
/// the mapping is injected rather than hardcoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field holding the product identifier (grouping key)
    pub product: String,

    /// Field holding the unit price
    pub price: String,

    /// Field holding the quantity sold
    pub quantity: String,
}

impl FieldMapping {
    pub const DEFAULT_PRODUCT: &'static str = "product";
    pub const DEFAULT_PRICE: &'static str = "price";
    pub const DEFAULT_QUANTITY: &'static str = "quantity";

    /// Create a mapping with explicit field names
    pub fn new(
        product: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        FieldMapping {
            product: product.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Replace only the product field name
    pub fn with_product_field(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        FieldMapping::new(
            Self::DEFAULT_PRODUCT,
            Self::DEFAULT_PRICE,
            Self::DEFAULT_QUANTITY,
        )
    }
}
