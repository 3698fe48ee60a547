use crate::pipeline::{AnalysisConfig, OutputFormat};
use crate::types::FieldMapping;
use clap::Parser;
use std::path::PathBuf;

/// Analyze sales data: total revenue and top-selling product
#[derive(Parser, Debug)]
#[command(name = "sales-analyzer")]
#[command(about = "Compute total revenue and the top-selling product from a sales CSV", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing sales records
    #[arg(
        value_name = "INPUT",
        default_value = "sales_data.csv",
        help = "Path to the input CSV file"
    )]
    pub input_file: PathBuf,

    /// Header naming the product column
    #[arg(
        long = "product-field",
        value_name = "NAME",
        default_value = FieldMapping::DEFAULT_PRODUCT,
        help = "Column holding the product identifier (e.g. 'product' or 'product_name')"
    )]
    pub product_field: String,

    /// Header naming the unit price column
    #[arg(
        long = "price-field",
        value_name = "NAME",
        default_value = FieldMapping::DEFAULT_PRICE,
        help = "Column holding the unit price"
    )]
    pub price_field: String,

    /// Header naming the quantity column
    #[arg(
        long = "quantity-field",
        value_name = "NAME",
        default_value = FieldMapping::DEFAULT_QUANTITY,
        help = "Column holding the quantity sold"
    )]
    pub quantity_field: String,

    /// Report format written to stdout
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "text",
        help = "Output format: 'text' for the summary report or 'csv' for the per-product breakdown"
    )]
    pub format: OutputFormat,
}

impl CliArgs {
    /// Field-name mapping built from the column options
    pub fn to_field_mapping(&self) -> FieldMapping {
        FieldMapping::new(
            self.product_field.trim(),
            self.price_field.trim(),
            self.quantity_field.trim(),
        )
    }

    /// Complete analysis configuration for the pipeline
    pub fn to_analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            input: self.input_file.clone(),
            mapping: self.to_field_mapping(),
            format: self.format,
        }
    }
}
