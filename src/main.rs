//! Sales Analyzer CLI
//!
//! Command-line interface for computing revenue figures from a sales CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- sales_data.csv
//! cargo run -- --product-field product_name sales_data.csv
//! cargo run -- --format csv sales_data.csv > breakdown.csv
//! RUST_LOG=debug cargo run -- sales_data.csv
//! ```
//!
//! The report goes to stdout; diagnostics (missing file, malformed rows) go
//! to stderr through `tracing`, filtered by `RUST_LOG` (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success (including a missing input file, reported as "no sales data")
//! - 1: The report could not be written

use sales_analyzer::{cli, pipeline};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics on stderr so stdout stays a clean report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = cli::parse_args();
    let config = args.to_analysis_config();

    let mut output = std::io::stdout();
    if let Err(e) = pipeline::run(&config, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
