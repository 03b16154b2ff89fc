//! Volatility Scanner — reads per-ticker trade logs from a directory and prints the three
//! most volatile, the three least volatile (non-zero) and all zero-volatility tickers.
//!
//! Usage example (CLI):
//! ```bash
//! volatility_scanner --path ./trades --encoding cp1251
//! ```
//!
//! Logs go to stderr (`RUST_LOG=debug` for per-file results); stdout carries only the
//! report, which is printed after every file has been processed.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use volatility_common::config::resolve_encoding;
use volatility_common::{ErrorPolicy, Report, Result, ScanConfig, VolatilityError, scan_directory};

fn main() -> Result<(), VolatilityError> {
    init_logger();
    let args = Args::parse();

    let policy = if args.skip_malformed {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };
    let config = ScanConfig::new(normalize_path(&args.path))
        .with_encoding(resolve_encoding(&args.encoding)?)
        .with_policy(policy);

    let results = scan_directory(&config)?;
    let report = Report::from_result_set(&results);
    info!("Rendering report as {}", args.format);
    print!("{}", report.render(args.format)?);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
