//! Command-line arguments for the volatility scanner.
//!
//! Every option has a default, so running the binary without arguments scans `trades/`.
use clap::Parser;
use volatility_common::OutputFormat;
use volatility_common::config::{DEFAULT_ENCODING, DEFAULT_ROOT};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory with trade logs, searched recursively.
    #[clap(long, default_value = DEFAULT_ROOT)]
    pub path: String,

    /// Text encoding of the trade logs (WHATWG label, e.g. `cp1251`, `utf-8`).
    #[clap(long, default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    /// Leave malformed files out of the report instead of aborting.
    #[clap(long)]
    pub skip_malformed: bool,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
