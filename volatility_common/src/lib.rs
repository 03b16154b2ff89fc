//!
//! Simplified price volatility over per-ticker trade logs.
//!
//! This crate aggregates:
//! - `error` — unified error type `VolatilityError` used across the workspace.
//! - `result` — handy `Result<T, VolatilityError>` alias.
//! - `config` — scan settings: root directory, text encoding, error policy, output format.
//! - `trade` — a single row of a trade log.
//! - `locator` — recursive discovery of trade files under a root directory.
//! - `volatility` — streaming min/max scan of one file and the volatility formula.
//! - `result_set` — per-ticker aggregation into non-zero and zero buckets.
//! - `scan` — a full sequential pass over a trade directory.
//! - `report` — ranked views and their text/JSON rendering.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod locator;
pub mod report;
pub mod result;
pub mod result_set;
pub mod scan;
pub mod trade;
pub mod volatility;

pub use config::{ErrorPolicy, OutputFormat, ScanConfig};
pub use error::VolatilityError;
pub use report::Report;
pub use result::Result;
pub use result_set::ResultSet;
pub use scan::scan_directory;
pub use volatility::{TickerResult, compute_volatility};
