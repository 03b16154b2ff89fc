//! Error types shared between the library and the scanner binary.
//!
//! `VolatilityError` covers a missing root directory, I/O failures while walking or
//! reading files, malformed rows, undecodable bytes and output encoding problems.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for a volatility scan.
#[derive(Error, Debug)]
pub enum VolatilityError {
    /// The root directory handed to the locator does not exist.
    #[error("Trade directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error while walking directories or reading a trade file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed trade file: missing field, bad price, no data rows, mixed tickers.
    /// `line` is 1-based; 0 refers to the file as a whole.
    #[error("Parse error in {} at line {line}: {reason}", .path.display())]
    Parse {
        /// File being scanned.
        path: PathBuf,
        /// Offending line number.
        line: usize,
        /// Human-readable description.
        reason: String,
    },

    /// A line could not be decoded with the configured encoding.
    #[error("Cannot decode {} line {line} as {encoding}", .path.display())]
    Encoding {
        /// File being scanned.
        path: PathBuf,
        /// Offending line number (1-based).
        line: usize,
        /// Name of the configured encoding.
        encoding: &'static str,
    },

    /// The encoding label given on the command line is not recognised.
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// Failure while encoding the report as JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VolatilityError {
    /// Returns `true` for errors caused by the content of a single trade file.
    ///
    /// Only these are subject to `ErrorPolicy::Skip`; everything else always aborts.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            VolatilityError::Parse { .. } | VolatilityError::Encoding { .. }
        )
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        VolatilityError::Parse {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_covers_parse_and_encoding_only() {
        assert!(VolatilityError::parse("a.csv", 2, "bad price").is_malformed_input());
        let encoding = VolatilityError::Encoding {
            path: PathBuf::from("a.csv"),
            line: 3,
            encoding: "UTF-8",
        };
        assert!(encoding.is_malformed_input());
        assert!(!VolatilityError::NotFound(PathBuf::from("trades")).is_malformed_input());
        assert!(!VolatilityError::UnknownEncoding("koi9".into()).is_malformed_input());
    }

    #[test]
    fn parse_error_message_names_file_and_line() {
        let err = VolatilityError::parse("trades/TICKER_AFH9.csv", 7, "missing PRICE field");
        assert_eq!(
            err.to_string(),
            "Parse error in trades/TICKER_AFH9.csv at line 7: missing PRICE field"
        );
    }
}
