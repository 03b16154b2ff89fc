//! Aggregation of per-ticker results.
//!
//! A `ResultSet` keeps two buckets: tickers with a non-zero volatility, in the order they
//! were first inserted, and tickers with zero volatility, kept sorted by name. A ticker is
//! in at most one bucket at a time.
use std::collections::BTreeSet;

use log::warn;

use crate::volatility::{TickerResult, Volatility};

/// Results of one scan run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    non_zero: Vec<(String, f64)>,
    zero: BTreeSet<String>,
}

impl ResultSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the result of one file.
    ///
    /// A ticker seen before is replaced by the newer result, in whichever bucket it
    /// now belongs. A replaced non-zero entry keeps its original position.
    pub fn insert(&mut self, result: TickerResult) {
        let TickerResult { ticker, volatility } = result;
        let position = self.non_zero.iter().position(|(t, _)| *t == ticker);
        if position.is_some() || self.zero.contains(&ticker) {
            warn!("Ticker {} seen in more than one file, keeping the latest", ticker);
        }

        match (volatility, position) {
            (Volatility::Percent(value), Some(i)) => self.non_zero[i].1 = value,
            (Volatility::Percent(value), None) => {
                self.zero.remove(&ticker);
                self.non_zero.push((ticker, value));
            }
            (Volatility::Zero, position) => {
                if let Some(i) = position {
                    self.non_zero.remove(i);
                }
                self.zero.insert(ticker);
            }
        }
    }

    /// Non-zero tickers with their volatility, in insertion order.
    pub fn non_zero(&self) -> &[(String, f64)] {
        &self.non_zero
    }

    /// Zero-volatility tickers, sorted by name.
    pub fn zero(&self) -> impl Iterator<Item = &str> {
        self.zero.iter().map(String::as_str)
    }

    /// Total number of tickers in both buckets.
    pub fn len(&self) -> usize {
        self.non_zero.len() + self.zero.len()
    }

    /// Returns `true` if no result has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<TickerResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = TickerResult>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for result in iter {
            set.insert(result);
        }
        set
    }
}
