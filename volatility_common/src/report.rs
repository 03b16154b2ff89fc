//! Ranked views over a `ResultSet` and their rendering.
//!
//! The text layout is fixed:
//!
//! ```text
//! Максимальная волатильность:
//! TICKER1  -  188.35 %
//! Минимальная волатильность:
//! TICKER4  -  8.70 %
//! Нулевая волатильность:
//! TICKER7 TICKER8
//! ```
//!
//! Ties in volatility keep the order in which the tickers were inserted.
use std::fmt;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::VolatilityError;
use crate::result_set::ResultSet;

/// Number of tickers in each ranked view.
pub const RANK_SIZE: usize = 3;

const MAX_TITLE: &str = "Максимальная волатильность:";
const MIN_TITLE: &str = "Минимальная волатильность:";
const ZERO_TITLE: &str = "Нулевая волатильность:";

/// A ticker with its non-zero volatility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    /// Ticker identifier.
    pub ticker: String,
    /// Volatility in percent.
    pub volatility: f64,
}

/// The three views printed at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Up to three most volatile tickers, descending.
    #[serde(rename = "max_volatility")]
    pub most_volatile: Vec<Ranked>,
    /// Up to three least volatile non-zero tickers, ascending.
    #[serde(rename = "min_volatility")]
    pub least_volatile: Vec<Ranked>,
    /// Every zero-volatility ticker, sorted by name.
    #[serde(rename = "zero_volatility")]
    pub zero: Vec<String>,
}

impl Report {
    /// Builds the views from the aggregated results.
    pub fn from_result_set(results: &ResultSet) -> Self {
        let mut ranked: Vec<Ranked> = results
            .non_zero()
            .iter()
            .map(|(ticker, volatility)| Ranked {
                ticker: ticker.clone(),
                volatility: *volatility,
            })
            .collect();

        ranked.sort_by(|a, b| b.volatility.total_cmp(&a.volatility));
        let most_volatile = ranked.iter().take(RANK_SIZE).cloned().collect();

        ranked.sort_by(|a, b| a.volatility.total_cmp(&b.volatility));
        ranked.truncate(RANK_SIZE);

        Report {
            most_volatile,
            least_volatile: ranked,
            zero: results.zero().map(str::to_string).collect(),
        }
    }

    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String, VolatilityError> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{MAX_TITLE}")?;
        for entry in &self.most_volatile {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "{MIN_TITLE}")?;
        for entry in &self.least_volatile {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "{ZERO_TITLE}")?;
        if !self.zero.is_empty() {
            writeln!(f, "{}", self.zero.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Ranked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  -  {:.2} %", self.ticker, self.volatility)
    }
}
