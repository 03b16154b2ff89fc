//! A single row of a trade log.
//!
//! Rows follow the `SECID,TRADETIME,PRICE,QUANTITY` layout. Fields are separated by
//! plain commas; quoting is not part of the format.
use thiserror::Error;

/// Column names of the header row.
pub const HEADER: [&str; 4] = ["SECID", "TRADETIME", "PRICE", "QUANTITY"];

/// Why a data row could not be turned into a `TradeRecord`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// The row ended before the named column.
    #[error("missing {0} field")]
    MissingField(&'static str),

    /// The price column is not a finite number.
    #[error("invalid PRICE value {0:?}")]
    BadPrice(String),
}

/// One trade, borrowed from the decoded line it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord<'a> {
    /// Security identifier.
    pub ticker: &'a str,
    /// Trade time, kept verbatim.
    pub trade_time: &'a str,
    /// Trade price.
    pub price: f64,
    /// Quantity, kept verbatim.
    pub quantity: &'a str,
}

impl<'a> TradeRecord<'a> {
    /// Parses one data row. Only the ticker and the price are required.
    pub fn parse_line(line: &'a str) -> Result<Self, RowError> {
        let mut fields = line.split(',').map(str::trim);

        let ticker = fields
            .next()
            .filter(|t| !t.is_empty())
            .ok_or(RowError::MissingField(HEADER[0]))?;
        let trade_time = fields.next().ok_or(RowError::MissingField(HEADER[1]))?;
        let raw_price = fields.next().ok_or(RowError::MissingField(HEADER[2]))?;
        let quantity = fields.next().unwrap_or_default();

        let price = raw_price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| RowError::BadPrice(raw_price.to_string()))?;

        Ok(TradeRecord {
            ticker,
            trade_time,
            price,
            quantity,
        })
    }
}
