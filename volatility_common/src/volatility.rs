//! Streaming volatility of a single trade file.
//!
//! A file is read line by line; each line is decoded on its own and folded into a running
//! `PriceRange`, so memory use does not depend on file size. The result is
//!
//! ```text
//! half_sum   = (max + min) / 2
//! volatility = (max - min) / half_sum * 100
//! ```
//!
//! rounded half away from zero to two fractional digits.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use encoding_rs::Encoding;
use log::debug;

use crate::error::VolatilityError;
use crate::trade::TradeRecord;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Volatility of one ticker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Volatility {
    /// Every trade had the same price.
    Zero,
    /// Spread in percent of the half-sum, rounded to two digits.
    Percent(f64),
}

/// Outcome of scanning one trade file.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerResult {
    /// Ticker taken from the first data row.
    pub ticker: String,
    /// Volatility over all rows of the file.
    pub volatility: Volatility,
}

/// Running min/max of trade prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    /// Lowest price seen.
    pub min: f64,
    /// Highest price seen.
    pub max: f64,
}

impl PriceRange {
    /// Starts a range at a single price.
    pub fn new(price: f64) -> Self {
        Self {
            min: price,
            max: price,
        }
    }

    /// Widens the range to include `price`.
    pub fn observe(&mut self, price: f64) {
        self.min = self.min.min(price);
        self.max = self.max.max(price);
    }

    /// Midpoint of the range.
    pub fn half_sum(&self) -> f64 {
        (self.max + self.min) / 2.0
    }

    /// Applies the volatility formula. `None` if the half-sum is not positive.
    ///
    /// A spread that rounds to `0.00` is `Volatility::Zero`.
    pub fn volatility(&self) -> Option<Volatility> {
        if self.max == self.min {
            return Some(Volatility::Zero);
        }
        let half_sum = self.half_sum();
        if half_sum <= 0.0 {
            return None;
        }
        let percent = round2((self.max - self.min) / half_sum * 100.0);
        if percent == 0.0 {
            Some(Volatility::Zero)
        } else {
            Some(Volatility::Percent(percent))
        }
    }
}

/// Rounds half away from zero to two fractional digits.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scans the file at `path`, decoding it with `encoding`.
///
/// The file is closed before returning, whether the scan succeeded or not.
pub fn compute_volatility(
    path: &Path,
    encoding: &'static Encoding,
) -> Result<TickerResult, VolatilityError> {
    let file = File::open(path)?;
    let result = volatility_from_reader(BufReader::new(file), path, encoding)?;
    debug!("{}: {} {:?}", path.display(), result.ticker, result.volatility);
    Ok(result)
}

/// Scans an already opened trade log. `path` is used for error reporting only.
///
/// The first line is a header and is skipped without validation. Blank lines are
/// ignored. Every data row must carry the ticker of the first data row.
pub fn volatility_from_reader<R: BufRead>(
    mut reader: R,
    path: &Path,
    encoding: &'static Encoding,
) -> Result<TickerResult, VolatilityError> {
    let mut buf = Vec::new();
    let mut line_no = 0;
    let mut ticker: Option<String> = None;
    let mut range: Option<PriceRange> = None;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let mut bytes = trim_line_ending(&buf);
        if line_no == 1 {
            bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        }
        let line = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| VolatilityError::Encoding {
                path: path.to_path_buf(),
                line: line_no,
                encoding: encoding.name(),
            })?;

        if line_no == 1 || line.trim().is_empty() {
            continue;
        }

        let record = TradeRecord::parse_line(&line)
            .map_err(|e| VolatilityError::parse(path, line_no, e.to_string()))?;

        let expected = ticker.get_or_insert_with(|| record.ticker.to_string());
        if expected.as_str() != record.ticker {
            return Err(VolatilityError::parse(
                path,
                line_no,
                format!("ticker {} differs from {}", record.ticker, expected),
            ));
        }

        range = Some(match range {
            Some(mut range) => {
                range.observe(record.price);
                range
            }
            None => PriceRange::new(record.price),
        });
    }

    let (Some(ticker), Some(range)) = (ticker, range) else {
        return Err(VolatilityError::parse(path, 0, "no data rows"));
    };
    let volatility = range.volatility().ok_or_else(|| {
        VolatilityError::parse(
            path,
            0,
            format!("non-positive half-sum of prices {} and {}", range.min, range.max),
        )
    })?;

    Ok(TickerResult { ticker, volatility })
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1251};
    use rand::Rng;
    use std::io::Cursor;

    fn trade_log(ticker: &str, prices: &[&str]) -> String {
        let mut log = String::from("SECID,TRADETIME,PRICE,QUANTITY\n");
        for (i, price) in prices.iter().enumerate() {
            log.push_str(&format!("{ticker},10:00:{i:02},{price},1\n"));
        }
        log
    }

    fn scan(content: &str) -> Result<TickerResult, VolatilityError> {
        volatility_from_reader(Cursor::new(content.as_bytes()), Path::new("test.csv"), UTF_8)
    }

    #[test]
    fn low_spread_ticker() {
        let result = scan(&trade_log("T1", &["11", "11", "12", "11", "12", "11", "11", "11"])).unwrap();
        assert_eq!(result.ticker, "T1");
        assert_eq!(result.volatility, Volatility::Percent(8.7));
    }

    #[test]
    fn high_spread_ticker() {
        let result = scan(&trade_log("T2", &["20", "15", "23", "56", "100", "50", "3", "10"])).unwrap();
        assert_eq!(result.volatility, Volatility::Percent(188.35));
    }

    #[test]
    fn first_row_price_takes_part_in_the_range() {
        let result = scan(&trade_log("T2", &["3", "20", "100"])).unwrap();
        assert_eq!(result.volatility, Volatility::Percent(188.35));
    }

    #[test]
    fn constant_price_is_zero() {
        let result = scan(&trade_log("T3", &["42.5", "42.5", "42.5"])).unwrap();
        assert_eq!(result.volatility, Volatility::Zero);
    }

    #[test]
    fn spread_rounding_to_zero_is_zero() {
        let result = scan(&trade_log("TINY", &["10000", "10000.0001"])).unwrap();
        assert_eq!(result.volatility, Volatility::Zero);
    }

    #[test]
    fn single_row_is_zero() {
        let result = scan(&trade_log("T4", &["7"])).unwrap();
        assert_eq!(result.volatility, Volatility::Zero);
    }

    #[test]
    fn crlf_and_blank_lines_are_tolerated() {
        let content = "SECID,TRADETIME,PRICE,QUANTITY\r\nT5,10:00:00,10,1\r\n\r\nT5,10:00:01,12,1\r\n\n";
        let result = scan(content).unwrap();
        assert_eq!(result.ticker, "T5");
        assert_eq!(result.volatility, Volatility::Percent(18.18));
    }

    #[test]
    fn header_only_file_is_malformed() {
        let err = scan("SECID,TRADETIME,PRICE,QUANTITY\n").unwrap_err();
        assert!(matches!(err, VolatilityError::Parse { line: 0, .. }));
        assert!(matches!(scan("").unwrap_err(), VolatilityError::Parse { line: 0, .. }));
    }

    #[test]
    fn bad_price_reports_line() {
        let err = scan(&trade_log("T6", &["10", "ten", "12"])).unwrap_err();
        match err {
            VolatilityError::Parse { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("ten"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_price_field_is_malformed() {
        let content = "SECID,TRADETIME,PRICE,QUANTITY\nT7,10:00:00\n";
        assert!(matches!(scan(content).unwrap_err(), VolatilityError::Parse { line: 2, .. }));
    }

    #[test]
    fn mixed_tickers_are_rejected() {
        let content = "SECID,TRADETIME,PRICE,QUANTITY\nT8,10:00:00,10,1\nT9,10:00:01,11,1\n";
        let err = scan(content).unwrap_err();
        assert!(matches!(err, VolatilityError::Parse { line: 3, .. }));
    }

    #[test]
    fn zero_centred_prices_are_malformed() {
        let err = scan(&trade_log("T10", &["-5", "5"])).unwrap_err();
        assert!(matches!(err, VolatilityError::Parse { line: 0, .. }));
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let mut bytes = b"SECID,TRADETIME,PRICE,QUANTITY\n".to_vec();
        bytes.extend_from_slice(b"T\xFF,10:00:00,10,1\n");
        let err = volatility_from_reader(Cursor::new(bytes), Path::new("bad.csv"), UTF_8).unwrap_err();
        assert!(matches!(err, VolatilityError::Encoding { line: 2, encoding: "UTF-8", .. }));
    }

    #[test]
    fn cp1251_ticker_is_decoded() {
        let (header, _, _) = WINDOWS_1251.encode("SECID,TRADETIME,PRICE,QUANTITY\n");
        let (row, _, _) = WINDOWS_1251.encode("АКЦИЯ,10:00:00,10,1\nАКЦИЯ,10:00:01,11,1\n");
        let mut bytes = header.into_owned();
        bytes.extend_from_slice(&row);
        let result =
            volatility_from_reader(Cursor::new(bytes), Path::new("ru.csv"), WINDOWS_1251).unwrap();
        assert_eq!(result.ticker, "АКЦИЯ");
        assert_eq!(result.volatility, Volatility::Percent(9.52));
    }

    #[test]
    fn utf8_bom_in_header_is_skipped() {
        let content = "\u{FEFF}SECID,TRADETIME,PRICE,QUANTITY\nT11,10:00:00,10,1\n";
        assert_eq!(scan(content).unwrap().ticker, "T11");
    }

    #[test]
    fn random_prices_are_never_negative() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let prices: Vec<String> = (0..20)
                .map(|_| format!("{:.2}", rng.random_range(0.01..500.0)))
                .collect();
            let refs: Vec<&str> = prices.iter().map(String::as_str).collect();
            let parsed: Vec<f64> = prices.iter().map(|p| p.parse().unwrap()).collect();
            let max = parsed.iter().cloned().fold(f64::MIN, f64::max);
            let min = parsed.iter().cloned().fold(f64::MAX, f64::min);
            let expected = round2((max - min) / ((max + min) / 2.0) * 100.0);

            match scan(&trade_log("RND", &refs)).unwrap().volatility {
                Volatility::Zero => assert_eq!(expected, 0.0),
                Volatility::Percent(v) => {
                    assert_eq!(v, expected);
                    assert!(v > 0.0, "volatility {v} should be positive");
                }
            }
        }
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round2(8.695652), 8.7);
        assert_eq!(round2(188.3495145), 188.35);
        assert_eq!(round2(0.125), 0.13);
    }
}
