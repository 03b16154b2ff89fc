//! One full pass: locate files, scan each in turn, aggregate.
//!
//! The list of files is collected before the first file is opened. Files are processed
//! sequentially; every file is closed before the next one is opened.
use log::{info, warn};

use crate::config::{ErrorPolicy, ScanConfig};
use crate::error::VolatilityError;
use crate::locator::locate_trade_files;
use crate::result_set::ResultSet;
use crate::volatility::compute_volatility;

/// Scans every trade file under `config.root`.
///
/// With `ErrorPolicy::Abort` the first malformed file ends the run. With
/// `ErrorPolicy::Skip` malformed files are logged and left out. I/O errors always abort.
pub fn scan_directory(config: &ScanConfig) -> Result<ResultSet, VolatilityError> {
    let files = locate_trade_files(&config.root)?;
    info!(
        "Scanning {} file(s) under {} as {} (policy: {})",
        files.len(),
        config.root.display(),
        config.encoding.name(),
        config.policy
    );

    let mut results = ResultSet::new();
    let mut skipped = 0;
    for path in &files {
        match compute_volatility(path, config.encoding) {
            Ok(result) => results.insert(result),
            Err(e) if e.is_malformed_input() && config.policy == ErrorPolicy::Skip => {
                warn!("Skipping {}: {}", path.display(), e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Processed {} ticker(s), {} with zero volatility, {} file(s) skipped",
        results.len(),
        results.zero().count(),
        skipped
    );
    Ok(results)
}
