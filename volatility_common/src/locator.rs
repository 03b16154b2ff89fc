//! Discovery of trade files under a root directory.
//!
//! Every regular file found at any depth is a candidate; nothing is filtered by name or
//! extension. Symlinks to files are candidates too; symlinked directories are not entered. Entries of each directory are visited in file-name order so two runs over
//! an unchanged tree discover files in the same order.
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::VolatilityError;

/// Collects the paths of all files below `root`, in discovery order.
///
/// A missing `root` is `VolatilityError::NotFound`. A `root` that is itself a file is
/// returned as the only candidate.
pub fn locate_trade_files(root: &Path) -> Result<Vec<PathBuf>, VolatilityError> {
    if !root.exists() {
        return Err(VolatilityError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    walk(root, &mut files)?;
    debug!("Located {} file(s) under {}", files.len(), root.display());
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), VolatilityError> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk(&path, files)?;
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            files.push(path);
        } else if file_type.is_symlink() {
            debug!("Not following symlink {}", path.display());
        }
    }
    Ok(())
}
