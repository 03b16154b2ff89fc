//! Scan settings shared by the library and the scanner binary.
//!
//! `ScanConfig::default()` reproduces the classic behaviour: read `trades/`, decode
//! files as Windows-1251 and abort on the first malformed file.
use std::path::PathBuf;

use clap::ValueEnum;
use encoding_rs::{Encoding, WINDOWS_1251};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::VolatilityError;

/// Default root directory, relative to the working directory.
pub const DEFAULT_ROOT: &str = "trades";
/// Default encoding label of the trade logs.
pub const DEFAULT_ENCODING: &str = "windows-1251";

/// What to do when a single trade file is malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the whole run, printing nothing.
    #[default]
    Abort,
    /// Log the file and leave its ticker out of the report.
    Skip,
}

/// Rendering of the final report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display, EnumString,
)]
#[clap(rename_all = "lower")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed human-readable layout.
    #[default]
    Text,
    /// Single JSON document.
    Json,
}

/// Settings for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory walked recursively for trade files.
    pub root: PathBuf,
    /// Text encoding of every trade file.
    pub encoding: &'static Encoding,
    /// Handling of malformed files.
    pub policy: ErrorPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            encoding: WINDOWS_1251,
            policy: ErrorPolicy::default(),
        }
    }
}

impl ScanConfig {
    /// Creates a config for `root` with the default encoding and policy.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Replaces the encoding.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Replaces the error policy.
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Looks up an encoding by its WHATWG label (`cp1251`, `utf-8`, `koi8-r`, ...).
///
/// Trade files are split into lines on `\n` bytes, so only ASCII-compatible
/// encodings are accepted.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, VolatilityError> {
    Encoding::for_label(label.trim().as_bytes())
        .filter(|encoding| encoding.is_ascii_compatible())
        .ok_or_else(|| VolatilityError::UnknownEncoding(label.to_string()))
}
