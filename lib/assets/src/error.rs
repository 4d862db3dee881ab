//! Error types for the assets crate.

use std::fmt;
use std::path::PathBuf;

/// File I/O errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoError {
    /// The file to read does not exist.
    NotFound { path: PathBuf },
    /// Reading an existing file failed.
    ReadFailed { path: PathBuf, reason: String },
    /// Writing a file or creating its directories failed.
    WriteFailed { path: PathBuf, reason: String },
    /// The file is not valid CSV.
    InvalidCsv { path: PathBuf, reason: String },
    /// The file is not valid JSON, or a value could not be encoded.
    InvalidJson { path: PathBuf, reason: String },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::ReadFailed { path, reason } => {
                write!(f, "failed to read {}: {reason}", path.display())
            }
            Self::WriteFailed { path, reason } => {
                write!(f, "failed to write {}: {reason}", path.display())
            }
            Self::InvalidCsv { path, reason } => {
                write!(f, "invalid CSV in {}: {reason}", path.display())
            }
            Self::InvalidJson { path, reason } => {
                write!(f, "invalid JSON in {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for IoError {}
