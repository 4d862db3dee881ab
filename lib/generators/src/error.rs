//! Error types for the generators crate.
//!
//! Generators wrap lower-layer reports (file I/O, transforms, workflows)
//! in a `GenerateError` context naming what the generator was doing.

use std::fmt;
use std::path::PathBuf;

/// Errors from running a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Input data failed template validation.
    InvalidData {
        template: String,
        errors: Vec<String>,
    },
    /// The requested folder structure is not predefined.
    UnknownStructure {
        requested: String,
        available: Vec<String>,
    },
    /// The requested briefing format is not supported.
    UnsupportedFormat { format: String },
    /// The requested error policy is not supported.
    UnsupportedPolicy { policy: String },
    /// A CSV row lacks a required column.
    MissingColumn { row: usize, column: String },
    /// Reading an input file failed (use as context wrapper).
    Input { path: PathBuf },
    /// Writing an output file or directory failed (use as context wrapper).
    Output { path: PathBuf },
    /// Applying a transform failed (use as context wrapper).
    Transform { name: String },
    /// Running a workflow on a CSV row failed (use as context wrapper).
    Row { index: usize },
    /// A batch callback failed on a row (use as context wrapper).
    Callback { index: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidData { template, errors } => {
                write!(f, "Invalid {template} data: {}", errors.join("; "))
            }
            Self::UnknownStructure {
                requested,
                available,
            } => write!(
                f,
                "Unknown structure type: {requested}. Available: {}",
                available.join(", ")
            ),
            Self::UnsupportedFormat { format } => write!(f, "Unsupported format: {format}"),
            Self::UnsupportedPolicy { policy } => {
                write!(f, "Unsupported error policy: {policy}")
            }
            Self::MissingColumn { row, column } => {
                write!(f, "row {row} is missing column '{column}'")
            }
            Self::Input { path } => write!(f, "failed to read {}", path.display()),
            Self::Output { path } => write!(f, "failed to write {}", path.display()),
            Self::Transform { name } => write!(f, "failed to apply transform '{name}'"),
            Self::Row { index } => write!(f, "failed to process row {index}"),
            Self::Callback { index } => write!(f, "Error processing row {index}"),
        }
    }
}

impl std::error::Error for GenerateError {}
