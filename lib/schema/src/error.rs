//! Error types for the schema crate.
//!
//! Template and rule validation never fail outright: every problem becomes a
//! message inside a [`ValidationOutcome`](crate::ValidationOutcome). The
//! variants here give those messages one canonical wording, and
//! `UnknownFieldType` is returned when parsing a field type tag.

use crate::field::FieldType;
use std::fmt;

/// Problems found while validating data or parsing schema declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No template is registered under this name.
    TemplateNotFound { name: String },
    /// No rule is registered under this name.
    RuleNotFound { name: String },
    /// A required field is absent from the data.
    MissingField { field: String },
    /// A field holds a value of the wrong type.
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: &'static str,
    },
    /// A field type tag could not be parsed.
    UnknownFieldType { tag: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateNotFound { name } => write!(f, "Template '{name}' not found"),
            Self::RuleNotFound { name } => write!(f, "Rule '{name}' not found"),
            Self::MissingField { field } => write!(f, "Required field '{field}' missing"),
            Self::TypeMismatch {
                field,
                expected,
                actual,
            } => write!(f, "Field '{field}' expects {expected}, got {actual}"),
            Self::UnknownFieldType { tag } => write!(f, "unknown field type '{tag}'"),
        }
    }
}

impl std::error::Error for SchemaError {}
