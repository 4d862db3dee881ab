//! Error types for the workflow crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `StepError`: what a transform or step function itself reports
//! - `TransformError`: failures applying a named transform
//! - `WorkflowError`: failures executing a named workflow (wraps the failing
//!   step's `StepError` via context)

use crate::payload::PayloadKind;
use std::fmt;

/// Failure reported by a transform function or workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    message: String,
}

impl StepError {
    /// Creates a step error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message passed at construction.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StepError {}

impl From<String> for StepError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for StepError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Errors from applying transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// No transform is registered under this name.
    NotFound { name: String },
    /// The input's kind does not match the transform's declared source.
    InputMismatch {
        name: String,
        expected: PayloadKind,
        actual: PayloadKind,
    },
    /// The transform function failed (use as context wrapper).
    Failed { name: String },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "Transform '{name}' not found"),
            Self::InputMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "transform '{name}' expects {expected} input, got {actual}"
            ),
            Self::Failed { name } => write!(f, "transform '{name}' failed"),
        }
    }
}

impl std::error::Error for TransformError {}

/// Errors from executing workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// No workflow is registered under this name.
    NotFound { name: String },
    /// A step failed and the run was aborted (use as context wrapper).
    StepFailed {
        workflow: String,
        step: String,
        index: usize,
    },
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "Workflow '{name}' not found"),
            Self::StepFailed {
                workflow,
                step,
                index,
            } => write!(f, "workflow '{workflow}' failed at step {index} '{step}'"),
        }
    }
}

impl std::error::Error for WorkflowError {}
