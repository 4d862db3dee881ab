//! Validation outcomes.

use serde::{Deserialize, Serialize};

/// The result of validating a value.
///
/// Built fresh by every validation call. `valid` is true iff `errors` is
/// empty when built through [`ValidationOutcome::from_messages`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the value passed.
    pub valid: bool,
    /// Error messages, in the order they were found.
    pub errors: Vec<String>,
    /// Warning messages, in the order they were found.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    /// A passing outcome with no messages.
    #[must_use]
    pub fn pass() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A failing outcome with a single error.
    #[must_use]
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }

    /// Builds an outcome whose validity follows from the error list.
    #[must_use]
    pub fn from_messages(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Adds a warning.
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}
