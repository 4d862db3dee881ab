//! Content transforms.
//!
//! A transform is a named unary function tagged with the payload kind it
//! accepts and the kind it produces. The applier looks the transform up,
//! checks the input kind against the declared source kind and returns the
//! function's output verbatim. Checking the output's shape is the
//! function's own business.

use crate::error::{StepError, TransformError};
use crate::payload::{Payload, PayloadKind};
use agency_toolkit_core::{Named, NamedRegistry};
use rootcause::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Signature of a transform function.
pub type TransformFn = Arc<dyn Fn(Payload) -> Result<Payload, StepError> + Send + Sync>;

/// A named transform.
#[derive(Clone)]
pub struct Transform {
    /// Unique transform name.
    pub name: String,
    /// Kind of payload the function accepts.
    pub source: PayloadKind,
    /// Kind of payload the function produces.
    pub target: PayloadKind,
    /// Human-readable description.
    pub description: String,
    func: TransformFn,
}

impl Transform {
    /// Creates a transform.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, source: PayloadKind, target: PayloadKind, func: F) -> Self
    where
        F: Fn(Payload) -> Result<Payload, StepError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            source,
            target,
            description: String::new(),
            func: Arc::new(func),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Applies this transform to `input`.
    ///
    /// # Errors
    ///
    /// Returns `InputMismatch` if `input` is not of the declared source
    /// kind, or `Failed` (over the function's `StepError`) if the function
    /// fails.
    pub fn apply(&self, input: Payload) -> Result<Payload, Report<TransformError>> {
        let actual = input.kind();
        if !self.source.accepts(actual) {
            return Err(TransformError::InputMismatch {
                name: self.name.clone(),
                expected: self.source,
                actual,
            }
            .into());
        }

        (self.func)(input).context(TransformError::Failed {
            name: self.name.clone(),
        })
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Named for Transform {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Registry of transforms.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    transforms: NamedRegistry<Transform>,
}

impl TransformRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transform, replacing any transform with the same name.
    pub fn register(&mut self, transform: Transform) {
        self.transforms.register(transform);
    }

    /// Gets a transform by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Transform> {
        self.transforms.get(name)
    }

    /// Names of all registered transforms.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.transforms.list()
    }

    /// Applies the named transform to `input`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no transform has that name, otherwise whatever
    /// [`Transform::apply`] returns.
    pub fn apply(&self, name: &str, input: Payload) -> Result<Payload, Report<TransformError>> {
        let transform = self.transforms.get(name).ok_or_else(|| TransformError::NotFound {
            name: name.to_string(),
        })?;

        debug!(transform = name, input = %input.kind(), "applying transform");
        transform.apply(input)
    }
}
