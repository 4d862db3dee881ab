//! Sequential workflows.
//!
//! A workflow is a named list of steps run strictly left to right. The
//! initial input goes to step 0, and each step's output becomes the next
//! step's input. The run ends either when every step has returned
//! (success) or at the first step that fails (abort). A failed run keeps no
//! partial result and rolls nothing back.

use crate::error::{StepError, WorkflowError};
use agency_toolkit_core::{Named, NamedRegistry};
use rootcause::prelude::*;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Signature of a workflow step function.
pub type StepFn = Arc<dyn Fn(JsonValue) -> Result<JsonValue, StepError> + Send + Sync>;

/// One step of a workflow.
#[derive(Clone)]
pub struct WorkflowStep {
    /// Step name, used in error context.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    func: StepFn,
}

impl WorkflowStep {
    /// Creates a step.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(JsonValue) -> Result<JsonValue, StepError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
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

    /// Runs the step function.
    ///
    /// # Errors
    ///
    /// Returns whatever the step function returns.
    pub fn run(&self, input: JsonValue) -> Result<JsonValue, StepError> {
        (self.func)(input)
    }
}

impl fmt::Debug for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowStep")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A named pipeline of steps.
#[derive(Debug, Clone)]
pub struct Workflow {
    /// Unique workflow name.
    pub name: String,
    /// Steps, in execution order.
    pub steps: Vec<WorkflowStep>,
    /// Human-readable description.
    pub description: String,
    /// Free-form metadata.
    pub metadata: Map<String, JsonValue>,
}

impl Workflow {
    /// Creates a workflow with no steps.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            description: String::new(),
            metadata: Map::new(),
        }
    }

    /// Appends a step.
    #[must_use]
    pub fn with_step(mut self, step: WorkflowStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Runs every step in order, threading each output into the next step.
    ///
    /// # Errors
    ///
    /// Returns `StepFailed` (over the step's own error) for the first step
    /// that fails; later steps do not run.
    pub fn execute(&self, input: JsonValue) -> Result<JsonValue, Report<WorkflowError>> {
        let mut value = input;
        for (index, step) in self.steps.iter().enumerate() {
            debug!(workflow = %self.name, step = %step.name, index, "running workflow step");
            value = step.run(value).context(WorkflowError::StepFailed {
                workflow: self.name.clone(),
                step: step.name.clone(),
                index,
            })?;
        }
        Ok(value)
    }
}

impl Named for Workflow {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Registry of workflows.
#[derive(Debug, Clone, Default)]
pub struct WorkflowRegistry {
    workflows: NamedRegistry<Workflow>,
}

impl WorkflowRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a workflow, replacing any workflow with the same name.
    pub fn register(&mut self, workflow: Workflow) {
        self.workflows.register(workflow);
    }

    /// Gets a workflow by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Workflow> {
        self.workflows.get(name)
    }

    /// Names of all registered workflows.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.workflows.list()
    }

    /// Executes the named workflow on `input`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no workflow has that name, otherwise whatever
    /// [`Workflow::execute`] returns.
    pub fn execute(&self, name: &str, input: JsonValue) -> Result<JsonValue, Report<WorkflowError>> {
        let workflow = self.workflows.get(name).ok_or_else(|| WorkflowError::NotFound {
            name: name.to_string(),
        })?;
        workflow.execute(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn add_one() -> WorkflowStep {
        WorkflowStep::new("add_one", |v| {
            v.as_i64()
                .map(|n| json!(n + 1))
                .ok_or_else(|| StepError::new("expected an integer"))
        })
    }

    fn times_two() -> WorkflowStep {
        WorkflowStep::new("times_two", |v| {
            v.as_i64()
                .map(|n| json!(n * 2))
                .ok_or_else(|| StepError::new("expected an integer"))
        })
    }

    #[test]
    fn steps_run_in_declaration_order() {
        let mut registry = WorkflowRegistry::new();
        registry.register(Workflow::new("inc_then_double").with_step(add_one()).with_step(times_two()));
        registry.register(Workflow::new("double_then_inc").with_step(times_two()).with_step(add_one()));

        assert_eq!(registry.execute("inc_then_double", json!(5)).expect("run"), json!(12));
        assert_eq!(registry.execute("double_then_inc", json!(5)).expect("run"), json!(11));
    }

    #[test]
    fn empty_workflow_returns_input() {
        let workflow = Workflow::new("noop");
        assert_eq!(workflow.execute(json!({"a": 1})).expect("run"), json!({"a": 1}));
    }

    #[test]
    fn unknown_workflow_fails() {
        let registry = WorkflowRegistry::new();
        let err = registry.execute("ghost", json!(1)).unwrap_err();
        assert!(err.to_string().contains("Workflow 'ghost' not found"));
    }

    #[test]
    fn failing_step_aborts_remaining_steps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let workflow = Workflow::new("breaks")
            .with_step(add_one())
            .with_step(WorkflowStep::new("explode", |_| Err(StepError::new("boom"))))
            .with_step(WorkflowStep::new("count", move |v| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(v)
            }));

        let err = workflow.execute(json!(1)).unwrap_err();
        assert!(err.to_string().contains("failed at step 1 'explode'"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn registration_keeps_metadata() {
        let mut registry = WorkflowRegistry::new();
        registry.register(
            Workflow::new("rows")
                .with_description("Row cleanup")
                .with_metadata("owner", "ops")
                .with_step(add_one().with_description("Adds one")),
        );

        let workflow = registry.get("rows").expect("registered");
        assert_eq!(workflow.description, "Row cleanup");
        assert_eq!(workflow.metadata.get("owner"), Some(&json!("ops")));
        assert_eq!(workflow.steps[0].description, "Adds one");
        assert_eq!(registry.list(), vec!["rows"]);
    }
}
