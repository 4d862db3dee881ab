//! Batch CSV processing.
//!
//! Rows are read with the CSV header as keys and processed one at a time,
//! in file order. [`process_csv_workflow`] runs each row through a
//! registered workflow and stops at the first failure.
//! [`batch_process_with_callback`] runs a caller-supplied function and
//! handles row failures according to an [`ErrorPolicy`].

use crate::error::GenerateError;
use crate::toolkit::Toolkit;
use agency_toolkit_assets::{Record, io};
use agency_toolkit_jobs::{ExecutionStatus, JobExecution};
use agency_toolkit_workflow::{Workflow, WorkflowStep};
use rootcause::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{instrument, warn};

/// What to do when a row fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Record the failure and continue.
    #[default]
    Skip,
    /// Stop at the first failure and return it.
    Raise,
    /// Record the failure, emit a warning and continue.
    Log,
}

impl ErrorPolicy {
    /// The name accepted by [`ErrorPolicy::from_str`].
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Raise => "raise",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(Self::Skip),
            "raise" => Ok(Self::Raise),
            "log" => Ok(Self::Log),
            other => Err(GenerateError::UnsupportedPolicy {
                policy: other.to_string(),
            }),
        }
    }
}

/// A row the callback failed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    /// Zero-based row index, not counting the header.
    pub row_index: usize,
    /// The row as read.
    pub row_data: Record,
    /// The callback's error message.
    pub error: String,
}

/// Outcome of [`batch_process_with_callback`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport<T> {
    /// Callback results for the rows that succeeded, in row order.
    pub results: Vec<T>,
    /// Rows that failed, in row order.
    pub errors: Vec<RowError>,
    /// Rows read.
    pub total: usize,
    /// Rows that succeeded.
    pub successful: usize,
    /// Rows that failed.
    pub failed: usize,
}

impl<T> BatchReport<T> {
    /// Returns true if every row succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

fn read_input(csv_path: &Path, output_dir: Option<&Path>) -> Result<Vec<Record>, Report<GenerateError>> {
    let rows = io::read_rows(csv_path).context(GenerateError::Input {
        path: csv_path.to_path_buf(),
    })?;
    if let Some(dir) = output_dir {
        io::create_dir(dir).context(GenerateError::Output {
            path: dir.to_path_buf(),
        })?;
    }
    Ok(rows)
}

/// Runs every CSV row through the named workflow, returning the outputs in
/// row order.
///
/// `output_dir` is created if given; steps decide what to write there.
///
/// # Errors
///
/// Returns an input error if the CSV cannot be read, or `Row` over the
/// workflow error for the first row that fails. The failure is also
/// logged on the `batch_csv_processing` job.
#[instrument(skip(toolkit))]
pub fn process_csv_workflow(
    toolkit: &mut Toolkit,
    csv_path: &Path,
    workflow_name: &str,
    output_dir: Option<&Path>,
) -> Result<Vec<JsonValue>, Report<GenerateError>> {
    let mut params = Record::new();
    params.insert("csv_path".to_string(), csv_path.display().to_string().into());
    params.insert("workflow_name".to_string(), workflow_name.into());

    toolkit.tracked(
        "batch_csv_processing",
        params,
        |toolkit| {
            let rows = read_input(csv_path, output_dir)?;
            let mut results = Vec::with_capacity(rows.len());
            for (index, row) in rows.into_iter().enumerate() {
                let output = toolkit
                    .workflows
                    .execute(workflow_name, JsonValue::Object(row))
                    .context(GenerateError::Row { index })?;
                results.push(output);
            }
            Ok(results)
        },
        |results| JobExecution::completed(json!({ "rows_processed": results.len() })),
    )
}

/// Registers a workflow built from `steps`, replacing any workflow with the
/// same name.
pub fn define_batch_workflow(
    toolkit: &mut Toolkit,
    name: &str,
    steps: Vec<WorkflowStep>,
    description: &str,
) {
    let workflow = steps
        .into_iter()
        .fold(Workflow::new(name).with_description(description), Workflow::with_step);
    toolkit.workflows.register(workflow);
}

/// Runs `process` on every CSV row, collecting results and row failures.
///
/// Under [`ErrorPolicy::Raise`] the first failure is logged on the job and
/// returned; otherwise every row is attempted and the job ends
/// `completed_with_errors` if any row failed.
///
/// # Errors
///
/// Returns an input error if the CSV cannot be read. Under
/// [`ErrorPolicy::Raise`] the first row's error is returned as a child of a
/// `Callback` context.
#[instrument(skip(toolkit, process))]
pub fn batch_process_with_callback<T, E, F>(
    toolkit: &mut Toolkit,
    csv_path: &Path,
    mut process: F,
    output_dir: Option<&Path>,
    policy: ErrorPolicy,
) -> Result<BatchReport<T>, Report<GenerateError>>
where
    F: FnMut(&Record) -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut params = Record::new();
    params.insert("csv_path".to_string(), csv_path.display().to_string().into());

    toolkit.tracked(
        "batch_callback_processing",
        params,
        |_| {
            let rows = read_input(csv_path, output_dir)?;
            let total = rows.len();
            let mut results = Vec::new();
            let mut errors = Vec::new();

            for (index, row) in rows.into_iter().enumerate() {
                match process(&row) {
                    Ok(result) => results.push(result),
                    Err(error) => {
                        match policy {
                            ErrorPolicy::Raise => {
                                return Err(
                                    Report::new(error).context(GenerateError::Callback { index })
                                );
                            }
                            ErrorPolicy::Log => {
                                warn!(row = index, %error, "Error processing row");
                            }
                            ErrorPolicy::Skip => {}
                        }
                        errors.push(RowError {
                            row_index: index,
                            row_data: row,
                            error: error.to_string(),
                        });
                    }
                }
            }

            Ok(BatchReport {
                successful: results.len(),
                failed: errors.len(),
                total,
                results,
                errors,
            })
        },
        |report| {
            let status = if report.is_clean() {
                ExecutionStatus::Completed
            } else {
                ExecutionStatus::CompletedWithErrors
            };
            JobExecution::new(status).with_result(json!({
                "total_rows": report.total,
                "successful": report.successful,
                "errors": report.failed,
            }))
        },
    )
}
