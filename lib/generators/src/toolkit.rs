//! The toolkit: every registry a generator needs, owned in one place.

use crate::error::GenerateError;
use crate::{briefing, social};
use agency_toolkit_assets::{Asset, AssetRegistry, Record};
use agency_toolkit_core::message_chain;
use agency_toolkit_jobs::{JobExecution, JobRegistry};
use agency_toolkit_schema::{RuleRegistry, TemplateRegistry};
use agency_toolkit_workflow::{TransformRegistry, WorkflowRegistry};
use rootcause::prelude::*;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

/// Owns the template, transform, workflow, rule, asset and job registries.
///
/// [`Toolkit::new`] comes with the built-in social post and briefing
/// templates and transforms registered. [`Toolkit::default`] is empty.
#[derive(Debug, Clone, Default)]
pub struct Toolkit {
    /// Template schemas.
    pub templates: TemplateRegistry,
    /// Content transforms.
    pub transforms: TransformRegistry,
    /// Sequential workflows.
    pub workflows: WorkflowRegistry,
    /// Validation rules.
    pub rules: RuleRegistry,
    /// Generated assets.
    pub assets: AssetRegistry,
    /// Job audit log.
    pub jobs: JobRegistry,
}

impl Toolkit {
    /// Creates a toolkit with the built-in templates and transforms.
    #[must_use]
    pub fn new() -> Self {
        let mut toolkit = Self::default();
        social::register(&mut toolkit);
        briefing::register(&mut toolkit);
        toolkit
    }

    /// Validates `data` against the named template.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` carrying every validation error.
    pub fn require_valid(&self, template: &str, data: &Record) -> Result<(), Report<GenerateError>> {
        let outcome = self.templates.validate(template, data);
        for warning in &outcome.warnings {
            warn!(template, warning = %warning, "template validation warning");
        }
        if outcome.valid {
            Ok(())
        } else {
            Err(GenerateError::InvalidData {
                template: template.to_string(),
                errors: outcome.errors,
            }
            .into())
        }
    }

    /// Sets a metadata entry on both the registry's copy of an asset and
    /// the caller's copy.
    pub fn annotate(&mut self, asset: &mut Asset, key: &str, value: impl Into<JsonValue>) {
        let value = value.into();
        self.assets.annotate(asset.id, key, value.clone());
        asset.metadata.insert(key.to_string(), value);
    }

    /// Runs `body` under a new job named `job_name`.
    ///
    /// On success the record built by `record` is appended to the job. On
    /// failure a `failed` record holding the error's message chain is
    /// appended and the error is returned unchanged.
    pub(crate) fn tracked<T>(
        &mut self,
        job_name: &str,
        params: Record,
        body: impl FnOnce(&mut Self) -> Result<T, Report<GenerateError>>,
        record: impl FnOnce(&T) -> JobExecution,
    ) -> Result<T, Report<GenerateError>> {
        let job = self.jobs.create(job_name, params, None);
        match body(self) {
            Ok(value) => {
                let execution = record(&value);
                info!(job_id = %job.id, job = job_name, status = %execution.status, "job finished");
                self.jobs.log_execution(job.id, execution);
                Ok(value)
            }
            Err(error) => {
                let message = message_chain(&error);
                info!(job_id = %job.id, job = job_name, error = %message, "job failed");
                self.jobs.log_execution(job.id, JobExecution::failed(message));
                Err(error)
            }
        }
    }
}

/// The `completed` record generators log for a single asset.
pub(crate) fn asset_completed(asset: &Asset) -> JobExecution {
    JobExecution::completed(serde_json::json!({ "asset_id": asset.id.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_toolkit_jobs::ExecutionStatus;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn new_registers_builtins() {
        let toolkit = Toolkit::new();
        assert!(toolkit.templates.get("social_post").is_some());
        assert!(toolkit.templates.get("project_briefing").is_some());
        assert!(toolkit.transforms.get("text_to_social_image").is_some());
        assert!(toolkit.transforms.get("briefing_to_markdown").is_some());
        assert!(toolkit.transforms.get("markdown_to_pdf").is_some());
    }

    #[test]
    fn default_is_empty() {
        let toolkit = Toolkit::default();
        assert!(toolkit.templates.list().is_empty());
        assert!(toolkit.transforms.list().is_empty());
        assert!(toolkit.jobs.is_empty());
    }

    #[test]
    fn tracked_logs_failure_and_returns_error() {
        let mut toolkit = Toolkit::default();
        let result: Result<(), _> = toolkit.tracked(
            "doomed",
            Record::new(),
            |_| {
                Err(GenerateError::UnsupportedFormat {
                    format: "docx".to_string(),
                }
                .into())
            },
            |_| JobExecution::completed(json!(null)),
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Unsupported format: docx"));

        let jobs = toolkit.jobs.list(Some("doomed"));
        let last = jobs[0].last_execution().expect("logged");
        assert_eq!(last.status, ExecutionStatus::Failed);
        assert_eq!(last.error.as_deref(), Some("Unsupported format: docx"));
    }

    #[test]
    fn failed_record_holds_message_chain() {
        let mut toolkit = Toolkit::default();
        let result: Result<(), _> = toolkit.tracked(
            "layered",
            Record::new(),
            |_| {
                Err(Report::new(GenerateError::UnsupportedFormat {
                    format: "docx".to_string(),
                })
                .context(GenerateError::Row { index: 2 }))
            },
            |_| JobExecution::completed(json!(null)),
        );
        assert!(result.is_err());

        let job = toolkit.jobs.list(Some("layered"))[0];
        assert_eq!(
            job.last_execution().and_then(|e| e.error.as_deref()),
            Some("failed to process row 2: Unsupported format: docx")
        );
    }

    #[test]
    fn job_failure_is_silent_at_warn_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_writer(move || writer.clone())
            .finish();

        let mut toolkit = Toolkit::default();
        tracing::subscriber::with_default(subscriber, || {
            let result: Result<(), _> = toolkit.tracked(
                "quiet",
                Record::new(),
                |_| {
                    Err(GenerateError::UnsupportedFormat {
                        format: "docx".to_string(),
                    }
                    .into())
                },
                |_| JobExecution::completed(json!(null)),
            );
            assert!(result.is_err());
        });

        assert!(captured.0.lock().expect("lock").is_empty());
    }

    #[test]
    fn tracked_logs_success_record() {
        let mut toolkit = Toolkit::default();
        let value = toolkit
            .tracked("fine", Record::new(), |_| Ok(7), |n| JobExecution::completed(json!(n)))
            .expect("runs");

        assert_eq!(value, 7);
        let jobs = toolkit.jobs.list(Some("fine"));
        assert_eq!(jobs[0].executions.len(), 1);
        assert_eq!(jobs[0].executions[0].result, Some(json!(7)));
    }

    #[test]
    fn require_valid_reports_all_errors() {
        let toolkit = Toolkit::new();
        let err = toolkit.require_valid("social_post", &Record::new()).unwrap_err();
        assert!(err.to_string().contains("Invalid social_post data"));
    }
}
