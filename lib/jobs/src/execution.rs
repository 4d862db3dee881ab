//! Execution log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Status of one job execution record.
///
/// Serializes as a plain string. Strings that are not one of the known
/// statuses round-trip through [`ExecutionStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ExecutionStatus {
    /// The run has begun.
    Started,
    /// The run finished without errors.
    Completed,
    /// The run finished, but some items failed.
    CompletedWithErrors,
    /// The run was aborted by an error.
    Failed,
    /// Any other caller-defined status.
    Other(String),
}

impl ExecutionStatus {
    /// The wire form of this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Started => "started",
            Self::Completed => "completed",
            Self::CompletedWithErrors => "completed_with_errors",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ExecutionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "started" => Self::Started,
            "completed" => Self::Completed,
            "completed_with_errors" => Self::CompletedWithErrors,
            "failed" => Self::Failed,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ExecutionStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ExecutionStatus> for String {
    fn from(status: ExecutionStatus) -> Self {
        match status {
            ExecutionStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// One entry in a job's execution log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobExecution {
    /// When the record was appended.
    pub timestamp: DateTime<Utc>,
    /// Outcome status.
    pub status: ExecutionStatus,
    /// Result payload, if any.
    pub result: Option<JsonValue>,
    /// Error message, if any.
    pub error: Option<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

impl JobExecution {
    /// Creates a record with the given status.
    ///
    /// The timestamp is replaced when the record is logged.
    #[must_use]
    pub fn new(status: impl Into<ExecutionStatus>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.into(),
            result: None,
            error: None,
            metadata: Map::new(),
        }
    }

    /// A `completed` record carrying `result`.
    #[must_use]
    pub fn completed(result: JsonValue) -> Self {
        Self::new(ExecutionStatus::Completed).with_result(result)
    }

    /// A `failed` record carrying `error`.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self::new(ExecutionStatus::Failed).with_error(error)
    }

    /// Sets the result payload.
    #[must_use]
    pub fn with_result(mut self, result: JsonValue) -> Self {
        self.result = Some(result);
        self
    }

    /// Sets the error message.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_statuses_use_snake_case() {
        assert_eq!(ExecutionStatus::CompletedWithErrors.as_str(), "completed_with_errors");
        assert_eq!(
            serde_json::to_value(ExecutionStatus::Failed).expect("serialize"),
            json!("failed")
        );
    }

    #[test]
    fn free_form_status_round_trips() {
        let status: ExecutionStatus = serde_json::from_value(json!("paused")).expect("deserialize");
        assert_eq!(status, ExecutionStatus::Other("paused".to_string()));
        assert_eq!(serde_json::to_value(&status).expect("serialize"), json!("paused"));
    }

    #[test]
    fn parsing_known_string_yields_variant() {
        assert_eq!(ExecutionStatus::from("completed"), ExecutionStatus::Completed);
        assert_eq!(ExecutionStatus::from("started"), ExecutionStatus::Started);
    }

    #[test]
    fn builders_fill_fields() {
        let record = JobExecution::failed("boom").with_metadata("row", 3);
        assert_eq!(record.status, ExecutionStatus::Failed);
        assert_eq!(record.error.as_deref(), Some("boom"));
        assert!(record.result.is_none());
        assert_eq!(record.metadata.get("row"), Some(&json!(3)));

        let record = JobExecution::completed(json!({"asset_id": "ast_1"}));
        assert_eq!(record.result, Some(json!({"asset_id": "ast_1"})));
    }
}
