//! Job records and the job registry.

use crate::execution::JobExecution;
use agency_toolkit_core::JobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use tracing::debug;

/// A tracked job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier.
    pub id: JobId,
    /// Job name, e.g. `social_post_generation`.
    pub name: String,
    /// Snapshot of the parameters the job was created with.
    pub params: Map<String, JsonValue>,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// Execution log, oldest first.
    #[serde(default)]
    pub executions: Vec<JobExecution>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

impl Job {
    /// The most recent execution record.
    #[must_use]
    pub fn last_execution(&self) -> Option<&JobExecution> {
        self.executions.last()
    }
}

/// In-memory registry of jobs.
#[derive(Debug, Clone, Default)]
pub struct JobRegistry {
    jobs: HashMap<JobId, Job>,
}

impl JobRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a job with a fresh id and returns a copy of it.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        params: Map<String, JsonValue>,
        metadata: Option<Map<String, JsonValue>>,
    ) -> Job {
        let job = Job {
            id: JobId::new(),
            name: name.into(),
            params,
            created_at: Utc::now(),
            executions: Vec::new(),
            metadata: metadata.unwrap_or_default(),
        };
        debug!(job_id = %job.id, name = %job.name, "created job");
        self.jobs.insert(job.id, job.clone());
        job
    }

    /// Gets a job by id.
    #[must_use]
    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(&id)
    }

    /// Stamps `record` with the current time and appends it to the job's
    /// log.
    ///
    /// Returns false, without changing anything, if the job is unknown.
    pub fn log_execution(&mut self, id: JobId, mut record: JobExecution) -> bool {
        let Some(job) = self.jobs.get_mut(&id) else {
            debug!(job_id = %id, "ignoring execution record for unknown job");
            return false;
        };
        record.timestamp = Utc::now();
        debug!(job_id = %id, status = %record.status, "logged job execution");
        job.executions.push(record);
        true
    }

    /// Lists jobs, oldest first, optionally only those with the given name.
    #[must_use]
    pub fn list(&self, name: Option<&str>) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self
            .jobs
            .values()
            .filter(|job| name.is_none_or(|n| job.name == n))
            .collect();
        jobs.sort_by_key(|job| (job.created_at, job.id));
        jobs
    }

    /// Number of tracked jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns whether no jobs are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
