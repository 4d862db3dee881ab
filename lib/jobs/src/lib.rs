//! Job tracking.
//!
//! A job is an audit record for one generator run: its name, a snapshot of
//! its parameters and an append-only log of execution records. Records are
//! stamped on append and are never edited, removed or reordered.

pub mod execution;
pub mod registry;

pub use execution::{ExecutionStatus, JobExecution};
pub use registry::{Job, JobRegistry};
