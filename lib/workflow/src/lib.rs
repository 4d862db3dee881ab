//! Transforms and workflows.
//!
//! - **Payloads**: the values transforms consume and produce (structured
//!   data, text or raw bytes), each tagged with a [`PayloadKind`]
//! - **Transforms**: named unary functions with declared source and target
//!   kinds, applied by name
//! - **Workflows**: named, ordered step pipelines; each step receives the
//!   previous step's output and the first failure aborts the run

pub mod error;
pub mod payload;
pub mod process;
pub mod transform;

pub use error::{StepError, TransformError, WorkflowError};
pub use payload::{Payload, PayloadKind};
pub use process::{Workflow, WorkflowRegistry, WorkflowStep};
pub use transform::{Transform, TransformRegistry};
