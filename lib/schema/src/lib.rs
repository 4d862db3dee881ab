//! Template schemas and validation rules.
//!
//! - **Templates**: ordered field declarations checked against data records
//!   (required-ness and a closed set of field types)
//! - **Rules**: named checks aggregated into one outcome, routed by severity
//! - **Outcomes**: the validity flag plus ordered errors and warnings every
//!   validation produces

pub mod error;
pub mod field;
pub mod outcome;
pub mod rule;
pub mod template;

pub use error::SchemaError;
pub use field::{FieldDefinition, FieldType};
pub use outcome::ValidationOutcome;
pub use rule::{RuleRegistry, Severity, ValidationRule};
pub use template::{TemplateDefinition, TemplateRegistry};
