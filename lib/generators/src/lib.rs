//! Deliverable generators.
//!
//! Every generator runs against a [`Toolkit`], which owns the registries it
//! needs. A run validates its input against a template, creates an asset,
//! applies transforms to derive content, optionally writes files and
//! records the outcome on a job.
//!
//! - **Social posts**: placeholder post images from text and style
//! - **Briefings**: project briefings as markdown or PDF
//! - **Folder structures**: predefined or custom project scaffolding
//! - **Batch**: CSV rows through workflows or callbacks, with a row-level
//!   error policy

pub mod batch;
pub mod briefing;
pub mod error;
pub mod social;
pub mod structure;
pub mod toolkit;

pub use batch::{
    BatchReport, ErrorPolicy, RowError, batch_process_with_callback, define_batch_workflow,
    process_csv_workflow,
};
pub use briefing::{
    BriefingData, BriefingFormat, generate_briefing, generate_briefings_from_csv,
};
pub use error::GenerateError;
pub use social::{SocialPostRequest, batch_generate_social_posts, generate_social_post};
pub use structure::{
    FOLDER_STRUCTURES, FolderStructure, available_structures, generate_custom_structure,
    generate_folder_structure,
};
pub use toolkit::Toolkit;
