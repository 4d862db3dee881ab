//! Core types and utilities for agency-toolkit.
//!
//! This crate provides the foundational pieces shared by every other crate
//! in the workspace: the rootcause-backed `Result` alias, strongly-typed
//! identifiers for assets and jobs, and the generic name-keyed registry that
//! backs templates, transforms, workflows and rules.

pub mod error;
pub mod id;
pub mod registry;

pub use error::{Result, message_chain};
pub use id::{AssetId, JobId};
pub use registry::{Named, NamedRegistry};
